/*!
ref: https://www.rfc-editor.org/rfc/rfc4035#section-5.3

Walks the chain of trust downward from the nearest configured anchor to
a signer name, fetching DS and DNSKEY RRsets from upstream one zone cut
at a time. Each hop's outcome is memoized in the key cache so repeat
signers under the same zone don't re-walk. A DS proven absent by
NSEC/NSEC3 denial ends the walk at `Null` (insecure); any DS or DNSKEY
that fails to validate ends it at `Bad` (bogus).
*/

use crate::clock::Clock;
use crate::dns::message::Message;
use crate::dns::name::Name;
use crate::dns::rdata::RData;
use crate::dns::record::RRset;
use crate::dns::{Class, TYPE_DNSKEY, TYPE_DS, TYPE_NSEC, TYPE_NSEC3};
use crate::keycache::{KeyCache, KeyEntry, TrustAnchorStore};
use crate::resolver::transport::Transport;
use crate::validate::{nsec, nsec3, rrsig};

pub async fn find_key(
    signer: &Name,
    class: Class,
    anchors: &TrustAnchorStore,
    keys: &mut KeyCache,
    transport: &dyn Transport,
    server: &str,
    clock: &dyn Clock,
    max_depth: u32,
    max_nsec3_iterations: u32,
) -> KeyEntry {
    let span = tracing::debug_span!("find_key", %signer);
    let _enter = span.enter();

    let now = clock.now();
    if let Some(cached) = keys.find(signer, class, now) {
        return cached;
    }

    let Some(anchor) = anchors.find(signer, class).cloned() else {
        tracing::debug!("no trust anchor covers this name, INSECURE");
        return cache_and_return(keys, signer, class, KeyEntry::Null, 0, now);
    };
    let anchor_zone = anchor.name.clone();

    let mut zone_keys = match resolve_anchor_keys(&anchor_zone, &anchor, transport, server, now).await {
        Some(rrset) => rrset,
        None => return cache_and_return(keys, signer, class, KeyEntry::Bad, 0, now),
    };
    keys.store(&anchor_zone, class, KeyEntry::Good(zone_keys.clone()), zone_keys.ttl, now);

    let mut chain = vec![signer.clone()];
    let mut cur = signer.clone();
    while cur != anchor_zone {
        let Some(parent) = cur.parent() else { break };
        chain.push(parent.clone());
        cur = parent;
    }
    chain.pop(); // drop anchor_zone itself, already resolved
    chain.reverse(); // anchor_zone's child first, signer last

    for (depth, zone) in chain.iter().enumerate() {
        if depth as u32 >= max_depth {
            return cache_and_return(keys, signer, class, KeyEntry::Bad, 0, now);
        }

        match step_down(zone, &zone_keys, transport, server, now, max_nsec3_iterations).await {
            StepOutcome::Insecure => return cache_and_return(keys, signer, class, KeyEntry::Null, 300, now),
            StepOutcome::Bad => return cache_and_return(keys, signer, class, KeyEntry::Bad, 0, now),
            StepOutcome::Keys(rrset) => {
                keys.store(zone, class, KeyEntry::Good(rrset.clone()), rrset.ttl, now);
                zone_keys = rrset;
            }
        }
    }

    KeyEntry::Good(zone_keys)
}

fn cache_and_return(keys: &mut KeyCache, name: &Name, class: Class, entry: KeyEntry, ttl: u32, now: u32) -> KeyEntry {
    keys.store(name, class, entry.clone(), ttl, now);
    entry
}

/// Resolves the DNSKEY RRset at a configured anchor: used directly if
/// the anchor itself is a (self-signed, trusted) DNSKEY RRset, fetched
/// and matched against the DS digest otherwise.
async fn resolve_anchor_keys(zone: &Name, anchor: &RRset, transport: &dyn Transport, server: &str, now: u32) -> Option<RRset> {
    if anchor.rtype == TYPE_DNSKEY {
        return rrsig::verify_rrset(anchor, anchor, now).ok().map(|_| anchor.clone());
    }

    let dnskeys = fetch_rrset(transport, server, zone, TYPE_DNSKEY, anchor.class).await?;
    verify_against_ds(zone, &dnskeys, anchor, now)
}

enum StepOutcome {
    Keys(RRset),
    Insecure,
    Bad,
}

/// One zone-cut hop: fetch DS for `zone` (signed by `parent_keys`), then
/// fetch and validate `zone`'s own DNSKEY RRset against that DS.
async fn step_down(
    zone: &Name,
    parent_keys: &RRset,
    transport: &dyn Transport,
    server: &str,
    now: u32,
    max_nsec3_iterations: u32,
) -> StepOutcome {
    let ds_msg = match query(transport, server, zone, TYPE_DS, parent_keys.class).await {
        Some(m) => m,
        None => return StepOutcome::Bad,
    };

    let ds_rrsets = crate::cache::store::group_rrsets(&ds_msg.answers);
    let ds_set = ds_rrsets.get(&(zone.clone(), TYPE_DS));

    match ds_set {
        Some(ds) => {
            let ds = attach_sigs(ds.clone(), &ds_msg.answers);
            if rrsig::verify_rrset(&ds, parent_keys, now).is_err() {
                return StepOutcome::Bad;
            }
            let dnskeys = match fetch_rrset(transport, server, zone, TYPE_DNSKEY, parent_keys.class).await {
                Some(r) => r,
                None => return StepOutcome::Bad,
            };
            match verify_against_ds(zone, &dnskeys, &ds, now) {
                Some(rrset) => StepOutcome::Keys(rrset),
                None => StepOutcome::Bad,
            }
        }
        None => {
            if proves_no_ds(zone, &ds_msg, max_nsec3_iterations) {
                StepOutcome::Insecure
            } else {
                StepOutcome::Bad
            }
        }
    }
}

fn proves_no_ds(zone: &Name, msg: &Message, max_nsec3_iterations: u32) -> bool {
    let nsecs: Vec<RRset> = crate::cache::store::group_rrsets(&msg.authorities)
        .into_iter()
        .filter(|((_, t), _)| *t == TYPE_NSEC)
        .map(|(_, v)| v)
        .collect();
    if !nsecs.is_empty() {
        return nsec::proves_nodata(zone, TYPE_DS, &nsecs);
    }

    let nsec3s: Vec<RRset> = crate::cache::store::group_rrsets(&msg.authorities)
        .into_iter()
        .filter(|((_, t), _)| *t == TYPE_NSEC3)
        .map(|(_, v)| v)
        .collect();
    let nsec3s = nsec3::strip_unsupported_algorithms(&nsec3s);
    if nsec3s.is_empty() || nsec3::exceeds_iteration_cap(&nsec3s, max_nsec3_iterations) {
        return false;
    }
    nsec3::proves_no_ds(zone, &nsec3s) || nsec3::proves_opt_out_delegation(zone, &nsec3s)
}

/// Finds a DNSKEY in `dnskeys` matched by a DS digest, then confirms
/// the DNSKEY RRset is self-signed by that key (RFC 4035 §5.3.1).
fn verify_against_ds(zone: &Name, dnskeys: &RRset, ds_set: &RRset, now: u32) -> Option<RRset> {
    let ds_records: Vec<&crate::dns::rdata::dnssec::ds::DS> =
        ds_set.records.iter().filter_map(|r| match r { RData::DS(d) => Some(d), _ => None }).collect();

    let matched = dnskeys.records.iter().any(|r| match r {
        RData::DNSKey(k) => ds_records.iter().any(|ds| ds.matches(zone, k)),
        _ => false,
    });
    if !matched {
        return None;
    }

    rrsig::verify_rrset(dnskeys, dnskeys, now).ok().map(|_| dnskeys.clone())
}

async fn fetch_rrset(transport: &dyn Transport, server: &str, name: &Name, qtype: u16, class: Class) -> Option<RRset> {
    let msg = query(transport, server, name, qtype, class).await?;
    let sets = crate::cache::store::group_rrsets(&msg.answers);
    let set = sets.get(&(name.clone(), qtype))?.clone();
    Some(attach_sigs(set, &msg.answers))
}

fn attach_sigs(mut rrset: RRset, answers: &[crate::dns::record::Record]) -> RRset {
    for rec in answers {
        if let RData::RRSig(sig) = &rec.rdata {
            if rec.name == rrset.name && sig.type_covered == rrset.rtype {
                let _ = rrset.add_sig(sig.clone());
            }
        }
    }
    rrset
}

async fn query(transport: &dyn Transport, server: &str, name: &Name, qtype: u16, class: Class) -> Option<Message> {
    let mut msg = Message::query(name.clone(), qtype, class);
    msg.header.with_cd(true);
    msg.set_opt(4096, true, crate::dns::rdata::Opt::default());
    transport.send(&msg, server).await.ok()
}
