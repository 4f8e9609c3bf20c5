/*!
ref: https://www.rfc-editor.org/rfc/rfc4035#section-5

The validating resolver state machine: forward the client's query
upstream with checking disabled, classify the shape of the response,
find the DNSKEY RRset covering each signed set that needs checking,
verify signatures and denial-of-existence proofs, then finalize into a
Secure (AD=1), Insecure (pass-through), or Bogus (SERVFAIL + EDE)
response. Mirrors `components::resolver::forward`'s forward/receive
split, generalized from a single UDP round trip to the full chain walk.
*/

pub mod findkey;
pub mod transport;

use crate::cache::store::group_rrsets;
use crate::cache::Cache;
use crate::clock::Clock;
use crate::config::Config;
use crate::dns::message::Message;
use crate::dns::name::Name;
use crate::dns::rdata::{Opt, RData, TXT};
use crate::dns::record::Record;
use crate::dns::{Class, Type, RCODE_NOERROR, RCODE_SERVFAIL, TYPE_CNAME, TYPE_NS, TYPE_NSEC, TYPE_NSEC3, TYPE_SOA};
use crate::error::ede;
use crate::keycache::{KeyCache, KeyEntry, TrustAnchorStore};
use crate::validate::classify::final_chain_name;
use crate::validate::{classify, nsec, nsec3, rrsig, Classification};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityStatus {
    Secure,
    Insecure,
    Bogus,
    Indeterminate,
}

pub struct ValidatingResolver {
    transport: Box<dyn transport::Transport>,
    trust_anchors: TrustAnchorStore,
    key_cache: Mutex<KeyCache>,
    cache: Mutex<Cache>,
    config: Config,
    clock: Box<dyn Clock>,
}

impl ValidatingResolver {
    pub fn new(
        transport: Box<dyn transport::Transport>,
        trust_anchors: TrustAnchorStore,
        config: Config,
        clock: Box<dyn Clock>,
    ) -> Self {
        let key_cache = KeyCache::new(config.max_cache_ttl);
        let cache = Cache::new(config.max_cache_entries, config.max_cache_ttl, config.max_negative_cache_ttl);
        ValidatingResolver { transport, trust_anchors, key_cache: Mutex::new(key_cache), cache: Mutex::new(cache), config, clock }
    }

    /// Resolves `query` against `server`, returning the response the
    /// client should receive: AD set on Secure, SERVFAIL plus an EDE
    /// option on Bogus, passed through unmodified (AD clear) on
    /// Insecure or Indeterminate.
    pub async fn resolve(&self, query: &Message, server: &str) -> Message {
        let Some(question) = query.questions.first().cloned() else {
            return self.servfail(query, ede::OTHER, "no question in query");
        };

        let span = tracing::debug_span!("validate_query", qname = %question.qname(), qtype = question.qtype());
        let _enter = span.enter();

        let mut forwarded = query.clone();
        forwarded.header.with_cd(true).with_rd(true);
        forwarded.set_opt(4096, true, Opt::default());

        let response = match self.transport.send(&forwarded, server).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "upstream query failed");
                return self.servfail(query, ede::NETWORK_ERROR, "upstream query failed");
            }
        };

        let now = self.clock.now();
        self.cache.lock().unwrap().add_message(&response, now);

        let classification = classify(&response);
        let authorities = strip_unsigned_ns(&response.authorities, classification);

        let status = self.validate(question.qname(), question.qtype(), question.qclass(), &response, &authorities, classification, server, now).await;

        self.finalize(query, &response, &authorities, status)
    }

    async fn validate(
        &self,
        qname: &Name,
        qtype: Type,
        class: Class,
        response: &Message,
        authorities: &[Record],
        classification: Classification,
        server: &str,
        now: u32,
    ) -> SecurityStatus {
        let answer_sets = group_rrsets(&response.answers);
        let authority_sets = group_rrsets(authorities);

        let to_verify: Vec<_> = match classification {
            Classification::Positive | Classification::Any | Classification::Cname => {
                let mut sets: Vec<_> = answer_sets.values().filter(|s| s.rtype != crate::dns::TYPE_RRSIG).cloned().collect();
                sets.extend(authority_sets.values().filter(|s| s.rtype != crate::dns::TYPE_RRSIG).cloned());
                sets
            }
            Classification::NoData | Classification::CnameNoData => {
                let mut sets: Vec<_> = authority_sets.values().filter(|s| s.rtype == TYPE_SOA).cloned().collect();
                sets.extend(answer_sets.values().filter(|s| s.rtype == TYPE_CNAME).cloned());
                sets
            }
            Classification::NameError | Classification::CnameNameError => {
                let mut sets: Vec<_> = authority_sets.values().filter(|s| s.rtype == TYPE_SOA).cloned().collect();
                sets.extend(answer_sets.values().filter(|s| s.rtype == TYPE_CNAME).cloned());
                sets
            }
            Classification::Referral => vec![],
        };

        if to_verify.is_empty() && !matches!(classification, Classification::NameError | Classification::CnameNameError | Classification::NoData | Classification::CnameNoData) {
            return SecurityStatus::Insecure;
        }

        let mut overall = SecurityStatus::Insecure;
        let mut saw_secure = false;
        let mut wildcard_expanded_names: Vec<Name> = vec![];

        for rrset in &to_verify {
            let rrset = attach_sigs(rrset.clone(), &response.answers, authorities);
            if rrset.sigs().is_empty() {
                continue;
            }
            let Some(sig) = rrset.sigs().first().cloned() else { continue };
            let signer = sig.signer_name.clone();

            let entry = {
                let mut keys = self.key_cache.lock().unwrap();
                findkey::find_key(
                    &signer,
                    class,
                    &self.trust_anchors,
                    &mut keys,
                    self.transport.as_ref(),
                    server,
                    self.clock.as_ref(),
                    self.config.max_validation_depth,
                    self.config.max_nsec3_iterations,
                )
                .await
            };

            match entry {
                KeyEntry::Null => continue,
                KeyEntry::Bad => {
                    tracing::debug!(%signer, "key chain failed to validate, BOGUS");
                    return SecurityStatus::Bogus;
                }
                KeyEntry::Good(dnskeys) => match rrsig::verify_rrset(&rrset, &dnskeys, now) {
                    Ok(()) => {
                        saw_secure = true;
                        if rrsig::wildcard_expanded(&rrset.name, &sig) {
                            wildcard_expanded_names.push(rrset.name.clone());
                        }
                    }
                    Err(e) => {
                        tracing::debug!(%signer, error = %e, "RRSIG verification failed, BOGUS");
                        return SecurityStatus::Bogus;
                    }
                },
            }
        }

        if matches!(classification, Classification::NameError | Classification::CnameNameError) && saw_secure {
            let target = final_chain_name(qname, qtype, &response.answers);
            let nsecs: Vec<_> = authority_sets.values().filter(|s| s.rtype == TYPE_NSEC).cloned().collect();
            let nsec3s: Vec<_> = nsec3::strip_unsupported_algorithms(&authority_sets.values().filter(|s| s.rtype == TYPE_NSEC3).cloned().collect::<Vec<_>>());
            let proven = if !nsecs.is_empty() {
                nsec::proves_name_error(&target, &nsecs)
            } else {
                !nsec3s.is_empty()
                    && !nsec3::exceeds_iteration_cap(&nsec3s, self.config.max_nsec3_iterations)
                    && nsec3::proves_name_error(&target, &nsec3s)
            };
            if !proven {
                tracing::debug!(%target, ?classification, "denial-of-existence proof for NAMEERROR did not hold, BOGUS");
                return SecurityStatus::Bogus;
            }
        }

        if matches!(classification, Classification::NoData | Classification::CnameNoData) && saw_secure {
            let target = final_chain_name(qname, qtype, &response.answers);
            let nsecs: Vec<_> = authority_sets.values().filter(|s| s.rtype == TYPE_NSEC).cloned().collect();
            let nsec3s: Vec<_> = nsec3::strip_unsupported_algorithms(&authority_sets.values().filter(|s| s.rtype == TYPE_NSEC3).cloned().collect::<Vec<_>>());
            let proven = if !nsecs.is_empty() {
                nsec::proves_nodata(&target, qtype, &nsecs) || nsec::proves_wildcard_nodata(&target, qtype, &nsecs)
            } else {
                !nsec3s.is_empty()
                    && !nsec3::exceeds_iteration_cap(&nsec3s, self.config.max_nsec3_iterations)
                    && nsec3::proves_nodata(&target, qtype, &nsec3s)
            };
            if !proven {
                tracing::debug!(%target, ?classification, "denial-of-existence proof for NODATA did not hold, BOGUS");
                return SecurityStatus::Bogus;
            }
        }

        if !wildcard_expanded_names.is_empty() && saw_secure {
            let nsecs: Vec<_> = authority_sets.values().filter(|s| s.rtype == TYPE_NSEC).cloned().collect();
            let nsec3s: Vec<_> = nsec3::strip_unsupported_algorithms(&authority_sets.values().filter(|s| s.rtype == TYPE_NSEC3).cloned().collect::<Vec<_>>());
            for wild_owner in &wildcard_expanded_names {
                let proven = if !nsecs.is_empty() {
                    nsec::proves_name_error(wild_owner, &nsecs)
                } else {
                    !nsec3s.is_empty()
                        && !nsec3::exceeds_iteration_cap(&nsec3s, self.config.max_nsec3_iterations)
                        && nsec3::proves_name_error(wild_owner, &nsec3s)
                };
                if !proven {
                    tracing::debug!(%wild_owner, "wildcard-expanded answer missing proof that no closer name exists, BOGUS");
                    return SecurityStatus::Bogus;
                }
            }
        }

        if saw_secure {
            overall = SecurityStatus::Secure;
        }
        overall
    }

    fn finalize(&self, original: &Message, response: &Message, authorities: &[Record], status: SecurityStatus) -> Message {
        let mut out = response.clone();
        out.header.with_id(original.header.id());
        out.authorities = authorities.to_vec();

        match status {
            SecurityStatus::Secure => {
                out.header.with_ad(true);
            }
            SecurityStatus::Insecure | SecurityStatus::Indeterminate => {
                out.header.with_ad(false);
            }
            SecurityStatus::Bogus => {
                out.header.with_ad(false).with_rcode(RCODE_SERVFAIL);
                out.answers.clear();
                let (ede_code, reason) = (ede::DNSSEC_BOGUS, "response failed DNSSEC validation");
                tracing::warn!(ede_code, reason, "returning SERVFAIL for BOGUS response");
                let mut opt = Opt::default();
                opt.push_ede(ede_code, reason);
                out.set_opt(4096, true, opt);
                if self.config.add_reason_to_additional {
                    out.additionals.extend(reason_txt_records(&Name::root(), reason, self.config.validation_reason_qclass));
                }
            }
        }
        out
    }

    fn servfail(&self, original: &Message, ede_code: u16, reason: &str) -> Message {
        let mut out = Message::new();
        out.header.with_id(original.header.id()).with_qr(true).with_rcode(RCODE_SERVFAIL);
        out.questions = original.questions.clone();
        let mut opt = Opt::default();
        opt.push_ede(ede_code, reason);
        out.set_opt(4096, true, opt);
        out
    }
}

/// Drops bare NS records from AUTHORITY unless the response is a
/// referral: a NODATA/NAMEERROR/positive answer carrying unsigned NS
/// glue in AUTHORITY is not itself a delegation and shouldn't be taken
/// as one.
fn strip_unsigned_ns(authorities: &[Record], classification: Classification) -> Vec<Record> {
    if classification == Classification::Referral {
        return authorities.to_vec();
    }
    authorities.iter().filter(|r| r.rtype() != TYPE_NS).cloned().collect()
}

fn attach_sigs(mut rrset: crate::dns::record::RRset, answers: &[Record], authorities: &[Record]) -> crate::dns::record::RRset {
    for rec in answers.iter().chain(authorities.iter()) {
        if let RData::RRSig(sig) = &rec.rdata {
            if rec.name == rrset.name && sig.type_covered == rrset.rtype {
                let _ = rrset.add_sig(sig.clone());
            }
        }
    }
    rrset
}

/// Splits `reason` into ≤255-octet TXT character-strings (RFC 1035
/// §3.3.14) carried in a synthetic record under the configured class,
/// so a client that looks can see why its answer came back SERVFAIL.
fn reason_txt_records(qname: &Name, reason: &str, qclass: u16) -> Vec<Record> {
    let bytes = reason.as_bytes();
    let segments: Vec<Vec<u8>> = bytes.chunks(255).map(|c| c.to_vec()).collect();
    vec![Record { name: qname.clone(), class: qclass, ttl: 0, rdata: RData::TXT(TXT(segments)) }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::header::Header;
    use crate::dns::name::Name;
    use crate::dns::question::Question;
    use crate::dns::rdata::A;
    use crate::dns::CLASS_IN;

    fn noerror_response(qname: &str, ip: [u8; 4]) -> Message {
        let mut header = Header::new();
        header.with_qr(true).with_rcode(RCODE_NOERROR);
        Message {
            header,
            questions: vec![Question::new(Name::parse(qname).unwrap(), crate::dns::TYPE_A, CLASS_IN)],
            answers: vec![Record { name: Name::parse(qname).unwrap(), class: CLASS_IN, ttl: 300, rdata: RData::A(A::new(ip.into())) }],
            authorities: vec![],
            additionals: vec![],
        }
    }

    #[tokio::test]
    async fn unsigned_answer_resolves_insecure() {
        let mock = transport::mock::MockTransport::new();
        mock.stub("www.example.", crate::dns::TYPE_A, noerror_response("www.example.", [192, 0, 2, 1]));
        let resolver = ValidatingResolver::new(
            Box::new(mock),
            TrustAnchorStore::new(),
            Config::default(),
            Box::new(crate::clock::FixedClock(1_700_000_000)),
        );
        let query = Message::query(Name::parse("www.example.").unwrap(), crate::dns::TYPE_A, CLASS_IN);
        let resp = resolver.resolve(&query, "127.0.0.1:53").await;
        assert!(!resp.header.ad());
        assert_eq!(resp.header.rcode(), RCODE_NOERROR);
    }

    #[tokio::test]
    async fn transport_failure_is_servfail_with_ede() {
        let mock = transport::mock::MockTransport::new();
        let resolver = ValidatingResolver::new(
            Box::new(mock),
            TrustAnchorStore::new(),
            Config::default(),
            Box::new(crate::clock::FixedClock(1_700_000_000)),
        );
        let query = Message::query(Name::parse("nope.example.").unwrap(), crate::dns::TYPE_A, CLASS_IN);
        let resp = resolver.resolve(&query, "127.0.0.1:53").await;
        assert_eq!(resp.header.rcode(), RCODE_SERVFAIL);
        assert_eq!(resp.opt().unwrap().ede().unwrap().info_code, ede::NETWORK_ERROR);
    }
}
