/*!
ref: https://www.rfc-editor.org/rfc/rfc5155#section-8

NSEC3 denial-of-existence proofs. Owner names carry a base32hex-encoded
hash as their first label (RFC 5155 §1); proofs operate on the raw hash
bytes rather than name comparison. A name-error proof needs: a match on
the closest encloser, a covering NSEC3 for the "next closer" name (one
label below the encloser, on the path to qname), and a covering NSEC3
for the wildcard at the encloser — unless the next-closer's NSEC3 sets
Opt-Out (RFC 5155 §7.2.1), which lets an insecure delegation skip the
wildcard proof.
*/

use crate::dns::name::Name;
use crate::dns::rdata::dnssec::nsec3::hash_owner_name;
use crate::dns::rdata::dnssec::NSEC3_HASH_SHA1;
use crate::dns::rdata::RData;
use crate::dns::record::RRset;
use crate::dns::{Type, TYPE_CNAME, TYPE_DS};

struct Params {
    iterations: u16,
    salt: Vec<u8>,
}

fn as_nsec3(rrset: &RRset) -> Option<&crate::dns::rdata::NSEC3> {
    rrset.records.iter().find_map(|r| match r {
        RData::NSEC3(n) => Some(n),
        _ => None,
    })
}

fn params_of(nsec3s: &[RRset]) -> Option<Params> {
    let n = nsec3s.iter().find_map(as_nsec3)?;
    Some(Params { iterations: n.iterations, salt: n.salt.clone() })
}

fn hash_for(name: &Name, params: &Params) -> Vec<u8> {
    hash_owner_name(name, params.iterations, &params.salt)
}

/// Drops NSEC3 RRsets using a hash algorithm this crate doesn't
/// implement (RFC 5155 only defines SHA-1, algorithm 1).
pub fn strip_unsupported_algorithms(nsec3s: &[RRset]) -> Vec<RRset> {
    nsec3s.iter().filter(|r| as_nsec3(r).is_some_and(|n| n.hash_algorithm == NSEC3_HASH_SHA1)).cloned().collect()
}

pub fn exceeds_iteration_cap(nsec3s: &[RRset], max_iterations: u32) -> bool {
    nsec3s.iter().any(|r| as_nsec3(r).is_some_and(|n| n.iterations as u32 > max_iterations))
}

const BASE32HEX_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUV";

fn base32hex_decode(label: &str) -> Option<Vec<u8>> {
    let mut bits: u64 = 0;
    let mut bit_count = 0u32;
    let mut out = vec![];
    for c in label.chars() {
        let c = c.to_ascii_uppercase();
        let val = BASE32HEX_ALPHABET.iter().position(|&a| a as char == c)? as u64;
        bits = (bits << 5) | val;
        bit_count += 5;
        if bit_count >= 8 {
            bit_count -= 8;
            out.push((bits >> bit_count) as u8);
        }
    }
    Some(out)
}

fn owner_hash(rrset: &RRset) -> Option<Vec<u8>> {
    base32hex_decode(rrset.name.labels().first()?)
}

fn in_range(owner: &[u8], next: &[u8], target: &[u8]) -> bool {
    if owner == target {
        return false;
    }
    if owner < next {
        owner < target && target < next
    } else {
        owner < target || target < next
    }
}

/// Finds the NSEC3 RRset whose hash interval covers `hash`.
fn find_covering<'a>(hash: &[u8], nsec3s: &'a [RRset]) -> Option<&'a RRset> {
    nsec3s.iter().find(|r| match (owner_hash(r), as_nsec3(r)) {
        (Some(owner), Some(n)) => in_range(&owner, &n.next_hashed_owner_name, hash),
        _ => false,
    })
}

fn find_match<'a>(hash: &[u8], nsec3s: &'a [RRset]) -> Option<&'a RRset> {
    nsec3s.iter().find(|r| owner_hash(r).as_deref() == Some(hash))
}

/// Returns (closest encloser, next closer name) by walking qname's
/// ancestors outward until one hashes to an existing NSEC3 owner.
fn closest_encloser_and_next_closer(qname: &Name, nsec3s: &[RRset], params: &Params) -> Option<(Name, Name)> {
    let mut chain = vec![qname.clone()];
    let mut cur = qname.clone();
    while let Some(parent) = cur.parent() {
        chain.push(parent.clone());
        cur = parent;
    }
    for i in 0..chain.len() {
        if find_match(&hash_for(&chain[i], params), nsec3s).is_some() {
            if i == 0 {
                return None;
            }
            return Some((chain[i].clone(), chain[i - 1].clone()));
        }
    }
    None
}

/// RFC 5155 §8.4 name-error proof (ignoring Opt-Out, since a
/// name-error response covers no delegation).
pub fn proves_name_error(qname: &Name, nsec3s: &[RRset]) -> bool {
    let Some(params) = params_of(nsec3s) else { return false };
    let Some((encloser, next_closer)) = closest_encloser_and_next_closer(qname, nsec3s, &params) else { return false };
    if find_covering(&hash_for(&next_closer, &params), nsec3s).is_none() {
        return false;
    }
    let wildcard = qname.wild(qname.label_count() - encloser.label_count());
    find_covering(&hash_for(&wildcard, &params), nsec3s).is_some()
}

/// RFC 5155 §8.5/§8.6 NODATA proof at an exact (possibly wildcard-matched) name.
pub fn proves_nodata(name: &Name, qtype: Type, nsec3s: &[RRset]) -> bool {
    let Some(params) = params_of(nsec3s) else { return false };
    let Some(rrset) = find_match(&hash_for(name, &params), nsec3s) else { return false };
    let Some(n) = as_nsec3(rrset) else { return false };
    !n.covers_type(qtype) && !n.covers_type(TYPE_CNAME)
}

/// RFC 5155 §7.2.1: an insecure (Opt-Out) delegation proof — the
/// next-closer name's covering NSEC3 has the Opt-Out bit set, so no DS
/// proof is required at this delegation point.
pub fn proves_opt_out_delegation(qname: &Name, nsec3s: &[RRset]) -> bool {
    let Some(params) = params_of(nsec3s) else { return false };
    let Some((_, next_closer)) = closest_encloser_and_next_closer(qname, nsec3s, &params) else { return false };
    find_covering(&hash_for(&next_closer, &params), nsec3s).is_some_and(|r| as_nsec3(r).is_some_and(|n| n.opt_out()))
}

/// RFC 5155 §8.1: NSEC3 at the parent owner proves no DS exists at the
/// delegation (so the chain of trust stops here, not Bogus).
pub fn proves_no_ds(name: &Name, nsec3s: &[RRset]) -> bool {
    proves_nodata(name, TYPE_DS, nsec3s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::rdata::NSEC3;
    use crate::dns::CLASS_IN;

    fn owner_label(hash: &[u8]) -> String {
        let mut bits: u64 = 0;
        let mut bit_count = 0u32;
        let mut out = String::new();
        for &b in hash {
            bits = (bits << 8) | b as u64;
            bit_count += 8;
            while bit_count >= 5 {
                bit_count -= 5;
                let idx = ((bits >> bit_count) & 0x1F) as usize;
                out.push(BASE32HEX_ALPHABET[idx] as char);
            }
        }
        if bit_count > 0 {
            let idx = ((bits << (5 - bit_count)) & 0x1F) as usize;
            out.push(BASE32HEX_ALPHABET[idx] as char);
        }
        out
    }

    fn nsec3_rrset(owner_hash: &[u8], next_hash: &[u8], opt_out: bool, types: &[u16]) -> RRset {
        let owner = Name::from_labels(vec![owner_label(owner_hash), "example".to_string()], true).unwrap();
        let mut r = RRset::new(owner, crate::dns::TYPE_NSEC3, CLASS_IN, 3600);
        let flags = if opt_out { 1 } else { 0 };
        let type_bit_maps = crate::dns::rdata::dnssec::nsec::encode_type_bitmaps(types);
        r.records.push(RData::NSEC3(NSEC3 {
            hash_algorithm: NSEC3_HASH_SHA1,
            flags,
            iterations: 1,
            salt: vec![],
            next_hashed_owner_name: next_hash.to_vec(),
            type_bit_maps,
        }));
        r
    }

    #[test]
    fn base32hex_round_trips() {
        let hash = vec![0xDE, 0xAD, 0xBE, 0xEF, 0x01];
        let encoded = owner_label(&hash);
        assert_eq!(base32hex_decode(&encoded).unwrap(), hash);
    }

    #[test]
    fn covering_interval_detects_membership() {
        let owner = vec![1, 0, 0];
        let next = vec![5, 0, 0];
        let nsec3s = vec![nsec3_rrset(&owner, &next, false, &[])];
        assert!(find_covering(&[3, 0, 0], &nsec3s).is_some());
        assert!(find_covering(&[1, 0, 0], &nsec3s).is_none());
    }

    #[test]
    fn strips_unsupported_hash_algorithm() {
        let mut set = nsec3_rrset(&[1], &[2], false, &[]);
        if let RData::NSEC3(n) = &mut set.records[0] {
            n.hash_algorithm = 99;
        }
        let stripped = strip_unsupported_algorithms(&[set]);
        assert!(stripped.is_empty());
    }
}
