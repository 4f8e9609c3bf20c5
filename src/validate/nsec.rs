/*!
ref: https://www.rfc-editor.org/rfc/rfc4035#section-5.4

NSEC denial-of-existence proofs. An NSEC RRset asserts that no owner
name exists in the canonically-ordered interval `(owner, next)`
(wrapping at the end of the zone back to its start). Name-error proof
requires a covering NSEC for the qname itself plus a covering NSEC for
the wildcard at the qname's closest encloser (so no `*` could have
answered instead); NODATA proof requires an exact-owner NSEC whose type
bitmap lacks the queried type.
*/

use crate::dns::name::Name;
use crate::dns::rdata::RData;
use crate::dns::record::RRset;
use crate::dns::{Type, TYPE_CNAME};
use std::cmp::Ordering;

/// True if `target` falls in the open interval `(owner, next)` under
/// canonical name ordering, wrapping at the end of the zone.
fn in_range(owner: &Name, next: &Name, target: &Name) -> bool {
    let owner_before_target = owner.canonical_cmp(target) == Ordering::Less;
    let target_before_next = target.canonical_cmp(next) == Ordering::Less;
    if owner.canonical_cmp(next) == Ordering::Less {
        owner_before_target && target_before_next
    } else {
        owner_before_target || target_before_next
    }
}

fn as_nsec(rrset: &RRset) -> Option<(&Name, &crate::dns::rdata::NSEC)> {
    rrset.records.iter().find_map(|r| match r {
        RData::NSEC(n) => Some((&rrset.name, n)),
        _ => None,
    })
}

/// Finds the NSEC RRset whose interval covers `target`, if any.
pub fn find_covering<'a>(target: &Name, nsecs: &'a [RRset]) -> Option<&'a RRset> {
    nsecs.iter().find(|rrset| {
        as_nsec(rrset).is_some_and(|(owner, nsec)| owner != target && in_range(owner, &nsec.next_domain_name, target))
    })
}

/// Finds the NSEC RRset owned exactly at `name`, if any.
pub fn find_exact<'a>(name: &Name, nsecs: &'a [RRset]) -> Option<&'a RRset> {
    nsecs.iter().find(|rrset| as_nsec(rrset).is_some_and(|(owner, _)| owner == name))
}

/// Longest ancestor of `qname` that is provably present: either the
/// owner of an NSEC in the set, or a name one of them covers as a
/// range endpoint. Falls back to the root if nothing matches.
pub fn closest_encloser(qname: &Name, nsecs: &[RRset]) -> Name {
    let mut candidate = qname.parent();
    while let Some(name) = candidate {
        if nsecs.iter().any(|rrset| as_nsec(rrset).is_some_and(|(owner, _)| owner == &name)) {
            return name;
        }
        candidate = name.parent();
    }
    Name::root()
}

/// RFC 4035 §5.4 name-error proof: a covering NSEC for `qname` itself,
/// plus a covering NSEC for the wildcard at its closest encloser (so no
/// `*` expansion could have answered the query either).
pub fn proves_name_error(qname: &Name, nsecs: &[RRset]) -> bool {
    if find_covering(qname, nsecs).is_none() {
        return false;
    }
    let encloser = closest_encloser(qname, nsecs);
    let wildcard = qname.wild(qname.label_count() - encloser.label_count());
    find_covering(&wildcard, nsecs).is_some() || find_exact(&wildcard, nsecs).is_some()
}

/// RFC 4035 §5.4 NODATA proof: an NSEC owned exactly at `name` whose
/// bitmap lacks `qtype` and lacks CNAME (a CNAME owner can't answer
/// NODATA for anything else).
pub fn proves_nodata(name: &Name, qtype: Type, nsecs: &[RRset]) -> bool {
    let Some(rrset) = find_exact(name, nsecs) else { return false };
    let Some((_, nsec)) = as_nsec(rrset) else { return false };
    !nsec.covers_type(qtype) && !nsec.covers_type(TYPE_CNAME)
}

/// NODATA proved via a wildcard: `qname` matches the wildcard at its
/// closest encloser but the wildcard's bitmap lacks `qtype`.
pub fn proves_wildcard_nodata(qname: &Name, qtype: Type, nsecs: &[RRset]) -> bool {
    let encloser = closest_encloser(qname, nsecs);
    let wildcard = qname.wild(qname.label_count() - encloser.label_count());
    find_covering(qname, nsecs).is_some() && proves_nodata(&wildcard, qtype, nsecs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::rdata::NSEC;
    use crate::dns::{CLASS_IN, TYPE_A};

    fn nsec_rrset(owner: &str, next: &str, types: &[u16]) -> RRset {
        let mut r = RRset::new(Name::parse(owner).unwrap(), crate::dns::TYPE_NSEC, CLASS_IN, 3600);
        r.records.push(RData::NSEC(NSEC::new(Name::parse(next).unwrap(), types)));
        r
    }

    #[test]
    fn covering_interval_excludes_endpoints() {
        let nsecs = vec![nsec_rrset("a.example.", "c.example.", &[TYPE_A])];
        assert!(find_covering(&Name::parse("b.example.").unwrap(), &nsecs).is_some());
        assert!(find_covering(&Name::parse("a.example.").unwrap(), &nsecs).is_none());
    }

    #[test]
    fn interval_wraps_at_zone_end() {
        let nsecs = vec![nsec_rrset("z.example.", "a.example.", &[TYPE_A])];
        assert!(find_covering(&Name::parse("zz.example.").unwrap(), &nsecs).is_some());
    }

    #[test]
    fn nodata_proof_requires_missing_type_in_bitmap() {
        let nsecs = vec![nsec_rrset("foo.example.", "zzz.example.", &[TYPE_A])];
        assert!(proves_nodata(&Name::parse("foo.example.").unwrap(), crate::dns::TYPE_AAAA, &nsecs));
        assert!(!proves_nodata(&Name::parse("foo.example.").unwrap(), TYPE_A, &nsecs));
    }

    #[test]
    fn name_error_needs_both_qname_and_wildcard_coverage() {
        let nsecs = vec![
            nsec_rrset("aaa.example.", "bbb.example.", &[TYPE_A]),
            nsec_rrset("x.example.", "zzz.example.", &[TYPE_A]),
        ];
        assert!(proves_name_error(&Name::parse("b.example.").unwrap(), &nsecs));
    }
}
