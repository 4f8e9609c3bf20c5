/*!
ref: https://www.rfc-editor.org/rfc/rfc1034#section-4.3.2

In-memory authoritative zone lookup. `find_records` walks from the
queried name up toward the apex looking for delegation (NS at a
non-apex ancestor) or a DNAME on a strict ancestor, then resolves the
exact node, falling back to wildcard synthesis when no exact node
exists.
*/

use super::domain_tree::DomainTree;
use crate::dns::name::Name;
use crate::dns::record::RRset;
use crate::dns::{Class, Type, TYPE_ANY, TYPE_CNAME, TYPE_DNAME, TYPE_NS, TYPE_SOA};
use anyhow::{anyhow, bail, Error};

#[derive(Debug, Clone, PartialEq)]
pub enum FindResult {
    Successful(Vec<RRset>),
    Cname(RRset),
    Dname(RRset),
    Delegation(RRset),
    NxRrset,
    NxDomain,
}

#[derive(Debug, Clone)]
pub struct Zone {
    apex: Name,
    class: Class,
    tree: DomainTree,
    has_wild: bool,
}

impl Zone {
    pub fn new(apex: Name, class: Class) -> Self {
        Zone { apex, class, tree: DomainTree::new(), has_wild: false }
    }

    pub fn apex(&self) -> &Name {
        &self.apex
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn add_rrset(&mut self, rrset: RRset) -> Result<(), Error> {
        if !rrset.name.is_subdomain_of(&self.apex) {
            bail!("owner {} is outside zone {}", rrset.name, self.apex);
        }
        if rrset.class != self.class {
            bail!("owner {} class does not match zone class", rrset.name);
        }
        if rrset.name.is_wildcard() {
            self.has_wild = true;
        }
        self.tree.node_mut(&rrset.name).insert(rrset);
        Ok(())
    }

    /// Checks the apex SOA/NS invariants (§4.5): exactly one SOA and at
    /// least one NS must sit at the apex. Call once after loading.
    pub fn validate(&self) -> Result<(), Error> {
        let apex_node = self.tree.node(&self.apex).ok_or_else(|| anyhow!("zone apex {} has no records", self.apex))?;
        let soa = apex_node.get(TYPE_SOA).ok_or_else(|| anyhow!("zone apex {} is missing SOA", self.apex))?;
        if soa.records.len() != 1 {
            bail!("zone apex {} must have exactly one SOA", self.apex);
        }
        if apex_node.get(TYPE_NS).is_none() {
            bail!("zone apex {} is missing NS", self.apex);
        }
        Ok(())
    }

    pub fn find_records(&self, qname: &Name, qtype: Type) -> FindResult {
        if !qname.is_subdomain_of(&self.apex) {
            return FindResult::NxDomain;
        }

        if let Some(hit) = self.check_ancestors(qname) {
            return hit;
        }

        if let Some(node) = self.tree.node(qname) {
            if qname != &self.apex {
                if let Some(ns) = node.get(TYPE_NS) {
                    return FindResult::Delegation(ns.clone());
                }
            }
            if qtype == TYPE_ANY {
                return if node.is_empty() {
                    FindResult::NxRrset
                } else {
                    FindResult::Successful(node.rrsets.values().cloned().collect())
                };
            }
            if let Some(rrset) = node.get(qtype) {
                return FindResult::Successful(vec![rrset.clone()]);
            }
            if let Some(cname) = node.get(TYPE_CNAME) {
                return FindResult::Cname(cname.clone());
            }
            return FindResult::NxRrset;
        }

        if self.has_wild {
            if let Some(result) = self.try_wildcard(qname, qtype) {
                return result;
            }
        }

        FindResult::NxDomain
    }

    /// Walks strict ancestors of `qname` down to (but excluding) the
    /// apex, returning a delegation or DNAME hit at the first ancestor
    /// that carries one.
    fn check_ancestors(&self, qname: &Name) -> Option<FindResult> {
        let mut cur = qname.parent();
        while let Some(ancestor) = cur {
            if ancestor == self.apex {
                break;
            }
            if let Some(node) = self.tree.node(&ancestor) {
                if let Some(ns) = node.get(TYPE_NS) {
                    return Some(FindResult::Delegation(ns.clone()));
                }
                if let Some(dname) = node.get(TYPE_DNAME) {
                    return Some(FindResult::Dname(dname.clone()));
                }
            }
            cur = ancestor.parent();
        }
        None
    }

    fn try_wildcard(&self, qname: &Name, qtype: Type) -> Option<FindResult> {
        let mut ancestor = qname.parent()?;
        while !self.tree.contains(&ancestor) {
            if ancestor == self.apex {
                return None;
            }
            ancestor = ancestor.parent()?;
        }
        let wildcard_name = qname.wild(qname.label_count() - ancestor.label_count());
        let node = self.tree.node(&wildcard_name)?;

        if qtype == TYPE_ANY {
            return Some(if node.is_empty() {
                FindResult::NxRrset
            } else {
                FindResult::Successful(node.rrsets.values().map(|rr| synthesize(rr, qname)).collect())
            });
        }
        if let Some(rrset) = node.get(qtype) {
            return Some(FindResult::Successful(vec![synthesize(rrset, qname)]));
        }
        if let Some(cname) = node.get(TYPE_CNAME) {
            return Some(FindResult::Cname(synthesize(cname, qname)));
        }
        Some(FindResult::NxRrset)
    }

    pub(crate) fn tree(&self) -> &DomainTree {
        &self.tree
    }
}

/// Substitutes the wildcard owner with the queried name (RFC 1034 §4.3.3).
fn synthesize(rrset: &RRset, qname: &Name) -> RRset {
    let mut out = rrset.clone();
    out.name = qname.clone();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::rdata::{RData, A};
    use crate::dns::{CLASS_IN, TYPE_A, TYPE_NS, TYPE_SOA};

    fn soa_rrset(apex: &Name) -> RRset {
        let mut s = RRset::new(apex.clone(), TYPE_SOA, CLASS_IN, 3600);
        s.records.push(RData::SOA(crate::dns::rdata::SOA {
            mname: Name::parse("ns1.example.").unwrap(),
            rname: Name::parse("hostmaster.example.").unwrap(),
            serial: 1,
            refresh: 7200,
            retry: 3600,
            expire: 1_209_600,
            minimum: 3600,
        }));
        s
    }

    fn ns_rrset(owner: &Name) -> RRset {
        let mut s = RRset::new(owner.clone(), TYPE_NS, CLASS_IN, 3600);
        s.records.push(RData::NS(crate::dns::rdata::NS(Name::parse("ns1.example.").unwrap())));
        s
    }

    fn a_rrset(owner: &Name, ip: [u8; 4]) -> RRset {
        let mut s = RRset::new(owner.clone(), TYPE_A, CLASS_IN, 300);
        s.records.push(RData::A(A::new(ip.into())));
        s
    }

    fn base_zone() -> Zone {
        let apex = Name::parse("example.").unwrap();
        let mut zone = Zone::new(apex.clone(), CLASS_IN);
        zone.add_rrset(soa_rrset(&apex)).unwrap();
        zone.add_rrset(ns_rrset(&apex)).unwrap();
        zone.add_rrset(a_rrset(&Name::parse("www.example.").unwrap(), [192, 0, 2, 10])).unwrap();
        zone
    }

    #[test]
    fn exact_match_is_successful() {
        let zone = base_zone();
        let result = zone.find_records(&Name::parse("www.example.").unwrap(), TYPE_A);
        match result {
            FindResult::Successful(sets) => assert_eq!(sets.len(), 1),
            other => panic!("expected Successful, got {:?}", other),
        }
    }

    #[test]
    fn missing_type_at_existing_name_is_nxrrset() {
        let zone = base_zone();
        let result = zone.find_records(&Name::parse("www.example.").unwrap(), crate::dns::TYPE_MX);
        assert_eq!(result, FindResult::NxRrset);
    }

    #[test]
    fn missing_name_is_nxdomain() {
        let zone = base_zone();
        let result = zone.find_records(&Name::parse("nope.example.").unwrap(), TYPE_A);
        assert_eq!(result, FindResult::NxDomain);
    }

    #[test]
    fn delegation_below_apex() {
        let apex = Name::parse("example.").unwrap();
        let mut zone = Zone::new(apex.clone(), CLASS_IN);
        zone.add_rrset(soa_rrset(&apex)).unwrap();
        zone.add_rrset(ns_rrset(&apex)).unwrap();
        let sub = Name::parse("deleg.example.").unwrap();
        zone.add_rrset(ns_rrset(&sub)).unwrap();
        let result = zone.find_records(&Name::parse("host.deleg.example.").unwrap(), TYPE_A);
        assert!(matches!(result, FindResult::Delegation(_)));
    }

    #[test]
    fn wildcard_synthesizes_owner() {
        let apex = Name::parse("example.").unwrap();
        let mut zone = Zone::new(apex.clone(), CLASS_IN);
        zone.add_rrset(soa_rrset(&apex)).unwrap();
        zone.add_rrset(ns_rrset(&apex)).unwrap();
        zone.add_rrset(a_rrset(&Name::parse("*.example.").unwrap(), [192, 0, 2, 99])).unwrap();
        let result = zone.find_records(&Name::parse("anything.example.").unwrap(), TYPE_A);
        match result {
            FindResult::Successful(sets) => assert_eq!(sets[0].name.to_string(), "anything.example."),
            other => panic!("expected Successful, got {:?}", other),
        }
    }

    #[test]
    fn validate_requires_soa_and_ns_at_apex() {
        let apex = Name::parse("example.").unwrap();
        let mut zone = Zone::new(apex.clone(), CLASS_IN);
        assert!(zone.validate().is_err());
        zone.add_rrset(soa_rrset(&apex)).unwrap();
        assert!(zone.validate().is_err());
        zone.add_rrset(ns_rrset(&apex)).unwrap();
        assert!(zone.validate().is_ok());
    }
}
