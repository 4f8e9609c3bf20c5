/*!
ref: https://www.rfc-editor.org/rfc/rfc5936

AXFR response ordering (RFC 5936 §2.2): the zone's SOA first, then the
rest of the zone's RRsets in any order, then the SOA again to mark the
end of the transfer. This iterator yields the apex SOA, the apex NS
and any other apex RRsets, then every other owner's RRsets in the
domain tree's iteration order, finishing with the SOA repeated.
*/

use super::zone::Zone;
use crate::dns::record::RRset;
use crate::dns::{TYPE_NS, TYPE_SOA};

pub struct ZoneAxfrIter {
    queue: std::collections::VecDeque<RRset>,
}

impl ZoneAxfrIter {
    pub fn new(zone: &Zone) -> Option<Self> {
        let apex_node = zone.tree().node(zone.apex())?;
        let soa = apex_node.get(TYPE_SOA)?.clone();

        let mut queue = std::collections::VecDeque::new();
        queue.push_back(soa.clone());
        if let Some(ns) = apex_node.get(TYPE_NS) {
            queue.push_back(ns.clone());
        }
        for (rtype, rrset) in &apex_node.rrsets {
            if *rtype != TYPE_SOA && *rtype != TYPE_NS {
                queue.push_back(rrset.clone());
            }
        }
        for (name, node) in zone.tree().iter() {
            if name == zone.apex() {
                continue;
            }
            for rrset in node.rrsets.values() {
                queue.push_back(rrset.clone());
            }
        }
        queue.push_back(soa);

        Some(ZoneAxfrIter { queue })
    }
}

impl Iterator for ZoneAxfrIter {
    type Item = RRset;

    fn next(&mut self) -> Option<RRset> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::name::Name;
    use crate::dns::rdata::{RData, A, NS, SOA};
    use crate::dns::CLASS_IN;

    fn test_zone() -> Zone {
        let apex = Name::parse("example.").unwrap();
        let mut zone = Zone::new(apex.clone(), CLASS_IN);

        let mut soa = RRset::new(apex.clone(), TYPE_SOA, CLASS_IN, 3600);
        soa.records.push(RData::SOA(SOA {
            mname: Name::parse("ns1.example.").unwrap(),
            rname: Name::parse("hostmaster.example.").unwrap(),
            serial: 1,
            refresh: 7200,
            retry: 3600,
            expire: 1_209_600,
            minimum: 3600,
        }));
        zone.add_rrset(soa).unwrap();

        let mut ns = RRset::new(apex.clone(), TYPE_NS, CLASS_IN, 3600);
        ns.records.push(RData::NS(NS(Name::parse("ns1.example.").unwrap())));
        zone.add_rrset(ns).unwrap();

        let mut a = RRset::new(Name::parse("www.example.").unwrap(), crate::dns::TYPE_A, CLASS_IN, 300);
        a.records.push(RData::A(A::new([192, 0, 2, 10].into())));
        zone.add_rrset(a).unwrap();

        zone
    }

    #[test]
    fn begins_and_ends_with_soa() {
        let zone = test_zone();
        let rrsets: Vec<RRset> = ZoneAxfrIter::new(&zone).unwrap().collect();
        assert_eq!(rrsets.first().unwrap().rtype, TYPE_SOA);
        assert_eq!(rrsets.last().unwrap().rtype, TYPE_SOA);
        assert!(rrsets.len() >= 4);
    }

    #[test]
    fn apex_ns_comes_right_after_soa() {
        let zone = test_zone();
        let rrsets: Vec<RRset> = ZoneAxfrIter::new(&zone).unwrap().collect();
        assert_eq!(rrsets[1].rtype, TYPE_NS);
    }
}
