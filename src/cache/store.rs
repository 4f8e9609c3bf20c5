/*!
Credibility-ordered TTL-bounded cache. `lookup_records` walks from the
root down to the queried name looking for a DNAME or NS referral at a
strict ancestor, then resolves the exact name (exact type, CNAME, or a
stored NXDOMAIN). `add_message` folds a forwarded response's ANSWER,
AUTHORITY and ADDITIONAL sections back into the store, walking a
CNAME chain and deriving credibility per section x AA-bit.

Eviction is an explicit LRU ring (name list + map) bounding distinct
owner names, independent of the per-entry TTL bounding applied when an
entry is stored.
*/

use super::credibility::{Credibility, Section};
use super::entry::{Element, NegativeKind, NXDOMAIN_SENTINEL};
use crate::dns::message::Message;
use crate::dns::name::Name;
use crate::dns::rdata::RData;
use crate::dns::record::{RRset, Record};
use crate::dns::{Type, RCODE_NXDOMAIN, TYPE_A, TYPE_AAAA, TYPE_ANY, TYPE_CNAME, TYPE_DNAME, TYPE_NS, TYPE_SOA};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq)]
pub enum CacheResponse {
    Successful(Vec<RRset>),
    Cname(RRset),
    Dname(RRset),
    Referral(RRset),
    NxRrset,
    NxDomain,
    Unknown,
}

#[derive(Debug, Clone, Default)]
struct CachedName {
    elements: HashMap<Type, Element>,
}

pub struct Cache {
    entries: HashMap<Name, CachedName>,
    lru: VecDeque<Name>,
    max_entries: usize,
    max_positive_ttl: u32,
    max_negative_ttl: u32,
}

impl Cache {
    pub fn new(max_entries: usize, max_positive_ttl: u32, max_negative_ttl: u32) -> Self {
        Cache { entries: HashMap::new(), lru: VecDeque::new(), max_entries, max_positive_ttl, max_negative_ttl }
    }

    pub fn lookup_records(&mut self, name: &Name, qtype: Type, min_cred: Credibility, now: u32) -> CacheResponse {
        let chain = ancestor_chain(name);
        let (strict_ancestors, exact) = chain.split_at(chain.len() - 1);
        let exact_name = &exact[0];

        for ancestor in strict_ancestors {
            self.expire_name(ancestor, now);
            let Some(cached) = self.entries.get(ancestor) else { continue };
            if let Some(el) = cached.elements.get(&TYPE_DNAME) {
                if el.credibility() >= min_cred {
                    if let Element::Positive { rrset, .. } = el {
                        return CacheResponse::Dname(rrset.clone());
                    }
                }
            }
            if let Some(el) = cached.elements.get(&TYPE_NS) {
                if el.credibility() >= min_cred {
                    if let Element::Positive { rrset, .. } = el {
                        return CacheResponse::Referral(rrset.clone());
                    }
                }
            }
        }

        self.expire_name(exact_name, now);
        let Some(cached) = self.entries.get(exact_name) else { return CacheResponse::Unknown };

        if qtype != TYPE_ANY {
            if let Some(el) = cached.elements.get(&qtype) {
                if el.credibility() >= min_cred {
                    return match el {
                        Element::Positive { rrset, .. } => CacheResponse::Successful(vec![rrset.clone()]),
                        Element::Negative { kind: NegativeKind::NxRrset, .. } => CacheResponse::NxRrset,
                        Element::Negative { kind: NegativeKind::NxDomain, .. } => CacheResponse::NxDomain,
                    };
                }
            }
            if let Some(el) = cached.elements.get(&TYPE_CNAME) {
                if el.credibility() >= min_cred {
                    if let Element::Positive { rrset, .. } = el {
                        return CacheResponse::Cname(rrset.clone());
                    }
                }
            }
        }

        if let Some(el) = cached.elements.get(&NXDOMAIN_SENTINEL) {
            if el.credibility() >= min_cred {
                return CacheResponse::NxDomain;
            }
        }

        CacheResponse::Unknown
    }

    pub fn add_message(&mut self, msg: &Message, now: u32) {
        let Some(question) = msg.questions.first() else { return };
        let aa = msg.header.aa();
        let answer_sets = group_rrsets(&msg.answers);

        let mut interesting = HashSet::new();
        let mut visited = HashSet::new();
        let mut current = question.qname().clone();
        interesting.insert(current.clone());
        let mut completed = false;

        loop {
            if !visited.insert(current.clone()) {
                break;
            }
            if let Some(set) = answer_sets.get(&(current.clone(), question.qtype())) {
                self.store_positive(set.clone(), Credibility::of(Section::Answer, aa), now);
                interesting.insert(current.clone());
                completed = true;
                break;
            }
            if let Some(cname) = answer_sets.get(&(current.clone(), TYPE_CNAME)) {
                self.store_positive(cname.clone(), Credibility::of(Section::Answer, aa), now);
                interesting.insert(current.clone());
                match cname.records.first() {
                    Some(RData::CName(target)) => {
                        current = target.0.clone();
                        interesting.insert(current.clone());
                        continue;
                    }
                    _ => break,
                }
            }
            break;
        }

        if !completed {
            let soa = find_soa(&msg.authorities);
            if msg.header.rcode() == RCODE_NXDOMAIN {
                let ttl = soa.as_ref().map(|s| self.negative_ttl(s)).unwrap_or(self.max_negative_ttl);
                self.store_negative(question.qname(), question.qtype(), NegativeKind::NxDomain, Credibility::of(Section::Authority, aa), ttl, now);
            } else if let Some(soa) = soa {
                let ttl = self.negative_ttl(&soa);
                self.store_negative(&current, question.qtype(), NegativeKind::NxRrset, Credibility::of(Section::Authority, aa), ttl, now);
            } else if let Some(ns) = find_ns_rrset(&msg.authorities) {
                interesting.insert(ns.name.clone());
                self.store_positive(ns, Credibility::of(Section::Authority, aa), now);
            }
        }

        for rec in &msg.additionals {
            if (rec.rtype() == TYPE_A || rec.rtype() == TYPE_AAAA) && interesting.contains(&rec.name) {
                let set = RRset::from_record(rec.clone());
                self.store_positive(set, Credibility::of(Section::Additional, aa), now);
            }
        }
    }

    fn negative_ttl(&self, soa: &RRset) -> u32 {
        let minimum = match soa.records.first() {
            Some(RData::SOA(s)) => s.minimum,
            _ => soa.ttl,
        };
        soa.ttl.min(minimum).min(self.max_negative_ttl)
    }

    fn store_positive(&mut self, rrset: RRset, credibility: Credibility, now: u32) {
        let ttl = rrset.ttl.min(self.max_positive_ttl);
        let name = rrset.name.clone();
        let rtype = rrset.rtype;
        let expires_at = now.saturating_add(ttl);
        self.upsert(&name, rtype, Element::Positive { rrset, credibility, expires_at });
    }

    fn store_negative(&mut self, name: &Name, rtype: Type, kind: NegativeKind, credibility: Credibility, ttl: u32, now: u32) {
        let ttl = ttl.min(self.max_negative_ttl);
        let expires_at = now.saturating_add(ttl);
        let key = if kind == NegativeKind::NxDomain { NXDOMAIN_SENTINEL } else { rtype };
        self.upsert(name, key, Element::Negative { rtype, kind, credibility, expires_at });
    }

    fn upsert(&mut self, name: &Name, key: Type, candidate: Element) {
        self.touch(name);
        let cached = self.entries.entry(name.clone()).or_default();
        let keep_existing = matches!(cached.elements.get(&key), Some(existing) if existing.credibility() > candidate.credibility());
        if !keep_existing {
            cached.elements.insert(key, candidate);
        }
        self.evict_if_needed();
    }

    fn expire_name(&mut self, name: &Name, now: u32) {
        if let Some(cached) = self.entries.get_mut(name) {
            cached.elements.retain(|_, el| !el.expired(now));
            if cached.elements.is_empty() {
                self.entries.remove(name);
            }
        }
    }

    fn touch(&mut self, name: &Name) {
        if let Some(pos) = self.lru.iter().position(|n| n == name) {
            self.lru.remove(pos);
        }
        self.lru.push_back(name.clone());
    }

    fn evict_if_needed(&mut self) {
        while self.entries.len() > self.max_entries {
            match self.lru.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

fn ancestor_chain(name: &Name) -> Vec<Name> {
    let mut chain = vec![name.clone()];
    let mut cur = name.clone();
    while let Some(parent) = cur.parent() {
        chain.push(parent.clone());
        cur = parent;
    }
    chain.reverse();
    chain
}

pub(crate) fn group_rrsets(records: &[Record]) -> HashMap<(Name, Type), RRset> {
    let mut sets: HashMap<(Name, Type), RRset> = HashMap::new();
    for rec in records {
        let key = (rec.name.clone(), rec.rtype());
        let set = sets.entry(key).or_insert_with(|| RRset::new(rec.name.clone(), rec.rtype(), rec.class, rec.ttl));
        let _ = set.add_rr(&rec.name, rec.rtype(), rec.class, rec.ttl, rec.rdata.clone());
    }
    sets
}

fn find_soa(authorities: &[Record]) -> Option<RRset> {
    let rec = authorities.iter().find(|r| r.rtype() == TYPE_SOA)?;
    Some(RRset::from_record(rec.clone()))
}

fn find_ns_rrset(authorities: &[Record]) -> Option<RRset> {
    let ns_records: Vec<&Record> = authorities.iter().filter(|r| r.rtype() == TYPE_NS).collect();
    let first = *ns_records.first()?;
    let mut set = RRset::new(first.name.clone(), TYPE_NS, first.class, first.ttl);
    for rec in ns_records {
        let _ = set.add_rr(&rec.name, rec.rtype(), rec.class, rec.ttl, rec.rdata.clone());
    }
    Some(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::header::Header;
    use crate::dns::question::Question;
    use crate::dns::rdata::{CName, A, NS, SOA};
    use crate::dns::{CLASS_IN, RCODE_NOERROR, TYPE_A};

    fn positive_response(qname: &str, qtype: Type, aa: bool, answers: Vec<Record>) -> Message {
        let mut header = Header::new();
        header.with_qr(true).with_aa(aa).with_rcode(RCODE_NOERROR);
        Message {
            header,
            questions: vec![Question::new(Name::parse(qname).unwrap(), qtype, CLASS_IN)],
            answers,
            authorities: vec![],
            additionals: vec![],
        }
    }

    fn a_record(name: &str, ttl: u32, ip: [u8; 4]) -> Record {
        Record { name: Name::parse(name).unwrap(), class: CLASS_IN, ttl, rdata: RData::A(A::new(ip.into())) }
    }

    #[test]
    fn positive_answer_round_trips_through_lookup() {
        let mut cache = Cache::new(50_000, 7 * 24 * 3600, 3 * 3600);
        let msg = positive_response("foo.example.", TYPE_A, true, vec![a_record("foo.example.", 300, [192, 0, 2, 1])]);
        cache.add_message(&msg, 1_000);

        let result = cache.lookup_records(&Name::parse("foo.example.").unwrap(), TYPE_A, Credibility::AuthAnswer, 1_050);
        match result {
            CacheResponse::Successful(sets) => assert_eq!(sets[0].records.len(), 1),
            other => panic!("expected Successful, got {:?}", other),
        }
    }

    #[test]
    fn entry_expires_after_its_ttl() {
        let mut cache = Cache::new(50_000, 7 * 24 * 3600, 3 * 3600);
        let msg = positive_response("foo.example.", TYPE_A, true, vec![a_record("foo.example.", 300, [192, 0, 2, 1])]);
        cache.add_message(&msg, 1_000);

        let result = cache.lookup_records(&Name::parse("foo.example.").unwrap(), TYPE_A, Credibility::AnswerNonAuth, 1_301);
        assert_eq!(result, CacheResponse::Unknown);
    }

    #[test]
    fn lower_credibility_never_replaces_higher() {
        let mut cache = Cache::new(50_000, 7 * 24 * 3600, 3 * 3600);
        let authoritative = positive_response("foo.example.", TYPE_A, true, vec![a_record("foo.example.", 300, [192, 0, 2, 1])]);
        cache.add_message(&authoritative, 1_000);
        let weaker = positive_response("foo.example.", TYPE_A, false, vec![a_record("foo.example.", 300, [192, 0, 2, 9])]);
        cache.add_message(&weaker, 1_000);

        let result = cache.lookup_records(&Name::parse("foo.example.").unwrap(), TYPE_A, Credibility::AdditionalNonAuth, 1_000);
        match result {
            CacheResponse::Successful(sets) => match &sets[0].records[0] {
                RData::A(a) => assert_eq!(a.0, std::net::Ipv4Addr::new(192, 0, 2, 1)),
                other => panic!("expected A, got {:?}", other),
            },
            other => panic!("expected Successful, got {:?}", other),
        }
    }

    #[test]
    fn nxdomain_rcode_stores_negative_entry() {
        let mut cache = Cache::new(50_000, 7 * 24 * 3600, 3 * 3600);
        let mut header = Header::new();
        header.with_qr(true).with_aa(true).with_rcode(crate::dns::RCODE_NXDOMAIN);
        let soa_rec = Record {
            name: Name::parse("example.").unwrap(),
            class: CLASS_IN,
            ttl: 3600,
            rdata: RData::SOA(SOA {
                mname: Name::parse("ns1.example.").unwrap(),
                rname: Name::parse("hostmaster.example.").unwrap(),
                serial: 1,
                refresh: 7200,
                retry: 3600,
                expire: 1_209_600,
                minimum: 300,
            }),
        };
        let msg = Message {
            header,
            questions: vec![Question::new(Name::parse("missing.example.").unwrap(), TYPE_A, CLASS_IN)],
            answers: vec![],
            authorities: vec![soa_rec],
            additionals: vec![],
        };
        cache.add_message(&msg, 1_000);

        let result = cache.lookup_records(&Name::parse("missing.example.").unwrap(), TYPE_A, Credibility::AdditionalNonAuth, 1_000);
        assert_eq!(result, CacheResponse::NxDomain);
    }

    #[test]
    fn cname_chain_stores_both_alias_and_target() {
        let mut cache = Cache::new(50_000, 7 * 24 * 3600, 3 * 3600);
        let alias = Record { name: Name::parse("alias.example.").unwrap(), class: CLASS_IN, ttl: 300, rdata: RData::CName(CName(Name::parse("target.example.").unwrap())) };
        let target = a_record("target.example.", 300, [192, 0, 2, 5]);
        let msg = positive_response("alias.example.", TYPE_A, true, vec![alias, target]);
        cache.add_message(&msg, 1_000);

        let cname_hit = cache.lookup_records(&Name::parse("alias.example.").unwrap(), TYPE_A, Credibility::AdditionalNonAuth, 1_000);
        assert!(matches!(cname_hit, CacheResponse::Successful(_)) || matches!(cname_hit, CacheResponse::Cname(_)));
    }

    #[test]
    fn referral_without_soa_caches_as_delegation() {
        let mut cache = Cache::new(50_000, 7 * 24 * 3600, 3 * 3600);
        let mut header = Header::new();
        header.with_qr(true).with_aa(false).with_rcode(RCODE_NOERROR);
        let ns_rec = Record { name: Name::parse("sub.example.").unwrap(), class: CLASS_IN, ttl: 3600, rdata: RData::NS(NS(Name::parse("ns1.sub.example.").unwrap())) };
        let msg = Message {
            header,
            questions: vec![Question::new(Name::parse("host.sub.example.").unwrap(), TYPE_A, CLASS_IN)],
            answers: vec![],
            authorities: vec![ns_rec],
            additionals: vec![],
        };
        cache.add_message(&msg, 1_000);

        let result = cache.lookup_records(&Name::parse("host.sub.example.").unwrap(), TYPE_A, Credibility::AdditionalNonAuth, 1_000);
        assert!(matches!(result, CacheResponse::Referral(_)));
    }

    #[test]
    fn lru_evicts_least_recently_touched_name() {
        let mut cache = Cache::new(2, 7 * 24 * 3600, 3 * 3600);
        cache.add_message(&positive_response("a.example.", TYPE_A, true, vec![a_record("a.example.", 300, [1, 1, 1, 1])]), 1_000);
        cache.add_message(&positive_response("b.example.", TYPE_A, true, vec![a_record("b.example.", 300, [2, 2, 2, 2])]), 1_000);
        cache.add_message(&positive_response("c.example.", TYPE_A, true, vec![a_record("c.example.", 300, [3, 3, 3, 3])]), 1_000);

        let evicted = cache.lookup_records(&Name::parse("a.example.").unwrap(), TYPE_A, Credibility::AdditionalNonAuth, 1_000);
        assert_eq!(evicted, CacheResponse::Unknown);
        let kept = cache.lookup_records(&Name::parse("c.example.").unwrap(), TYPE_A, Credibility::AdditionalNonAuth, 1_000);
        assert!(matches!(kept, CacheResponse::Successful(_)));
    }
}
