/*!
ref: https://www.rfc-editor.org/rfc/rfc4035#section-5

Two stores the chain-of-trust walk consults: a static trust-anchor
store (configured DNSKEY/DS RRsets marking islands of trust) and a
validated-key cache (the result of walking DS→DNSKEY down from an
anchor, memoized so repeat signers don't re-walk). Both resolve a name
to its closest ancestor entry, the way `zone::domain_tree` resolves a
query name to the nearest enclosing node.
*/

use crate::dns::name::Name;
use crate::dns::record::RRset;
use crate::dns::{Class, Type, TYPE_DNSKEY, TYPE_DS};
use crate::zone::master_file;
use anyhow::Error;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum KeyEntry {
    /// No trust anchor covers this name; treat descendants as INSECURE.
    Null,
    /// The DS/DNSKEY chain failed to validate; treat descendants as BOGUS.
    Bad,
    /// A verified DNSKEY RRset, usable to check RRSIGs signed by it.
    Good(RRset),
}

struct CachedKeyEntry {
    entry: KeyEntry,
    expires_at: u32,
}

/// Configured islands of trust: DNSKEY or DS RRsets loaded from a
/// master file, one per (name, class).
#[derive(Debug, Clone, Default)]
pub struct TrustAnchorStore {
    anchors: HashMap<(Name, Class), RRset>,
}

impl TrustAnchorStore {
    pub fn new() -> Self {
        TrustAnchorStore { anchors: HashMap::new() }
    }

    pub fn add(&mut self, rrset: RRset) {
        if rrset.rtype != TYPE_DNSKEY && rrset.rtype != TYPE_DS {
            return;
        }
        self.anchors.insert((rrset.name.clone(), rrset.class), rrset);
    }

    /// The anchor at the longest suffix of `name`, if any.
    pub fn find(&self, name: &Name, class: Class) -> Option<&RRset> {
        let mut candidate = Some(name.clone());
        while let Some(cur) = candidate {
            if let Some(anchor) = self.anchors.get(&(cur.clone(), class)) {
                return Some(anchor);
            }
            candidate = cur.parent();
        }
        None
    }

    /// Loads DNSKEY/DS lines from a master file (spec.md §6 trust-anchor
    /// file), grouping same-owner records into RRsets the way a zone
    /// loader would.
    pub fn load(path: &str) -> Result<Self, Error> {
        let mut sets: HashMap<(Name, Type, Class), RRset> = HashMap::new();
        for rec in master_file::load_records(path)? {
            let key = (rec.name.clone(), rec.rtype(), rec.class);
            let set = sets.entry(key).or_insert_with(|| RRset::new(rec.name.clone(), rec.rtype(), rec.class, rec.ttl));
            set.add_rr(&rec.name, rec.rtype(), rec.class, rec.ttl, rec.rdata)?;
        }
        let mut store = TrustAnchorStore::new();
        for (_, set) in sets {
            store.add(set);
        }
        Ok(store)
    }
}

/// Validated-key memo, keyed by (name, class), with TTL-bounded entries
/// and Null/Bad sentinels that short-circuit further chain walking.
pub struct KeyCache {
    entries: HashMap<(Name, Class), CachedKeyEntry>,
    default_ttl: u32,
}

impl KeyCache {
    pub fn new(default_ttl: u32) -> Self {
        KeyCache { entries: HashMap::new(), default_ttl }
    }

    pub fn store(&mut self, name: &Name, class: Class, entry: KeyEntry, ttl: u32, now: u32) {
        let ttl = ttl.min(self.default_ttl);
        self.entries.insert((name.clone(), class), CachedKeyEntry { entry, expires_at: now.saturating_add(ttl) });
    }

    /// Closest ancestor entry covering `name`, expiring stale ones along the way.
    pub fn find(&mut self, name: &Name, class: Class, now: u32) -> Option<KeyEntry> {
        let mut candidate = Some(name.clone());
        while let Some(cur) = candidate {
            let key = (cur.clone(), class);
            if let Some(cached) = self.entries.get(&key) {
                if cached.expires_at <= now {
                    self.entries.remove(&key);
                } else {
                    return Some(cached.entry.clone());
                }
            }
            candidate = cur.parent();
        }
        None
    }
}
