/*!
Per spec design notes: the cache's "positive vs negative" element is a
two-arm tagged union sharing `expired()` / `credibility()` / `rtype()`.
A positive element carries an RRset; a negative one records which kind
of non-existence was proven for (name,type).
*/

use super::credibility::Credibility;
use crate::dns::record::RRset;
use crate::dns::Type;

/// Sentinel type key under which a whole-name NXDOMAIN is stored,
/// distinct from any real RR type (0 is unassigned in the type registry).
pub const NXDOMAIN_SENTINEL: Type = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeKind {
    NxDomain,
    NxRrset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Positive { rrset: RRset, credibility: Credibility, expires_at: u32 },
    Negative { rtype: Type, kind: NegativeKind, credibility: Credibility, expires_at: u32 },
}

impl Element {
    pub fn expired(&self, now: u32) -> bool {
        now >= self.expires_at()
    }

    pub fn expires_at(&self) -> u32 {
        match self {
            Element::Positive { expires_at, .. } => *expires_at,
            Element::Negative { expires_at, .. } => *expires_at,
        }
    }

    pub fn credibility(&self) -> Credibility {
        match self {
            Element::Positive { credibility, .. } => *credibility,
            Element::Negative { credibility, .. } => *credibility,
        }
    }

    pub fn rtype(&self) -> Type {
        match self {
            Element::Positive { rrset, .. } => rrset.rtype,
            Element::Negative { rtype, .. } => *rtype,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::name::Name;

    fn rrset() -> RRset {
        RRset::new(Name::parse("foo.example.").unwrap(), crate::dns::TYPE_A, crate::dns::CLASS_IN, 300)
    }

    #[test]
    fn positive_expires_at_its_own_deadline() {
        let el = Element::Positive { rrset: rrset(), credibility: Credibility::AuthAnswer, expires_at: 1_000 };
        assert!(!el.expired(999));
        assert!(el.expired(1_000));
    }

    #[test]
    fn negative_carries_its_own_rtype_not_the_rrsets() {
        let el = Element::Negative {
            rtype: crate::dns::TYPE_AAAA,
            kind: NegativeKind::NxRrset,
            credibility: Credibility::AuthAuthority,
            expires_at: 500,
        };
        assert_eq!(el.rtype(), crate::dns::TYPE_AAAA);
    }
}
