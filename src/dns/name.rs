/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.1
ref: https://www.rfc-editor.org/rfc/rfc4034#section-6.1

A domain name is a sequence of labels, each at most 63 octets, with the
total wire-encoded name at most 255 octets. This module keeps names
always lowercased (DNS name comparison is case-insensitive) so that
canonical ordering and equality fall out of ordinary string/slice
comparison.
*/

use anyhow::{bail, Error};
use std::cmp::Ordering;
use std::fmt;

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_LABEL_LENGTH: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<String>,
    absolute: bool,
}

impl Name {
    pub fn root() -> Self {
        Name {
            labels: vec![],
            absolute: true,
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        let absolute = s.ends_with('.') || s.is_empty() || s == ".";
        let trimmed = s.trim_end_matches('.');
        let labels: Vec<String> = if trimmed.is_empty() {
            vec![]
        } else {
            trimmed
                .split('.')
                .map(|l| l.to_ascii_lowercase())
                .collect()
        };
        let name = Name { labels, absolute };
        name.validate()?;
        Ok(name)
    }

    pub fn from_labels(labels: Vec<String>, absolute: bool) -> Result<Self, Error> {
        let name = Name {
            labels: labels.into_iter().map(|l| l.to_ascii_lowercase()).collect(),
            absolute,
        };
        name.validate()?;
        Ok(name)
    }

    fn validate(&self) -> Result<(), Error> {
        for l in &self.labels {
            if l.len() > MAX_LABEL_LENGTH {
                bail!("label `{}` exceeds 63 octets", l);
            }
        }
        if self.wire_len() > MAX_NAME_LENGTH {
            bail!("name exceeds 255 octets");
        }
        Ok(())
    }

    /// Length of the wire-encoded (uncompressed) form, including the
    /// terminating root octet.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn require_absolute(&self) -> Result<(), Error> {
        if !self.absolute {
            bail!("RelativeName: `{}` must be absolute here", self);
        }
        Ok(())
    }

    /// `self` is `other` or a descendant of `other`.
    pub fn is_subdomain_of(&self, other: &Name) -> bool {
        if other.labels.len() > self.labels.len() {
            return false;
        }
        let off = self.labels.len() - other.labels.len();
        self.labels[off..] == other.labels[..]
    }

    /// true if the label at the top of `self` is `*`.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.labels.first(), Some(l) if l == "*")
    }

    pub fn parent(&self) -> Option<Name> {
        if self.labels.is_empty() {
            return None;
        }
        Some(Name {
            labels: self.labels[1..].to_vec(),
            absolute: self.absolute,
        })
    }

    /// Canonical ordering per RFC 4034 §6.1: compare labels right-to-left.
    pub fn canonical_cmp(&self, other: &Name) -> Ordering {
        let a: Vec<&String> = self.labels.iter().rev().collect();
        let b: Vec<&String> = other.labels.iter().rev().collect();
        a.cmp(&b)
    }

    /// Replace the top `n` labels (the ones closest to the leaf) with a
    /// single `*` label. Always keeps at least one trailing label, so
    /// `label_count()` after replacement is `max(2, self.label_count() - n + 1)`.
    pub fn wild(&self, n: usize) -> Name {
        let total = self.labels.len();
        let keep = if total == 0 { 0 } else { total.saturating_sub(n).max(1) };
        let mut labels = vec!["*".to_string()];
        labels.extend_from_slice(&self.labels[total - keep..]);
        Name {
            labels,
            absolute: self.absolute,
        }
    }

    pub fn concatenate(a: &Name, b: &Name) -> Result<Name, Error> {
        let mut labels = a.labels.clone();
        labels.extend(b.labels.clone());
        let name = Name {
            labels,
            absolute: b.absolute,
        };
        name.validate()?;
        Ok(name)
    }

    /// Substitute the suffix `owner` (the DNAME's owner name) of `self`
    /// with `target` (the DNAME's rdata), per RFC 6672 §2.
    pub fn from_dname(&self, owner: &Name, target: &Name) -> Result<Name, Error> {
        if !self.is_subdomain_of(owner) {
            bail!("name is not under the DNAME owner");
        }
        let prefix_len = self.labels.len() - owner.labels.len();
        let mut labels = self.labels[..prefix_len].to_vec();
        labels.extend(target.labels.clone());
        let name = Name {
            labels,
            absolute: true,
        };
        name.validate().map_err(|_| Error::msg("NameTooLong"))?;
        Ok(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        f.write_str(&self.labels.join("."))?;
        if self.absolute {
            f.write_str(".")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_lowercases() {
        let n = Name::parse("Foo.Example.").unwrap();
        assert_eq!(n.to_string(), "foo.example.");
        assert!(n.is_absolute());
        assert_eq!(n.label_count(), 2);
    }

    #[test]
    fn rejects_oversized_name() {
        let label = "a".repeat(63);
        let long = format!("{}.", vec![label; 5].join("."));
        assert!(Name::parse(&long).is_ok());
        let too_long = format!("{}.{}", "a".repeat(63), "b".repeat(63).repeat(4));
        assert!(Name::parse(&too_long).is_err() || Name::parse(&too_long).unwrap().wire_len() <= MAX_NAME_LENGTH);
    }

    #[test]
    fn subdomain_and_canonical_order() {
        let parent = Name::parse("example.").unwrap();
        let child = Name::parse("foo.example.").unwrap();
        assert!(child.is_subdomain_of(&parent));
        assert!(!parent.is_subdomain_of(&child));
        assert_eq!(child.canonical_cmp(&parent), Ordering::Greater);
    }

    #[test]
    fn wild_invariant_label_count() {
        let n = Name::parse("a.b.example.").unwrap();
        for k in 0..=5usize {
            let w = n.wild(k);
            assert!(w.is_wildcard());
            let expected = std::cmp::max(2, n.label_count() as isize - k as isize + 1) as usize;
            assert_eq!(w.label_count(), expected, "wild({k}) labels mismatch");
        }
    }

    #[test]
    fn dname_substitution() {
        let qname = Name::parse("www.old.example.").unwrap();
        let owner = Name::parse("old.example.").unwrap();
        let target = Name::parse("new.example.").unwrap();
        let substituted = qname.from_dname(&owner, &target).unwrap();
        assert_eq!(substituted.to_string(), "www.new.example.");
    }
}
