//! Scalar configuration, loaded from a TOML file the way a small
//! CLI-adjacent library typically does.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to a master-file formatted trust-anchor stream (DNSKEY/DS).
    pub trust_anchor_file: Option<String>,

    /// Caps `CacheRRset` lifetime regardless of the record's own TTL.
    pub max_cache_ttl: u32,

    /// Caps negative (NXDOMAIN/NXRRSET) entry lifetime.
    pub max_negative_cache_ttl: u32,

    /// LRU bound on distinct owner names held in the credibility cache.
    pub max_cache_entries: usize,

    /// NSEC3 iteration count beyond which a record set is ignored.
    pub max_nsec3_iterations: u32,

    /// Whether to synthesize a validation-reason TXT record on failure.
    pub add_reason_to_additional: bool,

    /// Class used for the synthetic validation-reason TXT record.
    pub validation_reason_qclass: u16,

    /// Maximum DS/DNSKEY lookup recursion depth while walking the chain
    /// of trust, and the CNAME-loop breaker during findKey.
    pub max_validation_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trust_anchor_file: None,
            max_cache_ttl: 7 * 24 * 3600,
            max_negative_cache_ttl: 3 * 3600,
            max_cache_entries: 50_000,
            max_nsec3_iterations: 150,
            add_reason_to_additional: true,
            validation_reason_qclass: 65280,
            max_validation_depth: 16,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, anyhow::Error> {
        Ok(toml::from_str(s)?)
    }
}
