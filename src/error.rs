//! Public error taxonomy for the validator boundary.
//!
//! Internal wire/codec failures keep using `anyhow::Error` exactly as the
//! rest of `dns::rdata` does; this type sits only at the edges where a
//! caller needs a stable, matchable reason and an EDE code.

use thiserror::Error;

/// RFC 8914 Extended DNS Error codes this crate can emit.
pub mod ede {
    pub const OTHER: u16 = 0;
    pub const DNSKEY_ALGORITHM: u16 = 1;
    pub const DSSEC_INDETERMINATE: u16 = 5;
    pub const DNSSEC_BOGUS: u16 = 6;
    pub const SIGNATURE_EXPIRED: u16 = 7;
    pub const SIGNATURE_NOT_YET_VALID: u16 = 8;
    pub const DNSKEY_MISSING: u16 = 9;
    pub const RRSIGS_MISSING: u16 = 10;
    pub const NO_ZONE_KEY_BIT_SET: u16 = 11;
    pub const NSEC_MISSING: u16 = 12;
    pub const NETWORK_ERROR: u16 = 23;
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("malformed wire data: {0}")]
    WireParse(String),

    #[error("name `{0}` is relative where an absolute name is required")]
    RelativeName(String),

    #[error("name exceeds 255 octets")]
    NameTooLong,

    #[error("unsupported or unexpected record type {0}")]
    InvalidType(u16),

    #[error("unsupported or unexpected class {0}")]
    InvalidClass(u16),

    #[error("validation failed: {kind}")]
    ValidationFailure { kind: ValidationFailureKind },

    #[error("name is outside any configured island of trust")]
    Insecure,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("zone transfer error: {0}")]
    ZoneTransfer(String),

    #[error("no such domain: {0}")]
    NoSuchDomain(String),

    #[error("no such rrset: {0}/{1}")]
    NoSuchRRSet(String, u16),

    #[error("upstream server failed")]
    ServerFailed,

    #[error("invalid zone data: {0}")]
    InvalidZoneData(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailureKind {
    RrsigMissing,
    SignatureMismatch,
    ClockWindowViolation,
    UnsupportedAlgorithm,
    DnskeyMissing,
    NsecDoesNotProve,
    WildcardProofMissing,
    DsHashMismatch,
}

impl std::fmt::Display for ValidationFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationFailureKind::RrsigMissing => "RRSIG missing",
            ValidationFailureKind::SignatureMismatch => "signature mismatch",
            ValidationFailureKind::ClockWindowViolation => "signature outside validity window",
            ValidationFailureKind::UnsupportedAlgorithm => "unsupported algorithm",
            ValidationFailureKind::DnskeyMissing => "DNSKEY missing",
            ValidationFailureKind::NsecDoesNotProve => "NSEC/NSEC3 does not prove claim",
            ValidationFailureKind::WildcardProofMissing => "wildcard non-existence proof missing",
            ValidationFailureKind::DsHashMismatch => "DS hash does not match any DNSKEY",
        };
        f.write_str(s)
    }
}

impl ValidationError {
    /// Maps this error to the Extended DNS Error code a SERVFAIL response
    /// carries for it. Errors that never reach the wire (argument
    /// validation, I/O) return `ede::OTHER`.
    pub fn ede_code(&self) -> u16 {
        match self {
            ValidationError::ValidationFailure { kind } => match kind {
                ValidationFailureKind::RrsigMissing => ede::RRSIGS_MISSING,
                ValidationFailureKind::SignatureMismatch => ede::DNSSEC_BOGUS,
                ValidationFailureKind::ClockWindowViolation => ede::SIGNATURE_EXPIRED,
                ValidationFailureKind::UnsupportedAlgorithm => ede::DNSKEY_ALGORITHM,
                ValidationFailureKind::DnskeyMissing => ede::DNSKEY_MISSING,
                ValidationFailureKind::NsecDoesNotProve => ede::NSEC_MISSING,
                ValidationFailureKind::WildcardProofMissing => ede::NSEC_MISSING,
                ValidationFailureKind::DsHashMismatch => ede::DNSSEC_BOGUS,
            },
            ValidationError::Transport(_) | ValidationError::ServerFailed => ede::NETWORK_ERROR,
            ValidationError::WireParse(_) => ede::DNSSEC_BOGUS,
            _ => ede::OTHER,
        }
    }
}
