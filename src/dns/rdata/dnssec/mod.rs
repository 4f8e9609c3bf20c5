/*!
ref: https://www.rfc-editor.org/rfc/rfc4034
ref: https://www.rfc-editor.org/rfc/rfc5155

DNSSEC record types (DNSKEY, DS, RRSIG, NSEC) and their RFC 5155
successors (NSEC3, NSEC3PARAM), plus the algorithm-number tables and
signature-verification dispatch the validator drives them with.
*/

pub mod dnskey;
pub mod ds;
pub mod key_tag;
pub mod nsec;
pub mod nsec3;
pub mod nsec3param;
pub mod rrsig;
pub mod verify;

/// ref: https://www.iana.org/assignments/dns-sec-alg-numbers
pub type Algorithm = u8;

pub const ALG_RSAMD5: Algorithm = 1;
pub const ALG_DH: Algorithm = 2;
pub const ALG_DSA: Algorithm = 3;
pub const ALG_RSASHA1: Algorithm = 5;
pub const ALG_DSA_NSEC3_SHA1: Algorithm = 6;
pub const ALG_RSASHA1_NSEC3_SHA1: Algorithm = 7;
pub const ALG_RSASHA256: Algorithm = 8;
pub const ALG_RSASHA512: Algorithm = 10;
pub const ALG_ECC_GOST: Algorithm = 12;
pub const ALG_ECDSAP256SHA256: Algorithm = 13;
pub const ALG_ECDSAP384SHA384: Algorithm = 14;
pub const ALG_ED25519: Algorithm = 15;
pub const ALG_ED448: Algorithm = 16;
pub const ALG_INDIRECT: Algorithm = 252;
pub const ALG_PRIVATEDNS: Algorithm = 253;
pub const ALG_PRIVATEOID: Algorithm = 254;

/// ref: https://www.rfc-editor.org/rfc/rfc4034#appendix-A.2
pub type DigestAlgorithm = u8;

pub const DIGEST_SHA1: DigestAlgorithm = 1;
pub const DIGEST_SHA256: DigestAlgorithm = 2;
pub const DIGEST_GOST: DigestAlgorithm = 3;
pub const DIGEST_SHA384: DigestAlgorithm = 4;

/// NSEC3 hash algorithm registry (RFC 5155 §2.4 only defines SHA-1).
pub const NSEC3_HASH_SHA1: u8 = 1;
