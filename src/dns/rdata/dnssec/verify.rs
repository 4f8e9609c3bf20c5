/*!
ref: https://www.rfc-editor.org/rfc/rfc3110 (RSA public key wire format)
ref: https://www.rfc-editor.org/rfc/rfc4034#section-3.1.8.1 (verification input)

Signature verification dispatch, keyed by DNSKEY/RRSIG algorithm
number. Only the RSA family is implemented; anything else surfaces as
`VerifyError::UnsupportedAlgorithm` so the validator can record a Bad
key entry with the right EDE hint instead of panicking.
*/

use super::{ALG_RSASHA1, ALG_RSASHA1_NSEC3_SHA1, ALG_RSASHA256, ALG_RSASHA512};
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("unsupported DNSSEC algorithm {0}")]
    UnsupportedAlgorithm(u8),
    #[error("malformed RSA public key material")]
    MalformedKey,
    #[error("signature did not verify")]
    BadSignature,
}

/// Parses the RFC 3110 §2 wire encoding of an RSA public key as carried
/// in a DNSKEY's Public Key field: a one-octet exponent length (or,
/// when that octet is zero, a two-octet length), the exponent, then
/// the modulus filling the remainder.
fn parse_rsa_public_key(pub_key: &[u8]) -> Result<RsaPublicKey, VerifyError> {
    if pub_key.is_empty() {
        return Err(VerifyError::MalformedKey);
    }
    let (exp_len, rest) = if pub_key[0] == 0 {
        if pub_key.len() < 3 {
            return Err(VerifyError::MalformedKey);
        }
        let len = u16::from_be_bytes([pub_key[1], pub_key[2]]) as usize;
        (len, &pub_key[3..])
    } else {
        (pub_key[0] as usize, &pub_key[1..])
    };
    if rest.len() <= exp_len {
        return Err(VerifyError::MalformedKey);
    }
    let (exponent, modulus) = rest.split_at(exp_len);
    let e = BigUint::from_bytes_be(exponent);
    let n = BigUint::from_bytes_be(modulus);
    RsaPublicKey::new(n, e).map_err(|_| VerifyError::MalformedKey)
}

/// Verifies `signature` over `signed_data` (the RRSIG_RDATA prefix plus
/// canonical RRset, per RFC 4034 §3.1.8.1) using the DNSKEY's public
/// key material and the RRSIG's algorithm.
pub fn verify(algorithm: u8, pub_key: &[u8], signed_data: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
    match algorithm {
        ALG_RSASHA1 | ALG_RSASHA1_NSEC3_SHA1 => {
            let key = parse_rsa_public_key(pub_key)?;
            let digest = <Sha1 as sha1::Digest>::digest(signed_data);
            key.verify(Pkcs1v15Sign::new::<Sha1>(), &digest, signature)
                .map_err(|_| VerifyError::BadSignature)
        }
        ALG_RSASHA256 => {
            let key = parse_rsa_public_key(pub_key)?;
            let digest = <Sha256 as sha2::Digest>::digest(signed_data);
            key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
                .map_err(|_| VerifyError::BadSignature)
        }
        ALG_RSASHA512 => {
            let key = parse_rsa_public_key(pub_key)?;
            let digest = <Sha512 as sha2::Digest>::digest(signed_data);
            key.verify(Pkcs1v15Sign::new::<Sha512>(), &digest, signature)
                .map_err(|_| VerifyError::BadSignature)
        }
        other => Err(VerifyError::UnsupportedAlgorithm(other)),
    }
}
