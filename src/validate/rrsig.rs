/*!
ref: https://www.rfc-editor.org/rfc/rfc4034#section-3.1.8.1

RRSIG verification: for each candidate signature covering the RRset,
check owner/type/class, signer ancestry, the validity window, and that
a zone-key DNSKEY with the matching footprint exists, then run the
algorithm's signature check over the RRSIG rdata prefix plus the
canonical RRset. One valid signature is enough to call the set Secure.
*/

use crate::dns::name::Name;
use crate::dns::rdata::dnssec::rrsig::RRSig;
use crate::dns::rdata::dnssec::verify;
use crate::dns::record::RRset;
use crate::error::{ValidationError, ValidationFailureKind};

/// True when the RRSIG's Labels field is smaller than the RRset owner's
/// label count, meaning the record was synthesized from a wildcard.
pub fn wildcard_expanded(owner: &Name, sig: &RRSig) -> bool {
    (owner.label_count() as u8) > sig.labels
}

/// Verifies `rrset` against `dnskeys` (the DNSKEY RRset for the signer
/// zone). Returns `Ok(())` (Secure) on the first RRSIG that validates,
/// or the most informative failure otherwise.
pub fn verify_rrset(rrset: &RRset, dnskeys: &RRset, now: u32) -> Result<(), ValidationError> {
    if rrset.sigs().is_empty() {
        return Err(ValidationError::ValidationFailure { kind: ValidationFailureKind::RrsigMissing });
    }

    let mut best = ValidationFailureKind::SignatureMismatch;

    for sig in rrset.sigs() {
        if sig.type_covered != rrset.rtype {
            continue;
        }
        if !rrset.name.is_subdomain_of(&sig.signer_name) {
            continue;
        }
        if !sig.covers_instant(now) {
            best = ValidationFailureKind::ClockWindowViolation;
            continue;
        }

        let Some(dnskey) = find_matching_key(dnskeys, sig) else {
            best = ValidationFailureKind::DnskeyMissing;
            continue;
        };
        if !dnskey.is_zone_key() {
            best = ValidationFailureKind::DnskeyMissing;
            continue;
        }

        let signed_data = {
            let mut data = sig.signed_prefix();
            data.extend(rrset.canonical_encode(sig.original_ttl));
            data
        };

        match verify::verify(sig.algorithm, &dnskey.pub_key, &signed_data, &sig.signature) {
            Ok(()) => return Ok(()),
            Err(verify::VerifyError::UnsupportedAlgorithm(_)) => best = ValidationFailureKind::UnsupportedAlgorithm,
            Err(_) => best = ValidationFailureKind::SignatureMismatch,
        }
    }

    Err(ValidationError::ValidationFailure { kind: best })
}

fn find_matching_key<'a>(dnskeys: &'a RRset, sig: &RRSig) -> Option<&'a crate::dns::rdata::DNSKey> {
    dnskeys.records.iter().find_map(|rdata| match rdata {
        crate::dns::rdata::RData::DNSKey(k) if k.algorithm == sig.algorithm && k.key_tag() == sig.key_tag => Some(k),
        _ => None,
    })
}
