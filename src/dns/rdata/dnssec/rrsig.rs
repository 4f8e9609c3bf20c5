/*!
ref: https://www.rfc-editor.org/rfc/rfc4034#section-3

# RRSIG RDATA format

```shell
                        1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |        Type Covered           |  Algorithm    |     Labels    |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |                         Original TTL                         |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |                      Signature Expiration                    |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |                      Signature Inception                     |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |            Key Tag            |                               /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               /
   /                                                               /
   /                          Signer's Name                        /
   /                                                               /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   /                                                               /
   /                            Signature                          /
   /                                                               /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```

Signer's Name MUST NOT be compressed (§3.1.7); the signature field is
raw binary, not base64 (base64 is presentation-format only).
*/

use crate::dns::name::Name;
use crate::dns::wire::{Reader, Writer};
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRSig {
    pub type_covered: u16,
    pub algorithm: u8,
    pub labels: u8,
    pub original_ttl: u32,
    pub sig_expiration: u32,
    pub sig_inception: u32,
    pub key_tag: u16,
    pub signer_name: Name,
    pub signature: Vec<u8>,
}

impl RRSig {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() < 18 {
            return Err(anyhow!("truncated RRSIG rdata"));
        }
        let type_covered = u16::from_be_bytes([rdata[0], rdata[1]]);
        let algorithm = rdata[2];
        let labels = rdata[3];
        let original_ttl = u32::from_be_bytes(rdata[4..8].try_into().unwrap());
        let sig_expiration = u32::from_be_bytes(rdata[8..12].try_into().unwrap());
        let sig_inception = u32::from_be_bytes(rdata[12..16].try_into().unwrap());
        let key_tag = u16::from_be_bytes([rdata[16], rdata[17]]);
        let mut r = Reader::with_pos(rdata, 18);
        let signer_name = r.name()?;
        let signature = rdata[r.pos()..].to_vec();
        Ok(RRSig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            sig_expiration,
            sig_inception,
            key_tag,
            signer_name,
            signature,
        })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.u16(self.type_covered);
        w.u8(self.algorithm);
        w.u8(self.labels);
        w.u32(self.original_ttl);
        w.u32(self.sig_expiration);
        w.u32(self.sig_inception);
        w.u16(self.key_tag);
        w.name(&self.signer_name, false);
        w.bytes(&self.signature);
        Ok(())
    }

    /// The RRSIG_RDATA portion of the signed octet stream (RFC 4034
    /// §3.1.8.1): everything but the Signature field, signer name
    /// uncompressed.
    pub fn signed_prefix(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.u16(self.type_covered);
        w.u8(self.algorithm);
        w.u8(self.labels);
        w.u32(self.original_ttl);
        w.u32(self.sig_expiration);
        w.u32(self.sig_inception);
        w.u16(self.key_tag);
        w.name(&self.signer_name, false);
        w.into_vec()
    }

    /// RFC 1982 serial-number-aware "is `now` within [inception,
    /// expiration]" check, so that timestamps near the 2^32 wraparound
    /// are compared correctly instead of as plain integers.
    pub fn covers_instant(&self, now: u32) -> bool {
        !serial_lt(now, self.sig_inception) && !serial_lt(self.sig_expiration, now)
    }
}

/// RFC 1982 §3.2: `a < b` in serial-number space.
fn serial_lt(a: u32, b: u32) -> bool {
    let diff = a.wrapping_sub(b);
    diff != 0 && (diff as i32) < 0
}
