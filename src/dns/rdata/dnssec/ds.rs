/*!
ref: https://www.rfc-editor.org/rfc/rfc4034#section-5

# DS RDATA format

```shell
                        1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |           Key Tag             |  Algorithm    |  Digest Type  |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   /                                                               /
   /                            Digest                             /
   /                                                               /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```

The digest is computed over the owner name (canonical wire form) of
the DNSKEY RR concatenated with the DNSKEY RDATA (RFC 4034 §5.1.4):
`digest = hash(canonical owner name | DNSKEY RDATA)`.
*/

use super::dnskey::DNSKey;
use super::{DigestAlgorithm, DIGEST_SHA1, DIGEST_SHA256, DIGEST_SHA384};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DS {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: DigestAlgorithm,
    pub digest: Vec<u8>,
}

impl DS {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() < 4 {
            return Err(anyhow!("truncated DS rdata"));
        }
        Ok(DS {
            key_tag: u16::from_be_bytes([rdata[0], rdata[1]]),
            algorithm: rdata[2],
            digest_type: rdata[3],
            digest: rdata[4..].to_vec(),
        })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.u16(self.key_tag);
        w.u8(self.algorithm);
        w.u8(self.digest_type);
        w.bytes(&self.digest);
        Ok(())
    }

    /// Builds the DS record a validator expects for `owner`/`dnskey` under
    /// `digest_type`, to compare against an upstream-supplied DS.
    pub fn from_dnskey(owner: &Name, dnskey: &DNSKey, digest_type: DigestAlgorithm) -> Result<Self, Error> {
        let mut w = Writer::new();
        w.name_canonical(owner);
        w.bytes(&dnskey.as_rdata_bytes());
        let input = w.into_vec();

        let digest = match digest_type {
            DIGEST_SHA1 => Sha1::digest(&input).to_vec(),
            DIGEST_SHA256 => Sha256::digest(&input).to_vec(),
            DIGEST_SHA384 => Sha384::digest(&input).to_vec(),
            other => return Err(anyhow!("unsupported DS digest type {other}")),
        };

        Ok(DS { key_tag: dnskey.key_tag(), algorithm: dnskey.algorithm, digest_type, digest })
    }

    pub fn matches(&self, owner: &Name, dnskey: &DNSKey) -> bool {
        match Self::from_dnskey(owner, dnskey, self.digest_type) {
            Ok(computed) => computed.digest == self.digest && computed.key_tag == self.key_tag && computed.algorithm == self.algorithm,
            Err(_) => false,
        }
    }
}
