/*!
ref: https://www.rfc-editor.org/rfc/rfc4034#section-2

# DNSKEY RDATA format

```shell
                        1 1 1 1 1 1 1 1 1 1 2 2 2 2 2 2 2 2 2 2 3 3
    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |              Flags            |    Protocol   |   Algorithm   |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   /                                                               /
   /                            Public Key                         /
   /                                                               /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```

The Public Key field is raw, binary key material on the wire (RFC 3110
§2 for RSA, e.g.) — never base64, which is presentation-format only.
*/

use super::key_tag::{calc_key_tag, KeyTag};
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};
use rsbit::BitOperation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DNSKey {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub pub_key: Vec<u8>,
}

impl DNSKey {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() < 4 {
            return Err(anyhow!("truncated DNSKEY rdata"));
        }
        Ok(DNSKey {
            flags: u16::from_be_bytes([rdata[0], rdata[1]]),
            protocol: rdata[2],
            algorithm: rdata[3],
            pub_key: rdata[4..].to_vec(),
        })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.u16(self.flags);
        w.u8(self.protocol);
        w.u8(self.algorithm);
        w.bytes(&self.pub_key);
        Ok(())
    }

    /// Flags bit 7 (the last bit of the high octet) is the Zone Key flag;
    /// bit 15 (the last bit of the low octet) is the Secure Entry Point
    /// flag (RFC 4034 §2.1.1, §2.1.2).
    pub fn is_zone_key(&self) -> bool {
        let hi = (self.flags >> 8) as u8;
        hi.get(0) == 1
    }

    pub fn is_sep(&self) -> bool {
        let lo = self.flags as u8;
        lo.get(0) == 1
    }

    /// Wire-format rdata (flags|protocol|algorithm|pubkey), the input to
    /// the key tag algorithm and to DS digest computation.
    pub fn as_rdata_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        let _ = self.encode(&mut w);
        w.into_vec()
    }

    pub fn key_tag(&self) -> KeyTag {
        calc_key_tag(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_stops_algorithm_at_byte_three() {
        // flags=0x0100 (zone key), protocol=3, algorithm=8, pubkey=[1,2,3]
        let rdata = [0x01, 0x00, 0x03, 0x08, 0x01, 0x02, 0x03];
        let key = DNSKey::decode(&rdata).unwrap();
        assert_eq!(key.flags, 0x0100);
        assert_eq!(key.protocol, 3);
        assert_eq!(key.algorithm, 8);
        assert_eq!(key.pub_key, vec![1, 2, 3]);
        assert!(key.is_zone_key());
    }

    #[test]
    fn round_trips_raw_binary_pubkey() {
        let key = DNSKey { flags: 0x0101, protocol: 3, algorithm: 8, pub_key: vec![0xAA, 0xBB, 0xCC] };
        let mut w = Writer::new();
        key.encode(&mut w).unwrap();
        let buf = w.into_vec();
        let decoded = DNSKey::decode(&buf).unwrap();
        assert_eq!(decoded, key);
        assert!(decoded.is_sep());
    }
}
