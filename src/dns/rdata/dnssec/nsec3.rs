/*!
ref: https://www.rfc-editor.org/rfc/rfc5155#section-3

# NSEC3 RDATA format

```shell
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |   Hash Alg.   |     Flags     |          Iterations          |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |  Salt Length  |                     Salt                     /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |  Hash Length  |             Next Hashed Owner Name            /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   /                       Type Bit Maps                           /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```

Owner name hashing (RFC 5155 §5): `IH(0) = H(owner | salt)`, `IH(k) =
H(IH(k-1) | salt)` for `k` in `1..=iterations`, output is `IH(iterations)`
— both loop endpoints included. Only hash algorithm 1 (SHA-1) is
defined; anything else must be rejected by the caller
(`stripUnknownAlgNSEC3s`).
*/

use super::nsec::{bitmap_has_type, decode_type_bitmaps, decode_type_bitmaps_to_types, encode_type_bitmaps};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};
use sha1::{Digest, Sha1};

const FLAG_OPT_OUT: u8 = 0b0000_0001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NSEC3 {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: Vec<u8>,
    pub next_hashed_owner_name: Vec<u8>,
    pub type_bit_maps: Vec<(u8, Vec<u8>)>,
}

impl NSEC3 {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() < 5 {
            return Err(anyhow!("truncated NSEC3 rdata"));
        }
        let hash_algorithm = rdata[0];
        let flags = rdata[1];
        let iterations = u16::from_be_bytes([rdata[2], rdata[3]]);
        let salt_len = rdata[4] as usize;
        let mut pos = 5;
        if pos + salt_len > rdata.len() {
            return Err(anyhow!("truncated NSEC3 salt"));
        }
        let salt = rdata[pos..pos + salt_len].to_vec();
        pos += salt_len;

        if pos >= rdata.len() {
            return Err(anyhow!("truncated NSEC3 hash length"));
        }
        let hash_len = rdata[pos] as usize;
        pos += 1;
        if pos + hash_len > rdata.len() {
            return Err(anyhow!("truncated NSEC3 next hashed owner name"));
        }
        let next_hashed_owner_name = rdata[pos..pos + hash_len].to_vec();
        pos += hash_len;

        let type_bit_maps = decode_type_bitmaps(&rdata[pos..])?;

        Ok(NSEC3 { hash_algorithm, flags, iterations, salt, next_hashed_owner_name, type_bit_maps })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.u8(self.hash_algorithm);
        w.u8(self.flags);
        w.u16(self.iterations);
        w.u8(self.salt.len() as u8);
        w.bytes(&self.salt);
        w.u8(self.next_hashed_owner_name.len() as u8);
        w.bytes(&self.next_hashed_owner_name);
        for (window, bitmap) in &self.type_bit_maps {
            w.u8(*window);
            w.u8(bitmap.len() as u8);
            w.bytes(bitmap);
        }
        Ok(())
    }

    pub fn opt_out(&self) -> bool {
        self.flags & FLAG_OPT_OUT == FLAG_OPT_OUT
    }

    pub fn covers_type(&self, t: u16) -> bool {
        bitmap_has_type(&self.type_bit_maps, t)
    }

    pub fn types(&self) -> Vec<u16> {
        decode_type_bitmaps_to_types(&self.type_bit_maps)
    }
}

/// RFC 5155 §5 iterated-hash construction. `name` is hashed in its
/// canonical (lowercased, uncompressed) wire form.
pub fn hash_owner_name(name: &Name, iterations: u16, salt: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    w.name_canonical(name);
    let wire = w.into_vec();

    let mut ih = {
        let mut hasher = Sha1::new();
        hasher.update(&wire);
        hasher.update(salt);
        hasher.finalize().to_vec()
    };
    for _ in 0..iterations {
        let mut hasher = Sha1::new();
        hasher.update(&ih);
        hasher.update(salt);
        ih = hasher.finalize().to_vec();
    }
    ih
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_rdata() {
        let mut bitmap = NSEC3 {
            hash_algorithm: 1,
            flags: 1,
            iterations: 12,
            salt: vec![0xAA, 0xBB],
            next_hashed_owner_name: vec![1, 2, 3, 4, 5],
            type_bit_maps: vec![],
        };
        bitmap.type_bit_maps = encode_type_bitmaps_pub(&[1, 28]);
        let mut w = Writer::new();
        bitmap.encode(&mut w).unwrap();
        let buf = w.into_vec();
        let decoded = NSEC3::decode(&buf).unwrap();
        assert_eq!(decoded, bitmap);
        assert!(decoded.opt_out());
        assert!(decoded.covers_type(1));
        assert!(decoded.covers_type(28));
    }

    #[test]
    fn zero_iterations_hashes_exactly_once() {
        let name = Name::parse("example.").unwrap();
        let h0 = hash_owner_name(&name, 0, &[]);
        assert_eq!(h0.len(), 20);
    }

    #[test]
    fn more_iterations_changes_output() {
        let name = Name::parse("example.").unwrap();
        let h0 = hash_owner_name(&name, 0, &[1, 2]);
        let h1 = hash_owner_name(&name, 1, &[1, 2]);
        assert_ne!(h0, h1);
    }

    fn encode_type_bitmaps_pub(types: &[u16]) -> Vec<(u8, Vec<u8>)> {
        super::encode_type_bitmaps(types)
    }
}
