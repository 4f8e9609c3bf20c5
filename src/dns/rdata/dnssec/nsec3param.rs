/*!
ref: https://www.rfc-editor.org/rfc/rfc5155#section-4

# NSEC3PARAM RDATA format

```shell
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |   Hash Alg.   |     Flags     |          Iterations          |
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   |  Salt Length  |                     Salt                     /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```

Published at the zone apex so resolvers can compute NSEC3 owner
hashes without having to guess the salt/iteration parameters in use.
*/

use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NSEC3PARAM {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: Vec<u8>,
}

impl NSEC3PARAM {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() < 5 {
            return Err(anyhow!("truncated NSEC3PARAM rdata"));
        }
        let salt_len = rdata[4] as usize;
        if 5 + salt_len != rdata.len() {
            return Err(anyhow!("NSEC3PARAM salt length mismatch"));
        }
        Ok(NSEC3PARAM {
            hash_algorithm: rdata[0],
            flags: rdata[1],
            iterations: u16::from_be_bytes([rdata[2], rdata[3]]),
            salt: rdata[5..].to_vec(),
        })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.u8(self.hash_algorithm);
        w.u8(self.flags);
        w.u16(self.iterations);
        w.u8(self.salt.len() as u8);
        w.bytes(&self.salt);
        Ok(())
    }
}
