/*!
ref: https://www.rfc-editor.org/rfc/rfc3596#section-2.2

# AAAA RDATA format

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    ADDRESS                    |
    /                 (128 bits)                    /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

ADDRESS         A 128 bit IPv6 address.
*/

use super::ERR_RDATA_MSG;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};
use std::net::Ipv6Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AAAA(pub Ipv6Addr);

impl AAAA {
    pub fn new(addr: Ipv6Addr) -> Self {
        AAAA(addr)
    }

    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() != 16 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let octets: [u8; 16] = rdata.try_into().unwrap();
        Ok(AAAA(Ipv6Addr::from(octets)))
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.bytes(&self.0.octets());
        Ok(())
    }
}
