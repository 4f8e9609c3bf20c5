/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.4.1

# A RDATA format

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    ADDRESS                    |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

ADDRESS         A 32 bit Internet address.

Hosts that have multiple Internet addresses will have multiple A
records.

A records cause no additional section processing.  The RDATA section of
an A line in a master file is an Internet address expressed as four
decimal numbers separated by dots without any imbedded spaces (e.g.,
"10.2.0.52" or "192.0.5.6").
*/

use super::ERR_RDATA_MSG;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct A(pub Ipv4Addr);

impl A {
    pub fn new(addr: Ipv4Addr) -> Self {
        A(addr)
    }

    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() != 4 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let octets: [u8; 4] = rdata.try_into().unwrap();
        Ok(A(Ipv4Addr::from(octets)))
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.bytes(&self.0.octets());
        Ok(())
    }
}
