/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.4.2

# WKS RDATA format

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    ADDRESS                    |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |       PROTOCOL        |                       |
    +--+--+--+--+--+--+--+--+                       |
    |                                               |
    /                   <BIT MAP>                   /
    /                                               /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

ADDRESS         An 32 bit Internet address

PROTOCOL        An 8 bit IP protocol number

<BIT MAP>       A variable length bit map.  The bit map must be a
                multiple of 8 bits long.

The WKS record is used to describe the well known services supported by
a particular protocol on a particular internet address.

WKS RRs cause no additional section processing.
*/

use super::ERR_RDATA_MSG;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WKS {
    pub addr: Ipv4Addr,
    pub protocol: u8,
    pub bit_map: Vec<u8>,
}

impl WKS {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        if rdata.len() < 5 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let octets: [u8; 4] = rdata[0..4].try_into().unwrap();
        Ok(WKS {
            addr: Ipv4Addr::from(octets),
            protocol: rdata[4],
            bit_map: rdata[5..].to_vec(),
        })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.bytes(&self.addr.octets());
        w.u8(self.protocol);
        w.bytes(&self.bit_map);
        Ok(())
    }
}
