/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.9

# MX RDATA format

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                  PREFERENCE                   |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                   EXCHANGE                    /
    /                                               /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

PREFERENCE      A 16 bit integer which specifies the preference given to
                this RR among others at the same owner.  Lower values
                are preferred.

EXCHANGE        A <domain-name> which specifies a host willing to act as
                a mail exchange for the owner name.

MX records cause type A additional section processing for the host
specified by EXCHANGE.  The use of MX RRs is explained in detail in
[RFC-974].
*/

use super::{read_embedded_name, ERR_RDATA_MSG};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MX {
    pub preference: u16,
    pub exchange: Name,
}

impl MX {
    pub fn decode(raw: &[u8], rdata_start: usize, rdlength: usize) -> Result<Self, Error> {
        if rdlength < 3 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let preference = u16::from_be_bytes(raw[rdata_start..rdata_start + 2].try_into().unwrap());
        let (exchange, _) = read_embedded_name(raw, rdata_start + 2)?;
        Ok(MX { preference, exchange })
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        w.u16(self.preference);
        w.name(&self.exchange, compressed);
        Ok(())
    }
}
