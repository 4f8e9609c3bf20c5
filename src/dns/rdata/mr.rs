/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.8

# MR RDATA format (EXPERIMENTAL)

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                   NEWNAME                     /
    /                                               /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

NEWNAME         A <domain-name> which specifies a mailbox which is the
                proper rename of the specified mailbox.

MR records cause no additional section processing.  The main use for MR
is as a forwarding entry for a user who has moved to a different
mailbox.
*/

use super::{read_embedded_name, ERR_RDATA_MSG};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MR(pub Name);

impl MR {
    pub fn decode(raw: &[u8], rdata_start: usize, rdlength: usize) -> Result<Self, Error> {
        if rdlength == 0 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let (name, _) = read_embedded_name(raw, rdata_start)?;
        Ok(MR(name))
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        w.name(&self.0, compressed);
        Ok(())
    }
}
