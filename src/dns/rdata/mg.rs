/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.6

# MG RDATA format (EXPERIMENTAL)

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                   MGMNAME                     /
    /                                               /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

MGMNAME         A <domain-name> which specifies a mailbox which is a
                member of the mail group specified by the domain name.

MG records cause no additional section processing.
*/

use super::{read_embedded_name, ERR_RDATA_MSG};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MG(pub Name);

impl MG {
    pub fn decode(raw: &[u8], rdata_start: usize, rdlength: usize) -> Result<Self, Error> {
        if rdlength == 0 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let (name, _) = read_embedded_name(raw, rdata_start)?;
        Ok(MG(name))
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        w.name(&self.0, compressed);
        Ok(())
    }
}
