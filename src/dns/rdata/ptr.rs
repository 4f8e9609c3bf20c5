/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.12

# PTR RDATA format

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                   PTRDNAME                    /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

PTRDNAME        A <domain-name> which points to some location in the
                domain name space.

PTR records cause no additional section processing.  These RRs are used
in special domains to point to some other location in the domain space.
These records are simple data, and don't imply any special processing
similar to that performed by CNAME, which identifies aliases.  See the
description of the IN-ADDR.ARPA domain for an example.
*/

use super::{read_embedded_name, ERR_RDATA_MSG};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PTR(pub Name);

impl PTR {
    pub fn decode(raw: &[u8], rdata_start: usize, rdlength: usize) -> Result<Self, Error> {
        if rdlength == 0 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let (name, _) = read_embedded_name(raw, rdata_start)?;
        Ok(PTR(name))
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        w.name(&self.0, compressed);
        Ok(())
    }
}
