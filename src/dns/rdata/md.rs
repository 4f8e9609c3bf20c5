/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.4

# MD RDATA format (Obsolete)
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                   MADNAME                     /
    /                                               /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

MADNAME         A <domain-name> which specifies a host which has a mail
                agent for the domain which should be able to deliver
                mail for the domain.

MD records cause additional section processing which looks up an A type
record corresponding to MADNAME.

MD is obsolete.  See the definition of MX and [RFC-974] for details of
the new scheme.  The recommended policy for dealing with MD RRs found in
a master file is to reject them, or to convert them to MX RRs with a
preference of 0.
*/

use super::{read_embedded_name, ERR_RDATA_MSG};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MD(pub Name);

impl MD {
    pub fn decode(raw: &[u8], rdata_start: usize, rdlength: usize) -> Result<Self, Error> {
        if rdlength == 0 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let (name, _) = read_embedded_name(raw, rdata_start)?;
        Ok(MD(name))
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        w.name(&self.0, compressed);
        Ok(())
    }
}
