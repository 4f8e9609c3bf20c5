/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.10

#  NULL RDATA format (EXPERIMENTAL)
```shell
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                  <anything>                   /
    /                                               /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
```
Anything at all may be in the RDATA field so long as it is 65535 octets
or less.

NULL records cause no additional section processing.  NULL RRs are not
allowed in master files.  NULLs are used as placeholders in some
experimental extensions of the DNS.
*/

use crate::dns::wire::Writer;
use anyhow::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Null(pub Vec<u8>);

impl Null {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        Ok(Null(rdata.to_vec()))
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.bytes(&self.0);
        Ok(())
    }
}
