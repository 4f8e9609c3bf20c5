/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.2

# HINFO RDATA format
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                      CPU                      /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                       OS                      /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

CPU             A <character-string> which specifies the CPU type.

OS              A <character-string> which specifies the operating
                system type.

HINFO records are used to acquire general information about a host.  The
main use is for protocols such as FTP that can use special procedures
when talking between machines or operating systems of the same type.
*/

use super::{parse_character_strings, ERR_RDATA_MSG};
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HInfo {
    pub cpu: Vec<u8>,
    pub os: Vec<u8>,
}

impl HInfo {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        let list = parse_character_strings(rdata)?;
        if list.len() < 2 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        Ok(HInfo { cpu: list[0].clone(), os: list[1].clone() })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.counted_string(&self.cpu)?;
        w.counted_string(&self.os)?;
        Ok(())
    }
}
