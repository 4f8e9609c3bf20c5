/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.14

# TXT RDATA format

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                   TXT-DATA                    /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

TXT-DATA        One or more <character-string>s.

TXT RRs are used to hold descriptive text.  The semantics of the text
depends on the domain where it is found.
*/

use super::parse_character_strings;
use crate::dns::wire::Writer;
use anyhow::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TXT(pub Vec<Vec<u8>>);

impl TXT {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        Ok(TXT(parse_character_strings(rdata)?))
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        for s in &self.0 {
            w.counted_string(s)?;
        }
        Ok(())
    }
}
