/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-3.3.13

# SOA RDATA format

    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                     MNAME                     /
    /                                               /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                     RNAME                     /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    SERIAL                     |
    |                                               |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    REFRESH                    |
    |                                               |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                     RETRY                     |
    |                                               |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    EXPIRE                     |
    |                                               |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                    MINIMUM                    |
    |                                               |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

where:

MNAME           The <domain-name> of the name server that was the
                original or primary source of data for this zone.

RNAME           A <domain-name> which specifies the mailbox of the
                person responsible for this zone.

SERIAL          The unsigned 32 bit version number of the original copy
                of the zone.  Zone transfers preserve this value.  This
                value wraps and should be compared using sequence space
                arithmetic.

REFRESH         A 32 bit time interval before the zone should be
                refreshed.

RETRY           A 32 bit time interval that should elapse before a
                failed refresh should be retried.

EXPIRE          A 32 bit time value that specifies the upper limit on
                the time interval that can elapse before the zone is no
                longer authoritative.

MINIMUM         The unsigned 32 bit minimum TTL field that should be
                exported with any RR from this zone.

SOA records cause no additional section processing.

All times are in units of seconds.

Most of these fields are pertinent only for name server maintenance
operations.  However, MINIMUM is used in all query operations that
retrieve RRs from a zone.  Whenever a RR is sent in a response to a
query, the TTL field is set to the maximum of the TTL field from the RR
and the MINIMUM field in the appropriate SOA.  Thus MINIMUM is a lower
bound on the TTL field for all RRs in a zone.
*/

use super::{read_embedded_name, ERR_RDATA_MSG};
use crate::dns::name::Name;
use crate::dns::wire::Writer;
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SOA {
    pub mname: Name,
    pub rname: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl SOA {
    pub fn decode(raw: &[u8], rdata_start: usize, rdlength: usize) -> Result<Self, Error> {
        if rdlength < 20 {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let (mname, next) = read_embedded_name(raw, rdata_start)?;
        let (rname, next) = read_embedded_name(raw, next)?;
        if next + 20 > raw.len() {
            return Err(anyhow!(ERR_RDATA_MSG));
        }
        let getu32 = |off: usize| u32::from_be_bytes(raw[off..off + 4].try_into().unwrap());
        Ok(SOA {
            mname,
            rname,
            serial: getu32(next),
            refresh: getu32(next + 4),
            retry: getu32(next + 8),
            expire: getu32(next + 12),
            minimum: getu32(next + 16),
        })
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        w.name(&self.mname, compressed);
        w.name(&self.rname, compressed);
        w.u32(self.serial);
        w.u32(self.refresh);
        w.u32(self.retry);
        w.u32(self.expire);
        w.u32(self.minimum);
        Ok(())
    }
}
