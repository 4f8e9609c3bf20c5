/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-4.1.3
ref: https://www.rfc-editor.org/rfc/rfc4034#section-3.1.8.1 (canonical RRset)

```shell
      0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    /                      NAME                     /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                      TYPE                     |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                     CLASS                     |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                      TTL                      |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    |                   RDLENGTH                    |
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--|
    /                     RDATA                     /
    +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
```
*/

use super::name::Name;
use super::rdata::{dnssec::rrsig::RRSig, RData};
use super::wire::{Reader, Writer};
use super::Type;
use anyhow::{bail, Error};
use std::cmp::min;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: Name,
    pub class: u16,
    pub ttl: u32,
    pub rdata: RData,
}

impl Record {
    pub fn rtype(&self) -> Type {
        self.rdata.rtype()
    }

    pub fn parse(r: &mut Reader, raw: &[u8]) -> Result<Self, Error> {
        let name = r.name()?;
        let typ = r.u16()?;
        let class = r.u16()?;
        let ttl = r.u32()?;
        let rdlength = r.u16()? as usize;
        if r.remaining() < rdlength {
            bail!("rdata length mismatch");
        }
        let rdata_start = r.pos();
        let rdata = RData::parse(typ, raw, rdata_start, rdlength)?;
        r.seek(rdata_start + rdlength);
        Ok(Record { name, class, ttl, rdata })
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        w.name(&self.name, compressed);
        w.u16(self.rtype());
        w.u16(self.class);
        w.u32(self.ttl);
        let placeholder = w.len();
        w.u16(0);
        let before = w.len();
        self.rdata.encode(w, compressed)?;
        let written = w.len() - before;
        if written > u16::MAX as usize {
            bail!("rdata too long to encode");
        }
        w.patch_u16(placeholder, written as u16);
        Ok(())
    }

    /// Canonical wire form (RFC 4034 §6.2): owner lowercased (already
    /// guaranteed by `Name`), no compression, TTL fixed to the caller's
    /// value (the RRSIG's original TTL when building the signed octet
    /// stream).
    pub fn encode_canonical(&self, w: &mut Writer, ttl: u32) -> Result<(), Error> {
        w.name_canonical(&self.name);
        w.u16(self.rtype());
        w.u16(self.class);
        w.u32(ttl);
        let mut rdata_w = Writer::new();
        self.rdata.encode(&mut rdata_w, false)?;
        let rdata_bytes = rdata_w.into_vec();
        w.u16(rdata_bytes.len() as u16);
        w.bytes(&rdata_bytes);
        Ok(())
    }
}

/// All records sharing (owner, type, class); `ttl` is the minimum of
/// member TTLs; `sigs` are the RRSIG records covering this set.
#[derive(Debug, Clone, PartialEq)]
pub struct RRset {
    pub name: Name,
    pub rtype: Type,
    pub class: u16,
    pub ttl: u32,
    pub records: Vec<RData>,
    pub sigs: Vec<RRSig>,
}

impl RRset {
    pub fn new(name: Name, rtype: Type, class: u16, ttl: u32) -> Self {
        RRset { name, rtype, class, ttl, records: vec![], sigs: vec![] }
    }

    pub fn from_record(r: Record) -> Self {
        let mut s = RRset::new(r.name, r.rtype(), r.class, r.ttl);
        s.records.push(r.rdata);
        s
    }

    /// Rejects records violating the shared owner/type/class invariant.
    pub fn add_rr(&mut self, name: &Name, rtype: Type, class: u16, ttl: u32, rdata: RData) -> Result<(), Error> {
        if name != &self.name || rtype != self.rtype || class != self.class {
            bail!("record does not belong to this RRset");
        }
        self.ttl = min(self.ttl, ttl);
        self.records.push(rdata);
        Ok(())
    }

    pub fn add_sig(&mut self, sig: RRSig) -> Result<(), Error> {
        if sig.type_covered != self.rtype {
            bail!("RRSIG type_covered does not match RRset type");
        }
        self.sigs.push(sig);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sigs(&self) -> &[RRSig] {
        &self.sigs
    }

    /// Canonical RRset encoding used as input to RRSIG verification:
    /// records sorted by canonical rdata bytes, each written with the
    /// RRSIG's original TTL.
    pub fn canonical_encode(&self, ttl: u32) -> Vec<u8> {
        let mut records: Vec<&RData> = self.records.iter().collect();
        records.sort_by(|a, b| a.canonical_bytes().cmp(&b.canonical_bytes()));
        let mut w = Writer::new();
        for rdata in records {
            let rec = Record { name: self.name.clone(), class: self.class, ttl, rdata: rdata.clone() };
            let _ = rec.encode_canonical(&mut w, ttl);
        }
        w.into_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityStatus {
    Unchecked,
    Indeterminate,
    Insecure,
    Secure,
    Bogus,
}

/// RRset augmented with the result of validation.
#[derive(Debug, Clone)]
pub struct SRRset {
    pub rrset: RRset,
    pub status: SecurityStatus,
    pub signer_name: Option<Name>,
}

impl SRRset {
    pub fn new(rrset: RRset) -> Self {
        SRRset { rrset, status: SecurityStatus::Unchecked, signer_name: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::rdata::A;

    fn a_record(name: &str, ttl: u32, ip: [u8; 4]) -> Record {
        Record {
            name: Name::parse(name).unwrap(),
            class: crate::dns::CLASS_IN,
            ttl,
            rdata: RData::A(A::new(ip.into())),
        }
    }

    #[test]
    fn rrset_ttl_is_minimum() {
        let mut set = RRset::from_record(a_record("foo.example.", 300, [192, 0, 2, 1]));
        let r2 = a_record("foo.example.", 100, [192, 0, 2, 2]);
        set.add_rr(&r2.name, r2.rtype(), r2.class, r2.ttl, r2.rdata).unwrap();
        assert_eq!(set.ttl, 100);
        assert_eq!(set.records.len(), 2);
    }

    #[test]
    fn rrset_rejects_mismatched_owner() {
        let mut set = RRset::from_record(a_record("foo.example.", 300, [192, 0, 2, 1]));
        let bad = a_record("bar.example.", 300, [192, 0, 2, 3]);
        assert!(set.add_rr(&bad.name, bad.rtype(), bad.class, bad.ttl, bad.rdata).is_err());
    }
}
