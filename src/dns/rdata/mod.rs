/*!
The following RR definitions are expected to occur, at least
potentially, in all classes. Because their RDATA format is known, all
domain names in the RDATA section of these RRs may be compressed.

Polymorphic records (many subtypes sharing owner/type/class/ttl) map to
a tagged variant discriminated by `type`, each carrying a type-specific
rdata payload; unknown types surface as opaque octet strings rather
than failing to parse.
*/

pub mod dnssec;

mod a;
mod aaaa;
mod cname;
mod hinfo;
mod mb;
mod md;
mod mf;
mod mg;
mod minfo;
mod mr;
mod mx;
mod ns;
mod null;
mod opt;
mod ptr;
mod soa;
mod txt;
mod wks;

pub use a::A;
pub use aaaa::AAAA;
pub use cname::CName;
pub use hinfo::HInfo;
pub use mb::MB;
pub use md::MD;
pub use mf::MF;
pub use mg::MG;
pub use minfo::MInfo;
pub use mr::MR;
pub use mx::MX;
pub use ns::NS;
pub use null::Null;
pub use opt::{EdeOption, Opt, OptOption};
pub use ptr::PTR;
pub use soa::SOA;
pub use txt::TXT;
pub use wks::WKS;

pub use dnssec::dnskey::DNSKey;
pub use dnssec::ds::DS;
pub use dnssec::nsec::NSEC;
pub use dnssec::nsec3::NSEC3;
pub use dnssec::nsec3param::NSEC3PARAM;
pub use dnssec::rrsig::RRSig;

use super::name::Name;
use super::wire::{Reader, Writer};
use super::{
    Type, TYPE_A, TYPE_AAAA, TYPE_CNAME, TYPE_DNSKEY, TYPE_DS, TYPE_HINFO, TYPE_MB, TYPE_MD,
    TYPE_MF, TYPE_MG, TYPE_MINFO, TYPE_MR, TYPE_MX, TYPE_NS, TYPE_NSEC, TYPE_NSEC3,
    TYPE_NSEC3PARAM, TYPE_NULL, TYPE_OPT, TYPE_PTR, TYPE_RRSIG, TYPE_SOA, TYPE_TXT, TYPE_WKS,
};
use anyhow::Error;
use std::fmt::Debug;

pub(crate) const ERR_RDATA_MSG: &str = "not a complete rdata";

/// Unknown rdata types are not an error: they surface as raw octets so
/// that messages carrying record types this crate doesn't model still
/// round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unknown {
    pub typ: u16,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RData {
    A(A),
    AAAA(AAAA),
    NS(NS),
    CName(CName),
    SOA(SOA),
    PTR(PTR),
    MX(MX),
    TXT(TXT),
    HInfo(HInfo),
    MInfo(MInfo),
    MB(MB),
    MD(MD),
    MF(MF),
    MG(MG),
    MR(MR),
    WKS(WKS),
    Null(Null),
    Opt(Opt),
    DNSKey(DNSKey),
    DS(DS),
    RRSig(RRSig),
    NSEC(NSEC),
    NSEC3(NSEC3),
    NSEC3PARAM(NSEC3PARAM),
    Unknown(Unknown),
}

impl RData {
    pub fn rtype(&self) -> u16 {
        match self {
            RData::A(_) => TYPE_A,
            RData::AAAA(_) => TYPE_AAAA,
            RData::NS(_) => TYPE_NS,
            RData::CName(_) => TYPE_CNAME,
            RData::SOA(_) => TYPE_SOA,
            RData::PTR(_) => TYPE_PTR,
            RData::MX(_) => TYPE_MX,
            RData::TXT(_) => TYPE_TXT,
            RData::HInfo(_) => TYPE_HINFO,
            RData::MInfo(_) => TYPE_MINFO,
            RData::MB(_) => TYPE_MB,
            RData::MD(_) => TYPE_MD,
            RData::MF(_) => TYPE_MF,
            RData::MG(_) => TYPE_MG,
            RData::MR(_) => TYPE_MR,
            RData::WKS(_) => TYPE_WKS,
            RData::Null(_) => TYPE_NULL,
            RData::Opt(_) => TYPE_OPT,
            RData::DNSKey(_) => TYPE_DNSKEY,
            RData::DS(_) => TYPE_DS,
            RData::RRSig(_) => TYPE_RRSIG,
            RData::NSEC(_) => TYPE_NSEC,
            RData::NSEC3(_) => TYPE_NSEC3,
            RData::NSEC3PARAM(_) => TYPE_NSEC3PARAM,
            RData::Unknown(u) => u.typ,
        }
    }

    /// Parses `rdlength` octets of rdata for the given type. `raw` is the
    /// whole message buffer (needed for names that may be compressed
    /// relative to the message, which RRSIG's signer name never is but
    /// NSEC's next-owner and the legacy RFC 1035 types may be).
    pub fn parse(typ: Type, raw: &[u8], rdata_start: usize, rdlength: usize) -> Result<Self, Error> {
        let rdata = &raw[rdata_start..rdata_start + rdlength];
        Ok(match typ {
            TYPE_A => RData::A(A::decode(rdata)?),
            TYPE_AAAA => RData::AAAA(AAAA::decode(rdata)?),
            TYPE_NS => RData::NS(NS::decode(raw, rdata_start, rdlength)?),
            TYPE_CNAME => RData::CName(CName::decode(raw, rdata_start, rdlength)?),
            TYPE_SOA => RData::SOA(SOA::decode(raw, rdata_start, rdlength)?),
            TYPE_PTR => RData::PTR(PTR::decode(raw, rdata_start, rdlength)?),
            TYPE_MX => RData::MX(MX::decode(raw, rdata_start, rdlength)?),
            TYPE_TXT => RData::TXT(TXT::decode(rdata)?),
            TYPE_HINFO => RData::HInfo(HInfo::decode(rdata)?),
            TYPE_MINFO => RData::MInfo(MInfo::decode(raw, rdata_start, rdlength)?),
            TYPE_MB => RData::MB(MB::decode(raw, rdata_start, rdlength)?),
            TYPE_MD => RData::MD(MD::decode(raw, rdata_start, rdlength)?),
            TYPE_MF => RData::MF(MF::decode(raw, rdata_start, rdlength)?),
            TYPE_MG => RData::MG(MG::decode(raw, rdata_start, rdlength)?),
            TYPE_MR => RData::MR(MR::decode(raw, rdata_start, rdlength)?),
            TYPE_WKS => RData::WKS(WKS::decode(rdata)?),
            TYPE_NULL => RData::Null(Null::decode(rdata)?),
            TYPE_OPT => RData::Opt(Opt::decode(rdata)?),
            TYPE_DNSKEY => RData::DNSKey(DNSKey::decode(rdata)?),
            TYPE_DS => RData::DS(DS::decode(rdata)?),
            TYPE_RRSIG => RData::RRSig(RRSig::decode(rdata)?),
            TYPE_NSEC => RData::NSEC(NSEC::decode(rdata)?),
            TYPE_NSEC3 => RData::NSEC3(NSEC3::decode(rdata)?),
            TYPE_NSEC3PARAM => RData::NSEC3PARAM(NSEC3PARAM::decode(rdata)?),
            _ => RData::Unknown(Unknown { typ, data: rdata.to_vec() }),
        })
    }

    /// Encodes into `w`, returning the byte offset at which the rdlength
    /// placeholder was written so the caller can patch it in afterward.
    pub fn encode(&self, w: &mut Writer, compressed: bool) -> Result<(), Error> {
        match self {
            RData::A(x) => x.encode(w),
            RData::AAAA(x) => x.encode(w),
            RData::NS(x) => x.encode(w, compressed),
            RData::CName(x) => x.encode(w, compressed),
            RData::SOA(x) => x.encode(w, compressed),
            RData::PTR(x) => x.encode(w, compressed),
            RData::MX(x) => x.encode(w, compressed),
            RData::TXT(x) => x.encode(w),
            RData::HInfo(x) => x.encode(w),
            RData::MInfo(x) => x.encode(w, compressed),
            RData::MB(x) => x.encode(w, compressed),
            RData::MD(x) => x.encode(w, compressed),
            RData::MF(x) => x.encode(w, compressed),
            RData::MG(x) => x.encode(w, compressed),
            RData::MR(x) => x.encode(w, compressed),
            RData::WKS(x) => x.encode(w),
            RData::Null(x) => x.encode(w),
            RData::Opt(x) => x.encode(w),
            RData::DNSKey(x) => x.encode(w),
            RData::DS(x) => x.encode(w),
            RData::RRSig(x) => x.encode(w),
            RData::NSEC(x) => x.encode(w),
            RData::NSEC3(x) => x.encode(w),
            RData::NSEC3PARAM(x) => x.encode(w),
            RData::Unknown(u) => {
                w.bytes(&u.data);
                Ok(())
            }
        }
    }

    /// Canonical rdata bytes per RFC 4034 §6.2 (owner names inside rdata
    /// lowercased, never compressed). Used both for RRset equality and
    /// for building the RRSIG signed octet stream.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        let _ = self.encode(&mut w, false);
        w.into_vec()
    }
}

/// 1-byte-length-prefixed character-string sequence (TXT, HINFO).
pub fn parse_character_strings(rdata: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
    let mut r = Reader::new(rdata);
    let mut list = vec![];
    while r.remaining() > 0 {
        list.push(r.counted_string()?);
    }
    Ok(list)
}

/// A domain name embedded in rdata, read relative to the whole message
/// so compression pointers resolve correctly.
pub(crate) fn read_embedded_name(raw: &[u8], offset: usize) -> Result<(Name, usize), Error> {
    let mut r = Reader::with_pos(raw, offset);
    let name = r.name()?;
    Ok((name, r.pos()))
}
