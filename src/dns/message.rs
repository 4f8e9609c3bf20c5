/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-4.1
ref: https://www.rfc-editor.org/rfc/rfc6891 (EDNS(0))

A message is a header plus four sections: QUESTION, ANSWER, AUTHORITY,
ADDITIONAL. The EDNS(0) OPT pseudo-record, when present, lives in
ADDITIONAL but is tracked separately here since its TTL field is
repurposed as extended RCODE/flags rather than a cache lifetime.

Serialization enforces a `maxLength` budget (e.g. UDP payload size):
each section is rendered greedily; if adding the next record would
overflow the budget, encoding rewinds to the last complete RRset
boundary, sets TC, and leaves later sections empty. OPT is always
appended last so a truncated message still advertises EDNS.
*/

use super::header::Header;
use super::name::Name;
use super::question::Question;
use super::rdata::{Opt, RData};
use super::record::Record;
use super::wire::{Reader, Writer};
use super::Type;
use anyhow::{bail, Error};

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Message {
    pub fn new() -> Self {
        Message { header: Header::new(), questions: vec![], answers: vec![], authorities: vec![], additionals: vec![] }
    }

    pub fn query(qname: Name, qtype: Type, qclass: u16) -> Self {
        let mut m = Message::new();
        m.header.with_rd(true);
        m.questions.push(Question::new(qname, qtype, qclass));
        m
    }

    pub fn parse(raw: &[u8]) -> Result<Self, Error> {
        if raw.len() < 12 {
            bail!("message shorter than header");
        }
        let header = Header::from(raw[0..12].try_into().unwrap());
        let mut r = Reader::with_pos(raw, 12);

        let mut questions = Vec::with_capacity(header.qdcount() as usize);
        for _ in 0..header.qdcount() {
            questions.push(Question::parse(&mut r)?);
        }
        let answers = parse_records(&mut r, raw, header.ancount())?;
        let authorities = parse_records(&mut r, raw, header.nscount())?;
        let additionals = parse_records(&mut r, raw, header.arcount())?;

        Ok(Message { header, questions, answers, authorities, additionals })
    }

    /// The EDNS(0) OPT pseudo-record, if the peer sent one.
    pub fn opt(&self) -> Option<&Opt> {
        self.additionals.iter().find_map(|r| match &r.rdata {
            RData::Opt(opt) => Some(opt),
            _ => None,
        })
    }

    /// Removes any existing OPT record and appends a fresh one with the
    /// given UDP payload size, extended RCODE high octet folded into the
    /// class/ttl fields per RFC 6891 §6.1.3, and DO bit set accordingly.
    pub fn set_opt(&mut self, udp_payload_size: u16, dnssec_ok: bool, opt: Opt) {
        self.additionals.retain(|r| r.rtype() != super::TYPE_OPT);
        let mut ttl = 0u32;
        if dnssec_ok {
            ttl |= 0x8000;
        }
        self.additionals.push(Record { name: Name::root(), class: udp_payload_size, ttl, rdata: RData::Opt(opt) });
    }

    /// Whether the peer's OPT record set the DO (DNSSEC OK) bit.
    pub fn dnssec_ok(&self) -> bool {
        self.additionals
            .iter()
            .find(|r| r.rtype() == super::TYPE_OPT)
            .map(|r| r.ttl & 0x8000 != 0)
            .unwrap_or(false)
    }

    /// Encodes with no size limit; truncation never occurs.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        self.encode_truncating(usize::MAX)
    }

    /// Encodes the message, truncating at RRset boundaries once
    /// `max_length` bytes would be exceeded. The OPT record (if any) is
    /// always written last regardless of truncation, so a truncated
    /// response still advertises the resolver's EDNS parameters.
    pub fn encode_truncating(&self, max_length: usize) -> Result<Vec<u8>, Error> {
        let opt_record = self.additionals.iter().find(|r| r.rtype() == super::TYPE_OPT);
        let plain_additionals: Vec<&Record> = self.additionals.iter().filter(|r| r.rtype() != super::TYPE_OPT).collect();

        let mut header = self.header;
        header.with_qdcount(self.questions.len() as u16);

        let mut w = Writer::new();
        w.bytes(&header.get_0());
        for q in &self.questions {
            q.encode(&mut w, true);
        }

        let answers: Vec<&Record> = self.answers.iter().collect();
        let authorities: Vec<&Record> = self.authorities.iter().collect();

        let mut truncated = false;
        let an_count = write_section_truncating(&mut w, &answers, max_length, &mut truncated);
        let ns_count = if truncated { 0 } else { write_section_truncating(&mut w, &authorities, max_length, &mut truncated) };
        let ar_count = if truncated { 0 } else { write_section_truncating(&mut w, &plain_additionals, max_length, &mut truncated) };

        let opt_count = if let Some(opt_record) = opt_record {
            let before = w.len();
            opt_record.encode(&mut w, false)?;
            if max_length != usize::MAX && w.len() > max_length {
                w = rewind_to(&w, before);
                0
            } else {
                1
            }
        } else {
            0
        };

        header.with_ancount(an_count as u16);
        header.with_nscount(ns_count as u16);
        header.with_arcount((ar_count + opt_count) as u16);
        header.with_tc(truncated);

        let mut out = w.into_vec();
        out[0..12].copy_from_slice(&header.get_0());
        Ok(out)
    }
}

impl Default for Message {
    fn default() -> Self {
        Message::new()
    }
}

fn parse_records(r: &mut Reader, raw: &[u8], count: u16) -> Result<Vec<Record>, Error> {
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        out.push(Record::parse(r, raw)?);
    }
    Ok(out)
}

/// Writes as many whole RRsets (records grouped by owner name and type,
/// in first-seen order) as fit under `max_length`, rewinding to the
/// last complete RRset boundary if one would overflow it. Returns the
/// number of records actually written and sets `*truncated` if any
/// RRset from this section (or a prior one) had to be dropped.
fn write_section_truncating(w: &mut Writer, records: &[&Record], max_length: usize, truncated: &mut bool) -> usize {
    let mut count = 0;
    for group in group_by_rrset(records) {
        let before = w.len();
        let mut ok = true;
        for rec in &group {
            if rec.encode(w, true).is_err() {
                ok = false;
                break;
            }
        }
        if ok && (max_length == usize::MAX || w.len() <= max_length) {
            count += group.len();
        } else {
            *w = rewind_to(w, before);
            *truncated = true;
            break;
        }
    }
    count
}

/// Groups `records` by (owner name, type) preserving first-seen order,
/// so truncation can commit or drop a whole RRset at once instead of
/// splitting it mid-set.
fn group_by_rrset<'a>(records: &[&'a Record]) -> Vec<Vec<&'a Record>> {
    let mut order: Vec<(Name, u16)> = vec![];
    let mut groups: std::collections::HashMap<(Name, u16), Vec<&'a Record>> = std::collections::HashMap::new();
    for &rec in records {
        let key = (rec.name.clone(), rec.rtype());
        groups.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            vec![]
        });
        groups.get_mut(&key).unwrap().push(rec);
    }
    order.into_iter().map(|k| groups.remove(&k).unwrap()).collect()
}

fn rewind_to(w: &Writer, len: usize) -> Writer {
    let mut fresh = Writer::new();
    fresh.bytes(&w.as_slice()[..len]);
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::rdata::A;
    use crate::dns::CLASS_IN;

    fn a_record(name: &str, ip: [u8; 4]) -> Record {
        Record { name: Name::parse(name).unwrap(), class: CLASS_IN, ttl: 300, rdata: RData::A(A::new(ip.into())) }
    }

    #[test]
    fn round_trips_query_with_no_truncation() {
        let msg = Message::query(Name::parse("example.com.").unwrap(), 1, CLASS_IN);
        let buf = msg.encode().unwrap();
        let parsed = Message::parse(&buf).unwrap();
        assert_eq!(parsed.questions.len(), 1);
        assert_eq!(parsed.questions[0].qname().to_string(), "example.com.");
        assert!(!parsed.header.tc());
    }

    #[test]
    fn round_trips_answer_section() {
        let mut msg = Message::query(Name::parse("example.com.").unwrap(), 1, CLASS_IN);
        msg.header.with_qr(true);
        msg.answers.push(a_record("example.com.", [192, 0, 2, 1]));
        msg.answers.push(a_record("example.com.", [192, 0, 2, 2]));
        let buf = msg.encode().unwrap();
        let parsed = Message::parse(&buf).unwrap();
        assert_eq!(parsed.answers.len(), 2);
        assert_eq!(parsed.header.ancount(), 2);
    }

    #[test]
    fn truncates_at_rrset_boundary_and_sets_tc() {
        let mut msg = Message::query(Name::parse("example.com.").unwrap(), 1, CLASS_IN);
        msg.header.with_qr(true);
        for i in 0..50u8 {
            msg.answers.push(a_record("example.com.", [192, 0, 2, i]));
        }
        let buf = msg.encode_truncating(60).unwrap();
        let parsed = Message::parse(&buf).unwrap();
        assert!(parsed.header.tc());
        assert_eq!(parsed.answers.len() as u16, parsed.header.ancount());
        assert!(parsed.answers.len() < 50);
    }

    #[test]
    fn opt_is_always_written_even_when_truncated() {
        let mut msg = Message::query(Name::parse("example.com.").unwrap(), 1, CLASS_IN);
        msg.header.with_qr(true);
        for i in 0..50u8 {
            msg.answers.push(a_record("example.com.", [192, 0, 2, i]));
        }
        msg.set_opt(4096, true, Opt { options: vec![] });
        let buf = msg.encode_truncating(80).unwrap();
        let parsed = Message::parse(&buf).unwrap();
        assert!(parsed.header.tc());
        assert!(parsed.opt().is_some());
        assert!(parsed.dnssec_ok());
    }

    #[test]
    fn rejects_message_shorter_than_header() {
        assert!(Message::parse(&[0u8; 4]).is_err());
    }
}
