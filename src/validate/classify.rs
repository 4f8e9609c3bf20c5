/*!
ref: https://www.rfc-editor.org/rfc/rfc4035#section-5

Classifies a forwarded response into the shape the rest of validation
branches on. The decision walks the CNAME chain starting at the
question's qname through ANSWER, then looks at rcode and whether
AUTHORITY carries a SOA (negative answer) or bare NS (referral).
*/

use crate::dns::message::Message;
use crate::dns::name::Name;
use crate::dns::rdata::RData;
use crate::dns::record::Record;
use crate::dns::{Type, RCODE_NOERROR, RCODE_NXDOMAIN, TYPE_ANY, TYPE_CNAME, TYPE_NS, TYPE_SOA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Positive,
    Cname,
    Any,
    NoData,
    NameError,
    CnameNoData,
    CnameNameError,
    Referral,
}

pub fn classify(msg: &Message) -> Classification {
    let Some(question) = msg.questions.first() else { return Classification::NameError };
    let qtype = question.qtype();

    let (chain_len, terminal_answered) = walk_cname_chain(question.qname(), qtype, &msg.answers);
    let has_chain = chain_len > 0;
    let has_soa = msg.authorities.iter().any(|r| r.rtype() == TYPE_SOA);
    let has_ns = msg.authorities.iter().any(|r| r.rtype() == TYPE_NS);

    if msg.header.rcode() == RCODE_NXDOMAIN {
        return if has_chain { Classification::CnameNameError } else { Classification::NameError };
    }

    if msg.header.rcode() != RCODE_NOERROR {
        return Classification::NameError;
    }

    if terminal_answered {
        return if has_chain {
            Classification::Cname
        } else if qtype == TYPE_ANY {
            Classification::Any
        } else {
            Classification::Positive
        };
    }

    if has_soa {
        return if has_chain { Classification::CnameNoData } else { Classification::NoData };
    }

    if has_ns && !has_chain {
        return Classification::Referral;
    }

    if has_chain {
        Classification::CnameNoData
    } else {
        Classification::NoData
    }
}

/// The last name reached walking ANSWER's CNAME chain from `qname`: the
/// original qname itself if there's no chain, otherwise the final
/// CNAME's target — the name a NODATA/NAMEERROR denial proof must cover.
pub(crate) fn final_chain_name(qname: &Name, qtype: Type, answers: &[Record]) -> Name {
    let mut current = qname.clone();
    let mut visited = std::collections::HashSet::new();
    loop {
        if !visited.insert(current.clone()) {
            return current;
        }
        let at_current: Vec<&Record> = answers.iter().filter(|r| r.name == current).collect();
        if qtype != TYPE_CNAME {
            if let Some(cname) = at_current.iter().find(|r| r.rtype() == TYPE_CNAME) {
                if let RData::CName(target) = &cname.rdata {
                    current = target.0.clone();
                    continue;
                }
            }
        }
        return current;
    }
}

/// Walks ANSWER following CNAME targets starting at `qname`. Returns the
/// number of CNAME hops taken and whether the final name has an RRset of
/// `qtype` (or any type, for an ANY query) in ANSWER.
fn walk_cname_chain(qname: &Name, qtype: Type, answers: &[Record]) -> (usize, bool) {
    let mut current = qname.clone();
    let mut hops = 0usize;
    let mut visited = std::collections::HashSet::new();

    loop {
        if !visited.insert(current.clone()) {
            return (hops, false);
        }
        let at_current: Vec<&Record> = answers.iter().filter(|r| r.name == current).collect();
        if qtype != TYPE_CNAME {
            if let Some(cname) = at_current.iter().find(|r| r.rtype() == TYPE_CNAME) {
                if let RData::CName(target) = &cname.rdata {
                    current = target.0.clone();
                    hops += 1;
                    continue;
                }
            }
        }
        let answered = if qtype == TYPE_ANY { !at_current.is_empty() } else { at_current.iter().any(|r| r.rtype() == qtype) };
        return (hops, answered);
    }
}
