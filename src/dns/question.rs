/*!
ref: https://www.rfc-editor.org/rfc/rfc1035#section-4.1.2

The question section carries the parameters of the query: QDCOUNT
(usually 1) entries of the following format.
```shell
                                1  1  1  1  1  1
  0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                                               |
/                     QNAME                     /
/                                               /
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                     QTYPE                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                     QCLASS                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
```
*/

use super::name::Name;
use super::wire::{Reader, Writer};
use anyhow::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    qname: Name,
    qtype: u16,
    qclass: u16,
}

impl Question {
    pub fn new(qname: Name, qtype: u16, qclass: u16) -> Self {
        Question { qname, qtype, qclass }
    }

    pub fn parse(r: &mut Reader) -> Result<Self, Error> {
        let qname = r.name()?;
        let qtype = r.u16()?;
        let qclass = r.u16()?;
        Ok(Question { qname, qtype, qclass })
    }

    pub fn qname(&self) -> &Name {
        &self.qname
    }

    pub fn qtype(&self) -> u16 {
        self.qtype
    }

    pub fn qclass(&self) -> u16 {
        self.qclass
    }

    pub fn encode(&self, w: &mut Writer, compressed: bool) {
        w.name(&self.qname, compressed);
        w.u16(self.qtype);
        w.u16(self.qclass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_question() {
        let raw = [
            0x06, 0x67, 0x6f, 0x6f, 0x67, 0x6c, 0x65, 0x03, 0x63, 0x6f, 0x6d, 0x00, 0x11, 0x22,
            0x33, 0x44,
        ];
        let mut r = Reader::new(&raw);
        let q = Question::parse(&mut r).unwrap();
        assert_eq!(q.qname().to_string(), "google.com.");
        assert_eq!(q.qtype(), 0x1122);
        assert_eq!(q.qclass(), 0x3344);
        assert_eq!(r.pos(), raw.len());
    }

    #[test]
    fn rejects_truncated_question() {
        let raw = [0x06, 0x67, 0x6f, 0x6f, 0x67, 0x6c, 0x65, 0x03, 0x63, 0x6f, 0x6d, 0x00, 0x11];
        let mut r = Reader::new(&raw);
        assert!(Question::parse(&mut r).is_err());
    }

    #[test]
    fn round_trips_encode() {
        let q = Question::new(Name::parse("google.com.").unwrap(), 0x1122, 0x3344);
        let mut w = Writer::new();
        q.encode(&mut w, false);
        let buf = w.into_vec();
        let mut r = Reader::new(&buf);
        let parsed = Question::parse(&mut r).unwrap();
        assert_eq!(parsed, q);
    }
}
