/*!
ref: https://www.rfc-editor.org/rfc/rfc6891#section-6.1 (EDNS OPT pseudo-RR)
ref: https://www.rfc-editor.org/rfc/rfc8914 (Extended DNS Errors)

The variable part of an OPT RR is encoded in its RDATA as zero or more
options:
```shell
                +0 (MSB)                            +1 (LSB)
     +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
  0: |                          OPTION-CODE                          |
     +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
  2: |                         OPTION-LENGTH                         |
     +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
  4: |                                                               |
     /                          OPTION-DATA                          /
     /                                                               /
     +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
```
*/

use crate::dns::wire::Writer;
use anyhow::{bail, Error};

pub const OPTION_CODE_EDE: u16 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptOption {
    pub code: u16,
    pub data: Vec<u8>,
}

/// RFC 8914 Extended DNS Error option: a 2 octet info-code plus an
/// optional UTF-8 diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdeOption {
    pub info_code: u16,
    pub extra_text: String,
}

impl EdeOption {
    pub fn new(info_code: u16, extra_text: impl Into<String>) -> Self {
        EdeOption { info_code, extra_text: extra_text.into() }
    }

    pub fn to_option(&self) -> OptOption {
        let mut data = Vec::with_capacity(2 + self.extra_text.len());
        data.extend_from_slice(&self.info_code.to_be_bytes());
        data.extend_from_slice(self.extra_text.as_bytes());
        OptOption { code: OPTION_CODE_EDE, data }
    }

    pub fn from_option(opt: &OptOption) -> Result<Self, Error> {
        if opt.code != OPTION_CODE_EDE || opt.data.len() < 2 {
            bail!("not an EDE option");
        }
        let info_code = u16::from_be_bytes([opt.data[0], opt.data[1]]);
        let extra_text = String::from_utf8_lossy(&opt.data[2..]).into_owned();
        Ok(EdeOption { info_code, extra_text })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Opt {
    pub options: Vec<OptOption>,
}

impl Opt {
    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        let mut options = vec![];
        let mut pos = 0usize;
        while pos < rdata.len() {
            if pos + 4 > rdata.len() {
                bail!("truncated OPT option header");
            }
            let code = u16::from_be_bytes([rdata[pos], rdata[pos + 1]]);
            let len = u16::from_be_bytes([rdata[pos + 2], rdata[pos + 3]]) as usize;
            pos += 4;
            if pos + len > rdata.len() {
                bail!("truncated OPT option data");
            }
            options.push(OptOption { code, data: rdata[pos..pos + len].to_vec() });
            pos += len;
        }
        Ok(Opt { options })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        for opt in &self.options {
            if opt.data.len() > u16::MAX as usize {
                bail!("OPT option data too long");
            }
            w.u16(opt.code);
            w.u16(opt.data.len() as u16);
            w.bytes(&opt.data);
        }
        Ok(())
    }

    pub fn ede(&self) -> Option<EdeOption> {
        self.options.iter().find(|o| o.code == OPTION_CODE_EDE).and_then(|o| EdeOption::from_option(o).ok())
    }

    pub fn push_ede(&mut self, info_code: u16, extra_text: impl Into<String>) {
        self.options.push(EdeOption::new(info_code, extra_text).to_option());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ede_option() {
        let mut opt = Opt::default();
        opt.push_ede(23, "signature expired");
        let mut w = Writer::new();
        opt.encode(&mut w).unwrap();
        let buf = w.into_vec();
        let decoded = Opt::decode(&buf).unwrap();
        let ede = decoded.ede().unwrap();
        assert_eq!(ede.info_code, 23);
        assert_eq!(ede.extra_text, "signature expired");
    }
}
