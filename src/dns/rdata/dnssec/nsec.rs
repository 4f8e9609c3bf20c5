/*!
ref: https://www.rfc-editor.org/rfc/rfc4034#section-4

# NSEC RDATA format

```shell
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   /                      Next Domain Name                        /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
   /                       Type Bit Maps                           /
   +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
```

The Type Bit Maps field is not a fixed-width integer: it is one or
more `(Window Block # | Bitmap Length | Bitmap)` triples (RFC 4034
§4.1.2), each covering up to 256 consecutive type codes. A sender MUST
NOT compress the Next Domain Name field.
*/

use crate::dns::name::Name;
use crate::dns::wire::{Reader, Writer};
use anyhow::{anyhow, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NSEC {
    pub next_domain_name: Name,
    pub type_bit_maps: Vec<(u8, Vec<u8>)>,
}

impl NSEC {
    pub fn new(next_domain_name: Name, types: &[u16]) -> Self {
        NSEC { next_domain_name, type_bit_maps: encode_type_bitmaps(types) }
    }

    pub fn decode(rdata: &[u8]) -> Result<Self, Error> {
        let mut r = Reader::new(rdata);
        let next_domain_name = r.name()?;
        let type_bit_maps = decode_type_bitmaps(&rdata[r.pos()..])?;
        Ok(NSEC { next_domain_name, type_bit_maps })
    }

    pub fn encode(&self, w: &mut Writer) -> Result<(), Error> {
        w.name(&self.next_domain_name, false);
        for (window, bitmap) in &self.type_bit_maps {
            w.u8(*window);
            w.u8(bitmap.len() as u8);
            w.bytes(bitmap);
        }
        Ok(())
    }

    pub fn covers_type(&self, t: u16) -> bool {
        bitmap_has_type(&self.type_bit_maps, t)
    }

    pub fn types(&self) -> Vec<u16> {
        decode_type_bitmaps_to_types(&self.type_bit_maps)
    }
}

/// Shared window-block bitmap codec used by NSEC and NSEC3.
pub(crate) fn decode_type_bitmaps(buf: &[u8]) -> Result<Vec<(u8, Vec<u8>)>, Error> {
    let mut out = vec![];
    let mut pos = 0usize;
    while pos < buf.len() {
        if pos + 2 > buf.len() {
            return Err(anyhow!("truncated type bitmap window"));
        }
        let window = buf[pos];
        let len = buf[pos + 1] as usize;
        pos += 2;
        if len == 0 || len > 32 || pos + len > buf.len() {
            return Err(anyhow!("invalid type bitmap length"));
        }
        out.push((window, buf[pos..pos + len].to_vec()));
        pos += len;
    }
    Ok(out)
}

pub(crate) fn encode_type_bitmaps(types: &[u16]) -> Vec<(u8, Vec<u8>)> {
    let mut windows: std::collections::BTreeMap<u8, Vec<u8>> = std::collections::BTreeMap::new();
    for &t in types {
        let window = (t >> 8) as u8;
        let lower = (t & 0xFF) as usize;
        let bitmap = windows.entry(window).or_insert_with(|| vec![0u8; 32]);
        bitmap[lower / 8] |= 0x80 >> (lower % 8);
    }
    windows
        .into_iter()
        .map(|(window, mut bitmap)| {
            while bitmap.last() == Some(&0) {
                bitmap.pop();
            }
            (window, bitmap)
        })
        .collect()
}

pub(crate) fn bitmap_has_type(blocks: &[(u8, Vec<u8>)], t: u16) -> bool {
    let window = (t >> 8) as u8;
    let lower = (t & 0xFF) as usize;
    blocks
        .iter()
        .find(|(w, _)| *w == window)
        .map(|(_, bitmap)| {
            let byte = lower / 8;
            byte < bitmap.len() && bitmap[byte] & (0x80 >> (lower % 8)) != 0
        })
        .unwrap_or(false)
}

pub(crate) fn decode_type_bitmaps_to_types(blocks: &[(u8, Vec<u8>)]) -> Vec<u16> {
    let mut out = vec![];
    for (window, bitmap) in blocks {
        for (byte_idx, byte) in bitmap.iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) != 0 {
                    let lower = byte_idx * 8 + bit;
                    out.push(((*window as u16) << 8) | lower as u16);
                }
            }
        }
    }
    out
}
