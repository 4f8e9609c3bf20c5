/*!
ref: https://www.rfc-editor.org/rfc/rfc4034#appendix-B

The key tag is the sum of the wire-format DNSKEY RDATA broken into 2
octet groups, added together ignoring carry, with a final carry fold.
Algorithm 1 (RSA/MD5) uses a different, historical definition
(Appendix B.1): the most significant 16 bits of the least significant
24 bits of the public key modulus.
*/

use super::dnskey::DNSKey;
use super::ALG_RSAMD5;

pub type KeyTag = u16;

pub fn calc_key_tag(dnskey: &DNSKey) -> KeyTag {
    if dnskey.algorithm == ALG_RSAMD5 {
        return calc_key_tag_for_rsamd5(dnskey);
    }

    let rdata = dnskey.as_rdata_bytes();
    let mut ac: u32 = 0;
    let mut i = 0;
    while i < rdata.len() {
        if i & 1 == 1 {
            ac += rdata[i] as u32;
        } else {
            ac += (rdata[i] as u32) << 8;
        }
        i += 1;
    }
    ac += (ac >> 16) & 0xFFFF;
    (ac & 0xFFFF) as KeyTag
}

fn calc_key_tag_for_rsamd5(dnskey: &DNSKey) -> KeyTag {
    let len = dnskey.pub_key.len();
    if len < 3 {
        return 0;
    }
    u16::from_be_bytes([dnskey.pub_key[len - 3], dnskey.pub_key[len - 2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_rfc4034_worked_example() {
        // DNSKEY from RFC 4034 Appendix A.1 (example.com. zone key),
        // flags=256, protocol=3, algorithm=5 (RSA/SHA1); key tag = 60485.
        let pub_key = base64_decode(
            "AQOeiiR0GOMYkDshWoSKz9Xz\
             fwJr1AYtsmx3TGkJaNXVbfi/\
             2pHm822aJ5iI9BMzNXxeYCmZ\
             DRD99WYwYqUSdjMmmAphXdvx\
             egXd/M5+X7OrzKBaMbCVdFLU\
             Uh6DhweJBjEVv5f2wwjM9Xzc\
             nOf+EPbtG9DMBmADjFDc2w/r\
             ljwvFw==",
        );
        let key = DNSKey { flags: 256, protocol: 3, algorithm: 5, pub_key };
        assert_eq!(calc_key_tag(&key), 60485);
    }

    // Minimal base64 decoder for the literal fixture above; avoids
    // reaching for the `base64` crate in a unit test that only needs
    // one known-good constant.
    fn base64_decode(s: &str) -> Vec<u8> {
        let clean: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let alphabet = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
        let mut val = |c: u8| -> u32 { alphabet.iter().position(|&a| a == c).unwrap() as u32 };
        let bytes: Vec<u8> = clean.bytes().filter(|&b| b != b'=').collect();
        let mut out = Vec::new();
        let mut buf: u32 = 0;
        let mut bits = 0;
        for b in bytes {
            buf = (buf << 6) | val(b);
            bits += 6;
            if bits >= 8 {
                bits -= 8;
                out.push((buf >> bits) as u8);
            }
        }
        out
    }
}
