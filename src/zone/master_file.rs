/*!
A minimal master-file loader: one record per line,

```text
<owner> <type> <class> <ttl> <type-specific fields...>
```

This is not the full RFC 1035 §5 zone-file grammar (no `$ORIGIN`,
`$TTL`, comments mid-line, or parenthesized multi-line rdata) — just
enough to seed a `Zone` or a trust-anchor store from a flat file.
Blank lines and lines starting with `;` are skipped.
*/

use crate::dns::name::Name;
use crate::dns::rdata::dnssec::{DNSKey, DS};
use crate::dns::rdata::{RData, CName, A, AAAA, MX, NS, SOA, TXT};
use crate::dns::record::{Record, RRset};
use crate::dns::{Class, Type, TYPE_A, TYPE_AAAA, TYPE_CNAME, TYPE_DNSKEY, TYPE_DS, TYPE_MX, TYPE_NS, TYPE_SOA, TYPE_TXT};
use anyhow::{anyhow, bail, Error};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub fn load_records(path: &str) -> Result<Vec<Record>, Error> {
    let content = fs::read_to_string(path)?;
    let mut out = vec![];
    for (lineno, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        let rec = parse_line(line).map_err(|e| anyhow!("{}:{}: {}", path, lineno + 1, e))?;
        out.push(rec);
    }
    Ok(out)
}

fn parse_line(line: &str) -> Result<Record, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        bail!("expected at least 4 fields: owner type class ttl");
    }
    let name = Name::parse(fields[0])?;
    let typ: Type = fields[1].parse()?;
    let class: Class = fields[2].parse()?;
    let ttl: u32 = fields[3].parse()?;
    let rest = &fields[4..];

    let rdata = match typ {
        TYPE_A => RData::A(A::new(Ipv4Addr::from_str(field(rest, 0, "address")?)?)),
        TYPE_AAAA => RData::AAAA(AAAA::new(Ipv6Addr::from_str(field(rest, 0, "address")?)?)),
        TYPE_NS => RData::NS(NS(Name::parse(field(rest, 0, "nsdname")?)?)),
        TYPE_CNAME => RData::CName(CName(Name::parse(field(rest, 0, "cname")?)?)),
        TYPE_SOA => RData::SOA(SOA {
            mname: Name::parse(field(rest, 0, "mname")?)?,
            rname: Name::parse(field(rest, 1, "rname")?)?,
            serial: field(rest, 2, "serial")?.parse()?,
            refresh: field(rest, 3, "refresh")?.parse()?,
            retry: field(rest, 4, "retry")?.parse()?,
            expire: field(rest, 5, "expire")?.parse()?,
            minimum: field(rest, 6, "minimum")?.parse()?,
        }),
        TYPE_MX => RData::MX(MX { preference: field(rest, 0, "preference")?.parse()?, exchange: Name::parse(field(rest, 1, "exchange")?)? }),
        TYPE_TXT => RData::TXT(TXT(rest.iter().map(|s| s.as_bytes().to_vec()).collect())),
        TYPE_DNSKEY => RData::DNSKey(DNSKey {
            flags: field(rest, 0, "flags")?.parse()?,
            protocol: field(rest, 1, "protocol")?.parse()?,
            algorithm: field(rest, 2, "algorithm")?.parse()?,
            pub_key: STANDARD.decode(field(rest, 3, "public key")?)?,
        }),
        TYPE_DS => RData::DS(DS {
            key_tag: field(rest, 0, "key tag")?.parse()?,
            algorithm: field(rest, 1, "algorithm")?.parse()?,
            digest_type: field(rest, 2, "digest type")?.parse()?,
            digest: hex_decode(field(rest, 3, "digest")?)?,
        }),
        other => bail!("unsupported master-file record type {}", other),
    };

    Ok(Record { name, class, ttl, rdata })
}

fn field<'a>(fields: &[&'a str], idx: usize, what: &str) -> Result<&'a str, Error> {
    fields.get(idx).copied().ok_or_else(|| anyhow!("missing {} field", what))
}

fn hex_decode(s: &str) -> Result<Vec<u8>, Error> {
    if s.len() % 2 != 0 {
        bail!("odd-length hex digest");
    }
    (0..s.len()).step_by(2).map(|i| Ok(u8::from_str_radix(&s[i..i + 2], 16)?)).collect()
}

/// Groups parsed records into RRsets by (owner, type, class), loads
/// them into a fresh `Zone`, and validates the apex SOA/NS invariants.
pub fn load_zone(path: &str, apex: Name, class: Class) -> Result<super::zone::Zone, Error> {
    let mut zone = super::zone::Zone::new(apex, class);
    let mut sets: std::collections::HashMap<(Name, Type), RRset> = std::collections::HashMap::new();
    for rec in load_records(path)? {
        let key = (rec.name.clone(), rec.rtype());
        let set = sets
            .entry(key)
            .or_insert_with(|| RRset::new(rec.name.clone(), rec.rtype(), rec.class, rec.ttl));
        set.add_rr(&rec.name, rec.rtype(), rec.class, rec.ttl, rec.rdata)?;
    }
    for (_, set) in sets {
        zone.add_rrset(set)?;
    }
    zone.validate()?;
    Ok(zone)
}
