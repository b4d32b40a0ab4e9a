// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    cidr::{match_cidr, Parts},
    expand::{expand_ipv6, Expanded},
    mask::{mask_from_prefix_length, prefix_length_from_parts},
    numeral::{from_radix, is_numeral, strip_hex_prefix},
    ranges::{classify, IPV6_SPECIAL_RANGES},
    strings::*,
    AddressError, IpFam, Ipv4, DEFAULT_RANGE, IPV4_PARTS, IPV6_PARTS,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, net::Ipv6Addr, str::FromStr};
use tracing::trace;

const IPV4_MAPPED: &str = "ipv4Mapped";

/// An IPv6 address: exactly eight 16-bit groups plus an optional zone id.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Ipv6 {
    parts: [u16; 8],
    zone_id: Option<String>,
}

impl Ipv6 {
    pub const fn new(parts: [u16; 8]) -> Self {
        Self {
            parts,
            zone_id: None,
        }
    }

    /// Attach a zone id (interface scope). It is not part of the address value.
    pub fn with_zone(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    /**
    Construct from raw parts: either eight 16-bit groups, or sixteen bytes
    which are folded pairwise into groups.

    ### Errors
    - [AddressError::WrongPartCount] for any other part count
    - [AddressError::OutOfRange] if a group exceeds 16 bits (or a byte 8 bits)
    */
    pub fn from_parts<T>(parts: &[T], zone_id: Option<String>) -> Result<Self, AddressError>
    where T: Copy + Into<u64>,
    {
        if parts.len() == IPV6_PARTS * 2 {
            let mut groups: [u64; 8] = [0; 8];
            for (group, pair) in groups.iter_mut().zip(parts.chunks_exact(2)) {
                let hi: u64 = check_byte(pair[0].into())?;
                let lo: u64 = check_byte(pair[1].into())?;
                *group = (hi << 8) | lo;
            }
            return Self::from_groups(&groups, zone_id);
        }
        Self::from_groups(parts, zone_id)
    }

    /// Exactly eight groups.
    fn from_groups<T>(parts: &[T], zone_id: Option<String>) -> Result<Self, AddressError>
    where T: Copy + Into<u64>,
    {
        if parts.len() != IPV6_PARTS {
            return Err(AddressError::WrongPartCount {
                fam: IpFam::V6,
                got: parts.len(),
            });
        }

        let mut groups: [u16; 8] = [0; 8];
        for (group, &part) in groups.iter_mut().zip(parts) {
            let value: u64 = part.into();
            *group = u16::try_from(value).map_err(|_| AddressError::OutOfRange {
                what: WHAT_V6_PART,
                value,
            })?;
        }

        Ok(Self {
            parts: groups,
            zone_id,
        })
    }

    /// Parse native, transitional (`::ffff:1.2.3.4`) or zoned IPv6 notation.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let Expanded { parts, zone_id } = parse_parts(input)?;
        Self::from_groups(&parts, zone_id)
    }

    /// Whether `input` parses as IPv6. The failure reason is only traced.
    pub fn is_valid(input: &str) -> bool {
        // no colon, cannot be IPv6
        if !input.contains(COLON) {
            return false;
        }
        match Self::parse(input) {
            Ok(_) => true,
            Err(err) => {
                trace!("{LOG_NOT_V6}: '{input}': {err}");
                false
            }
        }
    }

    pub fn segments(&self) -> [u16; 8] {
        self.parts
    }

    pub fn zone_id(&self) -> Option<&str> {
        self.zone_id.as_deref()
    }

    pub fn octets(&self) -> [u8; 16] {
        Ipv6Addr::from(self.parts).octets()
    }

    pub fn kind(&self) -> IpFam {
        IpFam::V6
    }

    pub fn parts(&self) -> Parts {
        Parts::V6(self.parts)
    }

    /// Whether the first `prefix_len` bits of `self` and `other` are equal.
    pub fn matches(&self, other: &Ipv6, prefix_len: u8) -> Result<bool, AddressError> {
        match_cidr(&self.parts(), &other.parts(), prefix_len)
    }

    /// Name of the first special-use range containing this address, or `"unicast"`.
    pub fn range(&self) -> &'static str {
        classify(&self.parts(), IPV6_SPECIAL_RANGES.as_slice(), DEFAULT_RANGE)
    }

    pub fn is_ipv4_mapped_address(&self) -> bool {
        self.range() == IPV4_MAPPED
    }

    /// Unwrap `::ffff:a.b.c.d` into `a.b.c.d`. Fails for any other range.
    pub fn to_ipv4_address(&self) -> Result<Ipv4, AddressError> {
        if !self.is_ipv4_mapped_address() {
            return Err(AddressError::InvalidConversion(self.to_string()));
        }
        let [hi, lo] = [self.parts[6], self.parts[7]];
        Ok(Ipv4::new((hi >> 8) as u8, (hi & 0xff) as u8, (lo >> 8) as u8, (lo & 0xff) as u8))
    }

    /// `ffff:ff00::` -> `Some(24)`; non-contiguous masks yield `None`.
    pub fn prefix_length_from_subnet_mask(&self) -> Option<u8> {
        prefix_length_from_parts(&self.parts())
    }

    pub fn subnet_mask_from_prefix_length(prefix_len: u8) -> Result<Self, AddressError> {
        let mask: u128 = mask_from_prefix_length(IpFam::V6, prefix_len)?;
        Ok(Self::from(mask))
    }

    /// All eight groups in lowercase hex, no compression, f.ex. `2001:db8:0:0:0:0:0:1`.
    pub fn to_normalized_string(&self) -> String {
        let mut out: String = join_hex(&self.parts);
        self.push_zone(&mut out);
        out
    }

    /**
    RFC 5952 style: the longest run of two or more all-zero groups is
    replaced by `::` (earliest run wins a tie). A lone zero group is never
    compressed.
    */
    pub fn to_rfc5952_string(&self) -> String {
        let mut out: String = match longest_zero_run(&self.parts) {
            Some((start, len)) => format!(
                "{}{DOUBLE_COLON}{}",
                join_hex(&self.parts[..start]),
                join_hex(&self.parts[start + len..])
            ),
            None => join_hex(&self.parts),
        };
        self.push_zone(&mut out);
        out
    }

    /// Every group zero-padded to four hex digits.
    pub fn to_fixed_length_string(&self) -> String {
        let mut out: String = self
            .parts
            .iter()
            .map(|p| format!("{p:04x}"))
            .collect::<Vec<String>>()
            .join(":");
        self.push_zone(&mut out);
        out
    }

    fn push_zone(&self, out: &mut String) {
        if let Some(zone) = &self.zone_id {
            out.push(ZONE_SEP);
            out.push_str(zone);
        }
    }
}

#[inline]
fn check_byte(value: u64) -> Result<u64, AddressError> {
    if value > 0xff {
        return Err(AddressError::OutOfRange {
            what: WHAT_V6_BYTE,
            value,
        });
    }
    Ok(value)
}

fn join_hex(parts: &[u16]) -> String {
    parts
        .iter()
        .map(|p| format!("{p:x}"))
        .collect::<Vec<String>>()
        .join(":")
}

/// `(start, len)` of the longest run of >= 2 zero groups, earliest on a tie.
fn longest_zero_run(parts: &[u16]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i: usize = 0;

    while i < parts.len() {
        if parts[i] != 0 {
            i += 1;
            continue;
        }
        let start: usize = i;
        while i < parts.len() && parts[i] == 0 {
            i += 1;
        }
        let len: usize = i - start;
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }

    best
}

/* ---------------------------------- */

/**
Recognize an IPv6 literal and expand it into (unchecked) groups.

Rules, tried in order:
1. deprecated transitional `::a.b.c.d`, rewritten to `::ffff:a.b.c.d`
   and parsed again (the rewrite cannot match this rule a second time)
2. native hex groups with optional `::` and zone
3. transitional: hex group prefix followed by a dotted IPv4 tail
*/
fn parse_parts(input: &str) -> Result<Expanded, AddressError> {
    let malformed = || AddressError::Malformed {
        fam: IpFam::V6,
        input: input.into(),
    };
    let (body, zone): (&str, Option<&str>) = split_zone(input).ok_or_else(malformed)?;

    if let Some(v4) = body.strip_prefix(DOUBLE_COLON) {
        if is_dotted_quad(v4) {
            let rest: &str = &input[DOUBLE_COLON.len()..];
            return parse_parts(&format!("{MAPPED_PREFIX}{rest}"));
        }
    }

    if is_native(body) {
        return expand_ipv6(input, IPV6_PARTS);
    }

    if let Some((prefix, tail)) = split_transitional(body) {
        // the separator before the IPv4 tail is not part of the group prefix,
        // unless it belongs to a '::' marker
        let prefix: &str = match prefix.ends_with(DOUBLE_COLON) {
            true => prefix,
            false => &prefix[..prefix.len() - 1],
        };
        let prefix: String = match zone {
            Some(zone) => format!("{prefix}{ZONE_SEP}{zone}"),
            None => prefix.to_string(),
        };

        let mut expanded: Expanded = expand_ipv6(&prefix, IPV6_PARTS - 2)?;
        let [a, b, c, d] = parse_transitional_tail(tail)?;
        expanded.parts.push((a << 8) | b);
        expanded.parts.push((c << 8) | d);
        return Ok(expanded);
    }

    Err(malformed())
}

/// Split off a `%zone` suffix; the zone must be one or more ASCII alphanumerics.
fn split_zone(input: &str) -> Option<(&str, Option<&str>)> {
    match input.split_once(ZONE_SEP) {
        None => Some((input, None)),
        Some((body, zone)) => {
            if !zone.is_empty() && zone.bytes().all(|b| b.is_ascii_alphanumeric()) {
                Some((body, Some(zone)))
            } else {
                None
            }
        }
    }
}

/// Hex digits and colons only, no `:::`, and no single leading colon.
fn is_hex_groups(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit() || b == COLON as u8)
        && !s.contains(":::")
        && (!s.starts_with(COLON) || s.starts_with(DOUBLE_COLON))
}

fn is_native(body: &str) -> bool {
    !body.is_empty() && is_hex_groups(body)
}

fn is_dotted_quad(s: &str) -> bool {
    let fields: Vec<&str> = s.split(DOT).collect();
    fields.len() == IPV4_PARTS && fields.iter().all(|f| is_numeral(f))
}

/// `(prefix incl. its trailing colon, ipv4 tail)`
fn split_transitional(body: &str) -> Option<(&str, &str)> {
    let idx: usize = body.rfind(COLON)?;
    let (prefix, tail) = (&body[..=idx], &body[idx + 1..]);
    (is_hex_groups(prefix) && is_dotted_quad(tail)).then_some((prefix, tail))
}

/// Octets of the embedded IPv4 tail: decimal (leading zeros are not octal) or `0x` hex.
fn parse_transitional_tail(tail: &str) -> Result<[u64; 4], AddressError> {
    let mut octets: [u64; 4] = [0; 4];
    for (octet, field) in octets.iter_mut().zip(tail.split(DOT)) {
        let value: u64 = match strip_hex_prefix(field) {
            Some(hex) => from_radix(hex, 16),
            None => from_radix(field, 10),
        };
        if value > 0xff {
            return Err(AddressError::OutOfRange {
                what: WHAT_V4_OCTET,
                value,
            });
        }
        *octet = value;
    }
    Ok(octets)
}

/* ---------------------------------- */

impl fmt::Display for Ipv6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc5952_string())
    }
}

impl FromStr for Ipv6 {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u16; 8]> for Ipv6 {
    fn from(parts: [u16; 8]) -> Self {
        Self::new(parts)
    }
}

impl From<u128> for Ipv6 {
    fn from(value: u128) -> Self {
        Self::new(Ipv6Addr::from(value).segments())
    }
}

impl From<&Ipv6> for u128 {
    fn from(addr: &Ipv6) -> Self {
        u128::from(Ipv6Addr::from(addr))
    }
}

impl From<Ipv6Addr> for Ipv6 {
    fn from(addr: Ipv6Addr) -> Self {
        Self::new(addr.segments())
    }
}

impl From<&Ipv6> for Ipv6Addr {
    fn from(addr: &Ipv6) -> Self {
        Ipv6Addr::from(addr.parts)
    }
}

impl From<Ipv6> for Ipv6Addr {
    fn from(addr: Ipv6) -> Self {
        Ipv6Addr::from(addr.parts)
    }
}

impl Serialize for Ipv6 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv6 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const LOOPBACK: &str = "::1";
    const DOC: &str = "2001:db8::1";
    const MAPPED: &str = "::ffff:192.0.2.1";

    fn norm(input: &str) -> String {
        Ipv6::parse(input)
            .unwrap_or_else(|e| panic!("'{input}': {e}"))
            .to_normalized_string()
    }

    #[rustfmt::skip]
    #[test]
    fn test_parse_normalized() {
        let tests: Vec<&str> = vec![
            "::",                       "0:0:0:0:0:0:0:0",
            "::1",                      "0:0:0:0:0:0:0:1",
            "1::",                      "1:0:0:0:0:0:0:0",
            "2001:db8::1",              "2001:db8:0:0:0:0:0:1",
            "2001:DB8:0:0:0:0:0:1",     "2001:db8:0:0:0:0:0:1",
            "2001:0db8:0000::0001",     "2001:db8:0:0:0:0:0:1",
            "fe80::1%eth0",             "fe80:0:0:0:0:0:0:1%eth0",
            "::ffff:192.0.2.1",         "0:0:0:0:0:ffff:c000:201",
            "::192.0.2.1",              "0:0:0:0:0:ffff:c000:201",
            "::192.0.2.1%en0",          "0:0:0:0:0:ffff:c000:201%en0",
            "::ffff:192.0.2.1%1",       "0:0:0:0:0:ffff:c000:201%1",
            "1:2:3:4:5:6:1.2.3.4",      "1:2:3:4:5:6:102:304",
            "64:ff9b::10.0.0.1",        "64:ff9b:0:0:0:0:a00:1",
            "1::1.2.3.4",               "1:0:0:0:0:0:102:304",
            "::ffff:010.0.0.1",         "0:0:0:0:0:ffff:a00:1",
            "::ffff:0x10.0.0.1",        "0:0:0:0:0:ffff:1000:1",
        ];

        for i in (0..tests.len()).step_by(2) {
            assert_eq!(norm(tests[i]), tests[i + 1], "Failed: '{}'", tests[i]);
        }
    }

    #[rustfmt::skip]
    #[test]
    fn test_rfc5952() {
        let tests: Vec<[u16; 8]> = vec![
            [0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 1],
            [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1],
            [0x2001, 0xdb8, 0, 1, 0, 0, 0, 1],
            [0x2001, 0xdb8, 0, 0, 1, 0, 0, 1],
            [0x2001, 0xdb8, 0, 1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0, 0, 0, 0],
            [1, 0, 1, 0, 1, 0, 1, 0],
        ];
        let expected: Vec<&str> = vec![
            "::",
            "::1",
            "2001:db8::1",
            "2001:db8:0:1::1",
            "2001:db8::1:0:0:1",
            "2001:db8:0:1:1:1:1:1",
            "1::",
            "1:0:1:0:1:0:1:0",
        ];

        for (parts, exp) in tests.into_iter().zip(expected) {
            assert_eq!(Ipv6::new(parts).to_rfc5952_string(), exp);
            assert_eq!(Ipv6::new(parts).to_string(), exp);
        }

        let zoned = Ipv6::new([0xfe80, 0, 0, 0, 0, 0, 0, 0]).with_zone("eth0");
        assert_eq!(zoned.to_string(), "fe80::%eth0");
    }

    #[test]
    fn test_compressed_has_single_marker() {
        let addr: Ipv6 = DOC.parse().unwrap();
        let text: String = addr.to_string();
        assert_eq!(text, DOC);
        assert_eq!(text.matches(DOUBLE_COLON).count(), 1);
    }

    #[test]
    fn test_fixed_length() {
        let addr: Ipv6 = DOC.parse().unwrap();
        assert_eq!(
            addr.to_fixed_length_string(),
            "2001:0db8:0000:0000:0000:0000:0000:0001"
        );
    }

    #[test]
    fn test_malformed() {
        for input in [
            "", ":", ":1", "1", "1:2:3:4:5:6:7:8:9", "1::2::3", ":::", "1:::2", "::g",
            "fe80::1%", "fe80::1%eth 0", "fe80::1%eth0%1", "::1 ", "2001:db8::1/64",
            "1.2.3.4", "::1.2.3", "::ffff:1.2.3.4.5", ":1:2:3:4:5:6:1.2.3.4",
        ] {
            assert!(Ipv6::parse(input).is_err(), "Failed: '{input}'");
            assert!(!Ipv6::is_valid(input), "Failed: '{input}'");
        }
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(Ipv6::parse("::1.2.3"), Err(AddressError::Malformed { fam: IpFam::V6, .. })));
        assert!(matches!(Ipv6::parse("1:2:3"), Err(AddressError::WrongPartCount { got: 3, .. })));
        assert!(matches!(
            Ipv6::parse("12345::"),
            Err(AddressError::OutOfRange { what, value: 0x12345 }) if what == WHAT_V6_PART
        ));
        assert!(matches!(
            Ipv6::parse("::ffff:256.0.0.1"),
            Err(AddressError::OutOfRange { what, value: 256 }) if what == WHAT_V4_OCTET
        ));
        assert!(matches!(
            Ipv6::parse("1:2:3:4:5:6:7:1.2.3.4"),
            Err(AddressError::WrongPartCount { got: 9, .. })
        ));
    }

    #[test]
    fn test_from_parts() {
        let bytes: [u8; 16] = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        let addr = Ipv6::from_parts(&bytes, None).unwrap();
        assert_eq!(addr.to_string(), DOC);
        assert_eq!(addr.octets(), bytes);

        assert!(matches!(
            Ipv6::from_parts(&[0x10000u32, 0, 0, 0, 0, 0, 0, 0], None),
            Err(AddressError::OutOfRange { value: 0x10000, .. })
        ));
        assert!(matches!(
            Ipv6::from_parts(&[1u32, 256, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], None),
            Err(AddressError::OutOfRange { what, value: 256 }) if what == WHAT_V6_BYTE
        ));
        assert_eq!(
            Ipv6::from_parts(&[0u16; 7], None),
            Err(AddressError::WrongPartCount { fam: IpFam::V6, got: 7 })
        );
        let zoned = Ipv6::from_parts(&[0xfe80u16, 0, 0, 0, 0, 0, 0, 1], Some("lo0".into())).unwrap();
        assert_eq!(zoned.zone_id(), Some("lo0"));
    }

    #[rustfmt::skip]
    #[test]
    fn test_range() {
        let tests: Vec<&str> = vec![
            "::",                       "unspecified",
            "fe80::1",                  "linkLocal",
            "febf::1",                  "linkLocal",
            "ff02::1",                  "multicast",
            LOOPBACK,                   "loopback",
            "fd00::1",                  "uniqueLocal",
            MAPPED,                     "ipv4Mapped",
            "::ffff:0:1.2.3.4",         "rfc6145",
            "64:ff9b::1.2.3.4",         "rfc6052",
            "2002:c000:201::",          "6to4",
            "2001::1",                  "teredo",
            DOC,                        "reserved",
            "2001:2::1",                "benchmarking",
            "2001:3::1",                "amt",
            "2001:4:112::1",            "as112v6",
            "2001:10::1",               "deprecated",
            "2001:20::1",               "orchid2",
            "2606:4700::1111",          "unicast",
            "::2",                      "unicast",
        ];

        for i in (0..tests.len()).step_by(2) {
            let addr: Ipv6 = tests[i].parse().unwrap();
            assert_eq!(addr.range(), tests[i + 1], "Failed: '{}'", tests[i]);
        }
    }

    #[test]
    fn test_ipv4_mapped() {
        let addr: Ipv6 = MAPPED.parse().unwrap();
        assert!(addr.is_ipv4_mapped_address());
        assert_eq!(addr.to_ipv4_address().unwrap().to_string(), "192.0.2.1");
        assert_eq!(addr.to_string(), "::ffff:c000:201");

        let addr: Ipv6 = LOOPBACK.parse().unwrap();
        assert!(!addr.is_ipv4_mapped_address());
        assert_eq!(
            addr.to_ipv4_address(),
            Err(AddressError::InvalidConversion(LOOPBACK.into()))
        );
    }

    #[test]
    fn test_subnet_mask() {
        let prefix = |s: &str| s.parse::<Ipv6>().unwrap().prefix_length_from_subnet_mask();
        assert_eq!(prefix("ffff:ffff:ffff:ffff::"), Some(64));
        assert_eq!(prefix("ffff:ff00::"), Some(24));
        assert_eq!(prefix("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"), Some(128));
        assert_eq!(prefix("::"), Some(0));
        assert_eq!(prefix("ffff::ffff"), None);
        assert_eq!(prefix("::1"), None);

        assert_eq!(Ipv6::subnet_mask_from_prefix_length(64).unwrap().to_string(), "ffff:ffff:ffff:ffff::");
        assert_eq!(Ipv6::subnet_mask_from_prefix_length(10).unwrap().to_string(), "ffc0::");
        assert!(Ipv6::subnet_mask_from_prefix_length(129).is_err());
    }

    #[test]
    fn test_matches_ignores_zone() {
        let a: Ipv6 = "fe80::1%eth0".parse().unwrap();
        let b: Ipv6 = "fe80::".parse().unwrap();
        assert_eq!(a.matches(&b, 64), Ok(true));
        assert_eq!(a.matches(&b, 128), Ok(false));
        assert!(a.matches(&b, 129).is_err());
    }

    #[test]
    fn test_std_conversions() {
        let addr: Ipv6 = DOC.parse().unwrap();
        let std_addr: Ipv6Addr = DOC.parse().unwrap();
        assert_eq!(Ipv6Addr::from(&addr), std_addr);
        assert_eq!(Ipv6::from(std_addr), addr);
        assert_eq!(u128::from(&addr), u128::from(std_addr));
        assert_eq!(Ipv6::from(u128::from(std_addr)), addr);
    }
}
