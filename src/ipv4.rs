// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    cidr::{match_cidr, Parts},
    mask::{mask_from_prefix_length, prefix_length_from_parts},
    numeral::{is_numeral, parse_int_auto},
    ranges::{classify, IPV4_SPECIAL_RANGES},
    strings::*,
    AddressError, IpFam, Ipv6, DEFAULT_RANGE, IPV4_PARTS,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, net::Ipv4Addr, str::FromStr};
use tracing::trace;

/// An IPv4 address: exactly four octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ipv4 {
    octets: [u8; 4],
}

impl Ipv4 {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self {
            octets: [a, b, c, d],
        }
    }

    /**
    Construct from raw parts. Exactly four parts, each in `0..=255`.

    ### Errors
    - [AddressError::WrongPartCount] if `parts.len() != 4`
    - [AddressError::OutOfRange] if any part does not fit in 8 bits
    */
    pub fn from_parts<T>(parts: &[T]) -> Result<Self, AddressError>
    where T: Copy + Into<u64>,
    {
        if parts.len() != IPV4_PARTS {
            return Err(AddressError::WrongPartCount {
                fam: IpFam::V4,
                got: parts.len(),
            });
        }

        let mut octets: [u8; 4] = [0; 4];
        for (octet, &part) in octets.iter_mut().zip(parts) {
            let value: u64 = part.into();
            *octet = u8::try_from(value).map_err(|_| AddressError::OutOfRange {
                what: WHAT_V4_OCTET,
                value,
            })?;
        }

        Ok(Self { octets })
    }

    /// Parse any of the four accepted IPv4 notations.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let parts: [u64; 4] = parse_parts(input)?;
        Self::from_parts(&parts)
    }

    /// Whether `input` parses as IPv4. The failure reason is only traced.
    pub fn is_valid(input: &str) -> bool {
        match Self::parse(input) {
            Ok(_) => true,
            Err(err) => {
                trace!("{LOG_NOT_V4}: '{input}': {err}");
                false
            }
        }
    }

    /**
    Stricter than [Ipv4::is_valid]: only plain `a.b.c.d` decimal literals
    without leading zeros qualify. No octal, no hex, no short forms.
    */
    pub fn is_valid_four_part_decimal(input: &str) -> bool {
        let fields: Vec<&str> = input.split(DOT).collect();
        fields.len() == IPV4_PARTS
            && fields.iter().all(|f| {
                !f.is_empty()
                    && f.bytes().all(|b| b.is_ascii_digit())
                    && (f.len() == 1 || !f.starts_with('0'))
            })
            && Self::is_valid(input)
    }

    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    pub fn kind(&self) -> IpFam {
        IpFam::V4
    }

    pub fn parts(&self) -> Parts {
        Parts::V4(self.octets)
    }

    /// Whether the first `prefix_len` bits of `self` and `other` are equal.
    pub fn matches(&self, other: &Ipv4, prefix_len: u8) -> Result<bool, AddressError> {
        match_cidr(&self.parts(), &other.parts(), prefix_len)
    }

    /// Name of the first special-use range containing this address, or `"unicast"`.
    pub fn range(&self) -> &'static str {
        classify(&self.parts(), IPV4_SPECIAL_RANGES.as_slice(), DEFAULT_RANGE)
    }

    /// `255.255.255.0` -> `Some(24)`; non-contiguous masks yield `None`.
    pub fn prefix_length_from_subnet_mask(&self) -> Option<u8> {
        prefix_length_from_parts(&self.parts())
    }

    /// `24` -> `255.255.255.0`
    pub fn subnet_mask_from_prefix_length(prefix_len: u8) -> Result<Self, AddressError> {
        let mask: u128 = mask_from_prefix_length(IpFam::V4, prefix_len)?;
        Ok(Self::from(mask as u32))
    }

    /// The `::ffff:a.b.c.d` form of this address.
    pub fn to_ipv4_mapped_address(&self) -> Ipv6 {
        let [a, b, c, d] = self.octets.map(u16::from);
        Ipv6::new([0, 0, 0, 0, 0, 0xffff, (a << 8) | b, (c << 8) | d])
    }

    pub fn to_normalized_string(&self) -> String {
        self.to_string()
    }

    /// Every octet zero-padded to three digits, f.ex. `192.168.001.001`.
    pub fn to_fixed_length_string(&self) -> String {
        let [a, b, c, d] = self.octets;
        format!("{a:03}.{b:03}.{c:03}.{d:03}")
    }
}

/* ---------------------------------- */

/**
Recognize an IPv4 literal and return its four (unchecked) octet values.

Notations are tried in a fixed order, first full match wins:
1. four-octet `a.b.c.d`
2. a single 32-bit value
3. two-octet `a.b`, `b` being a 24-bit tail
4. three-octet `a.b.c`, `c` being a 16-bit tail

Octet magnitudes are left for [Ipv4::from_parts] to check; composite
values are checked here since they cannot be told apart afterwards.
*/
fn parse_parts(input: &str) -> Result<[u64; 4], AddressError> {
    let fields: Vec<&str> = input.split(DOT).collect();
    if fields.len() > IPV4_PARTS || !fields.iter().all(|f| is_numeral(f)) {
        return Err(AddressError::Malformed {
            fam: IpFam::V4,
            input: input.into(),
        });
    }

    match fields.as_slice() {
        [a, b, c, d] => Ok([
            parse_int_auto(a)?,
            parse_int_auto(b)?,
            parse_int_auto(c)?,
            parse_int_auto(d)?,
        ]),
        [value] => {
            let value: u64 = checked_tail(parse_int_auto(value)?, 0xffff_ffff, WHAT_V4_ADDR)?;
            Ok([
                (value >> 24) & 0xff,
                (value >> 16) & 0xff,
                (value >> 8) & 0xff,
                value & 0xff,
            ])
        }
        [a, tail] => {
            let tail: u64 = checked_tail(parse_int_auto(tail)?, 0xff_ffff, WHAT_V4_TAIL24)?;
            Ok([
                parse_int_auto(a)?,
                (tail >> 16) & 0xff,
                (tail >> 8) & 0xff,
                tail & 0xff,
            ])
        }
        [a, b, tail] => {
            let tail: u64 = checked_tail(parse_int_auto(tail)?, 0xffff, WHAT_V4_TAIL16)?;
            Ok([
                parse_int_auto(a)?,
                parse_int_auto(b)?,
                (tail >> 8) & 0xff,
                tail & 0xff,
            ])
        }
        _ => Err(AddressError::Malformed {
            fam: IpFam::V4,
            input: input.into(),
        }),
    }
}

#[inline]
fn checked_tail(value: u64, max: u64, what: &'static str) -> Result<u64, AddressError> {
    if value > max {
        return Err(AddressError::OutOfRange { what, value });
    }
    Ok(value)
}

/* ---------------------------------- */

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{a}{DOT}{b}{DOT}{c}{DOT}{d}")
    }
}

impl FromStr for Ipv4 {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; 4]> for Ipv4 {
    fn from(octets: [u8; 4]) -> Self {
        Self { octets }
    }
}

impl From<u32> for Ipv4 {
    fn from(value: u32) -> Self {
        Self {
            octets: value.to_be_bytes(),
        }
    }
}

impl From<Ipv4> for u32 {
    fn from(addr: Ipv4) -> Self {
        u32::from_be_bytes(addr.octets)
    }
}

impl From<Ipv4Addr> for Ipv4 {
    fn from(addr: Ipv4Addr) -> Self {
        Self {
            octets: addr.octets(),
        }
    }
}

impl From<Ipv4> for Ipv4Addr {
    fn from(addr: Ipv4) -> Self {
        Ipv4Addr::from(addr.octets)
    }
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */
