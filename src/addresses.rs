// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    cidr::{match_cidr, Parts},
    strings::*,
    AddressError, IpFam, Ipv4, Ipv6, IPV4_PARTS, IPV6_PARTS,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};
use tracing::{debug, trace};

/// Either kind of address. Every family-dependent operation matches on this.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum IpAddress {
    V4(Ipv4),
    V6(Ipv6),
}

impl IpAddress {
    /// Dual-stack parse: IPv6 first, then IPv4. See [parse].
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        parse(input)
    }

    pub fn kind(&self) -> IpFam {
        match self {
            IpAddress::V4(_) => IpFam::V4,
            IpAddress::V6(_) => IpFam::V6,
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self, IpAddress::V4(_))
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self, IpAddress::V6(_))
    }

    pub fn parts(&self) -> Parts {
        match self {
            IpAddress::V4(a) => a.parts(),
            IpAddress::V6(a) => a.parts(),
        }
    }

    /**
    Whether the first `prefix_len` bits of `self` and `other` are equal.

    ### Errors
    - [AddressError::KindMismatch] if `other` is of the other family
    - [AddressError::OutOfRange] if `prefix_len` exceeds the address width
    */
    pub fn matches(&self, other: &IpAddress, prefix_len: u8) -> Result<bool, AddressError> {
        match_cidr(&self.parts(), &other.parts(), prefix_len)
    }

    /// Special-use range name of the address, or `"unicast"`.
    pub fn range(&self) -> &'static str {
        match self {
            IpAddress::V4(a) => a.range(),
            IpAddress::V6(a) => a.range(),
        }
    }

    pub fn prefix_length_from_subnet_mask(&self) -> Option<u8> {
        match self {
            IpAddress::V4(a) => a.prefix_length_from_subnet_mask(),
            IpAddress::V6(a) => a.prefix_length_from_subnet_mask(),
        }
    }

    /// Non-compressed form: dotted quad for v4, all eight groups for v6.
    pub fn to_normalized_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.to_normalized_string(),
            IpAddress::V6(a) => a.to_normalized_string(),
        }
    }

    pub fn to_fixed_length_string(&self) -> String {
        match self {
            IpAddress::V4(a) => a.to_fixed_length_string(),
            IpAddress::V6(a) => a.to_fixed_length_string(),
        }
    }

    /// Network byte order: 4 bytes for v4, 16 for v6.
    pub fn to_byte_array(&self) -> Vec<u8> {
        match self {
            IpAddress::V4(a) => a.octets().to_vec(),
            IpAddress::V6(a) => a.octets().to_vec(),
        }
    }

    /**
    4 bytes make an IPv4 address, 16 an IPv6 one.

    ### Errors
    - [AddressError::WrongPartCount] for any other length. The error always
      carries [IpFam::V6], the wider of the two accepted sizes, even for
      inputs closer to 4 bytes.
    */
    pub fn from_byte_array(bytes: &[u8]) -> Result<Self, AddressError> {
        match bytes.len() {
            IPV4_PARTS => Ok(IpAddress::V4(Ipv4::from_parts(bytes)?)),
            len if len == IPV6_PARTS * 2 => Ok(IpAddress::V6(Ipv6::from_parts(bytes, None)?)),
            got => Err(AddressError::WrongPartCount {
                fam: IpFam::V6,
                got,
            }),
        }
    }
}

/* ---------------------------------- */

/// Parse an IPv4 address in any of its accepted notations.
pub fn parse_ipv4(input: &str) -> Result<Ipv4, AddressError> {
    Ipv4::parse(input)
}

/// Parse an IPv6 address, native or transitional, with optional zone.
pub fn parse_ipv6(input: &str) -> Result<Ipv6, AddressError> {
    Ipv6::parse(input)
}

pub fn is_valid_ipv4(input: &str) -> bool {
    Ipv4::is_valid(input)
}

pub fn is_valid_ipv6(input: &str) -> bool {
    Ipv6::is_valid(input)
}

/// True if `input` is a valid IPv6 address, or failing that a valid IPv4 one.
pub fn is_valid(input: &str) -> bool {
    Ipv6::is_valid(input) || Ipv4::is_valid(input)
}

/**
Dual-stack parse: try IPv6, then IPv4.

A string without any `:` is never tried as IPv6. The specific reason
either attempt failed is logged, not returned: if neither family accepts
the input the error is [AddressError::AmbiguousFormat]. Use [parse_ipv4] or
[parse_ipv6] directly when the reason matters.
*/
pub fn parse(input: &str) -> Result<IpAddress, AddressError> {
    if input.contains(COLON) {
        match Ipv6::parse(input) {
            Ok(addr) => return Ok(IpAddress::V6(addr)),
            Err(err) => trace!("{LOG_NOT_V6}: '{input}': {err}"),
        }
    }

    match Ipv4::parse(input) {
        Ok(addr) => Ok(IpAddress::V4(addr)),
        Err(err) => {
            debug!("{LOG_NEITHER}: '{input}': {err}");
            Err(AddressError::AmbiguousFormat(input.into()))
        }
    }
}

/// Like [parse], but an IPv4-mapped IPv6 address comes back as plain IPv4.
pub fn process(input: &str) -> Result<IpAddress, AddressError> {
    match parse(input)? {
        IpAddress::V6(addr) if addr.is_ipv4_mapped_address() => {
            Ok(IpAddress::V4(addr.to_ipv4_address()?))
        }
        addr => Ok(addr),
    }
}

/* ---------------------------------- */

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddress::V4(a) => write!(f, "{a}"),
            IpAddress::V6(a) => write!(f, "{a}"),
        }
    }
}

impl FromStr for IpAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<Ipv4> for IpAddress {
    fn from(addr: Ipv4) -> Self {
        IpAddress::V4(addr)
    }
}

impl From<Ipv6> for IpAddress {
    fn from(addr: Ipv6) -> Self {
        IpAddress::V6(addr)
    }
}

impl From<IpAddr> for IpAddress {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(a) => IpAddress::V4(a.into()),
            IpAddr::V6(a) => IpAddress::V6(a.into()),
        }
    }
}

impl From<&IpAddress> for IpAddr {
    fn from(addr: &IpAddress) -> Self {
        match addr {
            IpAddress::V4(a) => IpAddr::V4(Ipv4Addr::from(*a)),
            IpAddress::V6(a) => IpAddr::V6(Ipv6Addr::from(a)),
        }
    }
}

impl Serialize for IpAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IpAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */
