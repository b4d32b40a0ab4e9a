// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    strings::*, AddressError, IpAddress, Ipv4, Ipv6, IPV4_BITS, IPV4_PART_BITS, IPV6_BITS,
    IPV6_PART_BITS,
};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

/// IP address family
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum IpFam {
    #[serde(rename = "ipv4")]
    V4,
    #[serde(rename = "ipv6")]
    V6,
}

impl IpFam {
    /// Total address width in bits.
    pub const fn bits(self) -> u8 {
        match self {
            IpFam::V4 => IPV4_BITS,
            IpFam::V6 => IPV6_BITS,
        }
    }

    /// Width of a single octet (v4) or group (v6).
    pub const fn part_bits(self) -> u8 {
        match self {
            IpFam::V4 => IPV4_PART_BITS,
            IpFam::V6 => IPV6_PART_BITS,
        }
    }
}

impl fmt::Display for IpFam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFam::V4 => write!(f, "ipv4"),
            IpFam::V6 => write!(f, "ipv6"),
        }
    }
}

/* ---------------------------------- */

/// Fixed-width parts of an address, as consumed by [match_cidr].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Parts {
    V4([u8; 4]),
    V6([u16; 8]),
}

impl Parts {
    pub fn fam(&self) -> IpFam {
        match self {
            Parts::V4(_) => IpFam::V4,
            Parts::V6(_) => IpFam::V6,
        }
    }
}

/**
Generic CIDR prefix matcher (RFC 1518) over two same-family part arrays.

Parts are compared left to right; for each part only its top
`min(remaining_prefix_bits, part_width)` bits take part in the comparison.
A `prefix_len` of 0 matches unconditionally.

### Errors
- [AddressError::KindMismatch] if `first` and `second` are of different families
- [AddressError::OutOfRange] if `prefix_len` exceeds the family's bit width
*/
pub fn match_cidr(first: &Parts, second: &Parts, prefix_len: u8) -> Result<bool, AddressError> {
    let fam: IpFam = first.fam();
    if fam != second.fam() {
        return Err(AddressError::KindMismatch(fam, second.fam()));
    }
    if prefix_len > fam.bits() {
        return Err(AddressError::OutOfRange {
            what: WHAT_PREFIX,
            value: prefix_len as u64,
        });
    }

    Ok(match (first, second) {
        (Parts::V4(a), Parts::V4(b)) => match_parts(a, b, IPV4_PART_BITS, prefix_len),
        (Parts::V6(a), Parts::V6(b)) => match_parts(a, b, IPV6_PART_BITS, prefix_len),
        _ => unreachable!("{ERR_MISMATCH}"),
    })
}

#[inline]
fn match_parts<T>(first: &[T], second: &[T], part_bits: u8, prefix_len: u8) -> bool
where T: Copy + Into<u32>,
{
    let mut remaining: u8 = prefix_len;

    for (&a, &b) in first.iter().zip(second) {
        if remaining == 0 {
            break;
        }
        let bits: u8 = remaining.min(part_bits);
        // bits >= 1, so the shift stays below the part width
        let shift: u8 = part_bits - bits;
        let (a, b): (u32, u32) = (a.into(), b.into());
        if a >> shift != b >> shift {
            return false;
        }
        remaining -= bits;
    }

    true
}

/**
Returns a u128 with prefix high bits set, remaining low bits zero.

bits: 32 or 128, prefix: `0..=bits`
*/
#[inline]
pub(crate) fn mask_u128(bits: u8, prefix: u8) -> u128 {
    if prefix == 0 {
        return 0;
    }
    let all: u128 = if bits == IPV6_BITS {
        !0u128
    } else {
        (1u128 << bits) - 1
    };
    if prefix >= bits {
        return all;
    }
    let low: u8 = bits - prefix;
    all & (!((1u128 << low) - 1))
}

/* -------------------------------------------------------------------------- */

/// A reference address plus the number of leading bits that are significant.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Cidr {
    addr: IpAddress,
    /// **v4**: `0..=32`, **v6**: `0..=128`
    prefix: u8,
}

impl Cidr {
    /// Create a new [Cidr], checking `prefix` against the address width.
    pub fn new(addr: impl Into<IpAddress>, prefix: u8) -> Result<Self, AddressError> {
        let addr: IpAddress = addr.into();
        if prefix > addr.kind().bits() {
            return Err(AddressError::OutOfRange {
                what: WHAT_PREFIX,
                value: prefix as u64,
            });
        }
        Ok(Self { addr, prefix })
    }

    /// Only for the static range tables, whose prefixes are known good.
    pub(crate) fn new_unchecked(addr: impl Into<IpAddress>, prefix: u8) -> Self {
        let addr: IpAddress = addr.into();
        debug_assert!(prefix <= addr.kind().bits());
        Self { addr, prefix }
    }

    pub fn addr(&self) -> &IpAddress {
        &self.addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn fam(&self) -> IpFam {
        self.addr.kind()
    }

    /// Number of IP addresses contained by this [Cidr].
    /// Cannot be an [usize] due to IPv6. Saturating.
    pub fn len(&self) -> u128 {
        let bits: u8 = self.fam().bits();
        let host_bits: u8 = bits.saturating_sub(self.prefix);

        // 2^128 does not fit in u128
        if host_bits == IPV6_BITS {
            return u128::MAX;
        }

        1u128 << host_bits
    }

    /// Returns true if the CIDR represents a single host address.
    pub fn is_host(&self) -> bool {
        self.prefix == self.fam().bits()
    }

    /**
    Whether `addr` falls inside this CIDR.

    Fails with [AddressError::KindMismatch] if the families differ; a v4
    address is never silently "not contained" in a v6 network.
    */
    pub fn contains(&self, addr: &IpAddress) -> Result<bool, AddressError> {
        addr.matches(&self.addr, self.prefix)
    }

    /// The network address, i.e. the reference address with host bits cleared.
    pub fn network(&self) -> IpAddress {
        match &self.addr {
            IpAddress::V4(a) => {
                let mask: u32 = mask_u128(IPV4_BITS, self.prefix) as u32;
                IpAddress::V4(Ipv4::from(u32::from(*a) & mask))
            }
            IpAddress::V6(a) => {
                let mask: u128 = mask_u128(IPV6_BITS, self.prefix);
                IpAddress::V6(Ipv6::from(u128::from(a) & mask))
            }
        }
    }

    /// Convert to an [ipnet::IpNet]. Any zone id is dropped.
    pub fn to_ipnet(&self) -> Result<IpNet, AddressError> {
        let net: Result<IpNet, ipnet::PrefixLenError> = match &self.addr {
            IpAddress::V4(a) => Ipv4Net::new(Ipv4Addr::from(*a), self.prefix).map(IpNet::V4),
            IpAddress::V6(a) => Ipv6Net::new(Ipv6Addr::from(a), self.prefix).map(IpNet::V6),
        };
        net.map_err(|_| AddressError::OutOfRange {
            what: WHAT_PREFIX,
            value: self.prefix as u64,
        })
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SLASH}{}", self.addr, self.prefix)
    }
}

/* -------------------------------------------------------------------------- */
