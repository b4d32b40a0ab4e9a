// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Parsing, validation, normalization and classification of textual IPv4 and
IPv6 addresses.

Accepted IPv4 notations are the legacy ones still understood by `inet_aton`:
dotted quads, a single 32-bit value, and the `a.b` / `a.b.c` short forms.
Every numeral may be decimal, octal (`0` prefix) or hexadecimal (`0x`).

IPv6 accepts `::` compression, an optional `%zone` suffix and the
transitional form with an embedded dotted IPv4 tail.

```
use ipaddrs::{parse, AddressError, IpAddress};

fn main() -> Result<(), AddressError> {
    let addr: IpAddress = parse("::ffff:192.0.2.1")?;
    assert_eq!(addr.range(), "ipv4Mapped");
    Ok(())
}
```
*/

mod addresses;
mod cidr;
mod expand;
mod ipv4;
mod ipv6;
mod mask;
mod numeral;
mod ranges;
mod strings;

use std::{error, fmt};
use strings::*;

pub use addresses::*;
pub use cidr::{match_cidr, Cidr, IpFam, Parts};
pub use ipv4::Ipv4;
pub use ipv6::Ipv6;
pub use ranges::{
    ipv4_special_ranges, ipv6_special_ranges, subnet_match, SpecialRange, DEFAULT_RANGE,
};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const IPV6_BITS: u8 = 128;
pub(crate) const IPV4_PART_BITS: u8 = 8;
pub(crate) const IPV6_PART_BITS: u8 = 16;
pub(crate) const IPV4_PARTS: usize = 4;
pub(crate) const IPV6_PARTS: usize = 8;

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// no grammar rule matched the input
    Malformed { fam: IpFam, input: String },
    /// constructor got the wrong number of octets/groups
    WrongPartCount { fam: IpFam, got: usize },
    /// a numeral or composite value does not fit its field
    OutOfRange { what: &'static str, value: u64 },
    /// leading-zero numeral containing an 8 or 9
    InvalidOctal(String),
    /// attempted to compare/match v4 against v6
    KindMismatch(IpFam, IpFam),
    /// e.g. `to_ipv4_address()` on a non-mapped address
    InvalidConversion(String),
    /// dual-stack parse found neither family
    AmbiguousFormat(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::Malformed { fam, input } => match fam {
                IpFam::V4 => write!(f, "{ERR_V4_MALFORMED}: '{input}'"),
                IpFam::V6 => write!(f, "{ERR_V6_MALFORMED}: '{input}'"),
            },
            AddressError::WrongPartCount { fam, got } => match fam {
                IpFam::V4 => write!(f, "{ERR_V4_COUNT}, got {got}"),
                IpFam::V6 => write!(f, "{ERR_V6_COUNT}, got {got}"),
            },
            AddressError::OutOfRange { what, value } => {
                write!(f, "{what} {ERR_OUT_OF_RANGE}: {value}")
            }
            AddressError::InvalidOctal(num) => {
                write!(f, "{ERR_OCTAL}: '{num}'")
            }
            AddressError::KindMismatch(a, b) => {
                write!(f, "{ERR_MISMATCH}: {a} - {b}")
            }
            AddressError::InvalidConversion(addr) => {
                write!(f, "{ERR_CONVERSION}: '{addr}'")
            }
            AddressError::AmbiguousFormat(input) => {
                write!(f, "{ERR_AMBIGUOUS}: '{input}'")
            }
        }
    }
}

impl error::Error for AddressError {}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AddressError::InvalidOctal("0380".into());
        assert_eq!(err.to_string(), "cannot parse as octal: '0380'");

        let err = AddressError::KindMismatch(IpFam::V4, IpFam::V6);
        assert_eq!(err.to_string(), format!("{ERR_MISMATCH}: ipv4 - ipv6"));

        let err = AddressError::OutOfRange { what: WHAT_V4_ADDR, value: 1 << 32 };
        assert_eq!(err.to_string(), "ipv4 address outside defined range: 4294967296");
    }
}
