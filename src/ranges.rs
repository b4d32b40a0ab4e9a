// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Well-known special-use subnets and first-match classification against them.

use super::{
    cidr::{match_cidr, Cidr, Parts},
    IpAddress, Ipv4, Ipv6,
};
use lazy_static::lazy_static;

/// Name returned by the classifiers when no special range matches.
pub const DEFAULT_RANGE: &str = "unicast";

/// A named special-use range made of one or more CIDRs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecialRange {
    pub name: &'static str,
    pub subnets: Vec<Cidr>,
}

impl SpecialRange {
    pub fn new(name: &'static str, subnets: Vec<Cidr>) -> Self {
        Self { name, subnets }
    }

    /// Only subnets of the same family as `parts` are considered.
    fn contains(&self, parts: &Parts) -> bool {
        self.subnets.iter().any(|subnet| {
            subnet.fam() == parts.fam()
                && matches!(match_cidr(parts, &subnet.addr().parts(), subnet.prefix()), Ok(true))
        })
    }
}

/*
Declaration order is significant: classification returns the first range
that matches. The entries are plain constructed addresses, nothing in here
may call back into classification.
*/
lazy_static! {
    pub(crate) static ref IPV4_SPECIAL_RANGES: Vec<SpecialRange> = vec![
        v4_range("unspecified", &[([0, 0, 0, 0], 8)]),
        v4_range("broadcast", &[([255, 255, 255, 255], 32)]),
        // RFC3171
        v4_range("multicast", &[([224, 0, 0, 0], 4)]),
        // RFC3927
        v4_range("linkLocal", &[([169, 254, 0, 0], 16)]),
        // RFC5735
        v4_range("loopback", &[([127, 0, 0, 0], 8)]),
        // RFC6598
        v4_range("carrierGradeNat", &[([100, 64, 0, 0], 10)]),
        // RFC1918
        v4_range("private", &[
            ([10, 0, 0, 0], 8),
            ([172, 16, 0, 0], 12),
            ([192, 168, 0, 0], 16),
        ]),
        // Reserved and testing-only ranges; RFCs 5735, 5737, 2544, 1700
        v4_range("reserved", &[
            ([192, 0, 0, 0], 24),
            ([192, 0, 2, 0], 24),
            ([192, 88, 99, 0], 24),
            ([198, 18, 0, 0], 15),
            ([198, 51, 100, 0], 24),
            ([203, 0, 113, 0], 24),
            ([240, 0, 0, 0], 4),
        ]),
        // RFC7534, RFC7535
        v4_range("as112", &[([192, 175, 48, 0], 24), ([192, 31, 196, 0], 24)]),
        // RFC7450
        v4_range("amt", &[([192, 52, 193, 0], 24)]),
    ];

    pub(crate) static ref IPV6_SPECIAL_RANGES: Vec<SpecialRange> = vec![
        // RFC4291
        v6_range("unspecified", [0, 0, 0, 0, 0, 0, 0, 0], 128),
        v6_range("linkLocal", [0xfe80, 0, 0, 0, 0, 0, 0, 0], 10),
        v6_range("multicast", [0xff00, 0, 0, 0, 0, 0, 0, 0], 8),
        v6_range("loopback", [0, 0, 0, 0, 0, 0, 0, 1], 128),
        v6_range("uniqueLocal", [0xfc00, 0, 0, 0, 0, 0, 0, 0], 7),
        v6_range("ipv4Mapped", [0, 0, 0, 0, 0, 0xffff, 0, 0], 96),
        // RFC6145
        v6_range("rfc6145", [0, 0, 0, 0, 0xffff, 0, 0, 0], 96),
        // RFC6052
        v6_range("rfc6052", [0x64, 0xff9b, 0, 0, 0, 0, 0, 0], 96),
        // RFC3056
        v6_range("6to4", [0x2002, 0, 0, 0, 0, 0, 0, 0], 16),
        // RFC4380
        v6_range("teredo", [0x2001, 0, 0, 0, 0, 0, 0, 0], 32),
        // RFC3849
        v6_range("reserved", [0x2001, 0xdb8, 0, 0, 0, 0, 0, 0], 32),
        v6_range("benchmarking", [0x2001, 0x2, 0, 0, 0, 0, 0, 0], 48),
        v6_range("amt", [0x2001, 0x3, 0, 0, 0, 0, 0, 0], 32),
        v6_range("as112v6", [0x2001, 0x4, 0x112, 0, 0, 0, 0, 0], 48),
        v6_range("deprecated", [0x2001, 0x10, 0, 0, 0, 0, 0, 0], 28),
        v6_range("orchid2", [0x2001, 0x20, 0, 0, 0, 0, 0, 0], 28),
    ];
}

fn v4_range(name: &'static str, subnets: &[([u8; 4], u8)]) -> SpecialRange {
    let subnets: Vec<Cidr> = subnets
        .iter()
        .map(|&(octets, prefix)| Cidr::new_unchecked(Ipv4::from(octets), prefix))
        .collect();
    SpecialRange::new(name, subnets)
}

fn v6_range(name: &'static str, parts: [u16; 8], prefix: u8) -> SpecialRange {
    SpecialRange::new(name, vec![Cidr::new_unchecked(Ipv6::new(parts), prefix)])
}

/// The built-in IPv4 table, in classification order.
pub fn ipv4_special_ranges() -> &'static [SpecialRange] {
    IPV4_SPECIAL_RANGES.as_slice()
}

/// The built-in IPv6 table, in classification order.
pub fn ipv6_special_ranges() -> &'static [SpecialRange] {
    IPV6_SPECIAL_RANGES.as_slice()
}

/**
Classify `addr` against an ordered list of named ranges.

Ranges are tried in order and the first one with a same-family subnet
containing `addr` wins; if none does, `default` is returned.
*/
pub fn subnet_match<'a>(addr: &IpAddress, ranges: &'a [SpecialRange], default: &'a str) -> &'a str {
    classify(&addr.parts(), ranges, default)
}

pub(crate) fn classify<'a>(parts: &Parts, ranges: &'a [SpecialRange], default: &'a str) -> &'a str {
    ranges
        .iter()
        .find(|range| range.contains(parts))
        .map_or(default, |range| range.name)
}

/* -------------------------------------------------------------------------- */
