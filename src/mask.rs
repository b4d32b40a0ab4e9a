// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    cidr::{mask_u128, Parts},
    strings::*,
    AddressError, IpFam, IPV4_BITS, IPV4_PART_BITS, IPV6_BITS, IPV6_PART_BITS,
};
use lazy_static::lazy_static;
use std::collections::HashMap;

// Valid subnet mask part value -> number of trailing zero bits it carries.
// Built once per program execution.
lazy_static! {
    static ref V4_MASK_ZEROS: HashMap<u16, u8> = zero_table(IPV4_PART_BITS);
    static ref V6_MASK_ZEROS: HashMap<u16, u8> = zero_table(IPV6_PART_BITS);
}

/// 8-bit: `255 -> 0, 254 -> 1, 252 -> 2, ... 0 -> 8`, likewise for 16-bit parts.
fn zero_table(part_bits: u8) -> HashMap<u16, u8> {
    let all: u32 = (1u32 << part_bits) - 1;
    (0..=part_bits)
        .map(|zeros: u8| (((all << zeros) & all) as u16, zeros))
        .collect()
}

/**
Derive a prefix length from a subnet mask given as address parts.

Parts are scanned from least to most significant. Once a part that is not
all-zero has been seen, every more significant part must be all-ones,
otherwise the mask is non-contiguous and `None` is returned. Part values
that are not valid mask parts at all (f.ex. `1`) also yield `None`.
*/
pub(crate) fn prefix_length_from_parts(parts: &Parts) -> Option<u8> {
    match parts {
        Parts::V4(octets) => scan(octets, &V4_MASK_ZEROS, IPV4_PART_BITS, IPV4_BITS),
        Parts::V6(groups) => scan(groups, &V6_MASK_ZEROS, IPV6_PART_BITS, IPV6_BITS),
    }
}

fn scan<T>(parts: &[T], table: &HashMap<u16, u8>, part_bits: u8, bits: u8) -> Option<u8>
where T: Copy + Into<u16>,
{
    let mut zeros_total: u8 = 0;
    let mut stop: bool = false;

    for &part in parts.iter().rev() {
        let key: u16 = part.into();
        let zeros: u8 = *table.get(&key)?;
        if stop && zeros != 0 {
            return None;
        }
        if zeros != part_bits {
            stop = true;
        }
        zeros_total += zeros;
    }

    Some(bits - zeros_total)
}

/// Mask with `prefix_len` high bits set, as an integer of the family's width.
pub(crate) fn mask_from_prefix_length(fam: IpFam, prefix_len: u8) -> Result<u128, AddressError> {
    if prefix_len > fam.bits() {
        return Err(AddressError::OutOfRange {
            what: WHAT_PREFIX,
            value: prefix_len as u64,
        });
    }
    Ok(mask_u128(fam.bits(), prefix_len))
}

/* -------------------------------------------------------------------------- */
