// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{numeral::from_radix, strings::*, AddressError, IpFam};

/// Groups recovered from a colon-delimited string, plus the zone id if any.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Expanded {
    /// unchecked group values, magnitudes are validated on construction
    pub parts: Vec<u64>,
    pub zone_id: Option<String>,
}

/**
Expand a `::`-compressed, colon-delimited group string into `expected`
groups (8 for a full address, 6 for the prefix of a transitional one).

The `::` marker is replaced by as many `0:` groups as are missing, after
which any leftover edge colon is trimmed and the string is split.

NOTE: a `::` standing for zero groups (f.ex. `1:2:3:4:5:6:7::8`) is
accepted, since nothing is missing and it simply collapses to `:`.

### Errors
- [AddressError::Malformed] on more than one `::`, an empty zone or a bad group token
- [AddressError::WrongPartCount] if more than `expected` groups are already present
*/
pub(crate) fn expand_ipv6(input: &str, expected: usize) -> Result<Expanded, AddressError> {
    let malformed = || AddressError::Malformed {
        fam: IpFam::V6,
        input: input.into(),
    };

    // more than one '::' is ambiguous
    if input.find(DOUBLE_COLON) != input.rfind(DOUBLE_COLON) {
        return Err(malformed());
    }

    let (addr, zone_id): (&str, Option<String>) = match input.split_once(ZONE_SEP) {
        Some((_, "")) => return Err(malformed()),
        Some((addr, zone)) => (addr, Some(zone.into())),
        None => (input, None),
    };

    // colons approximate the groups present; the '::' marker's own colons
    // at either edge are separators only
    let mut present: isize = addr.matches(COLON).count() as isize;
    if addr.starts_with(DOUBLE_COLON) {
        present -= 1;
    }
    if addr.ends_with(DOUBLE_COLON) {
        present -= 1;
    }

    let missing: isize = expected as isize - present;
    if missing < 0 {
        return Err(AddressError::WrongPartCount {
            fam: IpFam::V6,
            got: present as usize,
        });
    }

    let replacement: String = format!("{COLON}{}", "0:".repeat(missing as usize));
    let expanded: String = addr.replacen(DOUBLE_COLON, &replacement, 1);

    // trim garbage left over when '::' was at an edge
    let trimmed: &str = expanded.strip_prefix(COLON).unwrap_or(&expanded);
    let trimmed: &str = trimmed.strip_suffix(COLON).unwrap_or(trimmed);

    let parts: Vec<u64> = trimmed
        .split(COLON)
        .map(|group| match !group.is_empty() && group.bytes().all(|b| b.is_ascii_hexdigit()) {
            true => Ok(from_radix(group, 16)),
            false => Err(malformed()),
        })
        .collect::<Result<Vec<u64>, AddressError>>()?;

    Ok(Expanded { parts, zone_id })
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(input: &str, expected: usize) -> Vec<u64> {
        expand_ipv6(input, expected).unwrap().parts
    }

    #[rustfmt::skip]
    #[test]
    fn test_expand() {
        assert_eq!(parts("::", 8),                  vec![0; 8]);
        assert_eq!(parts("::1", 8),                 vec![0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(parts("1::", 8),                 vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(parts("2001:db8::1", 8),         vec![0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
        assert_eq!(parts("1:2:3:4:5:6:7:8", 8),     vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(parts("1:2:3:4:5:6:7::", 8),     vec![1, 2, 3, 4, 5, 6, 7, 0]);
        assert_eq!(parts("1:2:3:4:5:6:7::8", 8),    vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(parts("::ffff", 6),              vec![0, 0, 0, 0, 0, 0xffff]);
        assert_eq!(parts("FFFF::", 6),              vec![0xffff, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_zone() {
        let exp: Expanded = expand_ipv6("fe80::1%eth0", 8).unwrap();
        assert_eq!(exp.parts, vec![0xfe80, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(exp.zone_id.as_deref(), Some("eth0"));
        assert!(expand_ipv6("fe80::1%", 8).is_err());
    }

    #[test]
    fn test_reject() {
        assert!(matches!(expand_ipv6("1::2::3", 8), Err(AddressError::Malformed { .. })));
        assert!(matches!(expand_ipv6(":::", 8), Err(AddressError::Malformed { .. })));
        assert!(matches!(
            expand_ipv6("1:2:3:4:5:6:7:8:9::", 8),
            Err(AddressError::WrongPartCount { .. })
        ));
        assert!(matches!(expand_ipv6("1:2:3:4:5:6:7:8:9:a:b", 8), Err(AddressError::WrongPartCount { .. })));
        assert!(matches!(expand_ipv6("1:x::", 8), Err(AddressError::Malformed { .. })));
    }

    #[test]
    fn test_oversized_group_is_kept() {
        // magnitude checks belong to the constructor
        assert_eq!(parts("12345::", 8)[0], 0x12345);
    }
}
