// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{AddressError, IpFam};

/**
Parse a numeral substring in the radix its prefix implies.

Rules, in priority order:
- `0x` / `0X` followed by hex digits: base 16
- `0` followed by a digit: base 8, and every digit must be `0..=7`
- anything else: base 10

No sign, whitespace or underscores. Values too large for a [u64] saturate to
[u64::MAX]; callers check against their own field width anyway.
*/
pub(crate) fn parse_int_auto(num: &str) -> Result<u64, AddressError> {
    if let Some(hex) = strip_hex_prefix(num) {
        if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Ok(from_radix(hex, 16));
        }
    }

    let bytes: &[u8] = num.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(AddressError::Malformed {
            fam: IpFam::V4,
            input: num.into(),
        });
    }

    if bytes.len() >= 2 && bytes[0] == b'0' {
        if bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
            return Ok(from_radix(num, 8));
        }
        return Err(AddressError::InvalidOctal(num.into()));
    }

    Ok(from_radix(num, 10))
}

/// Whether `num` has the shape of a numeral (`0x` + hex digits, or digits).
pub(crate) fn is_numeral(num: &str) -> bool {
    match strip_hex_prefix(num) {
        Some(hex) => !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()),
    }
}

#[inline]
pub(crate) fn strip_hex_prefix(num: &str) -> Option<&str> {
    num.strip_prefix("0x").or_else(|| num.strip_prefix("0X"))
}

/// Digits must already be validated for `radix`.
#[inline]
pub(crate) fn from_radix(digits: &str, radix: u32) -> u64 {
    u64::from_str_radix(digits, radix).unwrap_or(u64::MAX)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    #[test]
    fn test_parse_int_auto() {
        let tests: Vec<(&str, u64)> = vec![
            ("0",           0),
            ("00",          0),
            ("10",          10),
            ("255",         255),
            ("0300",        192),
            ("0377",        255),
            ("0x0",         0),
            ("0xff",        255),
            ("0XFF",        255),
            ("0xC0A80101",  0xc0a80101),
            ("4294967295",  u32::MAX as u64),
        ];

        for (input, expected) in tests {
            assert_eq!(parse_int_auto(input), Ok(expected), "Failed: '{input}'");
        }
    }

    #[test]
    fn test_invalid_octal() {
        assert_eq!(
            parse_int_auto("0380"),
            Err(AddressError::InvalidOctal("0380".into()))
        );
        assert!(matches!(parse_int_auto("09"), Err(AddressError::InvalidOctal(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        for input in ["", "0x", "-1", "+1", " 1", "1_000", "12a", "0xfg"] {
            assert!(
                matches!(parse_int_auto(input), Err(AddressError::Malformed { .. })),
                "Failed: '{input}'"
            );
        }
    }

    #[test]
    fn test_saturates() {
        assert_eq!(parse_int_auto("99999999999999999999999"), Ok(u64::MAX));
        assert_eq!(parse_int_auto("0xffffffffffffffffff"), Ok(u64::MAX));
    }

    #[test]
    fn test_is_numeral() {
        assert!(is_numeral("0x1F"));
        assert!(is_numeral("0389"));
        assert!(!is_numeral("0x"));
        assert!(!is_numeral("1f"));
        assert!(!is_numeral(""));
    }
}
