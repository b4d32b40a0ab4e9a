// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static DOT: char = '.';
pub(crate) static COLON: char = ':';
pub(crate) static DOUBLE_COLON: &str = "::";
pub(crate) static ZONE_SEP: char = '%';
pub(crate) static SLASH: &str = "/";
pub(crate) static MAPPED_PREFIX: &str = "::ffff:";

// lib.rs
pub(crate) static ERR_V4_MALFORMED: &str = "string is not formatted like an IPv4 Address";
pub(crate) static ERR_V6_MALFORMED: &str = "string is not formatted like an IPv6 Address";
pub(crate) static ERR_V4_COUNT: &str = "ipv4 octet count should be 4";
pub(crate) static ERR_V6_COUNT: &str = "ipv6 part count should be 8 or 16";
pub(crate) static ERR_OUT_OF_RANGE: &str = "outside defined range";
pub(crate) static ERR_OCTAL: &str = "cannot parse as octal";
pub(crate) static ERR_MISMATCH: &str = "cannot match addresses of different families";
pub(crate) static ERR_CONVERSION: &str = "trying to convert a generic ipv6 address to ipv4";
pub(crate) static ERR_AMBIGUOUS: &str = "the address has neither IPv6 nor IPv4 format";

// OutOfRange subjects
pub(crate) static WHAT_V4_OCTET: &str = "ipv4 octet";
pub(crate) static WHAT_V4_ADDR: &str = "ipv4 address";
pub(crate) static WHAT_V4_TAIL24: &str = "ipv4 24-bit tail";
pub(crate) static WHAT_V4_TAIL16: &str = "ipv4 16-bit tail";
pub(crate) static WHAT_V6_PART: &str = "ipv6 part";
pub(crate) static WHAT_V6_BYTE: &str = "ipv6 byte";
pub(crate) static WHAT_PREFIX: &str = "prefix length";

// addresses.rs
pub(crate) static LOG_NOT_V4: &str = "not a valid IPv4 address";
pub(crate) static LOG_NOT_V6: &str = "not a valid IPv6 address";
pub(crate) static LOG_NEITHER: &str = "dual-stack parse failed";
