// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use ipaddrs::{process, IpAddress};
use std::{env, process::exit};

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: ipcheck <address> [address ...]");
        exit(2);
    }

    let mut failed: bool = false;
    for arg in &args {
        match process(arg) {
            Ok(addr) => print_addr(arg, &addr),
            Err(e) => {
                eprintln!("{arg}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        exit(1);
    }
}

fn print_addr(input: &str, addr: &IpAddress) {
    let mask: String = addr
        .prefix_length_from_subnet_mask()
        .map_or_else(|| "-".to_string(), |p| format!("/{p}"));
    println!("{input}");
    println!("  kind:       {}", addr.kind());
    println!("  address:    {addr}");
    println!("  normalized: {}", addr.to_normalized_string());
    println!("  range:      {}", addr.range());
    println!("  as mask:    {mask}");
}
