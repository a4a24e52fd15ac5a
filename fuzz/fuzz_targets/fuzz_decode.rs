// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use hexstruct::{decode_document, encode_document, parse_schema};
use libfuzzer_sys::fuzz_target;

const SCHEMA: &str = "struct Point\nint\nint\n\
                      struct Label\nstring\n\
                      struct Marker\nPoint\nLabel\nint\n\
                      struct Loop\nLoop\n";

fuzz_target!(|data: &[u8]| {
    let Ok(hex) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(catalog) = parse_schema(SCHEMA) else {
        return;
    };

    // Whatever decodes must encode back to the same stream, modulo case.
    if let Ok(doc) = decode_document(&catalog, hex) {
        let again = encode_document(&catalog, &doc).expect("decoded tree must encode");
        assert_eq!(again, hex.to_ascii_uppercase());
    }
});
