// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use hexstruct::{parse_schema, to_schema_text, PrimitiveRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(catalog) = parse_schema(text) {
        let _ = catalog.validate(&PrimitiveRegistry::builtin());
        let reparsed = parse_schema(&to_schema_text(&catalog)).expect("written schema must parse");
        assert_eq!(reparsed, catalog);
    }
});
