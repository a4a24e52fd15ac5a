// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Program input: header, schema block, hex line.
//!
//! ```text
//! <struct_count> <schema_line_count>
//! <schema_line_count lines of schema text>
//! <hex stream>
//! ```

use anyhow::{bail, Context};
use hexstruct::{parse_schema, SchemaCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInput {
    pub struct_count: usize,
    pub schema_text: String,
    /// Hex stream with ASCII whitespace removed.
    pub hex: String,
}

impl ProgramInput {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut lines = text.lines();

        let header = lines.next().context("empty input: missing header line")?;
        let mut fields = header.split_whitespace();
        let struct_count = parse_count(fields.next(), "struct count")?;
        let schema_lines = parse_count(fields.next(), "schema line count")?;

        let mut schema_text = String::new();
        for i in 0..schema_lines {
            let Some(line) = lines.next() else {
                bail!("expected {} schema lines, input ends after {}", schema_lines, i);
            };
            schema_text.push_str(line);
            schema_text.push('\n');
        }

        // A missing hex line is an empty stream.
        let hex = lines
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        Ok(Self {
            struct_count,
            schema_text,
            hex,
        })
    }

    /// Scan the schema block and check it declares `struct_count` structs.
    pub fn catalog(&self) -> anyhow::Result<SchemaCatalog> {
        let catalog = parse_schema(&self.schema_text).context("invalid schema block")?;
        if catalog.len() != self.struct_count {
            bail!(
                "header announces {} structs, schema declares {}",
                self.struct_count,
                catalog.len()
            );
        }
        Ok(catalog)
    }
}

fn parse_count(field: Option<&str>, what: &str) -> anyhow::Result<usize> {
    let field = field.with_context(|| format!("header is missing the {}", what))?;
    field
        .parse()
        .with_context(|| format!("invalid {} {:?}", what, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_program_input() {
        let text = "1 3\nstruct Point\nint x\nint y\n00000001 00000005 0000000A\n";
        let input = ProgramInput::parse(text).unwrap();
        assert_eq!(input.struct_count, 1);
        assert_eq!(input.schema_text, "struct Point\nint x\nint y\n");
        assert_eq!(input.hex, "00000001000000050000000A");

        let catalog = input.catalog().unwrap();
        assert_eq!(catalog.by_index(1).unwrap().name, "Point");
    }

    #[test]
    fn test_missing_hex_line_is_empty_stream() {
        let input = ProgramInput::parse("1 2\nstruct Tag\nstring\n").unwrap();
        assert!(input.hex.is_empty());
    }

    #[test]
    fn test_bad_header() {
        assert!(ProgramInput::parse("").is_err());
        assert!(ProgramInput::parse("1\nstruct A\n").is_err());
        assert!(ProgramInput::parse("x 1\nstruct A\n").is_err());
    }

    #[test]
    fn test_short_schema_block() {
        let err = ProgramInput::parse("1 4\nstruct A\nint\n").unwrap_err();
        assert!(err.to_string().contains("expected 4 schema lines"));
    }

    #[test]
    fn test_struct_count_mismatch() {
        let input = ProgramInput::parse("2 2\nstruct A\nint\n00000001\n").unwrap();
        let err = input.catalog().unwrap_err();
        assert!(err.to_string().contains("announces 2 structs"));
    }
}
