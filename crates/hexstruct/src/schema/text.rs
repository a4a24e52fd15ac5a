// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Line-oriented schema text.
//!
//! ```text
//! struct Point
//! int
//! int
//! struct Person
//! string name
//! int age
//! ```
//!
//! `struct <name>` opens a declaration. Every other non-empty line adds its
//! first word as a field type; the rest of the line (usually a field name)
//! is ignored.

use crate::error::{Error, Result};
use crate::schema::{SchemaCatalog, StructDecl};

const STRUCT_KEYWORD: &str = "struct";

/// Scan schema text into a catalog.
pub fn parse_schema(text: &str) -> Result<SchemaCatalog> {
    let mut builder = SchemaCatalog::builder();
    let mut current: Option<StructDecl> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            continue;
        };

        if first == STRUCT_KEYWORD {
            let name = words.next().ok_or_else(|| Error::SchemaSyntax {
                line: line_no,
                message: "struct declaration without a name".into(),
            })?;
            if let Some(done) = current.take() {
                builder.push(done)?;
            }
            current = Some(StructDecl::new(name, Vec::<String>::new()));
        } else {
            let decl = current.as_mut().ok_or_else(|| Error::SchemaSyntax {
                line: line_no,
                message: format!("field type '{}' outside of a struct", first),
            })?;
            decl.field_types.push(first.to_string());
        }
    }

    if let Some(done) = current {
        builder.push(done)?;
    }

    log::debug!("[schema] scanned {} declarations", builder.len());
    Ok(builder.build())
}

/// Write a catalog back as schema text.
pub fn to_schema_text(catalog: &SchemaCatalog) -> String {
    let mut out = String::new();
    for decl in catalog.iter() {
        out.push_str(STRUCT_KEYWORD);
        out.push(' ');
        out.push_str(&decl.name);
        out.push('\n');
        for field_type in &decl.field_types {
            out.push_str(field_type);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let catalog = parse_schema("struct Point\nint\nint\nstruct Name\nstring\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.by_index(1).unwrap().field_types, vec!["int", "int"]);
        assert_eq!(catalog.by_index(2).unwrap().name, "Name");
    }

    #[test]
    fn test_parse_ignores_field_names_and_blank_lines() {
        let text = "\n  struct   Person  \n string name\n\n\tint age extra\n";
        let catalog = parse_schema(text).unwrap();
        let person = catalog.by_name("Person").unwrap();
        assert_eq!(person.field_types, vec!["string", "int"]);
    }

    #[test]
    fn test_parse_empty_struct() {
        let catalog = parse_schema("struct Empty\nstruct Next\nint\n").unwrap();
        assert!(catalog.by_name("Empty").unwrap().field_types.is_empty());
        assert_eq!(catalog.by_name("Next").unwrap().field_types, vec!["int"]);
    }

    #[test]
    fn test_parse_field_before_struct() {
        let err = parse_schema("\nint\nstruct A\n").unwrap_err();
        assert!(matches!(err, Error::SchemaSyntax { line: 2, .. }));
    }

    #[test]
    fn test_parse_struct_without_name() {
        let err = parse_schema("struct A\nint\nstruct\n").unwrap_err();
        assert!(matches!(err, Error::SchemaSyntax { line: 3, .. }));
    }

    #[test]
    fn test_parse_duplicate() {
        let err = parse_schema("struct A\nint\nstruct A\nstring\n").unwrap_err();
        assert_eq!(err, Error::DuplicateStructName("A".into()));
    }

    #[test]
    fn test_text_roundtrip() {
        let text = "struct Point\nint\nint\nstruct Empty\nstruct Tag\nstring\nPoint\n";
        let catalog = parse_schema(text).unwrap();
        assert_eq!(to_schema_text(&catalog), text);
        assert_eq!(parse_schema(&to_schema_text(&catalog)).unwrap(), catalog);
    }
}
