// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven decoding of a hex stream into a value tree.
//!
//! ```text
//! stream := ( int(struct_index) fields(catalog[struct_index]) )*
//! fields(S) := for each field type T of S:
//!                  T primitive -> codec(T)
//!                  T struct    -> fields(T)      (no index prefix)
//! ```
//!
//! `struct_index` is 1-based into the catalog. Decoding stops when the cursor
//! lands exactly on the end of the stream; anything else is an error.

use crate::config::DecoderConfig;
use crate::error::{Error, Result};
use crate::primitive::{HexCursor, PrimitiveRegistry};
use crate::schema::{FieldType, SchemaCatalog, StructDecl};
use crate::value::{Leaf, Record, ValueNode};

/// Decoder bound to one catalog and one registry.
///
/// The decoder itself holds no mutable state: each call owns its cursor, so
/// a decoder can be shared across threads.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    catalog: &'a SchemaCatalog,
    registry: &'a PrimitiveRegistry,
    config: DecoderConfig,
}

impl<'a> Decoder<'a> {
    /// Create a decoder with the default config.
    pub fn new(catalog: &'a SchemaCatalog, registry: &'a PrimitiveRegistry) -> Self {
        Self {
            catalog,
            registry,
            config: DecoderConfig::default(),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode a whole stream into the `global` document.
    pub fn decode_document(&self, hex: &str) -> Result<Record> {
        let mut cursor = HexCursor::new(hex);
        let mut records = Vec::new();

        while !cursor.is_at_end() {
            let offset = cursor.position();
            let index = cursor.read_u32()?;
            let decl = self.catalog.by_index(index)?;
            log::trace!(
                "[decoder] offset {}: struct #{} ({})",
                offset,
                index,
                decl.name
            );
            records.push(self.decode_record(decl, &mut cursor, 1)?);
        }

        log::debug!(
            "[decoder] decoded {} top-level records from {} hex chars",
            records.len(),
            hex.len()
        );
        Ok(Record::document(records))
    }

    /// Decode the fields of `decl` at the cursor.
    ///
    /// `depth` is the nesting level of the record being decoded (top-level
    /// records are at depth 1).
    pub fn decode_record(
        &self,
        decl: &StructDecl,
        cursor: &mut HexCursor<'_>,
        depth: usize,
    ) -> Result<Record> {
        if depth > self.config.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        let mut children = Vec::with_capacity(decl.field_types.len());
        for type_name in &decl.field_types {
            let child = match self.catalog.resolve(type_name, self.registry)? {
                FieldType::Primitive(codec) => {
                    let value = codec.decode(cursor)?;
                    log::trace!("[decoder] {} {} = {:?}", decl.name, type_name, value);
                    ValueNode::Leaf(Leaf::new(type_name.as_str(), value))
                }
                FieldType::Struct(nested) => {
                    ValueNode::Record(self.decode_record(nested, cursor, depth + 1)?)
                }
            };
            children.push(child);
        }

        Ok(Record::from_decl(decl, children))
    }
}

/// Decode `hex` against `catalog` using the built-in primitives.
pub fn decode_document(catalog: &SchemaCatalog, hex: &str) -> Result<Record> {
    let registry = PrimitiveRegistry::builtin();
    Decoder::new(catalog, &registry).decode_document(hex)
}
