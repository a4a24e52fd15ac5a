// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoding of a value tree back into a hex stream.
//!
//! Two numbering schemes are supported (see [`IndexMode`]):
//!
//! ```text
//! Catalog:    doc    := ( int(catalog position, 1-based) fields(S) )*
//!             fields := primitives inline, nested records inline
//!
//! FirstSeen:  doc    := ( fields(S) )*
//!             fields := primitives inline,
//!                       nested record -> int(first-seen slot, 0-based) fields(T)
//! ```
//!
//! Only `Catalog` output is accepted back by [`crate::Decoder`].

use crate::config::{EncoderConfig, IndexMode};
use crate::error::{Error, Result};
use crate::primitive::{self, PrimitiveRegistry};
use crate::schema::SchemaCatalog;
use crate::value::{Record, ValueNode};

/// Encoder bound to one catalog and one registry.
#[derive(Debug, Clone)]
pub struct Encoder<'a> {
    catalog: &'a SchemaCatalog,
    registry: &'a PrimitiveRegistry,
    config: EncoderConfig,
}

/// Per-call state. Never shared between calls.
struct EncodeState {
    out: String,
    /// Struct names in first-seen order (`IndexMode::FirstSeen` only).
    seen: Vec<String>,
}

impl EncodeState {
    fn new() -> Self {
        Self {
            out: String::new(),
            seen: Vec::new(),
        }
    }

    /// 0-based slot of `name`, appending it first if absent.
    fn slot(&mut self, name: &str) -> usize {
        match self.seen.iter().position(|n| n == name) {
            Some(pos) => pos,
            None => {
                self.seen.push(name.to_string());
                self.seen.len() - 1
            }
        }
    }
}

impl<'a> Encoder<'a> {
    /// Create an encoder with the default config.
    pub fn new(catalog: &'a SchemaCatalog, registry: &'a PrimitiveRegistry) -> Self {
        Self {
            catalog,
            registry,
            config: EncoderConfig::default(),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Encode every top-level record of `document`.
    pub fn encode_document(&self, document: &Record) -> Result<String> {
        if document.children.len() != document.field_types.len() {
            return Err(Error::mismatch(
                format!("{} top-level records", document.field_types.len()),
                format!("{} children", document.children.len()),
            ));
        }

        let mut state = EncodeState::new();
        for (slot, child) in document.field_types.iter().zip(&document.children) {
            let record = match child {
                ValueNode::Record(rec) if rec.name == *slot => rec,
                other => return Err(Error::mismatch(slot.as_str(), other.name())),
            };

            match self.config.index_mode {
                IndexMode::Catalog => {
                    let index = self
                        .catalog
                        .position(&record.name)
                        .ok_or_else(|| Error::UnknownTypeName(record.name.clone()))?;
                    primitive::write_u32(&mut state.out, index, self.config.hex_case);
                }
                IndexMode::FirstSeen => {
                    state.slot(&record.name);
                }
            }
            self.encode_fields(record, &mut state, 1)?;
        }

        log::debug!(
            "[encoder] encoded {} top-level records into {} hex chars ({:?})",
            document.children.len(),
            state.out.len(),
            self.config.index_mode
        );
        Ok(state.out)
    }

    /// Encode the fields of one record, without any index prefix.
    pub fn encode_record(&self, record: &Record) -> Result<String> {
        let mut state = EncodeState::new();
        state.slot(&record.name);
        self.encode_fields(record, &mut state, 1)?;
        Ok(state.out)
    }

    fn encode_fields(&self, record: &Record, state: &mut EncodeState, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }
        if self.config.index_mode == IndexMode::Catalog {
            // The decoder only knows what the catalog declares.
            let decl = self.catalog.by_name(&record.name)?;
            if decl.field_types != record.field_types {
                return Err(Error::mismatch(
                    format!("{} {:?}", decl.name, decl.field_types),
                    format!("{:?}", record.field_types),
                ));
            }
        }
        if record.children.len() != record.field_types.len() {
            return Err(Error::mismatch(
                format!("{} fields in {}", record.field_types.len(), record.name),
                format!("{} children", record.children.len()),
            ));
        }

        for (slot, child) in record.field_types.iter().zip(&record.children) {
            match (self.registry.lookup(slot), child) {
                (Some(codec), ValueNode::Leaf(leaf)) if leaf.type_name == *slot => {
                    codec.encode(&leaf.value, self.config.hex_case, &mut state.out)?;
                }
                (None, ValueNode::Record(nested)) if nested.name == *slot => {
                    if self.config.index_mode == IndexMode::FirstSeen {
                        let slot_idx = state.slot(&nested.name);
                        let slot_idx = u32::try_from(slot_idx)
                            .map_err(|_| Error::out_of_range(primitive::INT, slot_idx.to_string()))?;
                        primitive::write_u32(&mut state.out, slot_idx, self.config.hex_case);
                    }
                    self.encode_fields(nested, state, depth + 1)?;
                }
                (None, ValueNode::Leaf(leaf)) if !self.registry.contains(&leaf.type_name) => {
                    return Err(Error::UnknownTypeName(leaf.type_name.clone()));
                }
                (_, other) => return Err(Error::mismatch(slot.as_str(), other.name())),
            }
        }
        Ok(())
    }
}

/// Encode `document` against `catalog` with the built-in primitives and the
/// default (catalog) numbering.
pub fn encode_document(catalog: &SchemaCatalog, document: &Record) -> Result<String> {
    let registry = PrimitiveRegistry::builtin();
    Encoder::new(catalog, &registry).encode_document(document)
}
