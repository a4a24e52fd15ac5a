// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # hexstruct - schema-driven hex record codec
//!
//! Decodes a hex stream into a tree of typed values, guided by a catalog of
//! struct declarations, and encodes such trees back into hex.
//!
//! ## Quick Start
//!
//! ```rust
//! use hexstruct::{decode_document, parse_schema, render_document, RenderConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let catalog = parse_schema("struct Point\nint x\nint y\n")?;
//!     let doc = decode_document(&catalog, "00000001000000050000000A")?;
//!
//!     assert_eq!(
//!         render_document(&doc, &RenderConfig::default()),
//!         "Point\n int 5\n int 10"
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Wire format
//!
//! ```text
//! +-------------+----------------------+-------------+-----
//! | int index   | fields of struct #k  | int index   | ...
//! | (1-based)   | (nested inline)      |             |
//! +-------------+----------------------+-------------+-----
//!
//! int    := 8 hex digits, big-endian u32
//! string := int length, then 2 hex digits per ASCII byte
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PrimitiveRegistry`] | Named primitive codecs (`int`, `string`, custom) |
//! | [`SchemaCatalog`] | Ordered struct declarations, 1-based index |
//! | [`ValueNode`] | Decoded tree: [`Leaf`] or [`Record`] |
//! | [`Decoder`] | Hex stream -> document record |
//! | [`Encoder`] | Document record -> hex stream |
//!
//! Catalogs, registries and trees are immutable once built and can be shared
//! between threads; each decode/encode call owns its own cursor and tables.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod primitive;
pub mod render;
pub mod schema;
pub mod value;

pub use config::{
    DecoderConfig, EncoderConfig, HexCase, IndexMode, RenderConfig, DEFAULT_MAX_DEPTH,
    DOCUMENT_NAME,
};
pub use decoder::{decode_document, Decoder};
pub use encoder::{encode_document, Encoder};
pub use error::{Error, Result};
pub use primitive::{HexCursor, IntCodec, PrimitiveCodec, PrimitiveRegistry, StringCodec};
pub use render::{render, render_document, render_with};
pub use schema::text::{parse_schema, to_schema_text};
pub use schema::{FieldType, SchemaCatalog, SchemaCatalogBuilder, StructDecl};
pub use value::{Leaf, Record, ValueNode};
