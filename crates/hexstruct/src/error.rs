// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by the codec, the catalog and the schema scanner.
//!
//! Every error is fatal to the decode/encode call that produced it: there is
//! no partial result and no recovery. Offsets are hex-character positions in
//! the stream, not byte positions.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by hexstruct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Non-hex characters, or a decoded byte outside the ASCII range.
    #[error("malformed hex at offset {offset}: {reason}")]
    MalformedHex { offset: usize, reason: String },

    /// A field needs more hex characters than the stream has left.
    #[error("unexpected end of stream at offset {offset}: need {need} hex chars, have {have}")]
    UnexpectedEndOfStream {
        offset: usize,
        need: usize,
        have: usize,
    },

    /// Struct index outside `1..=count`.
    #[error("unknown struct index {index} (catalog has {count} declarations)")]
    UnknownStructIndex { index: u32, count: usize },

    /// Field type is neither a primitive nor a declared struct.
    #[error("unknown type name: {0}")]
    UnknownTypeName(String),

    /// Two declarations share a name.
    #[error("duplicate struct name: {0}")]
    DuplicateStructName(String),

    /// The primitive codec cannot represent the value.
    #[error("value {value:?} out of range for type {type_name}")]
    ValueOutOfRange { type_name: String, value: String },

    /// The tree handed to the encoder does not fit the schema.
    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    /// Nesting went deeper than the configured limit.
    #[error("nesting depth limit {limit} exceeded")]
    DepthLimitExceeded { limit: usize },

    /// A struct reaches itself through its fields.
    #[error("struct {0} is cyclic")]
    CyclicStruct(String),

    /// A struct is declared under a primitive type name and can never be referenced.
    #[error("struct {0} shadows a primitive type")]
    ShadowedPrimitive(String),

    /// Schema text could not be scanned.
    #[error("schema line {line}: {message}")]
    SchemaSyntax { line: usize, message: String },
}

impl Error {
    pub(crate) fn out_of_range(type_name: &str, value: impl Into<String>) -> Self {
        Self::ValueOutOfRange {
            type_name: type_name.to_string(),
            value: value.into(),
        }
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
