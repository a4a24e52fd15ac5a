// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire constants and per-call configuration for the decoder, encoder and renderer.

/// Hex characters in an `int` field.
pub const INT_HEX_WIDTH: usize = 8;

/// Hex characters per byte of a `string` body.
pub const BYTE_HEX_WIDTH: usize = 2;

/// Name of the synthetic record wrapping the top-level struct instances.
pub const DOCUMENT_NAME: &str = "global";

/// Default nesting limit for decode/encode recursion.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Letter case used when writing hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexCase {
    #[default]
    Upper,
    Lower,
}

/// How the encoder numbers struct references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    /// Top-level records carry their 1-based catalog position and nested
    /// records are written inline. Output decodes back to the same tree.
    #[default]
    Catalog,
    /// Top-level records carry no index; every nested record is prefixed by
    /// its 0-based position in a table of struct names built in first-seen
    /// order while walking the tree.
    FirstSeen,
}

impl std::str::FromStr for IndexMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catalog" => Ok(Self::Catalog),
            "first-seen" | "first_seen" => Ok(Self::FirstSeen),
            other => Err(format!(
                "unknown index mode '{}' (expected catalog or first-seen)",
                other
            )),
        }
    }
}

/// Decoder configuration.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Maximum record nesting depth.
    pub max_depth: usize,
}

impl DecoderConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Encoder configuration.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Struct reference numbering.
    pub index_mode: IndexMode,
    /// Hex digit case.
    pub hex_case: HexCase,
    /// Maximum record nesting depth.
    pub max_depth: usize,
}

impl EncoderConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self {
            index_mode: IndexMode::default(),
            hex_case: HexCase::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the index mode.
    pub fn index_mode(mut self, mode: IndexMode) -> Self {
        self.index_mode = mode;
        self
    }

    /// Set the hex digit case.
    pub fn hex_case(mut self, case: HexCase) -> Self {
        self.hex_case = case;
        self
    }

    /// Set the nesting limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl RenderConfig {
    /// Create a config with defaults (one space per level).
    pub fn new() -> Self {
        Self { indent_width: 1 }
    }

    /// Set spaces per nesting level.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mode_from_str() {
        assert_eq!("catalog".parse::<IndexMode>(), Ok(IndexMode::Catalog));
        assert_eq!("first-seen".parse::<IndexMode>(), Ok(IndexMode::FirstSeen));
        assert!("sorted".parse::<IndexMode>().is_err());
    }

    #[test]
    fn test_defaults() {
        let enc = EncoderConfig::default();
        assert_eq!(enc.index_mode, IndexMode::Catalog);
        assert_eq!(enc.hex_case, HexCase::Upper);
        assert_eq!(DecoderConfig::default().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(RenderConfig::default().indent_width, 1);
    }
}
