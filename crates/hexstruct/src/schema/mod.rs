// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct declarations and the catalog that indexes them.
//!
//! A catalog is an ordered list of [`StructDecl`]s. The binary format selects
//! a top-level struct by its 1-based position in this list; field types are
//! resolved by name through one namespace shared with the primitive registry
//! (primitives win).
//!
//! # Example
//!
//! ```rust
//! use hexstruct::{PrimitiveRegistry, SchemaCatalog};
//!
//! let mut builder = SchemaCatalog::builder();
//! builder.declare("Point", ["int", "int"]).unwrap();
//! builder.declare("Segment", ["Point", "Point"]).unwrap();
//! let catalog = builder.build();
//!
//! assert_eq!(catalog.by_index(2).unwrap().name, "Segment");
//! assert_eq!(catalog.position("Point"), Some(1));
//! catalog.validate(&PrimitiveRegistry::builtin()).unwrap();
//! ```

pub mod text;

use crate::error::{Error, Result};
use crate::primitive::{PrimitiveCodec, PrimitiveRegistry};
use std::collections::HashMap;

/// A named, ordered list of field type names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDecl {
    /// Struct name.
    pub name: String,
    /// Field type names, primitive or struct.
    pub field_types: Vec<String>,
}

impl StructDecl {
    /// Create a declaration.
    pub fn new<I, S>(name: impl Into<String>, field_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            field_types: field_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// What a field type name resolves to.
pub enum FieldType<'a> {
    Primitive(&'a dyn PrimitiveCodec),
    Struct(&'a StructDecl),
}

/// Immutable, ordered set of struct declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    decls: Vec<StructDecl>,
    /// Name -> 0-based position in `decls`.
    by_name: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Start building a catalog.
    pub fn builder() -> SchemaCatalogBuilder {
        SchemaCatalogBuilder::default()
    }

    /// Build a catalog from declarations in order.
    pub fn from_decls(decls: impl IntoIterator<Item = StructDecl>) -> Result<Self> {
        let mut builder = Self::builder();
        for decl in decls {
            builder.push(decl)?;
        }
        Ok(builder.build())
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns `true` if the catalog has no declarations.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Declarations in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &StructDecl> {
        self.decls.iter()
    }

    /// The `index`-th declaration, counting from 1.
    pub fn by_index(&self, index: u32) -> Result<&StructDecl> {
        let err = || Error::UnknownStructIndex {
            index,
            count: self.decls.len(),
        };
        let zero_based = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .ok_or_else(err)?;
        self.decls.get(zero_based).ok_or_else(err)
    }

    /// The declaration called `name`.
    pub fn by_name(&self, name: &str) -> Result<&StructDecl> {
        self.by_name
            .get(name)
            .map(|&i| &self.decls[i])
            .ok_or_else(|| Error::UnknownTypeName(name.to_string()))
    }

    /// 1-based position of the declaration called `name`.
    pub fn position(&self, name: &str) -> Option<u32> {
        self.by_name
            .get(name)
            .and_then(|&i| u32::try_from(i + 1).ok())
    }

    /// Resolve a field type name: primitives first, then structs.
    pub fn resolve<'a>(
        &'a self,
        type_name: &str,
        registry: &'a PrimitiveRegistry,
    ) -> Result<FieldType<'a>> {
        if let Some(codec) = registry.lookup(type_name) {
            return Ok(FieldType::Primitive(codec));
        }
        self.by_name(type_name).map(FieldType::Struct)
    }

    /// Check the whole catalog up front.
    ///
    /// Fails if a field type resolves to nothing, if a struct is declared
    /// under a primitive name, or if a struct contains itself.
    pub fn validate(&self, registry: &PrimitiveRegistry) -> Result<()> {
        for decl in &self.decls {
            if registry.contains(&decl.name) {
                return Err(Error::ShadowedPrimitive(decl.name.clone()));
            }
            for field_type in &decl.field_types {
                self.resolve(field_type, registry)?;
            }
        }

        // Depth-first search over struct references.
        let mut state = vec![Visit::New; self.decls.len()];
        for start in 0..self.decls.len() {
            self.visit(start, registry, &mut state)?;
        }
        log::debug!(
            "[schema] catalog validated: {} declarations",
            self.decls.len()
        );
        Ok(())
    }

    fn visit(&self, idx: usize, registry: &PrimitiveRegistry, state: &mut [Visit]) -> Result<()> {
        match state[idx] {
            Visit::Done => return Ok(()),
            Visit::Active => return Err(Error::CyclicStruct(self.decls[idx].name.clone())),
            Visit::New => {}
        }
        state[idx] = Visit::Active;
        for field_type in &self.decls[idx].field_types {
            if registry.contains(field_type) {
                continue;
            }
            if let Some(&next) = self.by_name.get(field_type) {
                self.visit(next, registry, state)?;
            }
        }
        state[idx] = Visit::Done;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Collects declarations in order, rejecting duplicate names.
#[derive(Debug, Default)]
pub struct SchemaCatalogBuilder {
    catalog: SchemaCatalog,
}

impl SchemaCatalogBuilder {
    /// Append a declaration.
    pub fn declare<I, S>(&mut self, name: impl Into<String>, field_types: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(StructDecl::new(name, field_types))
    }

    /// Append an already built declaration.
    pub fn push(&mut self, decl: StructDecl) -> Result<&mut Self> {
        if self.catalog.by_name.contains_key(&decl.name) {
            return Err(Error::DuplicateStructName(decl.name));
        }
        let idx = self.catalog.decls.len();
        self.catalog.by_name.insert(decl.name.clone(), idx);
        self.catalog.decls.push(decl);
        Ok(self)
    }

    /// Number of declarations so far.
    pub fn len(&self) -> usize {
        self.catalog.decls.len()
    }

    /// Returns `true` if nothing has been declared yet.
    pub fn is_empty(&self) -> bool {
        self.catalog.decls.is_empty()
    }

    /// Freeze the catalog.
    pub fn build(self) -> SchemaCatalog {
        self.catalog
    }
}
