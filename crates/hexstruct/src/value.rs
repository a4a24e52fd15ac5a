// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoded value tree.

use crate::config::DOCUMENT_NAME;
use crate::error::{Error, Result};
use crate::primitive::{INT, STRING};
use crate::schema::StructDecl;
use std::fmt;

/// A node of a decoded tree: a primitive leaf or a struct record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueNode {
    Leaf(Leaf),
    Record(Record),
}

/// A decoded primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leaf {
    /// Primitive type name (`int`, `string`, ...).
    pub type_name: String,
    /// Value as text (`int` values are decimal).
    pub value: String,
}

/// A struct instance.
///
/// `children[i]` is a [`Leaf`] when `field_types[i]` is primitive, otherwise
/// a [`Record`] named `field_types[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Struct name.
    pub name: String,
    /// Field type names, same order as `children`.
    pub field_types: Vec<String>,
    /// Field values.
    pub children: Vec<ValueNode>,
}

impl Leaf {
    /// Create a leaf.
    pub fn new(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// An `int` leaf.
    pub fn int(value: u32) -> Self {
        Self::new(INT, value.to_string())
    }

    /// A `string` leaf.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(STRING, value)
    }
}

impl Record {
    /// Create a record.
    pub fn new<I, S>(name: impl Into<String>, field_types: I, children: Vec<ValueNode>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            field_types: field_types.into_iter().map(Into::into).collect(),
            children,
        }
    }

    /// Create a record for `decl`.
    pub fn from_decl(decl: &StructDecl, children: Vec<ValueNode>) -> Self {
        Self {
            name: decl.name.clone(),
            field_types: decl.field_types.clone(),
            children,
        }
    }

    /// Wrap top-level records into the `global` document.
    pub fn document(children: Vec<Record>) -> Self {
        let field_types = children.iter().map(|c| c.name.clone()).collect();
        Self {
            name: DOCUMENT_NAME.to_string(),
            field_types,
            children: children.into_iter().map(ValueNode::Record).collect(),
        }
    }

    /// True for the synthetic document record.
    pub fn is_document(&self) -> bool {
        self.name == DOCUMENT_NAME
    }

    /// Child at position `i`.
    pub fn child(&self, i: usize) -> Option<&ValueNode> {
        self.children.get(i)
    }

    /// Iterate over record children only (top-level instances of a document).
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.children.iter().filter_map(ValueNode::as_record)
    }

    /// Check the record invariants recursively.
    ///
    /// Arity must match, and a record child must carry the name of its slot.
    /// Whether a slot is primitive is up to the registry, so a leaf child is
    /// only checked for its type name matching the slot.
    pub fn check_shape(&self) -> Result<()> {
        if self.children.len() != self.field_types.len() {
            return Err(Error::mismatch(
                format!("{} fields in {}", self.field_types.len(), self.name),
                format!("{} children", self.children.len()),
            ));
        }
        for (slot, child) in self.field_types.iter().zip(&self.children) {
            if child.name() != slot {
                return Err(Error::mismatch(slot.as_str(), child.name()));
            }
            if let ValueNode::Record(rec) = child {
                rec.check_shape()?;
            }
        }
        Ok(())
    }
}

impl ValueNode {
    /// Type name of a leaf, struct name of a record.
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.type_name,
            Self::Record(rec) => &rec.name,
        }
    }

    /// Try to get as leaf.
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Record(_) => None,
        }
    }

    /// Try to get as record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(rec) => Some(rec),
            Self::Leaf(_) => None,
        }
    }

    /// Leaf value, if this is a leaf.
    pub fn value(&self) -> Option<&str> {
        self.as_leaf().map(|l| l.value.as_str())
    }
}

impl From<Leaf> for ValueNode {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<Record> for ValueNode {
    fn from(rec: Record) -> Self {
        Self::Record(rec)
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render::render(self, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: u32, y: u32) -> Record {
        Record::new("Point", ["int", "int"], vec![Leaf::int(x).into(), Leaf::int(y).into()])
    }

    #[test]
    fn test_document_field_types_follow_children() {
        let doc = Record::document(vec![point(1, 2), point(3, 4)]);
        assert!(doc.is_document());
        assert_eq!(doc.field_types, vec!["Point", "Point"]);
        assert_eq!(doc.records().count(), 2);
    }

    #[test]
    fn test_accessors() {
        let rec = point(5, 10);
        let node = ValueNode::from(rec.clone());
        assert_eq!(node.name(), "Point");
        assert!(node.as_leaf().is_none());
        assert_eq!(node.as_record(), Some(&rec));
        assert_eq!(rec.child(1).and_then(ValueNode::value), Some("10"));
        assert!(rec.child(2).is_none());
    }

    #[test]
    fn test_check_shape_arity() {
        let bad = Record::new("Point", ["int", "int"], vec![Leaf::int(1).into()]);
        assert!(matches!(bad.check_shape(), Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_check_shape_nested_name() {
        let bad = Record::new("Segment", ["Point"], vec![ValueNode::Record(Record::new(
            "Vector",
            ["int", "int"],
            vec![Leaf::int(1).into(), Leaf::int(2).into()],
        ))]);
        assert_eq!(
            bad.check_shape().unwrap_err(),
            Error::SchemaMismatch {
                expected: "Point".into(),
                found: "Vector".into()
            }
        );

        let good = Record::new("Segment", ["Point"], vec![point(1, 2).into()]);
        good.check_shape().unwrap();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_shape() {
        let node = ValueNode::Leaf(Leaf::int(7));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"Leaf":{"type_name":"int","value":"7"}}"#);
        let back: ValueNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
