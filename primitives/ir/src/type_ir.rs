//! Semantic type references
//!
//! Method definitions never carry source-language types. They refer to protocol
//! types by a tagged reference that is checked against the known type table at
//! resolution time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// Base protocol type (string, integer, uri, ...)
    Primitive,
    /// Structure with named fields
    Structure,
    /// Enumeration of literal values
    Enumeration,
    /// Another name for an existing type
    Alias,
}

impl TypeKind {
    /// Lowercase tag used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Primitive => "primitive",
            TypeKind::Structure => "structure",
            TypeKind::Enumeration => "enumeration",
            TypeKind::Alias => "alias",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A reference to a protocol type: a kind tag plus the protocol type name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Kind the referring definition expects the type to have
    pub kind: TypeKind,
    /// Protocol type name (e.g. "Location", "DocumentSymbol")
    pub name: String,
}

impl TypeRef {
    /// Create a reference with an explicit kind
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self { Self { kind, name: name.into() } }

    /// Reference to a primitive type
    pub fn primitive(name: impl Into<String>) -> Self { Self::new(TypeKind::Primitive, name) }

    /// Reference to a structure type
    pub fn structure(name: impl Into<String>) -> Self { Self::new(TypeKind::Structure, name) }

    /// Reference to an enumeration type
    pub fn enumeration(name: impl Into<String>) -> Self { Self::new(TypeKind::Enumeration, name) }

    /// Reference to an alias type
    pub fn alias(name: impl Into<String>) -> Self { Self::new(TypeKind::Alias, name) }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.name) }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears on the wire (e.g. "selectionRange")
    pub name: String,
    /// Field type
    pub field_type: TypeRef,
    /// Whether the field may be absent
    pub optional: bool,
    /// Whether the field holds a sequence of `field_type`
    pub is_array: bool,
}

impl FieldDef {
    /// A required, singular field
    pub fn required(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self { name: name.into(), field_type, optional: false, is_array: false }
    }

    /// An optional, singular field
    pub fn optional(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self { name: name.into(), field_type, optional: true, is_array: false }
    }

    /// Mark this field as a sequence
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }
}

/// Type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Protocol type name
    pub name: String,
    /// Type kind
    pub kind: TypeKind,
    /// Fields (structures only; empty for opaque parameter structures)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,
    /// Aliased type name (aliases only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
}

impl TypeDef {
    /// A primitive type
    pub fn primitive(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: TypeKind::Primitive, fields: Vec::new(), base_type: None }
    }

    /// An enumeration type
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: TypeKind::Enumeration, fields: Vec::new(), base_type: None }
    }

    /// A structure type with the given fields
    pub fn structure(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self { name: name.into(), kind: TypeKind::Structure, fields, base_type: None }
    }

    /// An alias of `base_type`
    pub fn alias(name: impl Into<String>, base_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Alias,
            fields: Vec::new(),
            base_type: Some(base_type.into()),
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> { self.fields.iter().find(|f| f.name == name) }

    /// Fields that must be present on every value of this type
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.optional)
    }
}
