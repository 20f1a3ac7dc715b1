//! lspgen method definitions
//!
//! This module defines the declarative records catalog providers build: one
//! [`MethodDef`] per protocol method, each with an ordered list of acceptable
//! response shapes. Values are constructed once and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::category::MethodCategory;
use crate::type_ir::TypeRef;

/// One possible response shape for a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnType {
    /// Protocol type of the response (or of each element when `is_slice`)
    pub ty: TypeRef,
    /// Whether the response is a sequence of `ty`
    pub is_slice: bool,
    /// Whether this shape must be converted into the primary shape field by field
    pub needs_convert: bool,
    /// How to rebuild the primary shape from this one (used when `needs_convert`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_mappings: Vec<FieldMapping>,
}

/// A single field copy used when converting an alternate shape into the primary shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Dotted field path in the source type (e.g. "location.range")
    pub source_field: String,
    /// Field name on the primary type (e.g. "range")
    pub dest_field: String,
    /// Declared type of the source field
    pub source_type: TypeRef,
    /// Declared type of the destination field
    pub dest_type: TypeRef,
}

/// Whether a method expects a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingKind {
    /// Request/response call
    Request,
    /// Fire-and-forget message; no response is ever sent
    Notification,
}

/// Protocol method definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    /// Protocol method name (e.g. "textDocument/didOpen")
    pub name: String,
    /// Request parameter type; `None` when the method takes no parameters
    pub request_type: Option<TypeRef>,
    /// Acceptable response shapes, primary first. Empty means void.
    #[serde(default)]
    pub response_types: Vec<ReturnType>,
    /// Whether this method is a notification
    pub is_notification: bool,
    /// Category the method is grouped under
    pub category: MethodCategory,
}

impl ReturnType {
    /// A singular response of `ty`
    pub fn single(ty: TypeRef) -> Self {
        Self { ty, is_slice: false, needs_convert: false, field_mappings: Vec::new() }
    }

    /// A response holding a sequence of `ty`
    pub fn slice(ty: TypeRef) -> Self {
        Self { ty, is_slice: true, needs_convert: false, field_mappings: Vec::new() }
    }

    /// Require conversion into the primary shape using `mappings`
    pub fn converted(mut self, mappings: Vec<FieldMapping>) -> Self {
        self.needs_convert = true;
        self.field_mappings = mappings;
        self
    }
}

impl FieldMapping {
    /// Create a new field mapping
    pub fn new(
        source_field: impl Into<String>,
        dest_field: impl Into<String>,
        source_type: TypeRef,
        dest_type: TypeRef,
    ) -> Self {
        Self {
            source_field: source_field.into(),
            dest_field: dest_field.into(),
            source_type,
            dest_type,
        }
    }

    /// Source path split on `.`
    pub fn source_path(&self) -> Vec<&str> { self.source_field.split('.').collect() }
}

impl MethodDef {
    /// Define a request; attach responses with [`MethodDef::returns`]
    pub fn request(
        name: impl Into<String>,
        request_type: Option<TypeRef>,
        category: MethodCategory,
    ) -> Self {
        Self {
            name: name.into(),
            request_type,
            response_types: Vec::new(),
            is_notification: false,
            category,
        }
    }

    /// Define a notification
    pub fn notification(
        name: impl Into<String>,
        request_type: Option<TypeRef>,
        category: MethodCategory,
    ) -> Self {
        Self {
            name: name.into(),
            request_type,
            response_types: Vec::new(),
            is_notification: true,
            category,
        }
    }

    /// Append an acceptable response shape. The first one added is the primary.
    pub fn returns(mut self, response: ReturnType) -> Self {
        self.response_types.push(response);
        self
    }

    /// Returns the primary (preferred) response shape
    pub fn primary_response(&self) -> Option<&ReturnType> { self.response_types.first() }

    /// Response shapes after the primary, in declaration order
    pub fn alternate_responses(&self) -> &[ReturnType] {
        self.response_types.get(1..).unwrap_or(&[])
    }

    /// Whether the method resolves to no value
    pub fn is_void(&self) -> bool { self.response_types.is_empty() }

    /// Request or notification
    pub fn binding_kind(&self) -> BindingKind {
        if self.is_notification {
            BindingKind::Notification
        } else {
            BindingKind::Request
        }
    }

    /// Every type reference the definition mentions, in declaration order
    pub fn type_refs(&self) -> Vec<&TypeRef> {
        let mut refs: Vec<&TypeRef> = self.request_type.iter().collect();
        for response in &self.response_types {
            refs.push(&response.ty);
            for mapping in &response.field_mappings {
                refs.push(&mapping.source_type);
                refs.push(&mapping.dest_type);
            }
        }
        refs
    }
}
