//! Resolved method descriptors
//!
//! A [`MethodDescriptor`] is what the emitter receives: everything it needs to
//! write a request/response or fire-and-forget binding without re-deriving names,
//! picking a primary shape, or working out conversions.

use serde::{Deserialize, Serialize};

use crate::category::MethodCategory;
use crate::protocol_ir::{BindingKind, ReturnType};
use crate::type_ir::TypeRef;

/// A concrete response shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseShape {
    /// Response type (element type when `is_slice`)
    pub ty: TypeRef,
    /// Whether the response is a sequence
    pub is_slice: bool,
}

/// One field copy of a conversion plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCopy {
    /// Path of field names to follow in the source value
    pub source_path: Vec<String>,
    /// Field to populate on the primary shape
    pub dest_field: String,
    /// Alias-resolved type of the copied value
    pub field_type: TypeRef,
}

/// Checked instructions for turning an alternate shape into the primary shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionPlan {
    /// Name of the generated conversion function
    pub converter: String,
    /// Shape the conversion produces (always the primary shape)
    pub target: ResponseShape,
    /// Field copies, in mapping order
    pub copies: Vec<FieldCopy>,
}

/// A non-primary response shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateShape {
    /// The shape as declared
    pub shape: ResponseShape,
    /// Conversion into the primary shape, when one is required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionPlan>,
}

/// Fully resolved, emission-ready description of one method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Protocol method name
    pub method: String,
    /// Canonical identifier for the generated binding
    pub identifier: String,
    /// Category the method is grouped under
    pub category: MethodCategory,
    /// Request parameter type; `None` when the method takes no parameters
    pub request_type: Option<TypeRef>,
    /// Request or notification
    pub kind: BindingKind,
    /// Primary response shape; `None` for void methods and notifications
    pub primary: Option<ResponseShape>,
    /// Alternate shapes in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<AlternateShape>,
}

impl ResponseShape {
    /// Create a shape
    pub fn new(ty: TypeRef, is_slice: bool) -> Self { Self { ty, is_slice } }
}

impl From<&ReturnType> for ResponseShape {
    fn from(rt: &ReturnType) -> Self { Self::new(rt.ty.clone(), rt.is_slice) }
}

impl MethodDescriptor {
    /// Whether the emitter must try more than one shape
    pub fn is_multi_shape(&self) -> bool { !self.alternates.is_empty() }

    /// Whether the method resolves to no value
    pub fn is_void(&self) -> bool { self.primary.is_none() }

    /// Whether this is a notification binding
    pub fn is_notification(&self) -> bool { self.kind == BindingKind::Notification }

    /// All shapes in the order the emitter should attempt them
    pub fn shapes(&self) -> impl Iterator<Item = &ResponseShape> {
        self.primary.iter().chain(self.alternates.iter().map(|a| &a.shape))
    }
}
