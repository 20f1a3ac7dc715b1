#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Type Registry: the known type table for protocol method definitions.
//!
//! Method definitions refer to protocol types by name. This crate stores the
//! definitions of those types so the resolver can check references, walk field
//! paths and follow aliases. It also declares the read-only lookup interface the
//! method catalog exposes.

use std::collections::BTreeMap;
use std::path::Path;

use ir::{MethodDef, TypeDef, TypeKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building a type registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// I/O error while reading a type table file
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON parsing error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The same type name was registered twice
    #[error("Type '{0}' is registered more than once")]
    DuplicateType(String),
    /// An alias without a base type
    #[error("Alias '{0}' has no base type")]
    AliasWithoutBase(String),
}

/// Result alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// A registry of protocol type definitions, keyed by type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeRegistry {
    types: BTreeMap<String, TypeDef>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self { Self::default() }

    /// Add a type to the registry, replacing any previous definition with the same name.
    pub fn insert(&mut self, type_def: TypeDef) -> Option<TypeDef> {
        self.types.insert(type_def.name.clone(), type_def)
    }

    /// Build a registry from a list of definitions, rejecting duplicate names
    /// and aliases without a base type.
    pub fn from_types(types: impl IntoIterator<Item = TypeDef>) -> Result<Self> {
        let mut registry = Self::new();
        for type_def in types {
            if type_def.kind == TypeKind::Alias && type_def.base_type.is_none() {
                return Err(RegistryError::AliasWithoutBase(type_def.name));
            }
            let name = type_def.name.clone();
            if registry.insert(type_def).is_some() {
                return Err(RegistryError::DuplicateType(name));
            }
        }
        Ok(registry)
    }

    /// Load a type table from a JSON array of type definitions
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a type table from a JSON array of type definitions
    pub fn from_json_str(json: &str) -> Result<Self> {
        let types: Vec<TypeDef> = serde_json::from_str(json)?;
        Self::from_types(types)
    }

    /// Whether the registry holds no types
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}

/// Read-only interface to the `TypeRegistry`.
pub trait TypeRegistryReader {
    /// Get a type definition by its exact name.
    fn get_type(&self, name: &str) -> Option<&TypeDef>;

    /// Get all type names in the registry.
    fn list_types(&self) -> Vec<&str>;

    /// Get the total number of types in the registry.
    fn type_count(&self) -> usize;

    /// Whether `name` is a registered alias
    fn is_alias(&self, name: &str) -> bool {
        self.get_type(name).is_some_and(|t| t.kind == TypeKind::Alias)
    }

    /// Follow aliases from `name` to the first non-alias definition.
    ///
    /// Returns `None` for unknown names, dangling aliases and alias cycles.
    fn resolve(&self, name: &str) -> Option<&TypeDef> {
        let mut current = self.get_type(name)?;
        // An alias chain longer than the table is necessarily a cycle
        for _ in 0..=self.type_count() {
            if current.kind != TypeKind::Alias {
                return Some(current);
            }
            current = self.get_type(current.base_type.as_deref()?)?;
        }
        None
    }

    /// Name of the definition `name` resolves to
    fn canonical_name(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|t| t.name.as_str())
    }
}

impl TypeRegistryReader for TypeRegistry {
    fn get_type(&self, name: &str) -> Option<&TypeDef> { self.types.get(name) }

    fn list_types(&self) -> Vec<&str> { self.types.keys().map(|s| s.as_str()).collect() }

    fn type_count(&self) -> usize { self.types.len() }
}

/// Read-only interface to an aggregated set of method definitions.
///
/// Provides a clean API for querying method definitions without exposing
/// mutation capabilities.
pub trait ProtocolRegistryReader {
    /// Get all method names, in catalog order.
    fn list_methods(&self) -> Vec<&str>;

    /// Get a method definition by name.
    ///
    /// Returns the first definition when the name occurs more than once.
    fn get_method(&self, name: &str) -> Option<&MethodDef>;

    /// Get the total number of method definitions.
    fn method_count(&self) -> usize;
}
