// SPDX-License-Identifier: CC0-1.0

//! lspgen umbrella crate.
//!
//! Re-exports the public API of the workspace members: the method data model,
//! the shipped catalog and type table, and the descriptor resolver.
//!
//! ```
//! let catalog = lspgen::Catalog::shipped();
//! let types = lspgen::lsp_type_registry().expect("shipped type table builds");
//! let descriptors = lspgen::resolve_catalog(catalog.methods(), &types)
//!     .expect("shipped catalog resolves");
//! assert_eq!(descriptors[0].identifier, "Initialize");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

pub use analysis::{
    resolve_catalog, ConversionFailure, DescriptorResolver, ResolutionError, ResolutionReport,
    ResolutionStats,
};
pub use catalog::{lsp_type_definitions, lsp_type_registry, Catalog, CatalogProvider, FnProvider};
pub use codegen::utils::canonical_identifier;
pub use codegen::{DescriptorEmitter, JsonDescriptorEmitter};
pub use ir::{
    AlternateShape, BindingKind, ConversionPlan, FieldCopy, FieldMapping, MethodCategory, MethodDef,
    MethodDescriptor, ResponseShape, ReturnType, TypeKind, TypeRef,
};
pub use registry::{TypeRegistry, TypeRegistryReader};

/// Miscellaneous metadata about the lspgen workspace.
pub mod lspgen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
