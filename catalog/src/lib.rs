#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Method Definition Catalog
//!
//! Each method category contributes an ordered list of immutable [`MethodDef`]
//! records through a [`CatalogProvider`]. The catalog concatenates providers in
//! the fixed [`MethodCategory::ordered`] order, giving one deterministic sequence
//! of definitions for the resolver. Aggregation never drops or overwrites a
//! definition: duplicates survive so the resolver can report every one of them.

use std::collections::BTreeMap;

use ir::{MethodCategory, MethodDef};
use registry::ProtocolRegistryReader;
use tracing::{debug, warn};

pub mod general;
pub mod lsp_types;
pub mod provider;
pub mod text_document;

pub use general::general_methods;
pub use lsp_types::{lsp_type_definitions, lsp_type_registry};
pub use provider::{misfiled_methods, CatalogProvider, FnProvider};
pub use text_document::text_document_methods;

/// An ordered collection of method definitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    methods: Vec<MethodDef>,
}

impl Catalog {
    /// Aggregate providers in category order
    ///
    /// Providers sharing a category keep the order they were given in.
    pub fn from_providers(providers: &[&dyn CatalogProvider]) -> Self {
        let mut ordered: Vec<&&dyn CatalogProvider> = providers.iter().collect();
        ordered.sort_by_key(|p| p.category().rank());

        let mut methods = Vec::new();
        for provider in ordered {
            let provided = provider.methods();
            debug!(provider = provider.name(), count = provided.len(), "collected definitions");
            for method in misfiled_methods(provider.category(), &provided) {
                warn!(provider = provider.name(), method, "definition filed under another category");
            }
            methods.extend(provided);
        }
        Self { methods }
    }

    /// Wrap an already ordered list of definitions
    pub fn from_methods(methods: Vec<MethodDef>) -> Self { Self { methods } }

    /// The catalog shipped with lspgen (General + TextDocument)
    pub fn shipped() -> Self {
        let general = FnProvider::new(MethodCategory::General, general_methods);
        let text_document = FnProvider::new(MethodCategory::TextDocument, text_document_methods);
        Self::from_providers(&[&general, &text_document])
    }

    /// All definitions, in catalog order
    pub fn methods(&self) -> &[MethodDef] { &self.methods }

    /// Consume the catalog, yielding its definitions
    pub fn into_methods(self) -> Vec<MethodDef> { self.methods }

    /// Keep only the given categories, preserving catalog order
    pub fn restrict_to(&self, categories: &[MethodCategory]) -> Self {
        let methods =
            self.methods.iter().filter(|m| categories.contains(&m.category)).cloned().collect();
        Self { methods }
    }

    /// Group definitions by category
    pub fn by_category(&self) -> BTreeMap<MethodCategory, Vec<&MethodDef>> {
        let mut groups: BTreeMap<MethodCategory, Vec<&MethodDef>> = BTreeMap::new();
        for method in &self.methods {
            groups.entry(method.category).or_default().push(method);
        }
        groups
    }

    /// Whether the catalog holds no definitions
    pub fn is_empty(&self) -> bool { self.methods.is_empty() }
}

impl ProtocolRegistryReader for Catalog {
    fn list_methods(&self) -> Vec<&str> { self.methods.iter().map(|m| m.name.as_str()).collect() }

    fn get_method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    fn method_count(&self) -> usize { self.methods.len() }
}
