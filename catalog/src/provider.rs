//! Catalog Provider Trait
//!
//! This module defines the CatalogProvider trait that every method category
//! implements to contribute its method definitions to the catalog.

use ir::{MethodCategory, MethodDef};

/// A source of method definitions for a single category
///
/// Providers are pure: calling [`CatalogProvider::methods`] twice yields the same
/// definitions in the same order. The catalog concatenates providers in
/// [`MethodCategory::ordered`] order, so a provider never decides its own position.
pub trait CatalogProvider {
    /// The category every returned definition belongs to
    fn category(&self) -> MethodCategory;

    /// Build this category's method definitions, in declaration order
    fn methods(&self) -> Vec<MethodDef>;

    /// Get the name of this provider
    ///
    /// Defaults to the category label (e.g. "TextDocument").
    fn name(&self) -> &'static str { self.category().display_name() }
}

/// Adapter turning a plain builder function into a provider
pub struct FnProvider {
    category: MethodCategory,
    build: fn() -> Vec<MethodDef>,
}

impl FnProvider {
    /// Wrap `build` as the provider for `category`
    pub fn new(category: MethodCategory, build: fn() -> Vec<MethodDef>) -> Self {
        Self { category, build }
    }
}

impl CatalogProvider for FnProvider {
    fn category(&self) -> MethodCategory { self.category }

    fn methods(&self) -> Vec<MethodDef> { (self.build)() }
}

/// Names of the definitions in `methods` whose category is not `category`
pub fn misfiled_methods(category: MethodCategory, methods: &[MethodDef]) -> Vec<&str> {
    methods.iter().filter(|m| m.category != category).map(|m| m.name.as_str()).collect()
}
