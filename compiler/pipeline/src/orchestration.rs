//! Pipeline orchestration for the main entry points.
//!
//! This module coordinates the catalog, the resolver and an emitter to execute
//! the complete generation process.

use std::collections::BTreeMap;
use std::path::Path;

use analysis::{resolve_catalog, ResolutionStats};
use catalog::{lsp_type_registry, Catalog};
use codegen::{DescriptorEmitter, JsonDescriptorEmitter};
use config::{Config, ConfigError};
use ir::{MethodCategory, MethodDescriptor};
use registry::TypeRegistryReader;
use tracing::info;

use crate::PipelineError;

/// Load the configuration at `path`, or the default configuration file
///
/// An explicit path must exist; a missing default file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, PipelineError> {
    match path {
        Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::load_or_default()?),
    }
}

/// The shipped catalog, narrowed to the configured categories
pub fn select_catalog(config: &Config) -> Result<Catalog, PipelineError> {
    let catalog = Catalog::shipped();
    match config.codegen.categories()? {
        Some(categories) => Ok(catalog.restrict_to(&categories)),
        None => Ok(catalog),
    }
}

/// Resolve `catalog` against `types`
///
/// # Returns
///
/// Descriptors in catalog order, or the report of every resolution error
pub fn resolve(
    catalog: &Catalog,
    types: &dyn TypeRegistryReader,
) -> Result<Vec<MethodDescriptor>, PipelineError> {
    let descriptors = resolve_catalog(catalog.methods(), types)?;

    let mut per_category: BTreeMap<MethodCategory, usize> = BTreeMap::new();
    for descriptor in &descriptors {
        *per_category.entry(descriptor.category).or_insert(0) += 1;
    }
    for (category, count) in &per_category {
        info!(category = %category, methods = count, "resolved category");
    }

    let stats = ResolutionStats::from_descriptors(&descriptors);
    info!(
        methods = stats.methods,
        requests = stats.requests,
        notifications = stats.notifications,
        multi_shape = stats.multi_shape,
        conversions = stats.conversions,
        "resolved catalog"
    );
    Ok(descriptors)
}

/// Resolve `catalog` and hand the descriptors to `emitter`
///
/// The emitter is not invoked when resolution fails.
pub fn generate(
    catalog: &Catalog,
    types: &dyn TypeRegistryReader,
    emitter: &mut dyn DescriptorEmitter,
) -> Result<Vec<MethodDescriptor>, PipelineError> {
    let descriptors = resolve(catalog, types)?;
    emitter.emit(&descriptors)?;
    info!(emitter = emitter.name(), methods = descriptors.len(), "emitted bindings");
    Ok(descriptors)
}

/// Run the configured pipeline, writing the descriptor document to
/// `codegen.output_path`
///
/// # Returns
///
/// The number of emitted descriptors
pub fn run(config: &Config) -> Result<usize, PipelineError> {
    let catalog = select_catalog(config)?;
    let types = lsp_type_registry()?;
    let mut emitter = JsonDescriptorEmitter::new(&config.codegen.output_path);
    let descriptors = generate(&catalog, &types, &mut emitter)?;
    Ok(descriptors.len())
}
