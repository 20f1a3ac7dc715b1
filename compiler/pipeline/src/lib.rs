#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns the method catalog into emitted bindings.
//!
//! Catalog aggregation, descriptor resolution and emission run in sequence;
//! emission only happens when resolution reported no errors.
//!
//! ## Module Organization
//!
//! - `orchestration` - Pipeline entry points (`resolve`, `generate`, `run`)

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The catalog did not resolve; nothing was emitted.
    #[error(transparent)]
    Resolution(#[from] analysis::ResolutionReport),
    /// The shipped type table could not be built.
    #[error(transparent)]
    Registry(#[from] registry::RegistryError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// Error loading configuration.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Error installing the log subscriber.
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
}

// Module declarations
pub mod orchestration;

// Re-export public API from orchestration module
pub use orchestration::{generate, load_config, resolve, run, select_catalog};
