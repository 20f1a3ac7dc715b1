#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! lspgen Descriptor Resolution
//!
//! This crate checks a method catalog against the protocol type table and turns
//! it into emission-ready descriptors. Components include the catalog validator,
//! the conversion planner for alternate response shapes, and the resolver that
//! ties them together and aggregates every error into one report.

// Import all analysis components
pub mod conversion;
pub mod error;
pub mod resolver;
pub mod validator;

// Re-export analysis types
pub use conversion::plan_conversion;
pub use error::{ConversionFailure, ResolutionError, ResolutionReport};
pub use resolver::{resolve_catalog, DescriptorResolver, ResolutionStats};
pub use validator::IrValidator;
