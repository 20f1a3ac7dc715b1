#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! lspgen Intermediate Representation (IR)
//!
//! This crate defines the data model shared by every stage of binding generation:
//! the declarative method definitions supplied by catalog providers, the semantic
//! type references they point at, and the resolved per-method descriptors handed
//! to an emitter once resolution has succeeded.

pub mod category;
pub mod descriptor;
pub mod protocol_ir;
pub mod type_ir;

// Re-export the main IR types for convenience
pub use category::{MethodCategory, UnknownCategory};
pub use descriptor::*;
pub use protocol_ir::*;
pub use type_ir::*;
