#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation support for LSP method bindings.
//!
//! This crate owns two things: the canonical identifier derivation applied to
//! protocol method names, and the seam through which resolved
//! [`MethodDescriptor`]s reach an emitter. Template rendering itself lives behind
//! [`DescriptorEmitter`] implementations; the one shipped here writes the
//! descriptors as a JSON document for downstream templating.

pub mod utils;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ir::MethodDescriptor;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Underlying I/O error while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// JSON serialization/deserialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Consumer of a fully resolved catalog
///
/// Emitters receive every descriptor at once, in catalog order, and only after
/// resolution produced no errors.
pub trait DescriptorEmitter {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Emit bindings for the given descriptors
    fn emit(&mut self, descriptors: &[MethodDescriptor]) -> Result<()>;
}

/// Top-level layout of the descriptor document
#[derive(Debug, Serialize)]
struct DescriptorDocument<'a> {
    generator: &'static str,
    version: &'static str,
    methods: &'a [MethodDescriptor],
}

/// Writes descriptors as a pretty-printed JSON document
pub struct JsonDescriptorEmitter {
    output_path: PathBuf,
}

impl JsonDescriptorEmitter {
    /// Emit to `output_path`, creating parent directories as needed
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self { output_path: output_path.into() }
    }

    /// Destination of the document
    pub fn output_path(&self) -> &Path { &self.output_path }
}

impl DescriptorEmitter for JsonDescriptorEmitter {
    fn name(&self) -> &str { "json" }

    fn emit(&mut self, descriptors: &[MethodDescriptor]) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = DescriptorDocument {
            generator: "lspgen",
            version: env!("CARGO_PKG_VERSION"),
            methods: descriptors,
        };
        let mut file = fs::File::create(&self.output_path)?;
        serde_json::to_writer_pretty(&mut file, &document)?;
        // Ensure file ends with a newline (POSIX standard)
        writeln!(file)?;

        info!(
            path = %self.output_path.display(),
            methods = descriptors.len(),
            "wrote method descriptors"
        );
        Ok(())
    }
}
