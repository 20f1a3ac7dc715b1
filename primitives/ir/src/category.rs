//! Method categories
//!
//! Every method definition belongs to exactly one category. Categories decide the
//! order in which catalog providers are concatenated, so the order returned by
//! [`MethodCategory::ordered`] is part of the catalog contract.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories for protocol methods, following the LSP method namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MethodCategory {
    /// Lifecycle methods without a namespace (initialize, shutdown, ...)
    General,
    /// `textDocument/*` methods
    TextDocument,
    /// `workspace/*` methods
    Workspace,
    /// `window/*` methods
    Window,
}

/// A category label that does not name any [`MethodCategory`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown method category '{0}'")]
pub struct UnknownCategory(pub String);

impl MethodCategory {
    /// Fixed, deterministic order in which category providers are aggregated
    pub fn ordered() -> &'static [MethodCategory] {
        &[
            MethodCategory::General,
            MethodCategory::TextDocument,
            MethodCategory::Workspace,
            MethodCategory::Window,
        ]
    }

    /// Canonical label used in definitions, headings and configuration
    pub fn display_name(&self) -> &'static str {
        match self {
            MethodCategory::General => "General",
            MethodCategory::TextDocument => "TextDocument",
            MethodCategory::Workspace => "Workspace",
            MethodCategory::Window => "Window",
        }
    }

    /// Position of this category in [`MethodCategory::ordered`]
    pub fn rank(&self) -> usize {
        Self::ordered().iter().position(|c| c == self).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for MethodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.display_name()) }
}

impl FromStr for MethodCategory {
    type Err = UnknownCategory;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(MethodCategory::General),
            "textdocument" => Ok(MethodCategory::TextDocument),
            "workspace" => Ok(MethodCategory::Workspace),
            "window" => Ok(MethodCategory::Window),
            _ => Err(UnknownCategory(label.to_string())),
        }
    }
}
