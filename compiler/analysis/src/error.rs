//! Resolution errors
//!
//! Every problem found while resolving a catalog becomes one [`ResolutionError`]
//! naming the offending method. Errors are collected across the whole catalog
//! and surfaced together as a [`ResolutionReport`].

use std::fmt;

use ir::TypeKind;
use thiserror::Error;

/// Why an alternate response shape cannot be converted into the primary shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    /// Conversion requested without any field mappings
    #[error("conversion requested but no field mappings are given")]
    NoFieldMappings,
    /// Source or target shape is not a structure with fields
    #[error("`{type_name}` is not a structure")]
    NotAStructure {
        /// Offending type
        type_name: String,
    },
    /// Element-wise conversion needs both shapes to agree on being a sequence
    #[error("cannot convert {} into {}", plural(*source_is_slice), plural(*target_is_slice))]
    CardinalityMismatch {
        /// Whether the alternate shape is a sequence
        source_is_slice: bool,
        /// Whether the primary shape is a sequence
        target_is_slice: bool,
    },
    /// A segment of the source path does not exist or cannot be descended into
    #[error("source path `{path}` is unreachable at `{segment}`")]
    SourcePathUnreachable {
        /// Full dotted path
        path: String,
        /// First segment that could not be followed
        segment: String,
    },
    /// The destination field is absent from the primary shape
    #[error("destination field `{field}` does not exist on `{target}`")]
    DestinationFieldMissing {
        /// Destination field
        field: String,
        /// Primary type
        target: String,
    },
    /// Declared and actual field types disagree
    #[error("`{field}` is declared as `{stated}` but is `{actual}`")]
    TypeMismatch {
        /// Field path or name the mismatch concerns
        field: String,
        /// Type stated on the mapping
        stated: String,
        /// Type found in the type table
        actual: String,
    },
    /// Two mappings write the same destination field
    #[error("destination field `{field}` is mapped more than once")]
    DuplicateDestination {
        /// Destination field
        field: String,
    },
    /// A source path that may be absent feeds a required field
    #[error("`{path}` may be absent but feeds required field `{field}`")]
    OptionalSourceForRequiredField {
        /// Dotted source path
        path: String,
        /// Required destination field
        field: String,
    },
    /// Required fields of the primary shape are left unset
    #[error("required field(s) {} of `{target}` are not mapped", fields.join(", "))]
    MissingRequiredFields {
        /// Primary type
        target: String,
        /// Required fields without a mapping
        fields: Vec<String>,
    },
}

fn plural(is_slice: bool) -> &'static str {
    if is_slice {
        "a sequence"
    } else {
        "a single value"
    }
}

/// A resolution error, always naming the offending method
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Two or more definitions share a protocol method name
    #[error("`{method}`: defined {} times (catalog positions {positions:?})", positions.len())]
    DuplicateMethodName {
        /// Duplicated protocol method name
        method: String,
        /// Catalog positions of every occurrence
        positions: Vec<usize>,
    },
    /// A notification declares response types
    #[error("`{method}`: notification declares {count} response type(s)")]
    InvalidNotificationShape {
        /// Notification name
        method: String,
        /// Number of declared response types
        count: usize,
    },
    /// Distinct method names derive the same identifier
    #[error("`{identifier}`: derived from distinct methods {}", methods.join(", "))]
    IdentifierCollision {
        /// Colliding identifier
        identifier: String,
        /// Every distinct method name deriving it, in catalog order
        methods: Vec<String>,
    },
    /// An alternate shape cannot be converted into the primary shape
    #[error("`{method}`: response #{response_index} cannot be converted: {reason}")]
    UnresolvableConversion {
        /// Method name
        method: String,
        /// Index of the alternate in the method's response list
        response_index: usize,
        /// What went wrong
        reason: ConversionFailure,
    },
    /// A type reference names no registered type
    #[error("`{method}`: {context} refers to unknown type `{name}`")]
    UnknownType {
        /// Method name
        method: String,
        /// Where in the definition the reference occurs
        context: String,
        /// Referenced type name
        name: String,
    },
    /// A type reference carries a different kind tag than the registered type
    #[error("`{method}`: {context} expects {expected} `{name}` but it is registered as {found}")]
    TypeKindMismatch {
        /// Method name
        method: String,
        /// Where in the definition the reference occurs
        context: String,
        /// Referenced type name
        name: String,
        /// Kind on the reference
        expected: TypeKind,
        /// Kind in the type table
        found: TypeKind,
    },
    /// The method name cannot be turned into an identifier
    #[error("`{method}`: malformed method name")]
    InvalidMethodName {
        /// Method name as given
        method: String,
    },
}

impl ResolutionError {
    /// Method name(s) the error is attached to
    pub fn methods(&self) -> Vec<&str> {
        match self {
            ResolutionError::IdentifierCollision { methods, .. } => {
                methods.iter().map(String::as_str).collect()
            }
            ResolutionError::DuplicateMethodName { method, .. }
            | ResolutionError::InvalidNotificationShape { method, .. }
            | ResolutionError::UnresolvableConversion { method, .. }
            | ResolutionError::UnknownType { method, .. }
            | ResolutionError::TypeKindMismatch { method, .. }
            | ResolutionError::InvalidMethodName { method } => vec![method.as_str()],
        }
    }
}

/// Every error found while resolving a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    errors: Vec<ResolutionError>,
}

impl ResolutionReport {
    /// Wrap a list of errors
    pub fn new(errors: Vec<ResolutionError>) -> Self { Self { errors } }

    /// All errors, in detection order
    pub fn errors(&self) -> &[ResolutionError] { &self.errors }

    /// Number of errors
    pub fn len(&self) -> usize { self.errors.len() }

    /// Whether the report holds no errors
    pub fn is_empty(&self) -> bool { self.errors.is_empty() }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} resolution error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolutionReport {}

impl From<Vec<ResolutionError>> for ResolutionReport {
    fn from(errors: Vec<ResolutionError>) -> Self { Self::new(errors) }
}
