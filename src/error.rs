use std::fmt;
use thiserror::Error;

/// The category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    MissingField,
    InvalidType,
    InvalidArray,
    InvalidBuildable,
    InvalidUnion,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingField => "missing_field",
            ValidationErrorKind::InvalidType => "invalid_type",
            ValidationErrorKind::InvalidArray => "invalid_array",
            ValidationErrorKind::InvalidBuildable => "invalid_buildable",
            ValidationErrorKind::InvalidUnion => "invalid_union",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a value does not satisfy its field descriptor.
///
/// `path` is the dotted/bracketed location of the offending value, e.g.
/// `meta.title` or `items[2]`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("definition [{type_tag}]: field \"{path}\" {message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub type_tag: String,
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        type_tag: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            type_tag: type_tag.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while resolving definitions against a graph or
/// deriving new definitions from existing ones.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("build definition [{type_tag}]: data overwrites reserved key \"{key}\"")]
    ReservedKey { type_tag: String, key: String },

    #[error("definition [{type_tag}]: no patch method named '{method}'")]
    UnknownMethod { type_tag: String, method: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialize graph: {0}")]
    Serialization(String),
}
