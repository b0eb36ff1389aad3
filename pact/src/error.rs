//! Error types for the pact model.
//!
//! Only genuine failures surface here. Outcomes such as an unsupported
//! content type or a path that matches nothing are normal results and
//! leave the input unchanged.

use thiserror::Error;

/// Errors raised while building or applying generators.
#[derive(Error, Debug)]
pub enum PactError {
    /// The body could not be parsed as its declared content type
    #[error("Unparseable {content_type} body: {message}")]
    UnparseableBody {
        /// Content type the body was declared as
        content_type: String,
        /// Parser error message
        message: String,
    },

    /// Generator parameters are out of range or malformed
    #[error("Invalid generator: {0}")]
    InvalidGenerator(String),

    /// Unknown generator category name
    #[error("Unknown generator category: {0}")]
    UnknownCategory(String),

    /// A path expression could not be parsed
    #[error("Invalid path expression '{path}': {message}")]
    InvalidPath {
        /// The offending expression
        path: String,
        /// What went wrong
        message: String,
    },

    /// A generator produced a value that does not fit its target slot
    #[error("Invalid generated value for {category}: {message}")]
    InvalidGeneratedValue {
        /// Category the value was generated for
        category: String,
        /// What went wrong
        message: String,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PactError {
    /// Check if this error was caused by caller-supplied input.
    ///
    /// Validation errors will fail the same way on every retry; fix the
    /// generator definition or path expression instead.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidGenerator(_) | Self::UnknownCategory(_) | Self::InvalidPath { .. }
        )
    }

    /// Create an unparseable body error.
    #[must_use]
    pub fn unparseable_body(content_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnparseableBody {
            content_type: content_type.into(),
            message: message.into(),
        }
    }

    /// Create an invalid generator error.
    #[must_use]
    pub fn invalid_generator(msg: impl Into<String>) -> Self {
        Self::InvalidGenerator(msg.into())
    }

    /// Create an invalid path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid generated value error.
    #[must_use]
    pub fn invalid_generated_value(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGeneratedValue {
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Result type for pact model operations.
pub type PactResult<T> = Result<T, PactError>;
