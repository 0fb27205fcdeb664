//! Unified error type for the crate, built on `thiserror` + `miette`.
//!
//! The validation engine itself never returns these for ordinary type
//! mismatches; those come back as [`Mismatch`] values. `DescryError` covers
//! the two hard-failure situations: descriptor/wrapper construction misuse,
//! and a mismatch escalated by a call-site adapter.

use miette::Diagnostic;
use thiserror::Error;

use crate::validator::Mismatch;

#[derive(Debug, Error, Diagnostic)]
pub enum DescryError {
    /// A composite descriptor was constructed from malformed input. Raised
    /// synchronously at definition time, never during validation.
    #[error("invalid descriptor: {message}")]
    #[diagnostic(
        code(descry::invalid_descriptor),
        help("descriptor construction is checked eagerly; fix the definition site")
    )]
    InvalidDescriptor { message: String },

    /// A validated call failed: one offending path/expected/found triple,
    /// formatted the way the adapters surface it.
    #[error("{callee} type mismatch: {message}")]
    #[diagnostic(code(descry::type_mismatch))]
    TypeMismatch {
        callee: String,
        message: String,
        path: String,
    },

    /// A utility wrapper (curry, memoize, debounce) was misconfigured at
    /// definition time.
    #[error("invalid wrapper: {message}")]
    #[diagnostic(code(descry::invalid_wrapper))]
    InvalidWrapper { message: String },
}

impl DescryError {
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            message: message.into(),
        }
    }

    pub fn mismatch(callee: impl Into<String>, mismatch: &Mismatch) -> Self {
        Self::TypeMismatch {
            callee: callee.into(),
            message: mismatch.message(),
            path: mismatch.path().to_string(),
        }
    }

    pub fn invalid_wrapper(message: impl Into<String>) -> Self {
        Self::InvalidWrapper {
            message: message.into(),
        }
    }
}
