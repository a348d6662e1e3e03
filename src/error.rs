//! Failure taxonomy and the status-code translator.
//!
//! Every native call in this crate is followed by [`Jvmti::check`], which turns
//! a nonzero [`jvmtiError`] into an [`Error`]. Nothing is retried and nothing
//! is suppressed: the first failure ends the operation.
//!
//! [`Jvmti::check`]: crate::env::Jvmti::check

use crate::sys::jni::jint;
use crate::sys::jvmti::jvmtiError;
use std::fmt;
use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A nonzero status returned by the VM, together with where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFailure {
    /// The raw status code.
    pub code: jvmtiError,
    /// The VM's own name for `code`, or `"Unknown"`.
    pub name: String,
    /// What the caller was trying to do.
    pub context: String,
}

impl fmt::Display for NativeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JVMTI ERROR [{}]: {} {}", self.code, self.name, self.context)
    }
}

/// Errors produced by the introspection layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested local slot is not valid at the queried depth.
    #[error("{0}")]
    InvalidSlot(NativeFailure),

    /// A by-name lookup over a class's declared fields found nothing.
    #[error("Could not find field {field} in class {class_signature}")]
    FieldNotFound {
        field: String,
        class_signature: String,
    },

    /// The VM reports code locations in an encoding other than bytecode indices.
    #[error("Unexpected jlocation format {format}")]
    UnexpectedLocationFormat { format: jint },

    /// The class has no generic signature attribute.
    #[error("Class has no generic signature")]
    NoGenericSignature,

    /// A reflective method lookup returned no handle.
    #[error("Could not get method {name}, sig: {signature}")]
    MethodNotFound { name: String, signature: String },

    /// The environment's function table has no entry for `function`.
    #[error("{function} is not available in this environment")]
    Unsupported { function: &'static str },

    /// A name could not be passed to the VM (it contains a NUL byte).
    #[error("Invalid name {0:?}")]
    InvalidName(String),

    /// Any other nonzero status code.
    #[error("{0}")]
    Generic(NativeFailure),
}

impl Error {
    /// Selects the failure kind for a nonzero status code.
    pub fn from_native(failure: NativeFailure) -> Self {
        if failure.code == jvmtiError::INVALID_SLOT {
            Error::InvalidSlot(failure)
        } else {
            Error::Generic(failure)
        }
    }

    /// The native status code behind this error, if there is one.
    pub fn code(&self) -> Option<jvmtiError> {
        match self {
            Error::InvalidSlot(f) | Error::Generic(f) => Some(f.code),
            _ => None,
        }
    }

    pub fn is_invalid_slot(&self) -> bool {
        matches!(self, Error::InvalidSlot(_))
    }
}
