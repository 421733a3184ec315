//! Error taxonomy returned to callers.
//!
//! | Type                    | Meaning                                        |
//! |-------------------------|------------------------------------------------|
//! | [`InternalError`]       | the native library reported real errors, or a call that should have succeeded did not |
//! | [`LegacyProviderError`] | an algorithm needs the legacy provider and it is not loaded |
//! | [`VersionMismatchError`]| the native component and this binding disagree on version; fatal |
//!
//! [`GateError`] is the umbrella the binding returns; it also covers a
//! rejected gate configuration.

use thiserror::Error;

use crate::ErrorQueue;

/// The native library reported one or more errors, or a native call that
/// was expected to succeed failed without reporting anything.
///
/// Carries the full drained queue, oldest first. An empty queue is a valid
/// payload: the condition failed but nothing was recorded. A common cause of
/// unexpected records is another library in the same process leaving
/// entries on the queue without clearing them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summarize(.errors))]
pub struct InternalError {
    errors: ErrorQueue,
}

fn summarize(errors: &ErrorQueue) -> String {
    match errors.first() {
        None => "native call failed with an empty error queue".to_string(),
        Some(first) => format!(
            "native library reported {} error(s), first: {}; this is often caused by \
             another library in the process leaving errors on the queue without \
             clearing them",
            errors.len(),
            first
        ),
    }
}

impl InternalError {
    pub fn new(errors: ErrorQueue) -> Self {
        Self { errors }
    }

    /// The drained records, oldest first.
    #[inline]
    pub fn errors(&self) -> &ErrorQueue {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorQueue {
        self.errors
    }
}

/// An algorithm needs the legacy provider, which was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LegacyProviderError {
    message: String,
}

impl LegacyProviderError {
    pub const DEFAULT_MESSAGE: &'static str =
        "the requested algorithm needs the legacy provider, which was not loaded; \
         set SSLGATE_NO_LEGACY=1 to run without legacy algorithms, otherwise check \
         the native library configuration";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Same error, naming the algorithm that asked for the provider.
    pub fn for_algorithm(algorithm: &str) -> Self {
        Self {
            message: format!(
                "{} needs the legacy provider, which was not loaded; \
                 set SSLGATE_NO_LEGACY=1 to run without legacy algorithms, otherwise \
                 check the native library configuration",
                algorithm
            ),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for LegacyProviderError {
    fn default() -> Self {
        Self::new()
    }
}

/// The native component was built for a different version of this binding.
///
/// Usually means two copies of the binding are installed side by side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "cannot use a mismatched native component: loaded version {native}, \
     expected {expected}"
)]
pub struct VersionMismatchError {
    pub native: String,
    pub expected: String,
}

impl VersionMismatchError {
    pub fn new(native: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            native: native.into(),
            expected: expected.into(),
        }
    }
}

/// Everything the binding can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error(transparent)]
    LegacyProvider(#[from] LegacyProviderError),

    #[error(transparent)]
    VersionMismatch(#[from] VersionMismatchError),

    #[error("invalid gate configuration: {0}")]
    Config(&'static str),
}

impl GateError {
    /// The drained records, if this is an internal error.
    pub fn errors(&self) -> Option<&ErrorQueue> {
        match self {
            GateError::Internal(e) => Some(e.errors()),
            _ => None,
        }
    }
}

/// Convenience Result alias.
pub type GateResult<T> = Result<T, GateError>;
