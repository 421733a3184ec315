//! # sslerr — structured native errors
//!
//! Data model for libraries that report failures by pushing error codes
//! onto a thread-local error queue (OpenSSL and friends).
//!
//! ## Design
//!
//! - [`ErrorRecord`]: one popped entry, split into library, function and
//!   reason codes plus the optional reason text the library knows for it.
//! - [`ErrorQueue`]: an immutable, oldest-first snapshot of one drain.
//! - [`CodeRule`]: a `(library, function, reason)` pattern where any
//!   position may be a wildcard. Built with [`code_rule!`].
//! - [`error`]: the taxonomy handed back to callers
//!   ([`InternalError`], [`LegacyProviderError`], [`VersionMismatchError`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use sslerr::codes::*;
//! use sslerr::{code_rule, CodeRule, ErrorRecord};
//!
//! const BENIGN: CodeRule = code_rule!(ERR_LIB_ENGINE, _, ENGINE_R_CONFLICTING_ENGINE_ID);
//!
//! let rec = ErrorRecord::new(ERR_LIB_ENGINE, ENGINE_F_ENGINE_ADD, ENGINE_R_CONFLICTING_ENGINE_ID);
//! assert!(BENIGN.matches(&rec));
//! ```

mod record;
#[macro_use]
mod rule;
pub mod codes;
pub mod error;

// ── Public API ────────────────────────────────────────────────────

pub use record::{ErrorQueue, ErrorRecord};
pub use rule::{CodeMatch, CodeRule};
pub use error::{GateError, GateResult, InternalError, LegacyProviderError, VersionMismatchError};
