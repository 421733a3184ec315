//! # sslgate — safe error handling for a native crypto library
//!
//! Everything a binding needs between "the library is linked" and "the
//! library is safe to call":
//!
//! - [`InitGate`]: one-time initialization under a lock. Verifies the
//!   native component's version, registers the random engine exactly once,
//!   filters the benign errors registration leaves behind and loads
//!   providers.
//! - [`LibraryBinding`]: the handle callers hold once the gate is open.
//! - [`filter`]: the startup allow list.
//! - [`legacy`] and [`version`]: the two distinguished failure checkpoints.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sslgate::LibraryBinding;
//! use sslgate_module::DefaultSurface;
//!
//! let binding = LibraryBinding::new(Arc::new(DefaultSurface::new()))?;
//! let ok = do_native_call(binding.surface());
//! binding.assert_native(ok)?;
//! ```
//!
//! ## Configuration
//!
//! [`GateConfig::from_env`] reads `SSLGATE_NO_LEGACY`,
//! `SSLGATE_LEGACY_OPTIONAL` and `SSLGATE_DISCARD_STALE_ERRORS`.

pub mod binding;
pub mod config;
pub mod engine;
pub mod filter;
pub mod gate;
pub mod legacy;
pub mod version;

// ── Public API ────────────────────────────────────────────────────

pub use binding::LibraryBinding;
pub use config::GateConfig;
pub use gate::{global_gate, GateState, InitGate};
pub use version::PACKAGE_VERSION;

pub use sslerr::{
    ErrorQueue, ErrorRecord, GateError, GateResult, InternalError, LegacyProviderError,
    VersionMismatchError,
};
pub use sslgate_core::{assert_native, capture, drain, EngineStatus, NativeSurface};
