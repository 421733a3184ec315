//! Native call surface abstraction.
//!
//! A `NativeSurface` is the capability object through which the binding
//! reaches the native library: its thread-local error queue, its engine
//! registration hook, its provider loader, and the version string compiled
//! into the native component.
//!
//! # Implementors
//!
//! - `MemorySurface` (sslgate-module, default): in-process model of the
//!   native conventions. Thread-local queues, scriptable registration noise,
//!   configurable providers. Always available; used by tests and the smoke
//!   binary.
//!
//! - `LibCrypto` (sslgate-module, feature = "libcrypto"): the real
//!   libcrypto 3.x through `extern "C"` bindings.

use sslerr::ErrorRecord;

/// Outcome of a native engine registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// This call installed the engine.
    Added,
    /// The engine was already installed; nothing changed.
    AlreadyPresent,
    /// The native library has no use for a custom engine; no call was made.
    NotRequired,
}

impl EngineStatus {
    /// Raw native status: `1` added, `2` already present.
    /// Anything else is a failed registration.
    #[inline]
    pub fn from_raw(status: i32) -> Option<Self> {
        match status {
            1 => Some(EngineStatus::Added),
            2 => Some(EngineStatus::AlreadyPresent),
            _ => None,
        }
    }
}

/// Access to one loaded native library.
///
/// **Contract:**
/// - Error-queue operations act on the *calling thread's* queue only.
/// - `pop_error()` returns entries oldest-first and `None` once empty.
/// - `push_error()` exists for tests and diagnostics. Production call
///   paths never push.
/// - Nothing here blocks on I/O.
pub trait NativeSurface: Send + Sync {
    /// Remove and return the oldest pending error on this thread.
    fn pop_error(&self) -> Option<ErrorRecord>;

    /// Push a synthetic error onto this thread's queue.
    fn push_error(&self, library: i32, function: i32, reason: i32);

    /// Whether this native build wants a custom random engine installed.
    fn needs_random_engine(&self) -> bool;

    /// Install the process-wide random engine.
    ///
    /// Returns the raw native status; see [`EngineStatus::from_raw`].
    /// May leave benign entries on the queue even when it succeeds.
    fn add_random_engine(&self) -> i32;

    /// Whether the native library loads algorithms through providers.
    fn supports_providers(&self) -> bool;

    /// Load a named provider. `false` means the library returned no handle;
    /// the reason is on the error queue.
    fn load_provider(&self, name: &str) -> bool;

    /// Version token compiled into the native component.
    fn package_version(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_status_from_raw() {
        assert_eq!(EngineStatus::from_raw(1), Some(EngineStatus::Added));
        assert_eq!(EngineStatus::from_raw(2), Some(EngineStatus::AlreadyPresent));
        assert_eq!(EngineStatus::from_raw(0), None);
        assert_eq!(EngineStatus::from_raw(-1), None);
        assert_eq!(EngineStatus::from_raw(3), None);
    }
}
