//! `LibCrypto` — NativeSurface over the system libcrypto (OpenSSL 3.x).
//!
//! 3.x has no custom random engine to install, so registration always
//! reports "already present" and is never needed. Providers are loaded
//! into the default library context and held for the life of the surface;
//! dropping a `Provider` unloads it.

use std::sync::{Mutex, PoisonError};

use libc::c_int;
use openssl::error::{Error, ErrorStack};
use openssl::provider::Provider;
use sslerr::ErrorRecord;
use sslgate_core::NativeSurface;
use tracing::debug;

/// Handle to the process-wide libcrypto. Error-queue calls go to the
/// calling thread's native queue.
pub struct LibCrypto {
    providers: Mutex<Vec<(String, Provider)>>,
}

impl Default for LibCrypto {
    fn default() -> Self {
        openssl::init();
        Self {
            providers: Mutex::new(Vec::new()),
        }
    }
}

impl LibCrypto {
    pub fn new() -> Self {
        Self::default()
    }

    /// `OpenSSL_version_num()` of the linked library.
    pub fn version_number(&self) -> i64 {
        openssl::version::number()
    }

    /// Drop everything pending on this thread without reading it.
    pub fn clear_errors(&self) {
        let _ = ErrorStack::get();
    }

    /// Names of the providers this surface holds loaded.
    pub fn loaded_providers(&self) -> Vec<String> {
        self.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, Provider)>> {
        self.providers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for LibCrypto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibCrypto")
            .field("providers", &self.loaded_providers())
            .finish()
    }
}

impl NativeSurface for LibCrypto {
    fn pop_error(&self) -> Option<ErrorRecord> {
        let err = Error::get()?;
        // 3.x no longer records function codes.
        let rec = ErrorRecord::new(err.library_code(), 0, err.reason_code());
        Some(match err.reason() {
            Some(text) => rec.with_text(text),
            None => rec,
        })
    }

    fn push_error(&self, library: i32, function: i32, reason: i32) {
        // Safety: the file name is a static NUL-terminated literal; the
        // remaining arguments are plain integers.
        unsafe {
            openssl_sys::ERR_put_error(
                library as c_int,
                function as c_int,
                reason as c_int,
                c"sslgate".as_ptr(),
                0,
            );
        }
    }

    fn needs_random_engine(&self) -> bool {
        false
    }

    fn add_random_engine(&self) -> i32 {
        // Nothing to install; report the "already present" status.
        2
    }

    fn supports_providers(&self) -> bool {
        true
    }

    fn load_provider(&self, name: &str) -> bool {
        match Provider::load(None, name) {
            Ok(provider) => {
                debug!(name, "provider loaded");
                self.lock().push((name.to_string(), provider));
                true
            }
            Err(stack) => {
                debug!(name, count = stack.errors().len(), "provider failed to load");
                // Callers drain the reason from the queue.
                for err in stack.errors() {
                    err.put();
                }
                false
            }
        }
    }

    fn package_version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sslerr::codes::*;
    use sslgate_core::EngineStatus;

    #[test]
    fn push_then_pop_round_trips_lib_and_reason() {
        let lc = LibCrypto::new();
        lc.clear_errors();
        lc.push_error(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);

        let rec = lc.pop_error().unwrap();
        assert!(rec.lib_reason_match(ERR_LIB_EVP, EVP_R_BAD_DECRYPT));
        assert_eq!(rec.reason_text(), Some("bad decrypt"));
        assert!(lc.pop_error().is_none());
    }

    #[test]
    fn default_provider_loads_and_is_held() {
        let lc = LibCrypto::new();
        assert!(lc.load_provider("default"));
        assert_eq!(lc.loaded_providers(), vec!["default".to_string()]);
    }

    #[test]
    fn unknown_provider_fails_and_leaves_reason_queued() {
        let lc = LibCrypto::new();
        lc.clear_errors();
        assert!(!lc.load_provider("no-such-provider"));
        assert!(lc.pop_error().is_some());
        assert!(lc.loaded_providers().is_empty());
        lc.clear_errors();
    }

    #[test]
    fn engine_never_needed() {
        let lc = LibCrypto::new();
        assert!(!lc.needs_random_engine());
        assert_eq!(
            EngineStatus::from_raw(lc.add_random_engine()),
            Some(EngineStatus::AlreadyPresent)
        );
        assert!(lc.version_number() >= 0x3000_0000);
    }
}
