//! One-time library initialization.
//!
//! ```text
//! Uninitialized ──verify──▶ Rejected(mismatch)          (terminal)
//!       │
//!       │ install engine, mark, filter startup errors
//!       ▼
//! EngineRegistered ──load providers──▶ Ready { legacy_available }
//! ```
//!
//! A single mutex is held across every check-and-transition, so racing
//! openers see exactly one registration; the rest block and then find the
//! gate ready. A failure after `EngineRegistered` leaves the gate there and
//! the next open resumes at provider loading.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use sslerr::{GateError, GateResult, LegacyProviderError, VersionMismatchError};
use sslgate_core::{assert_native, drain, NativeSurface};
use tracing::{debug, info, warn};

use crate::{engine, filter, version, GateConfig};

pub const LEGACY_PROVIDER: &str = "legacy";
pub const DEFAULT_PROVIDER: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Uninitialized,
    /// The engine registration call has been made; providers are not loaded.
    EngineRegistered,
    Ready {
        legacy_available: bool,
    },
    /// The native component failed the version check. Terminal.
    Rejected(VersionMismatchError),
}

/// The initialization state machine for one native library.
#[derive(Debug)]
pub struct InitGate {
    state: Mutex<GateState>,
    registrations: AtomicUsize,
}

static GLOBAL_GATE: InitGate = InitGate::new();

/// The process-wide gate.
#[inline]
pub fn global_gate() -> &'static InitGate {
    &GLOBAL_GATE
}

impl Default for InitGate {
    fn default() -> Self {
        Self::new()
    }
}

impl InitGate {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(GateState::Uninitialized),
            registrations: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> GateState {
        self.lock().clone()
    }

    /// How many times this gate has moved to `EngineRegistered`. Never
    /// more than one. Counts the transition even when the surface needed no
    /// native registration call.
    pub fn registrations(&self) -> usize {
        self.registrations.load(Ordering::Acquire)
    }

    /// Bring the gate to `Ready` and return whether legacy algorithms are
    /// available.
    ///
    /// The surface's embedded version is checked on every call. Once ready,
    /// a matching surface returns immediately without touching the queue or
    /// looking at `config`. A rejected gate returns the cached version
    /// mismatch every time.
    pub fn open<S: NativeSurface + ?Sized>(
        &self,
        surface: &S,
        config: &GateConfig,
    ) -> GateResult<bool> {
        let mut state = self.lock();
        if let GateState::Rejected(mismatch) = &*state {
            return Err(mismatch.clone().into());
        }

        // Every surface is checked, including ones arriving after `Ready`.
        // Only the first transition makes a mismatch sticky.
        if let Err(mismatch) = version::verify_surface(surface) {
            if *state == GateState::Uninitialized {
                *state = GateState::Rejected(mismatch.clone());
            }
            return Err(mismatch.into());
        }

        if let GateState::Ready { legacy_available } = *state {
            return Ok(legacy_available);
        }
        config.validate().map_err(GateError::Config)?;

        if *state == GateState::Uninitialized {
            self.register(&mut state, surface, config)?;
        }

        let legacy_available = load_providers(surface, config)?;
        *state = GateState::Ready { legacy_available };
        info!(legacy_available, "native library ready");
        Ok(legacy_available)
    }

    fn register<S: NativeSurface + ?Sized>(
        &self,
        state: &mut MutexGuard<'_, GateState>,
        surface: &S,
        config: &GateConfig,
    ) -> GateResult<()> {
        if config.discard_stale_errors {
            let stale = drain(surface);
            if !stale.is_empty() {
                warn!(count = stale.len(), first = ?stale.first(), "discarding stale native errors");
            }
        }

        let status = engine::install(surface)?;
        **state = GateState::EngineRegistered;
        self.registrations.fetch_add(1, Ordering::AcqRel);
        debug!(?status, "engine registered");

        filter::check_startup(drain(surface))?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        // The state is a plain enum; a panic elsewhere cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Load legacy (if configured) and default providers.
fn load_providers<S: NativeSurface + ?Sized>(surface: &S, config: &GateConfig) -> GateResult<bool> {
    if !surface.supports_providers() {
        debug!("no provider support; legacy algorithms built in");
        return Ok(true);
    }

    let mut legacy_available = false;
    if config.load_legacy {
        legacy_available = surface.load_provider(LEGACY_PROVIDER);
        if !legacy_available {
            let errors = drain(surface);
            if config.require_legacy {
                warn!(count = errors.len(), first = ?errors.first(), "legacy provider failed to load");
                return Err(LegacyProviderError::new().into());
            }
            debug!(count = errors.len(), "legacy provider unavailable; continuing without it");
        }
    }

    let loaded = surface.load_provider(DEFAULT_PROVIDER);
    assert_native(surface, loaded)?;
    Ok(legacy_available)
}
