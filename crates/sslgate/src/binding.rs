//! `LibraryBinding` — the handle callers hold.
//!
//! Constructing one opens the gate, so every binding in the process sees
//! an initialized library. The handle itself is cheap to clone and carries
//! no lock.

use std::sync::Arc;

use sslerr::{ErrorQueue, GateResult, InternalError, LegacyProviderError};
use sslgate_core::{drain, EngineStatus, NativeSurface};

use crate::{engine, global_gate, legacy, GateConfig, InitGate};

pub struct LibraryBinding<S: NativeSurface + ?Sized> {
    surface: Arc<S>,
    legacy_available: bool,
}

impl<S: NativeSurface + ?Sized> LibraryBinding<S> {
    /// Open the process-wide gate with configuration from the environment.
    pub fn new(surface: Arc<S>) -> GateResult<Self> {
        Self::with_gate(global_gate(), surface, &GateConfig::from_env())
    }

    /// Open an explicit gate.
    ///
    /// The surface is version-checked even when the gate is already ready.
    pub fn with_gate(gate: &InitGate, surface: Arc<S>, config: &GateConfig) -> GateResult<Self> {
        let legacy_available = gate.open(&*surface, config)?;
        Ok(Self {
            surface,
            legacy_available,
        })
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Whether legacy algorithms can be selected.
    #[inline]
    pub fn legacy_available(&self) -> bool {
        self.legacy_available
    }

    /// See [`sslgate_core::assert_native`].
    #[inline]
    pub fn assert_native(&self, condition: bool) -> Result<(), InternalError> {
        sslgate_core::assert_native(&*self.surface, condition)
    }

    /// Drain the calling thread's queue.
    pub fn consume_errors(&self) -> ErrorQueue {
        drain(&*self.surface)
    }

    pub fn require_legacy(&self) -> Result<(), LegacyProviderError> {
        legacy::require_legacy(self.legacy_available)
    }

    pub fn require_legacy_for(&self, algorithm: &str) -> Result<(), LegacyProviderError> {
        legacy::require_legacy_for(algorithm, self.legacy_available)
    }

    /// Repeat the engine registration and startup filter. Gate state is
    /// unchanged.
    pub fn register_random_engine(&self) -> GateResult<EngineStatus> {
        engine::register(&*self.surface)
    }
}

impl<S: NativeSurface + ?Sized> Clone for LibraryBinding<S> {
    fn clone(&self) -> Self {
        Self {
            surface: Arc::clone(&self.surface),
            legacy_available: self.legacy_available,
        }
    }
}

impl<S: NativeSurface + ?Sized> std::fmt::Debug for LibraryBinding<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryBinding")
            .field("legacy_available", &self.legacy_available)
            .finish_non_exhaustive()
    }
}
