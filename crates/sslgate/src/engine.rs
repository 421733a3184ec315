//! Random-engine registration.

use sslerr::{GateResult, InternalError};
use sslgate_core::{capture, drain, EngineStatus, NativeSurface};
use tracing::{debug, trace};

use crate::filter;

/// Make the native registration call and check its status.
///
/// Skipped, with [`EngineStatus::NotRequired`], when the surface has no
/// use for a custom engine. A status other than added or already present
/// fails with whatever the call left on the queue. On success the queue
/// may still hold registration noise; see [`register`].
pub fn install<S: NativeSurface + ?Sized>(surface: &S) -> Result<EngineStatus, InternalError> {
    if !surface.needs_random_engine() {
        trace!("random engine not required");
        return Ok(EngineStatus::NotRequired);
    }

    let raw = surface.add_random_engine();
    match EngineStatus::from_raw(raw) {
        Some(status) => {
            debug!(?status, "random engine registration");
            Ok(status)
        }
        None => {
            debug!(raw, "random engine registration failed");
            Err(capture(surface))
        }
    }
}

/// [`install`], then drain and run the startup filter over what it left.
///
/// Safe to repeat: a second registration reports already present and
/// leaves the queue empty.
pub fn register<S: NativeSurface + ?Sized>(surface: &S) -> GateResult<EngineStatus> {
    let status = install(surface)?;
    filter::check_startup(drain(surface))?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sslerr::codes::*;
    use sslerr::GateError;
    use sslgate_module::MemorySurface;

    #[test]
    fn first_add_then_already_present() {
        let s = MemorySurface::new();
        assert_eq!(register(&s).unwrap(), EngineStatus::Added);
        assert_eq!(s.pending_errors(), 0, "lookup noise is filtered out");

        assert_eq!(register(&s).unwrap(), EngineStatus::AlreadyPresent);
        assert_eq!(s.pending_errors(), 0);
        assert_eq!(s.engine_calls(), 2);
    }

    #[test]
    fn not_required_makes_no_call() {
        let s = MemorySurface::new().no_engine_needed();
        assert_eq!(install(&s).unwrap(), EngineStatus::NotRequired);
        assert_eq!(s.engine_calls(), 0);
    }

    #[test]
    fn failed_status_surfaces_queue() {
        let s = MemorySurface::new().failing_engine();
        let err = install(&s).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert!(err.errors().records()[0].lib_reason_match(ERR_LIB_ENGINE, ENGINE_R_INIT_FAILED));
        assert_eq!(s.pending_errors(), 0);
    }

    #[test]
    fn disallowed_noise_fails_registration() {
        let s = MemorySurface::new().engine_noise(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);
        match register(&s) {
            Err(GateError::Internal(e)) => {
                assert_eq!(e.errors().len(), 2, "full unfiltered queue");
                assert!(e.errors().records()[0]
                    .lib_reason_match(ERR_LIB_ENGINE, ENGINE_R_NO_SUCH_ENGINE));
            }
            other => panic!("expected internal error, got {:?}", other),
        }
        assert_eq!(s.pending_errors(), 0);
    }
}
