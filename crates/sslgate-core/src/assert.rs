//! The assertion primitive.
//!
//! Native calls report failure out of band: the return value says *that*
//! something failed, the error queue says *what*. `assert_native` joins the
//! two. It never filters; every record it drains is surfaced.

use sslerr::InternalError;
use tracing::debug;

use crate::{drain, NativeSurface};

/// Fail with the drained error queue when `condition` is false.
///
/// `true` returns `Ok(())` and leaves the queue untouched. `false` always
/// returns [`InternalError`], even when nothing was pending; the payload is
/// then empty rather than invented.
///
/// Must be called on the thread that made the native call being checked.
#[inline]
pub fn assert_native<S: NativeSurface + ?Sized>(
    surface: &S,
    condition: bool,
) -> Result<(), InternalError> {
    if condition {
        Ok(())
    } else {
        Err(capture(surface))
    }
}

/// Drain the calling thread's queue into an [`InternalError`].
pub fn capture<S: NativeSurface + ?Sized>(surface: &S) -> InternalError {
    let errors = drain(surface);
    debug!(
        count = errors.len(),
        first = ?errors.first(),
        "native assertion failed"
    );
    InternalError::new(errors)
}

/// Early-return with the drained queue if a native condition is false.
///
/// ```ignore
/// let ok = surface.load_provider("default");
/// ensure_native!(surface, ok);
/// ```
///
/// The enclosing function's error type must implement
/// `From<InternalError>`.
#[macro_export]
macro_rules! ensure_native {
    ($surface:expr, $cond:expr) => {
        if let Err(e) = $crate::assert_native($surface, $cond) {
            return Err(e.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::QueueSurface;
    use sslerr::codes::*;
    use sslerr::GateError;

    #[test]
    fn true_never_fails_and_keeps_queue() {
        let s = QueueSurface::default();
        s.push_error(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);

        assert!(assert_native(&s, true).is_ok());
        assert_eq!(s.pending(), 1, "assert_native(true) must not drain");
    }

    #[test]
    fn false_with_empty_queue_still_fails() {
        let s = QueueSurface::default();
        let err = assert_native(&s, false).unwrap_err();
        assert!(err.errors().is_empty());
    }

    #[test]
    fn false_carries_pushed_record() {
        let s = QueueSurface::default();
        s.push_error(
            ERR_LIB_EVP,
            EVP_F_EVP_ENCRYPTFINAL_EX,
            EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH,
        );

        let err = assert_native(&s, false).unwrap_err();
        assert_eq!(err.errors().len(), 1);

        let rec = err.errors().first().unwrap();
        assert_eq!(rec.library_code(), ERR_LIB_EVP);
        assert_eq!(rec.function_code(), EVP_F_EVP_ENCRYPTFINAL_EX);
        assert_eq!(rec.reason_code(), EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH);
        assert!(rec
            .reason_text()
            .unwrap_or_default()
            .contains("data not multiple of block length"));
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn capture_surfaces_everything() {
        let s = QueueSurface::default();
        s.push_error(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE);
        s.push_error(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);

        let err = capture(&s);
        assert_eq!(err.errors().len(), 2, "assertion must not filter");
    }

    fn load(s: &QueueSurface, ok: bool) -> Result<u32, GateError> {
        ensure_native!(s, ok);
        Ok(7)
    }

    #[test]
    fn ensure_native_macro() {
        let s = QueueSurface::default();
        assert_eq!(load(&s, true), Ok(7));

        s.push_error(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);
        match load(&s, false) {
            Err(GateError::Internal(e)) => assert_eq!(e.errors().len(), 1),
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
