//! Errors tolerated during random-engine registration.
//!
//! Registration looks up an existing engine before adding one, and other
//! libraries loaded in the same process sometimes leave entries behind
//! without clearing them. Those specific triples are harmless at startup.
//! Anything else on the queue at that point is a real failure.

use sslerr::codes::*;
use sslerr::{code_rule, CodeRule, ErrorQueue, ErrorRecord, InternalError};
use tracing::debug;

/// The startup allow list. Static; never extended at runtime.
pub static STARTUP_ALLOWED: &[CodeRule] = &[
    // Lookup before first add misses.
    code_rule!(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE),
    // Engine id already taken by an earlier add.
    code_rule!(ERR_LIB_ENGINE, _, ENGINE_R_CONFLICTING_ENGINE_ID),
    // Dynamic engine shared object not found.
    code_rule!(ERR_LIB_DSO, _, DSO_R_LOAD_FAILED),
    // Left behind by libraries that do not clear their own queue.
    code_rule!(ERR_LIB_EVP, EVP_F_EVP_ENCRYPTFINAL_EX, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH),
];

/// `true` if `record` matches a rule in [`STARTUP_ALLOWED`].
#[inline]
pub fn is_allowed(record: &ErrorRecord) -> bool {
    STARTUP_ALLOWED.iter().any(|rule| rule.matches(record))
}

/// Check a whole registration-time drain.
///
/// Allowed records are discarded. If any record is not allowed, the
/// returned error carries the full queue, allowed entries included.
pub fn check_startup(errors: ErrorQueue) -> Result<(), InternalError> {
    match errors.iter().find(|rec| !is_allowed(rec)) {
        Some(bad) => {
            debug!(record = %bad, count = errors.len(), "disallowed error at startup");
            Err(InternalError::new(errors))
        }
        None => {
            if !errors.is_empty() {
                debug!(count = errors.len(), "discarded benign startup errors");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_triples() {
        assert!(is_allowed(&ErrorRecord::new(
            ERR_LIB_ENGINE,
            ENGINE_F_ENGINE_BY_ID,
            ENGINE_R_NO_SUCH_ENGINE
        )));
        assert!(is_allowed(&ErrorRecord::new(
            ERR_LIB_EVP,
            EVP_F_EVP_ENCRYPTFINAL_EX,
            EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH
        )));
    }

    #[test]
    fn wildcard_function_position() {
        for func in [0, ENGINE_F_ENGINE_ADD, 999] {
            assert!(is_allowed(&ErrorRecord::new(
                ERR_LIB_ENGINE,
                func,
                ENGINE_R_CONFLICTING_ENGINE_ID
            )));
            assert!(is_allowed(&ErrorRecord::new(ERR_LIB_DSO, func, DSO_R_LOAD_FAILED)));
        }
    }

    #[test]
    fn unknown_triples_rejected() {
        assert!(!is_allowed(&ErrorRecord::new(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT)));
        // Right reason, wrong function.
        assert!(!is_allowed(&ErrorRecord::new(
            ERR_LIB_EVP,
            0,
            EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH
        )));
        // Right reason number, wrong library.
        assert!(!is_allowed(&ErrorRecord::new(
            ERR_LIB_PKCS12,
            ENGINE_F_ENGINE_BY_ID,
            ENGINE_R_NO_SUCH_ENGINE
        )));
        assert!(!is_allowed(&ErrorRecord::new(0, 0, 0)));
    }

    #[test]
    fn check_startup_empty_and_benign() {
        assert!(check_startup(ErrorQueue::empty()).is_ok());

        let benign: ErrorQueue = vec![
            ErrorRecord::new(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE),
            ErrorRecord::new(ERR_LIB_DSO, 0, DSO_R_LOAD_FAILED),
        ]
        .into();
        assert!(check_startup(benign).is_ok());
    }

    #[test]
    fn check_startup_keeps_full_queue() {
        let mixed: ErrorQueue = vec![
            ErrorRecord::new(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE),
            ErrorRecord::new(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT),
        ]
        .into();
        let err = check_startup(mixed).unwrap_err();
        assert_eq!(err.errors().len(), 2, "allowed entries stay in the payload");
        assert_eq!(err.errors().records()[1].reason_code(), EVP_R_BAD_DECRYPT);
    }
}
