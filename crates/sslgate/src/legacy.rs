//! Legacy provider checkpoint.
//!
//! Called at algorithm selection for anything only the legacy provider
//! implements. Never touches the error queue.

use sslerr::LegacyProviderError;

/// Fail with [`LegacyProviderError`] unless the legacy provider is loaded.
#[inline]
pub fn require_legacy(available: bool) -> Result<(), LegacyProviderError> {
    if available {
        Ok(())
    } else {
        Err(LegacyProviderError::new())
    }
}

/// Like [`require_legacy`], naming `algorithm` in the message.
pub fn require_legacy_for(algorithm: &str, available: bool) -> Result<(), LegacyProviderError> {
    if available {
        Ok(())
    } else {
        Err(LegacyProviderError::for_algorithm(algorithm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_passes() {
        assert!(require_legacy(true).is_ok());
        assert!(require_legacy_for("RC2", true).is_ok());
    }

    #[test]
    fn unavailable_fails_with_guidance() {
        let e = require_legacy(false).unwrap_err();
        assert_eq!(e.message(), LegacyProviderError::DEFAULT_MESSAGE);
        assert!(e.to_string().contains("legacy provider"));
        assert!(e.to_string().contains("SSLGATE_NO_LEGACY"));
    }

    #[test]
    fn names_the_algorithm() {
        let e = require_legacy_for("Blowfish", false).unwrap_err();
        assert!(e.message().starts_with("Blowfish needs the legacy provider"));
    }
}
