//! Native component version check.

use sslerr::VersionMismatchError;
use sslgate_core::NativeSurface;
use tracing::error;

/// Version this binding was built as. The native component must embed the
/// same string.
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exact string comparison; any difference is a mismatch.
pub fn verify(native_version: &str, expected_version: &str) -> Result<(), VersionMismatchError> {
    if native_version == expected_version {
        Ok(())
    } else {
        error!(
            native = native_version,
            expected = expected_version,
            "native component version mismatch"
        );
        Err(VersionMismatchError::new(native_version, expected_version))
    }
}

/// Check the surface's embedded version against [`PACKAGE_VERSION`].
pub fn verify_surface<S: NativeSurface + ?Sized>(surface: &S) -> Result<(), VersionMismatchError> {
    verify(surface.package_version(), PACKAGE_VERSION)
}
