//! Native library, function and reason codes.
//!
//! Values follow the OpenSSL headers. Function codes only exist on 1.1.x
//! builds; OpenSSL 3 reports every function code as `0`, so rules that
//! must hold on both should wildcard the function position.
//!
//! # Usage
//!
//! ```rust
//! use sslerr::codes::*;
//!
//! assert_eq!(
//!     reason_string(ERR_LIB_EVP, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH),
//!     Some("data not multiple of block length"),
//! );
//! ```

mod libs;
mod evp;
mod engine;
mod pkcs12;
mod ssl;

pub use libs::*;
pub use evp::*;
pub use engine::*;
pub use pkcs12::*;
pub use ssl::*;

/// Canonical reason text for a `(library, reason)` pair.
///
/// Mirrors the strings libcrypto registers for the codes defined in this
/// module. Returns `None` for anything else; surfaces that can ask the
/// native library directly should prefer that.
pub fn reason_string(library: i32, reason: i32) -> Option<&'static str> {
    let text = match (library, reason) {
        (ERR_LIB_EVP, EVP_R_BAD_DECRYPT) => "bad decrypt",
        (ERR_LIB_EVP, EVP_R_UNSUPPORTED_PRIVATE_KEY_ALGORITHM) => "unsupported private key algorithm",
        (ERR_LIB_EVP, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH) => "data not multiple of block length",
        (ERR_LIB_EVP, EVP_R_XTS_DUPLICATED_KEYS) => "xts duplicated keys",
        (ERR_LIB_PKCS12, PKCS12_R_PKCS12_CIPHERFINAL_ERROR) => "pkcs12 cipherfinal error",
        (ERR_LIB_SSL, SSL_R_UNEXPECTED_EOF_WHILE_READING) => "unexpected eof while reading",
        (ERR_LIB_ENGINE, ENGINE_R_CONFLICTING_ENGINE_ID) => "conflicting engine id",
        (ERR_LIB_ENGINE, ENGINE_R_INIT_FAILED) => "init failed",
        (ERR_LIB_ENGINE, ENGINE_R_NO_SUCH_ENGINE) => "no such engine",
        (ERR_LIB_DSO, DSO_R_LOAD_FAILED) => "could not load the shared library",
        _ => return None,
    };
    Some(text)
}
