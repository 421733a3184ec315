//! EVP (high-level cipher and digest) codes.

// ── Functions ─────────────────────────────────────────────────────

pub const EVP_F_EVP_ENCRYPTFINAL_EX: i32 = 127;

// ── Reasons ───────────────────────────────────────────────────────

pub const EVP_R_BAD_DECRYPT: i32 = 100;
pub const EVP_R_UNSUPPORTED_PRIVATE_KEY_ALGORITHM: i32 = 118;
pub const EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH: i32 = 138;
pub const EVP_R_XTS_DUPLICATED_KEYS: i32 = 183;
