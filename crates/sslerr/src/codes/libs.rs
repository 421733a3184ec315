//! `ERR_LIB_*` library identifiers.

pub const ERR_LIB_NONE: i32 = 1;
pub const ERR_LIB_SYS: i32 = 2;
pub const ERR_LIB_EVP: i32 = 6;
pub const ERR_LIB_CRYPTO: i32 = 15;
pub const ERR_LIB_SSL: i32 = 20;
pub const ERR_LIB_PKCS12: i32 = 35;
pub const ERR_LIB_DSO: i32 = 37;
pub const ERR_LIB_ENGINE: i32 = 38;
/// Provider errors. Only reported by builds with provider support.
pub const ERR_LIB_PROV: i32 = 57;
