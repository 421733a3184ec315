//! PKCS#12 codes.

pub const PKCS12_R_PKCS12_CIPHERFINAL_ERROR: i32 = 116;
