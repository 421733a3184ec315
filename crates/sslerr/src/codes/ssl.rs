//! SSL/TLS codes.

pub const SSL_R_UNEXPECTED_EOF_WHILE_READING: i32 = 294;

// ── Servername callback return values ─────────────────────────────

pub const SSL_TLSEXT_ERR_OK: i32 = 0;
pub const SSL_TLSEXT_ERR_ALERT_FATAL: i32 = 2;
pub const SSL_TLSEXT_ERR_NOACK: i32 = 3;
