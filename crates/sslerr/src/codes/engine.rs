//! ENGINE and DSO codes.
//!
//! These are what engine registration leaves behind: looking an engine up
//! by id fails with `NO_SUCH_ENGINE` before it is first added, and the
//! dynamic-engine fallback reports a DSO load failure on the way.

// ── ENGINE ────────────────────────────────────────────────────────

pub const ENGINE_F_ENGINE_ADD: i32 = 105;
pub const ENGINE_F_ENGINE_BY_ID: i32 = 106;

pub const ENGINE_R_CONFLICTING_ENGINE_ID: i32 = 103;
pub const ENGINE_R_INIT_FAILED: i32 = 109;
pub const ENGINE_R_NO_SUCH_ENGINE: i32 = 116;

// ── DSO ───────────────────────────────────────────────────────────

pub const DSO_F_DLFCN_LOAD: i32 = 102;

pub const DSO_R_LOAD_FAILED: i32 = 103;
