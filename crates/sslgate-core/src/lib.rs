//! # sslgate-core — native surface trait and error-queue primitives
//!
//! This crate defines the one seam between the binding and the native
//! library: [`NativeSurface`]. Everything else here is built on it.
//!
//! - [`drain`]: pop every pending native error on the calling thread.
//! - [`assert_native`]: on a false condition, drain and return
//!   [`InternalError`](sslerr::InternalError) with the whole queue.
//! - [`capture`]: unconditional drain-and-wrap.
//!
//! ## Thread affinity
//!
//! Native error queues are thread-local. A drain only sees errors raised
//! by calls made on the same thread, so the assertion must run on the
//! thread that made the call it is checking.

pub mod surface;
pub mod drain;
#[macro_use]
pub mod assert;

pub use surface::{EngineStatus, NativeSurface};
pub use drain::drain;
pub use assert::{assert_native, capture};

#[cfg(test)]
mod testing;
