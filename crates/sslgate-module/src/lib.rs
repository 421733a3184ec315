//! # sslgate-module — NativeSurface implementations
//!
//! | Surface         | Backing                      | Availability              |
//! |-----------------|------------------------------|---------------------------|
//! | `MemorySurface` | in-process, thread-local     | always                    |
//! | `LibCrypto`     | system libcrypto 3.x via FFI | feature = "libcrypto"     |
//!
//! `DefaultSurface` names whichever one this build should use for real
//! work: `LibCrypto` when linked, `MemorySurface` otherwise.

pub mod memory;

#[cfg(feature = "libcrypto")]
pub mod libcrypto;

pub use memory::MemorySurface;

cfg_if::cfg_if! {
    if #[cfg(feature = "libcrypto")] {
        pub use libcrypto::LibCrypto;
        pub type DefaultSurface = LibCrypto;
    } else {
        pub type DefaultSurface = MemorySurface;
    }
}
