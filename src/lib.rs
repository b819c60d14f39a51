//! Example Utils — Shared Library
//!
//! Integer factorial, integer modulo and a ctime-style wall-clock string,
//! exported over the C ABI (see [`ffi`]) and usable directly from Rust.
//!
//! Rust callers get checked operations returning [`UtilResult`] and own every
//! string they receive. The shared constant lives in an explicit
//! [`LibraryContext`] rather than a global.

pub mod clock;
pub mod ffi;
pub mod math;
pub mod models;

pub use clock::current_time_string;
pub use math::{factorial, modulo};
pub use models::context::LibraryContext;
pub use models::error::{UtilResult, UtilityError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
