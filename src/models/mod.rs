//! Domain models for the utility library.
//!
//! These types are shared across all modules: math, clock, and the C exports.

pub mod context;
pub mod error;
pub mod last_error;
pub mod request;
