//! Core definitions shared by all bkit-* crates: the error type and argument/data
//! verification helpers.

pub mod error;
pub mod result;

pub use result::Result;
