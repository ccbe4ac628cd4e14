//! Promoter tracker backend library.
//!
//! Exposes the backend module so the binary and the test suite share one
//! crate root.

pub mod backend;
