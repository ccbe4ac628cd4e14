//! # Storage Layer
//!
//! Persistence for the promoter tracker. `traits` defines the storage
//! interface the domain layer depends on; `sqlite` is the production
//! implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::*;
pub use traits::*;
