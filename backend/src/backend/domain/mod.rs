//! # Domain Module
//!
//! Business logic for the promoter tracker.
//!
//! The core of the application lives here: deciding who is on a month's
//! roster, merging promoters with their monthly records, filtering the
//! merged view, and mutating payment/membership state against the store.
//! It operates independently of any specific UI framework or storage
//! mechanism.
//!
//! ## Module Organization
//!
//! - **roster**: pure derivation functions (month keys, active filter,
//!   merge, search and days/payment filters)
//! - **session**: the session-scoped cache, load generation counter and
//!   in-flight toggle guard
//! - **roster_service**: roster loading composed from storage + derivation
//! - **payment_service**: the optimistic payment toggle
//! - **member_service**: add, edit and soft-delete of members
//! - **group_service**: group lookups
//! - **admin_service**: the admins-table membership check
//! - **report_service**: payment report data assembly
//! - **errors**: the validation/store error split used at every operation
//!   boundary
//!
//! ## Key Rules
//!
//! - Membership-as-of-month is decided only by the roster derivation;
//!   nothing else re-implements the join/leave comparison
//! - Soft delete marks the promoter's leave date and never destroys rows
//! - The store resolves concurrent record writes via its
//!   (promoter_id, year, month) uniqueness constraint; the services do no
//!   locking of their own beyond the per-member toggle guard

pub mod admin_service;
pub mod errors;
pub mod group_service;
pub mod member_service;
pub mod payment_service;
pub mod report_service;
pub mod roster;
pub mod roster_service;
pub mod session;

pub use admin_service::*;
pub use errors::*;
pub use group_service::*;
pub use member_service::*;
pub use payment_service::*;
pub use report_service::*;
pub use roster::*;
pub use roster_service::*;
pub use session::*;
