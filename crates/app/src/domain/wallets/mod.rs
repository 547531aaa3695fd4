//! Wallets
//!
//! Ownership-scoped wallet storage and retrieval. Every operation takes the
//! owning [`UserUuid`](crate::domain::users::records::UserUuid) and passes it to
//! each statement, so a wallet belonging to someone else is indistinguishable
//! from one that does not exist.

pub mod data;
pub mod errors;
pub mod policy;
pub mod records;
mod repository;
pub mod service;
pub mod validation;

pub use errors::{ConstraintKind, WalletsServiceError};
pub use service::*;
