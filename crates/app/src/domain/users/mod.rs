//! Users
//!
//! Users own wallets and projects; every owner-scoped operation is keyed by a
//! [`records::UserUuid`].

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::UsersServiceError;
pub use service::*;
