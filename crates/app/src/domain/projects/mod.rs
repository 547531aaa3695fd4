//! Projects
//!
//! Optional grouping for a user's wallets. A wallet can only reference a
//! project belonging to the same owner.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProjectsServiceError;
pub use service::*;
