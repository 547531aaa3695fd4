//! Tally Domain Concerns

pub mod projects;
pub mod users;
pub mod wallets;
