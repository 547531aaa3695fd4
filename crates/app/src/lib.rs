//! Tally domain and persistence.
//!
//! Wallets are owned by users and every read or write is scoped to the owner.
//! Listings paginate with opaque [`cursor::Cursor`] tokens and searches rank
//! wallet names by trigram similarity.

pub mod auth;
pub mod context;
pub mod cursor;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
