//! Wallet Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    cursor::Cursor,
    domain::{projects::records::ProjectUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Wallet UUID
pub type WalletUuid = TypedUuid<WalletRecord>;

/// Wallet Record
#[derive(Debug, Clone, PartialEq)]
pub struct WalletRecord {
    /// Assigned at creation, never changes.
    pub uuid: WalletUuid,

    /// The user the wallet belongs to.
    pub owner: UserUuid,

    /// Grouping project, owned by the same user.
    pub project: Option<ProjectUuid>,

    /// Display name, trimmed and non-empty.
    pub name: String,

    /// Balance; `None` when not tracked.
    pub amount: Option<Decimal>,

    /// ISO 4217 code, three uppercase letters.
    pub currency_code: String,

    /// Stored in the order given at write time.
    pub tags: Option<Vec<Uuid>>,

    /// Set by the database on insert. Primary sort key for listings.
    pub created_at: Timestamp,

    /// Bumped on every update.
    pub updated_at: Timestamp,
}

impl From<&WalletRecord> for Cursor {
    /// Resume point just after `wallet` in a paginated listing.
    fn from(wallet: &WalletRecord) -> Self {
        Cursor::new(wallet.created_at, wallet.uuid.into_uuid())
    }
}
