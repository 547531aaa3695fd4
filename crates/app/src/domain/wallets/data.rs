//! Wallet Data

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::projects::records::ProjectUuid;

/// New Wallet Data
///
/// The owner, identifier and timestamps are assigned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWallet {
    pub project: Option<ProjectUuid>,
    pub name: String,
    pub amount: Option<Decimal>,
    pub currency_code: String,
    pub tags: Option<Vec<Uuid>>,
}

/// Wallet Update Data
///
/// Replaces every editable field. `None` clears the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletUpdate {
    pub project: Option<ProjectUuid>,
    pub name: String,
    pub amount: Option<Decimal>,
    pub currency_code: String,
    pub tags: Option<Vec<Uuid>>,
}
