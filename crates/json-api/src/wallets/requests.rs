//! Wallet Requests

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_app::domain::wallets::{
    data::{NewWallet, WalletUpdate},
    validation::{FieldError, validate_new_wallet, validate_wallet_update},
};

/// Wallet payload for create and full-replace update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WalletRequest {
    /// Project the wallet belongs to
    #[serde(default)]
    pub project: Option<Uuid>,

    pub name: String,

    /// Non-negative decimal amount as a string, e.g. `"12.50"`
    #[serde(default)]
    pub amount: Option<String>,

    /// Three uppercase letters, e.g. `GBP`
    pub currency_code: String,

    /// Up to ten distinct tag identifiers
    #[serde(default)]
    pub tags: Option<Vec<Uuid>>,
}

impl WalletRequest {
    pub(crate) fn into_new_wallet(self) -> Result<NewWallet, StatusError> {
        let (amount, amount_error) = parse_amount(self.amount.as_deref());

        let wallet = NewWallet {
            project: self.project.map(Into::into),
            name: self.name,
            amount,
            currency_code: self.currency_code,
            tags: self.tags,
        };

        reject_invalid(amount_error, validate_new_wallet(&wallet))?;

        Ok(wallet)
    }

    pub(crate) fn into_wallet_update(self) -> Result<WalletUpdate, StatusError> {
        let (amount, amount_error) = parse_amount(self.amount.as_deref());

        let update = WalletUpdate {
            project: self.project.map(Into::into),
            name: self.name,
            amount,
            currency_code: self.currency_code,
            tags: self.tags,
        };

        reject_invalid(amount_error, validate_wallet_update(&update))?;

        Ok(update)
    }
}

fn parse_amount(amount: Option<&str>) -> (Option<Decimal>, Option<FieldError>) {
    match amount.map(str::parse::<Decimal>).transpose() {
        Ok(amount) => (amount, None),
        Err(_ignored) => (
            None,
            Some(FieldError {
                field: "amount",
                message: "must be a decimal number".to_owned(),
            }),
        ),
    }
}

fn reject_invalid(
    amount_error: Option<FieldError>,
    errors: Vec<FieldError>,
) -> Result<(), StatusError> {
    let errors: Vec<FieldError> = amount_error.into_iter().chain(errors).collect();

    if errors.is_empty() {
        return Ok(());
    }

    let detail = errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ");

    Err(StatusError::bad_request()
        .brief("Invalid wallet payload")
        .detail(detail))
}
