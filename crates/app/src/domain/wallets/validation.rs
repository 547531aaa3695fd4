//! Wallet payload validation.
//!
//! Field rules are checked before a payload reaches the service. An empty
//! result means the payload is valid.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::wallets::data::{NewWallet, WalletUpdate};

/// Longest accepted wallet name, in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// Most tags a wallet can carry.
pub const MAX_TAGS: usize = 10;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[must_use]
pub fn validate_new_wallet(wallet: &NewWallet) -> Vec<FieldError> {
    validate_fields(
        &wallet.name,
        wallet.amount,
        &wallet.currency_code,
        wallet.tags.as_deref(),
    )
}

#[must_use]
pub fn validate_wallet_update(update: &WalletUpdate) -> Vec<FieldError> {
    validate_fields(
        &update.name,
        update.amount,
        &update.currency_code,
        update.tags.as_deref(),
    )
}

fn validate_fields(
    name: &str,
    amount: Option<Decimal>,
    currency_code: &str,
    tags: Option<&[Uuid]>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "must not be blank"));
    } else if name.chars().count() > MAX_NAME_CHARS {
        errors.push(FieldError::new(
            "name",
            format!("must be at most {MAX_NAME_CHARS} characters"),
        ));
    }

    if amount.is_some_and(|amount| amount < Decimal::ZERO) {
        errors.push(FieldError::new("amount", "must not be negative"));
    }

    if currency_code.len() != 3 || !currency_code.bytes().all(|b| b.is_ascii_uppercase()) {
        errors.push(FieldError::new(
            "currency_code",
            "must be three uppercase letters",
        ));
    }

    if let Some(tags) = tags {
        if tags.len() > MAX_TAGS {
            errors.push(FieldError::new(
                "tags",
                format!("must contain at most {MAX_TAGS} entries"),
            ));
        }

        let has_duplicates = tags
            .iter()
            .enumerate()
            .any(|(index, tag)| tags.iter().skip(index + 1).any(|other| other == tag));

        if has_duplicates {
            errors.push(FieldError::new("tags", "must not contain duplicates"));
        }
    }

    errors
}
