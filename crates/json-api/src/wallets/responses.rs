//! Wallet Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_app::{cursor::Cursor, domain::wallets::records::WalletRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WalletResponse {
    /// The unique identifier of the wallet
    pub uuid: Uuid,

    /// The project the wallet belongs to
    pub project: Option<Uuid>,

    pub name: String,

    /// Decimal amount rendered as a string, e.g. `"12.50"`
    pub amount: Option<String>,

    /// ISO 4217 currency code
    pub currency_code: String,

    pub tags: Option<Vec<Uuid>>,

    /// The date and time the wallet was created
    pub created_at: String,

    /// The date and time the wallet was last updated
    pub updated_at: String,
}

impl From<WalletRecord> for WalletResponse {
    fn from(wallet: WalletRecord) -> Self {
        WalletResponse {
            uuid: wallet.uuid.into(),
            project: wallet.project.map(Into::into),
            name: wallet.name,
            amount: wallet.amount.map(|amount| amount.to_string()),
            currency_code: wallet.currency_code,
            tags: wallet.tags,
            created_at: wallet.created_at.to_string(),
            updated_at: wallet.updated_at.to_string(),
        }
    }
}

/// A page of wallets.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WalletsResponse {
    pub wallets: Vec<WalletResponse>,

    /// Token for the next page. Present whenever the page was full, so the
    /// following page may turn out to be empty.
    pub next_token: Option<String>,
}

impl WalletsResponse {
    /// Page without a continuation token.
    pub(crate) fn unpaginated(wallets: Vec<WalletRecord>) -> Self {
        Self {
            wallets: wallets.into_iter().map(Into::into).collect(),
            next_token: None,
        }
    }

    /// Cursor page. A full page carries the position of its last wallet.
    pub(crate) fn paginated(wallets: Vec<WalletRecord>, limit: i64) -> Self {
        let full = usize::try_from(limit).is_ok_and(|limit| wallets.len() == limit);

        let next_token = wallets
            .last()
            .filter(|_| full)
            .map(|last| Cursor::from(last).encode());

        Self {
            next_token,
            ..Self::unpaginated(wallets)
        }
    }
}
