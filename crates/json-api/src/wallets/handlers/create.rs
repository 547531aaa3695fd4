//! Create Wallet Handler

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    wallets::{errors::into_status_error, requests::WalletRequest, responses::WalletResponse},
};

/// Create Wallet Handler
#[endpoint(
    tags("wallets"),
    summary = "Create Wallet",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Wallet created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid wallet payload"),
        (status_code = StatusCode::CONFLICT, description = "Unknown project or duplicate wallet"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<WalletRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WalletResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let owner = depot.owner_uuid_or_401()?;
    let wallet = json.into_inner().into_new_wallet()?;

    let created = state
        .app
        .wallets
        .create_wallet(owner, wallet)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/wallets/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use tally_app::domain::{
        projects::records::ProjectUuid,
        wallets::{ConstraintKind, MockWalletsService, WalletsServiceError, records::WalletUuid},
    };

    use crate::test_helpers::{TEST_OWNER_UUID, make_wallet, wallets_service};

    use super::*;

    fn make_service(wallets: MockWalletsService) -> Service {
        wallets_service(wallets, Router::with_path("wallets").post(handler))
    }

    #[tokio::test]
    async fn test_create_wallet_success() -> TestResult {
        let uuid = WalletUuid::new();
        let project = ProjectUuid::new();

        let mut wallets = MockWalletsService::new();

        wallets
            .expect_create_wallet()
            .once()
            .withf(move |owner, new| {
                *owner == TEST_OWNER_UUID
                    && new.name == "Holiday"
                    && new.project == Some(project)
                    && new.amount == Some(Decimal::new(1250, 2))
                    && new.currency_code == "EUR"
            })
            .return_once(move |_, new| {
                Ok(tally_app::domain::wallets::records::WalletRecord {
                    project: new.project,
                    amount: new.amount,
                    currency_code: new.currency_code,
                    ..make_wallet(uuid, &new.name, 100)
                })
            });

        let mut res = TestClient::post("http://example.com/wallets")
            .json(&json!({
                "project": project.into_uuid(),
                "name": "Holiday",
                "amount": "12.50",
                "currency_code": "EUR",
            }))
            .send(&make_service(wallets))
            .await;

        let body: WalletResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/wallets/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.amount.as_deref(), Some("12.50"));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_payload_returns_400_without_calling_service() -> TestResult {
        let mut wallets = MockWalletsService::new();

        wallets.expect_create_wallet().never();

        let res = TestClient::post("http://example.com/wallets")
            .json(&json!({
                "name": "   ",
                "amount": "-1",
                "currency_code": "euro",
            }))
            .send(&make_service(wallets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_project_returns_409() -> TestResult {
        let mut wallets = MockWalletsService::new();

        wallets
            .expect_create_wallet()
            .once()
            .return_once(|_, _| {
                Err(WalletsServiceError::ConstraintViolation(
                    ConstraintKind::InvalidReference,
                ))
            });

        let res = TestClient::post("http://example.com/wallets")
            .json(&json!({
                "project": ProjectUuid::new().into_uuid(),
                "name": "Holiday",
                "currency_code": "EUR",
            }))
            .send(&make_service(wallets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() -> TestResult {
        let mut wallets = MockWalletsService::new();

        wallets.expect_create_wallet().never();

        let res = TestClient::post("http://example.com/wallets")
            .json(&json!({ "name": "Holiday" }))
            .send(&make_service(wallets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
