//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use tally_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        users::records::UserUuid,
        wallets::{
            MockWalletsService,
            records::{WalletRecord, WalletUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_OWNER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_owner(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_owner_uuid(TEST_OWNER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();
    auth.expect_issue_api_token().never();
    auth.expect_list_api_tokens().never();
    auth.expect_revoke_api_token().never();

    auth
}

fn strict_wallets_mock() -> MockWalletsService {
    let mut wallets = MockWalletsService::new();

    wallets.expect_get_wallet().never();
    wallets.expect_create_wallet().never();
    wallets.expect_update_wallet().never();
    wallets.expect_delete_wallet().never();
    wallets.expect_list_wallets().never();
    wallets.expect_list_wallets_paginated().never();
    wallets.expect_search_wallets().never();
    wallets.expect_ping().never();

    wallets
}

fn state(wallets: MockWalletsService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        wallets: Arc::new(wallets),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_wallets_mock(), auth)
}

/// Serve `route` with `wallets` behind an already-authenticated owner.
pub(crate) fn wallets_service(wallets: MockWalletsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(wallets, strict_auth_mock())))
            .hoop(inject_owner)
            .push(route),
    )
}

/// A wallet owned by [`TEST_OWNER_UUID`] created `seconds` after the epoch.
pub(crate) fn make_wallet(uuid: WalletUuid, name: &str, seconds: i64) -> WalletRecord {
    let created_at = Timestamp::from_second(seconds).unwrap_or(Timestamp::UNIX_EPOCH);

    WalletRecord {
        uuid,
        owner: TEST_OWNER_UUID,
        project: None,
        name: name.to_owned(),
        amount: None,
        currency_code: "GBP".to_owned(),
        tags: None,
        created_at,
        updated_at: created_at,
    }
}
