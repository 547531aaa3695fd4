//! Auth middleware.

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use tally_app::auth::AuthServiceError;

use crate::extensions::*;

/// Resolve the bearer token to its owning user, or answer 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let owner = match state.app.auth.authenticate_bearer(token).await {
        Ok(owner) => owner,
        Err(AuthServiceError::NotFound | AuthServiceError::UnknownUser) => {
            res.render(StatusError::unauthorized().brief("Invalid API token"));

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate api token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    tracing::Span::current().record("owner", tracing::field::display(owner));

    depot.insert_owner_uuid(owner);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
