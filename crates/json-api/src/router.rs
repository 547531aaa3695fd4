//! App Router

use salvo::Router;

use crate::{auth, wallets};

/// Bearer-authenticated wallet routes.
///
/// `search` is pushed before `{wallet}` so it is not captured as an identifier.
pub(crate) fn app_router() -> Router {
    Router::new().hoop(auth::middleware::handler).push(
        Router::with_path("wallets")
            .get(wallets::index::handler)
            .post(wallets::create::handler)
            .push(Router::with_path("search").get(wallets::search::handler))
            .push(
                Router::with_path("{wallet}")
                    .get(wallets::get::handler)
                    .put(wallets::update::handler)
                    .delete(wallets::delete::handler),
            ),
    )
}
