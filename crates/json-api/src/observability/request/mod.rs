//! Request-level logging, request IDs, and parent trace extraction.

mod parent_context;
mod request_ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::settings;

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let remote_addr = req.remote_addr().to_string();
    let otel_span_name = spans::request_span_name(&method, &path);

    // `owner` is filled in by the auth middleware once the token resolves.
    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        owner = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let status = request_ids::response_status_or_ok(res.status_code);
    let duration_ms = started.elapsed().as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                method = %method,
                path = %path,
                request_id = %request_id,
                "server error response"
            );
        } else if status.is_client_error() {
            warn!(
                status = status.as_u16(),
                method = %method,
                path = %path,
                request_id = %request_id,
                "client error response"
            );
        }

        if duration_ms > threshold_ms {
            warn!(
                method = %method,
                path = %path,
                request_id = %request_id,
                duration_ms,
                threshold_ms,
                "slow request detected"
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn ok() -> &'static str {
        "ok"
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("ping").get(ok)),
        )
    }

    #[tokio::test]
    async fn test_generates_request_id_header() -> TestResult {
        let res = TestClient::get("http://example.com/ping")
            .send(&make_service())
            .await;

        let request_id = res
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            request_id.is_some_and(|id| uuid::Uuid::parse_str(&id).is_ok()),
            "generated request id should be a uuid"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_echoes_incoming_request_id() -> TestResult {
        let res = TestClient::get("http://example.com/ping")
            .add_header(request_ids::REQUEST_ID_HEADER, "req-123", true)
            .send(&make_service())
            .await;

        let request_id = res
            .headers()
            .get(request_ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        assert_eq!(request_id, Some("req-123"));

        Ok(())
    }
}
