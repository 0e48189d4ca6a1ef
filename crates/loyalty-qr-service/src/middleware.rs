use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, Error};

use crate::state::AppState;

/// Endpoint label for requests that matched no route.
pub const UNMATCHED_ENDPOINT: &str = "unmatched";

/// Record method, route pattern, status and latency of every request.
///
/// The `endpoint` label is the matched route pattern, never the raw path, so
/// arbitrary URLs collapse into [`UNMATCHED_ENDPOINT`].
///
/// Mount with `actix_web::middleware::from_fn(track_requests)`. Requests are
/// passed through untouched when no [`AppState`] is registered.
pub async fn track_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let state = req.app_data::<web::Data<AppState>>().cloned();
    let method = req.method().to_string();
    let start = Instant::now();

    let result = next.call(req).await;

    if let Some(state) = state {
        // Routing happens inside `next`, so the pattern is only known afterwards.
        let (status, endpoint) = match &result {
            Ok(res) => (res.status(), res.request().match_pattern()),
            Err(e) => (e.as_response_error().status_code(), None),
        };
        let endpoint = endpoint.unwrap_or_else(|| UNMATCHED_ENDPOINT.to_string());
        state
            .http_metrics
            .observe(&method, &endpoint, status.as_u16(), start.elapsed());
    }

    result
}
