//! Axum application builder.
//!
//! Routes:
//! - `GET|OPTIONS <route_path>?endpoint=...` - the proxy relay
//! - `GET /health` - liveness check

use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::relay::{ProxyRelay, RelayMethod, RelayResponse, ALLOW_ORIGIN};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Create the relay application mounted at `route_path`.
pub fn create_app(relay: ProxyRelay, route_path: &str) -> Router {
    Router::new()
        .route(route_path, get(proxy).options(proxy))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        // Covers router-generated 404/405 replies as well.
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .with_state(Arc::new(relay))
}

async fn proxy(
    State(relay): State<Arc<ProxyRelay>>,
    method: Method,
    RawQuery(query): RawQuery,
) -> RelayResponse {
    let method = if method == Method::OPTIONS {
        RelayMethod::Options
    } else {
        RelayMethod::Get
    };
    relay.handle(method, query.as_deref()).await
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        response
    }
}
