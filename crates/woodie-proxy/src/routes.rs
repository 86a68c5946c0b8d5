//! Route handlers.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;
use woodie_data::{UpstreamResponse, DEFAULT_CONTENT_TYPE};

use crate::failure::{FetchFailed, PathFailure};
use crate::ProxyState;

/// Query of `/api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `GET /api/products`
pub async fn products(
    State(state): State<ProxyState>,
    Query(params): Query<PageParams>,
) -> Response {
    let result = state
        .client
        .products_page_raw(params.page.as_deref(), params.limit.as_deref())
        .await;
    match result {
        Ok(upstream) => relay(upstream),
        Err(e) => {
            error!(error = %e, "products fetch failed");
            FetchFailed::PRODUCTS.into_response()
        }
    }
}

/// `GET /api/categories`
pub async fn categories(State(state): State<ProxyState>) -> Response {
    match state.client.categories_raw().await {
        Ok(upstream) => relay(upstream),
        Err(e) => {
            error!(error = %e, "categories fetch failed");
            FetchFailed::CATEGORIES.into_response()
        }
    }
}

/// `GET /api/banner`
pub async fn banner(State(state): State<ProxyState>) -> Response {
    match state.client.banners_raw().await {
        Ok(upstream) => relay(upstream),
        Err(e) => {
            error!(error = %e, "banner fetch failed");
            FetchFailed::BANNER.into_response()
        }
    }
}

/// `GET /api/product/path/{*id}`
///
/// The upstream body is re-encoded as JSON with the upstream status.
pub async fn product_by_path(
    State(state): State<ProxyState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = normalize_id(&raw_id);
    if id.is_empty() {
        return PathFailure::missing_id().into_response();
    }

    let upstream = match state.client.product_by_path_raw(id).await {
        Ok(upstream) => upstream,
        Err(e) => {
            error!(error = %e, id, "product fetch failed");
            return PathFailure::server_error(e.to_string()).into_response();
        }
    };
    match upstream.json::<Value>() {
        Ok(body) => (status_of(&upstream), Json(body)).into_response(),
        Err(e) => {
            error!(error = %e, id, status = upstream.status, "product response was not JSON");
            PathFailure::server_error(e.to_string()).into_response()
        }
    }
}

/// `GET /api/product/path` with nothing after it.
pub async fn missing_id() -> PathFailure {
    PathFailure::missing_id()
}

/// `GET /healthz`
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Trim whitespace, then one leading and one trailing slash.
pub(crate) fn normalize_id(raw: &str) -> &str {
    let id = raw.trim();
    let id = id.strip_prefix('/').unwrap_or(id);
    id.strip_suffix('/').unwrap_or(id)
}

fn status_of(upstream: &UpstreamResponse) -> StatusCode {
    StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Pass an upstream response through with its status and content type.
fn relay(upstream: UpstreamResponse) -> Response {
    let content_type = HeaderValue::from_str(upstream.content_type_or_default())
        .unwrap_or(HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let status = status_of(&upstream);
    (
        status,
        [(header::CONTENT_TYPE, content_type)],
        Body::from(upstream.body),
    )
        .into_response()
}
