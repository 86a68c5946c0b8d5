//! Same-origin proxy for the Woodie storefront.
//!
//! Browsers talk to these routes instead of the commerce API so the store
//! header stays server-side and responses are never cached:
//!
//! | route | upstream |
//! |---|---|
//! | `GET /api/products?page&limit` | `/api/v1/product/website` |
//! | `GET /api/categories` | `/api/v1/category/website/{store}` |
//! | `GET /api/banner` | `/api/v1/banner/website?status=active&sort=position` |
//! | `GET /api/product/path/{id}` | `/api/v1/product/path/{id}` |
//!
//! Upstream status codes and content types are passed through. When the
//! upstream cannot be reached the routes answer 500 with a JSON body the
//! storefront pages understand.
//!
//! # Example
//!
//! ```rust,no_run
//! use woodie_data::{ApiConfig, CommerceClient};
//! use woodie_proxy::ProxyState;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CommerceClient::new(ApiConfig::default())?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! woodie_proxy::serve(listener, ProxyState::new(client)).await?;
//! # Ok(())
//! # }
//! ```

pub mod failure;
mod routes;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use woodie_data::CommerceClient;

pub use failure::{ErrorMessage, FetchFailed, PathFailure};
pub use routes::PageParams;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct ProxyState {
    pub client: CommerceClient,
}

impl ProxyState {
    pub fn new(client: CommerceClient) -> Self {
        Self { client }
    }
}

/// Build the proxy router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/products", get(routes::products))
        .route("/api/categories", get(routes::categories))
        .route("/api/banner", get(routes::banner))
        .route("/api/product/path", get(routes::missing_id))
        .route("/api/product/path/", get(routes::missing_id))
        .route("/api/product/path/{*id}", get(routes::product_by_path))
        .route("/healthz", get(routes::healthz))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

/// Serve the router on `listener` until ctrl-c or SIGTERM.
pub async fn serve(listener: tokio::net::TcpListener, state: ProxyState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "proxy listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
