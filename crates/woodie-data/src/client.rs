//! Commerce API client.

use futures::future::join_all;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};
use woodie_commerce::catalog::{
    categories_from_envelope, product_from_envelope, ProductPage, RawCategory, RawProduct,
};

use crate::config::ApiConfig;
use crate::response::UpstreamResponse;
use crate::FetchError;

/// Header the commerce API uses to select a store.
pub const STORE_ID_HEADER: &str = "store-id";

const USER_AGENT: &str = concat!("woodie/", env!("CARGO_PKG_VERSION"));

/// Client for the storefront's commerce API.
///
/// The `*_raw` methods return the upstream response as-is for relaying.
/// The typed methods unwrap the response envelopes for direct use.
#[derive(Debug, Clone)]
pub struct CommerceClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl CommerceClient {
    /// Build a client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;
        // Fail early on an unusable base URL.
        base_url(&config.base_url)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET /api/v1/product/website`, forwarding `page` and `limit` only
    /// when they are non-empty.
    pub async fn products_page_raw(
        &self,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<UpstreamResponse, FetchError> {
        let mut url = self.endpoint(&["product", "website"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(page) = page.filter(|p| !p.is_empty()) {
                query.append_pair("page", page);
            }
            if let Some(limit) = limit.filter(|l| !l.is_empty()) {
                query.append_pair("limit", limit);
            }
        }
        strip_empty_query(&mut url);
        self.send(url).await
    }

    /// `GET /api/v1/category/website/{store_id}`.
    pub async fn categories_raw(&self) -> Result<UpstreamResponse, FetchError> {
        let url = self.endpoint(&["category", "website", &self.config.store_id])?;
        self.send(url).await
    }

    /// `GET /api/v1/banner/website?status=active&sort=position`.
    pub async fn banners_raw(&self) -> Result<UpstreamResponse, FetchError> {
        let mut url = self.endpoint(&["banner", "website"])?;
        url.query_pairs_mut()
            .append_pair("status", "active")
            .append_pair("sort", "position");
        self.send(url).await
    }

    /// `GET /api/v1/product/path/{id}`, the id encoded as a single segment.
    pub async fn product_by_path_raw(&self, id: &str) -> Result<UpstreamResponse, FetchError> {
        let url = self.endpoint(&["product", "path", id])?;
        self.send(url).await
    }

    /// One page of products.
    pub async fn products_page(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<ProductPage, FetchError> {
        let page = page.map(|p| p.to_string());
        let limit = limit.map(|l| l.to_string());
        let body: Value = self
            .products_page_raw(page.as_deref(), limit.as_deref())
            .await?
            .error_for_status()?
            .json()?;
        Ok(ProductPage::from_envelope(&body))
    }

    /// Every product in the store.
    ///
    /// The first page decides how many pages exist; the remaining pages are
    /// fetched concurrently with the page size the server reported. A page
    /// that fails is logged and skipped. An error on the first page is
    /// returned.
    pub async fn fetch_all_products(&self, limit: u64) -> Result<Vec<RawProduct>, FetchError> {
        let first = self.products_page(Some(1), Some(limit)).await?;
        let meta = first.page_meta();
        let total_pages = meta.total_pages();
        let mut products = first.products;

        if total_pages <= 1 {
            return Ok(products);
        }

        debug!(total = meta.total, total_pages, "fetching remaining product pages");
        let rest = join_all(
            (2..=total_pages).map(|page| async move {
                (page, self.products_page(Some(page), Some(meta.limit)).await)
            }),
        )
        .await;

        for (page, result) in rest {
            match result {
                Ok(p) => products.extend(p.products),
                Err(e) => warn!(page, error = %e, "product page failed; skipping"),
            }
        }
        Ok(products)
    }

    /// All category records of the configured store.
    pub async fn categories(&self) -> Result<Vec<RawCategory>, FetchError> {
        let body: Value = self.categories_raw().await?.error_for_status()?.json()?;
        Ok(categories_from_envelope(&body))
    }

    /// Active banners, in display order.
    pub async fn banners(&self) -> Result<Vec<Value>, FetchError> {
        let body: Value = self.banners_raw().await?.error_for_status()?.json()?;
        Ok(body["data"].as_array().cloned().unwrap_or_default())
    }

    /// A single product by its path or id. `None` when the API reports 404
    /// or the envelope holds no product.
    pub async fn product_by_path(&self, id: &str) -> Result<Option<RawProduct>, FetchError> {
        let response = self.product_by_path_raw(id).await?;
        if response.status == 404 {
            return Ok(None);
        }
        let body: Value = response.error_for_status()?.json()?;
        Ok(product_from_envelope(&body))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = base_url(&self.config.base_url)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    /// Send a GET, retrying transient failures. Non-2xx responses are
    /// returned, not turned into errors.
    async fn send(&self, url: Url) -> Result<UpstreamResponse, FetchError> {
        let policy = &self.config.retry;
        let mut attempt = 0;
        loop {
            debug!(%url, attempt, "upstream request");
            let outcome = self.send_once(url.clone()).await;
            let retry = match &outcome {
                Ok(response) => policy.should_retry_status(response.status, attempt),
                Err(e) => policy.should_retry_error(e, attempt),
            };
            if !retry {
                return outcome;
            }
            let delay = policy.backoff.delay_for_attempt(attempt);
            warn!(%url, attempt, ?delay, "transient upstream failure; retrying");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send_once(&self, url: Url) -> Result<UpstreamResponse, FetchError> {
        let response = self
            .http
            .get(url)
            .header(STORE_ID_HEADER, &self.config.store_id)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();
        Ok(UpstreamResponse::new(status, content_type, body))
    }
}

fn base_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// `query_pairs_mut` leaves a bare `?` behind when nothing was appended.
fn strip_empty_query(url: &mut Url) {
    if url.query() == Some("") {
        url.set_query(None);
    }
}
