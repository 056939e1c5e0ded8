use futures::future::BoxFuture;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{GiftError, Result};
use crate::models::{Category, Product};

/// Read-only view of an e-commerce catalog.
pub trait Marketplace: Send + Sync {
    /// Every top-level category, in the order the service lists them.
    fn categories(&self) -> BoxFuture<'_, Result<Vec<Category>>>;

    /// First page of active listings in `category_id`.
    fn search<'a>(&'a self, category_id: &'a str) -> BoxFuture<'a, Result<Vec<Product>>>;
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<serde_json::Value>,
}

// ==================== MERCADOLIBRE CLIENT ====================

#[derive(Clone)]
pub struct MercadoLibreClient {
    http: wreq::Client,
    base: String,
    site: String,
}

impl MercadoLibreClient {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut builder = wreq::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if config.browser_emulation {
            builder = builder.emulation(wreq_util::Emulation::Chrome131);
        }

        Ok(Self {
            http: builder.build()?,
            base: config.api_base.trim_end_matches('/').to_string(),
            site: config.site.clone(),
        })
    }

    pub fn categories_url(&self) -> String {
        format!("{}/sites/{}/categories", self.base, self.site)
    }

    pub fn search_url(&self, category_id: &str) -> String {
        format!(
            "{}/sites/{}/search?status=active&category={}",
            self.base,
            self.site,
            urlencoding::encode(category_id)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GiftError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        debug!("fetched {} bytes status={} url={}", body.len(), status, url);
        Ok(serde_json::from_str(&body)?)
    }
}

impl Marketplace for MercadoLibreClient {
    fn categories(&self) -> BoxFuture<'_, Result<Vec<Category>>> {
        Box::pin(async move {
            let url = self.categories_url();
            self.get_json::<Vec<Category>>(&url).await
        })
    }

    fn search<'a>(&'a self, category_id: &'a str) -> BoxFuture<'a, Result<Vec<Product>>> {
        Box::pin(async move {
            let url = self.search_url(category_id);
            let response: SearchResponse = self.get_json(&url).await?;

            let total = response.results.len();
            let products: Vec<Product> = response
                .results
                .into_iter()
                .filter_map(Product::from_search_result)
                .collect();
            if products.len() < total {
                debug!(
                    "dropped {} undecodable results category={}",
                    total - products.len(),
                    category_id
                );
            }
            Ok(products)
        })
    }
}
