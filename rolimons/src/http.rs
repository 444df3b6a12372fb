use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::schema::{ActivityResponse, ItemDetailsResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Outcome of a single API request.
#[derive(Debug, PartialEq)]
pub enum Fetched<T> {
    Data(T),
    /// HTTP 429.
    RateLimited,
    /// Any other non-success status, or the request never completed.
    Failed(String),
}

/// The Rolimons endpoints the collector reads from.
///
/// Implementations only classify responses; retry and backoff decisions are
/// made by the callers in [`crate::update`]. An `Err` is reserved for bodies
/// that arrive with a success status but cannot be decoded.
#[async_trait]
pub trait MarketApi: Send + Sync {
    async fn sale_activity(&self, page: u32) -> Result<Fetched<ActivityResponse>>;

    async fn item_details(&self) -> Result<Fetched<ItemDetailsResponse>>;
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api_url: String,
    web_url: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.activity_base_url.trim_end_matches('/').to_string(),
            web_url: config.catalog_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::SaleActivity => format!("{}{endpoint}", self.api_url),
            Endpoint::ItemDetails => format!("{}{endpoint}", self.web_url),
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: Endpoint,
    ) -> Result<Fetched<T>> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Ok(Fetched::Failed(format!("request to {endpoint} failed: {e}"))),
        };
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(Fetched::RateLimited);
        }
        if status != StatusCode::OK {
            return Ok(Fetched::Failed(status.to_string()));
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Ok(Fetched::Failed(format!("reading {endpoint} body failed: {e}"))),
        };
        serde_json::from_str(&text)
            .map(Fetched::Data)
            .map_err(|e| Error::Deserialize(format!("{endpoint}: {e}: {text}")))
    }
}

#[async_trait]
impl MarketApi for HttpClient {
    async fn sale_activity(&self, page: u32) -> Result<Fetched<ActivityResponse>> {
        let endpoint = Endpoint::SaleActivity;
        let builder = self
            .client
            .get(format!("{}?page={page}", self.url(endpoint)));
        self.request(builder, endpoint).await
    }

    async fn item_details(&self) -> Result<Fetched<ItemDetailsResponse>> {
        let endpoint = Endpoint::ItemDetails;
        let builder = self.client.get(self.url(endpoint));
        self.request(builder, endpoint).await
    }
}
