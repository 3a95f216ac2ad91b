use std::time::Duration;

use futures_util::StreamExt;
use media3p_core::{Category, MediaPage, ProviderType};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{ListCategoriesResponse, ListMediaResponse};
use crate::{ApiError, FailureKind, MediaApi};

const API_VERSION: &str = "v1";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Sent as the `key` query parameter when set.
    pub api_key: Option<String>,
    pub page_size: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://media3p.googleapis.com".to_string(),
            api_key: None,
            page_size: 20,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// `MediaApi` backed by the media3p REST endpoints.
#[derive(Debug, Clone)]
pub struct ReqwestMediaApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestMediaApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn endpoint(&self, resource: &str) -> Result<Url, ApiError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{API_VERSION}/{resource}"))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if let Some(key) = self.settings.api_key.as_deref() {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn media_url(
        &self,
        filter: &str,
        order_by: &str,
        page_token: Option<&str>,
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint("media")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("filter", filter)
                .append_pair("order_by", order_by)
                .append_pair("page_size", &self.settings.page_size.to_string());
            if let Some(token) = page_token {
                query.append_pair("page_token", token);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl MediaApi for ReqwestMediaApi {
    async fn list_media(
        &self,
        provider: &ProviderType,
        search_term: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<MediaPage, ApiError> {
        let filter = search_filter(provider, search_term);
        let order_by = if search_term.is_some() {
            "relevance"
        } else {
            "latest"
        };
        let url = self.media_url(&filter, order_by, page_token)?;
        let response: ListMediaResponse = self.get_json(url).await?;
        Ok(response.into_page(provider))
    }

    async fn list_category_media(
        &self,
        provider: &ProviderType,
        category_id: &str,
        page_token: Option<&str>,
    ) -> Result<MediaPage, ApiError> {
        let filter = format!("provider:{provider} category:{category_id}");
        let url = self.media_url(&filter, "latest", page_token)?;
        let response: ListMediaResponse = self.get_json(url).await?;
        Ok(response.into_page(provider))
    }

    async fn list_categories(&self, provider: &ProviderType) -> Result<Vec<Category>, ApiError> {
        let mut url = self.endpoint("categories")?;
        url.query_pairs_mut()
            .append_pair("filter", &format!("provider:{provider}"));
        let response: ListCategoriesResponse = self.get_json(url).await?;
        Ok(response.into_categories())
    }
}

fn search_filter(provider: &ProviderType, search_term: Option<&str>) -> String {
    match search_term.map(str::trim).filter(|term| !term.is_empty()) {
        Some(term) => format!("provider:{provider} {term}"),
        None => format!("provider:{provider}"),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
