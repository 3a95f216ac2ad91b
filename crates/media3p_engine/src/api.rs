use media3p_core::{Category, MediaPage, ProviderType};

use crate::ApiError;

/// Provider-scoped media search API.
#[async_trait::async_trait]
pub trait MediaApi: Send + Sync {
    /// One page of media for a free-text search, or the provider's default
    /// listing when `search_term` is `None`.
    async fn list_media(
        &self,
        provider: &ProviderType,
        search_term: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<MediaPage, ApiError>;

    /// One page of media inside a provider category.
    async fn list_category_media(
        &self,
        provider: &ProviderType,
        category_id: &str,
        page_token: Option<&str>,
    ) -> Result<MediaPage, ApiError>;

    async fn list_categories(&self, provider: &ProviderType) -> Result<Vec<Category>, ApiError>;
}
