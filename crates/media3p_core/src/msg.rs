use crate::{Category, MediaItem, ProviderType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User switched to another provider tab.
    SelectProvider(ProviderType),
    /// User edited the shared search box (debounced text).
    SetSearchTerm(String),
    /// User picked a category chip on a provider tab.
    SelectCategory {
        provider: ProviderType,
        category_id: String,
    },
    /// User cleared the category chip on a provider tab.
    DeselectCategory { provider: ProviderType },
    /// User scrolled to the end of the loaded results.
    SetNextPage { provider: ProviderType },
    /// A page request is about to be issued.
    FetchMediaStart {
        provider: ProviderType,
        page_token: Option<String>,
    },
    /// A page request settled successfully.
    FetchMediaSuccess {
        provider: ProviderType,
        media: Vec<MediaItem>,
        page_token: Option<String>,
        next_page_token: Option<String>,
    },
    /// A page request failed.
    FetchMediaError {
        provider: ProviderType,
        page_token: Option<String>,
    },
    /// Category list for a provider arrived.
    FetchCategoriesSuccess {
        provider: ProviderType,
        categories: Vec<Category>,
    },
    /// Category list for a provider failed to load.
    FetchCategoriesError { provider: ProviderType },
}
