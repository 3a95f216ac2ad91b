use crate::ProviderType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Gif,
    Unknown,
}

/// A single search result. The fetch path never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Resource name, unique per provider (e.g. `media/unsplash:abc`).
    pub name: String,
    pub provider: ProviderType,
    pub media_type: MediaType,
    pub description: Option<String>,
    pub author_name: Option<String>,
    /// Best available URL for previewing the item.
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One page of results together with the cursor for the following page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaPage {
    pub media: Vec<MediaItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Resource name, used as the category id in requests.
    pub id: String,
    pub label: String,
}
