//! JSON shapes returned by the media API.

use media3p_core::{Category, MediaItem, MediaPage, MediaType, ProviderType};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListMediaResponse {
    #[serde(default)]
    media: Vec<WireMedia>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMedia {
    name: String,
    #[serde(default)]
    provider: Option<String>,
    #[serde(rename = "type", default)]
    media_type: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<WireAuthor>,
    #[serde(default)]
    image_urls: Vec<WireUrl>,
    #[serde(default)]
    video_urls: Vec<WireUrl>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAuthor {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUrl {
    url: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListCategoriesResponse {
    #[serde(default)]
    categories: Vec<WireCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCategory {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl ListMediaResponse {
    /// `requested` fills in the provider when an item does not name one.
    pub(crate) fn into_page(self, requested: &ProviderType) -> MediaPage {
        MediaPage {
            media: self
                .media
                .into_iter()
                .map(|item| item.into_item(requested))
                .collect(),
            next_page_token: self.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

impl WireMedia {
    fn into_item(self, requested: &ProviderType) -> MediaItem {
        let media_type = match self.media_type.as_deref() {
            Some(kind) if kind.eq_ignore_ascii_case("image") => MediaType::Image,
            Some(kind) if kind.eq_ignore_ascii_case("video") => MediaType::Video,
            Some(kind) if kind.eq_ignore_ascii_case("gif") => MediaType::Gif,
            _ => MediaType::Unknown,
        };
        let preview = match media_type {
            MediaType::Video => self.video_urls.first().or(self.image_urls.first()),
            _ => self.image_urls.first().or(self.video_urls.first()),
        };
        MediaItem {
            provider: self
                .provider
                .as_deref()
                .map(ProviderType::from)
                .unwrap_or_else(|| requested.clone()),
            media_type,
            description: self.description,
            author_name: self.author.and_then(|author| author.display_name),
            url: preview.map(|u| u.url.clone()),
            width: preview.and_then(|u| u.width),
            height: preview.and_then(|u| u.height),
            name: self.name,
        }
    }
}

impl ListCategoriesResponse {
    pub(crate) fn into_categories(self) -> Vec<Category> {
        self.categories
            .into_iter()
            .map(|category| Category {
                label: category
                    .display_name
                    .unwrap_or_else(|| category.name.clone()),
                id: category.name,
            })
            .collect()
    }
}
