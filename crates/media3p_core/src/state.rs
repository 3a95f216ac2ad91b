use std::collections::BTreeMap;

use crate::view_model::{MediaViewModel, ProviderRowView};
use crate::{Category, FetchInputs, MediaItem, ProviderType};

/// Per-provider result store entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderState {
    media: Vec<MediaItem>,
    page_token: Option<String>,
    next_page_token: Option<String>,
    has_more: bool,
    is_media_loading: bool,
    is_media_loaded: bool,
    has_error: bool,
    selected_category_id: Option<String>,
    categories: Vec<Category>,
    is_categories_loading: bool,
    is_categories_loaded: bool,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self {
            media: Vec::new(),
            page_token: None,
            next_page_token: None,
            has_more: true,
            is_media_loading: false,
            is_media_loaded: false,
            has_error: false,
            selected_category_id: None,
            categories: Vec::new(),
            is_categories_loading: false,
            is_categories_loaded: false,
        }
    }
}

impl ProviderState {
    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_media_loading(&self) -> bool {
        self.is_media_loading
    }

    pub fn is_media_loaded(&self) -> bool {
        self.is_media_loaded
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn selected_category_id(&self) -> Option<&str> {
        self.selected_category_id.as_deref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_categories_loaded(&self) -> bool {
        self.is_categories_loaded
    }

    /// Drops loaded pages so the next evaluation starts from the first page.
    pub(crate) fn reset_pagination(&mut self) {
        self.media.clear();
        self.page_token = None;
        self.next_page_token = None;
        self.has_more = true;
        self.is_media_loading = false;
        self.is_media_loaded = false;
        self.has_error = false;
    }

    pub(crate) fn select_category(&mut self, category_id: Option<String>) -> bool {
        if self.selected_category_id == category_id {
            return false;
        }
        self.selected_category_id = category_id;
        self.reset_pagination();
        true
    }

    pub(crate) fn advance_page(&mut self) -> bool {
        if self.is_media_loading {
            return false;
        }
        match self.next_page_token.clone() {
            Some(next) => {
                self.page_token = Some(next);
                true
            }
            None => false,
        }
    }

    pub(crate) fn start_fetch(&mut self, page_token: Option<String>) {
        self.page_token = page_token;
        self.is_media_loading = true;
        self.has_error = false;
    }

    /// Applies a finished page. Pages for a token other than the current one
    /// are late arrivals and are dropped.
    pub(crate) fn apply_success(
        &mut self,
        media: Vec<MediaItem>,
        page_token: Option<String>,
        next_page_token: Option<String>,
    ) -> bool {
        if self.page_token != page_token {
            return false;
        }
        if page_token.is_some() {
            self.media.extend(media);
        } else {
            self.media = media;
        }
        self.has_more = next_page_token.is_some();
        self.next_page_token = next_page_token;
        self.is_media_loading = false;
        self.is_media_loaded = true;
        true
    }

    pub(crate) fn apply_error(&mut self, page_token: Option<String>) -> bool {
        if self.page_token != page_token {
            return false;
        }
        self.is_media_loading = false;
        self.has_error = true;
        true
    }

    /// Marks categories as loading; false if they are loaded or already on the way.
    pub(crate) fn begin_categories_load(&mut self) -> bool {
        if self.is_categories_loaded || self.is_categories_loading {
            return false;
        }
        self.is_categories_loading = true;
        true
    }

    pub(crate) fn apply_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.is_categories_loading = false;
        self.is_categories_loaded = true;
    }

    pub(crate) fn fail_categories(&mut self) {
        self.is_categories_loading = false;
    }
}

/// Result store for every provider tab plus the shared search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaState {
    selected_provider: ProviderType,
    search_term: String,
    providers: BTreeMap<ProviderType, ProviderState>,
}

impl Default for MediaState {
    fn default() -> Self {
        Self::new([ProviderType::Unsplash, ProviderType::Coverr])
    }
}

impl MediaState {
    /// Creates a store for the given providers; the first one starts selected.
    /// An empty list falls back to the local media library.
    pub fn new(providers: impl IntoIterator<Item = ProviderType>) -> Self {
        let providers: Vec<ProviderType> = providers.into_iter().collect();
        let selected_provider = providers
            .first()
            .cloned()
            .unwrap_or(ProviderType::Local);
        let mut map = BTreeMap::new();
        map.insert(selected_provider.clone(), ProviderState::default());
        for provider in providers {
            map.entry(provider).or_default();
        }
        Self {
            selected_provider,
            search_term: String::new(),
            providers: map,
        }
    }

    pub fn selected_provider(&self) -> &ProviderType {
        &self.selected_provider
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn provider(&self, provider: &ProviderType) -> Option<&ProviderState> {
        self.providers.get(provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = &ProviderType> {
        self.providers.keys()
    }

    /// Inputs the fetch decision reads for `provider`, if it is registered.
    pub fn fetch_inputs(&self, provider: &ProviderType) -> Option<FetchInputs> {
        let entry = self.providers.get(provider)?;
        let search_term = if self.search_term.is_empty() {
            None
        } else {
            Some(self.search_term.clone())
        };
        Some(FetchInputs {
            provider: provider.clone(),
            selected_provider: self.selected_provider.clone(),
            search_term,
            category_id: entry.selected_category_id.clone(),
            page_token: entry.page_token.clone(),
            next_page_token: entry.next_page_token.clone(),
        })
    }

    pub fn view(&self) -> MediaViewModel {
        MediaViewModel {
            selected_provider: self.selected_provider.clone(),
            search_term: self.search_term.clone(),
            providers: self
                .providers
                .iter()
                .map(|(provider, entry)| ProviderRowView {
                    provider: provider.clone(),
                    is_selected: *provider == self.selected_provider,
                    media_count: entry.media.len(),
                    has_more: entry.has_more,
                    is_loading: entry.is_media_loading,
                    is_loaded: entry.is_media_loaded,
                    has_error: entry.has_error,
                    selected_category_id: entry.selected_category_id.clone(),
                    category_count: entry.categories.len(),
                })
                .collect(),
        }
    }

    pub(crate) fn all_fetch_inputs(&self) -> Vec<FetchInputs> {
        self.providers
            .keys()
            .filter_map(|provider| self.fetch_inputs(provider))
            .collect()
    }

    pub(crate) fn provider_mut(&mut self, provider: &ProviderType) -> Option<&mut ProviderState> {
        self.providers.get_mut(provider)
    }

    pub(crate) fn set_selected_provider(&mut self, provider: ProviderType) -> bool {
        if !self.providers.contains_key(&provider) || self.selected_provider == provider {
            return false;
        }
        self.selected_provider = provider;
        true
    }

    /// Replaces the search term and resets every provider; false if unchanged.
    pub(crate) fn set_search_term(&mut self, term: &str) -> bool {
        let term = term.trim();
        if self.search_term == term {
            return false;
        }
        self.search_term = term.to_string();
        for entry in self.providers.values_mut() {
            entry.reset_pagination();
        }
        true
    }
}
