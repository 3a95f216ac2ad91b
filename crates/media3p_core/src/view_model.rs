use crate::ProviderType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaViewModel {
    pub selected_provider: ProviderType,
    pub search_term: String,
    pub providers: Vec<ProviderRowView>,
}

impl MediaViewModel {
    pub fn selected(&self) -> Option<&ProviderRowView> {
        self.providers.iter().find(|row| row.is_selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRowView {
    pub provider: ProviderType,
    pub is_selected: bool,
    pub media_count: usize,
    pub has_more: bool,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub has_error: bool,
    pub selected_category_id: Option<String>,
    pub category_count: usize,
}
