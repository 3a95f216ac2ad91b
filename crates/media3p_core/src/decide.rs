//! Fetch decision: whether a provider-bound fetcher must request a page now.
//!
//! Everything here is a plain function over immutable values so the rules can
//! be exercised without a runtime, a store or a network.

use crate::ProviderType;

/// Identifies one logical page-of-results request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchRequestKey {
    pub provider: ProviderType,
    pub search_term: Option<String>,
    pub category_id: Option<String>,
    pub page_token: Option<String>,
}

/// Which API a request goes to. A category always wins over a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope<'a> {
    Category(&'a str),
    Search(Option<&'a str>),
}

impl FetchRequestKey {
    pub fn scope(&self) -> FetchScope<'_> {
        match self.category_id.as_deref() {
            Some(category_id) => FetchScope::Category(category_id),
            None => FetchScope::Search(self.search_term.as_deref()),
        }
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        FetchSnapshot {
            page_token: self.page_token.clone(),
            search_term: self.search_term.clone(),
            category_id: self.category_id.clone(),
        }
    }
}

/// The mutable parts of the previous request, kept to detect change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchSnapshot {
    pub page_token: Option<String>,
    pub search_term: Option<String>,
    pub category_id: Option<String>,
}

/// Everything the decision reads for one bound provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchInputs {
    /// Provider this fetcher is bound to.
    pub provider: ProviderType,
    /// Provider whose tab is currently active.
    pub selected_provider: ProviderType,
    pub search_term: Option<String>,
    pub category_id: Option<String>,
    pub page_token: Option<String>,
    pub next_page_token: Option<String>,
}

impl FetchInputs {
    pub fn key(&self) -> FetchRequestKey {
        FetchRequestKey {
            provider: self.provider.clone(),
            search_term: self.search_term.clone(),
            category_id: self.category_id.clone(),
            page_token: self.page_token.clone(),
        }
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        FetchSnapshot {
            page_token: self.page_token.clone(),
            search_term: self.search_term.clone(),
            category_id: self.category_id.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.provider == self.selected_provider
    }
}

/// True iff there is a previous snapshot and any of its fields differ.
pub fn has_changed(previous: Option<&FetchSnapshot>, current: &FetchSnapshot) -> bool {
    previous.is_some_and(|previous| previous != current)
}

/// True when nothing has been requested or loaded for this provider yet.
pub fn is_first_fetch(page_token: Option<&str>, next_page_token: Option<&str>) -> bool {
    page_token.is_none() && next_page_token.is_none()
}

/// Inactive providers never fetch. An active one fetches on its first load or
/// when pagination or filters moved since the previous evaluation.
pub fn should_fetch(previous: Option<&FetchSnapshot>, inputs: &FetchInputs) -> bool {
    if !inputs.is_active() {
        return false;
    }
    is_first_fetch(inputs.page_token.as_deref(), inputs.next_page_token.as_deref())
        || has_changed(previous, &inputs.snapshot())
}
