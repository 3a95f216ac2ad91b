#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use media3p_core::{Category, MediaItem, MediaPage, MediaType, ProviderType};
use media3p_engine::{
    ApiError, Collaborators, FailureKind, InFlightGuard, MediaApi, NotificationSink, ResultStore,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(media3p_logging::initialize_for_tests);
}

pub fn item(provider: ProviderType, name: &str) -> MediaItem {
    MediaItem {
        name: name.to_string(),
        provider,
        media_type: MediaType::Image,
        description: None,
        author_name: None,
        url: Some(format!("https://cdn.example.com/{name}.jpg")),
        width: Some(640),
        height: Some(480),
    }
}

pub fn page(provider: ProviderType, names: &[&str], next: Option<&str>) -> MediaPage {
    MediaPage {
        media: names.iter().map(|name| item(provider.clone(), name)).collect(),
        next_page_token: next.map(str::to_string),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListMedia {
        provider: ProviderType,
        search_term: Option<String>,
        page_token: Option<String>,
    },
    ListCategoryMedia {
        provider: ProviderType,
        category_id: String,
        page_token: Option<String>,
    },
    ListCategories {
        provider: ProviderType,
    },
}

/// Scripted media API: responses and delays are keyed by page token.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<ApiCall>>,
    pages: Mutex<HashMap<Option<String>, Result<MediaPage, ApiError>>>,
    delays: Mutex<HashMap<Option<String>, Duration>>,
    categories: Mutex<Option<Result<Vec<Category>, ApiError>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page_token: Option<&str>, page: MediaPage) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(page_token.map(str::to_string), Ok(page));
        self
    }

    pub fn with_failure(self, page_token: Option<&str>) -> Self {
        self.pages.lock().unwrap().insert(
            page_token.map(str::to_string),
            Err(ApiError::new(FailureKind::HttpStatus(500), "boom")),
        );
        self
    }

    pub fn with_delay(self, page_token: Option<&str>, delay: Duration) -> Self {
        self.delays
            .lock()
            .unwrap()
            .insert(page_token.map(str::to_string), delay);
        self
    }

    pub fn with_categories(self, categories: Result<Vec<Category>, ApiError>) -> Self {
        *self.categories.lock().unwrap() = Some(categories);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, page_token: Option<&str>) -> Result<MediaPage, ApiError> {
        let key = page_token.map(str::to_string);
        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.pages
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(MediaPage::default()))
    }
}

#[async_trait::async_trait]
impl MediaApi for FakeApi {
    async fn list_media(
        &self,
        provider: &ProviderType,
        search_term: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<MediaPage, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::ListMedia {
            provider: provider.clone(),
            search_term: search_term.map(str::to_string),
            page_token: page_token.map(str::to_string),
        });
        self.respond(page_token).await
    }

    async fn list_category_media(
        &self,
        provider: &ProviderType,
        category_id: &str,
        page_token: Option<&str>,
    ) -> Result<MediaPage, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::ListCategoryMedia {
            provider: provider.clone(),
            category_id: category_id.to_string(),
            page_token: page_token.map(str::to_string),
        });
        self.respond(page_token).await
    }

    async fn list_categories(&self, provider: &ProviderType) -> Result<Vec<Category>, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::ListCategories {
            provider: provider.clone(),
        });
        self.categories
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Start {
        provider: ProviderType,
        page_token: Option<String>,
    },
    Success {
        provider: ProviderType,
        media: Vec<MediaItem>,
        page_token: Option<String>,
        next_page_token: Option<String>,
    },
    Error {
        provider: ProviderType,
        page_token: Option<String>,
    },
}

#[derive(Default)]
pub struct RecordingStore {
    events: Mutex<Vec<StoreEvent>>,
}

impl RecordingStore {
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ResultStore for RecordingStore {
    fn fetch_start(&self, provider: &ProviderType, page_token: Option<&str>) {
        self.events.lock().unwrap().push(StoreEvent::Start {
            provider: provider.clone(),
            page_token: page_token.map(str::to_string),
        });
    }

    fn fetch_success(
        &self,
        provider: &ProviderType,
        media: Vec<MediaItem>,
        page_token: Option<&str>,
        next_page_token: Option<String>,
    ) {
        self.events.lock().unwrap().push(StoreEvent::Success {
            provider: provider.clone(),
            media,
            page_token: page_token.map(str::to_string),
            next_page_token,
        });
    }

    fn fetch_error(&self, provider: &ProviderType, page_token: Option<&str>) {
        self.events.lock().unwrap().push(StoreEvent::Error {
            provider: provider.clone(),
            page_token: page_token.map(str::to_string),
        });
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub store: Arc<RecordingStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub guard: Arc<InFlightGuard>,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        init_logging();
        Self {
            api: Arc::new(api),
            store: Arc::new(RecordingStore::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            guard: Arc::new(InFlightGuard::new()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            api: self.api.clone(),
            store: self.store.clone(),
            notifier: self.notifier.clone(),
            guard: self.guard.clone(),
        }
    }
}
