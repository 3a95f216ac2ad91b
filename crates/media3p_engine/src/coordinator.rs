//! Media fetch coordinator: one per provider tab.
//!
//! `evaluate` decides synchronously whether the current inputs call for a new
//! page and, if so, signals the start to the result store before handing back
//! a [`FetchTask`]. The task performs the request and reports the outcome; a
//! failure is absorbed there and never reaches the caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use media3p_core::{
    fetch_media_error_message, has_changed, should_fetch, FetchInputs, FetchRequestKey,
    FetchScope, FetchSnapshot, MediaItem, MediaPage, ProviderType,
};
use media3p_logging::{media_debug, media_warn};
use tokio_util::sync::CancellationToken;

use crate::{ApiError, FetchOutcome, MediaApi};

/// Receives fetch lifecycle reports. Implementations must not block.
pub trait ResultStore: Send + Sync {
    fn fetch_start(&self, provider: &ProviderType, page_token: Option<&str>);

    fn fetch_success(
        &self,
        provider: &ProviderType,
        media: Vec<MediaItem>,
        page_token: Option<&str>,
        next_page_token: Option<String>,
    );

    fn fetch_error(&self, provider: &ProviderType, page_token: Option<&str>);
}

/// User-visible notifications (snackbar, stderr, ...).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// What to do with a request once a newer one for the same provider starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Cancel the older request and drop its result.
    #[default]
    Supersede,
    /// Let overlapping requests run to completion and report all of them.
    ReportAll,
}

#[derive(Debug, Default)]
struct GuardState {
    next_generation: u64,
    latest: HashMap<ProviderType, InFlight>,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    cancel: CancellationToken,
}

/// Tracks the latest request per provider.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    state: Mutex<GuardState>,
}

#[derive(Debug, Clone)]
struct Ticket {
    generation: u64,
    cancel: CancellationToken,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self, provider: &ProviderType) -> bool {
        self.lock().latest.contains_key(provider)
    }

    /// Registers a new latest request and cancels the one it replaces.
    fn begin(&self, provider: &ProviderType) -> Ticket {
        let mut state = self.lock();
        state.next_generation += 1;
        let generation = state.next_generation;
        let cancel = CancellationToken::new();
        let previous = state.latest.insert(
            provider.clone(),
            InFlight {
                generation,
                cancel: cancel.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.cancel.cancel();
        }
        Ticket { generation, cancel }
    }

    /// Drops the latest request for `provider` and cancels it, so its result
    /// is never reported.
    fn invalidate(&self, provider: &ProviderType) -> bool {
        match self.lock().latest.remove(provider) {
            Some(in_flight) => {
                in_flight.cancel.cancel();
                true
            }
            None => false,
        }
    }

    fn is_latest(&self, provider: &ProviderType, generation: u64) -> bool {
        self.lock()
            .latest
            .get(provider)
            .is_some_and(|in_flight| in_flight.generation == generation)
    }

    fn finish(&self, provider: &ProviderType, generation: u64) {
        let mut state = self.lock();
        if state
            .latest
            .get(provider)
            .is_some_and(|in_flight| in_flight.generation == generation)
        {
            state.latest.remove(provider);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GuardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Capabilities a coordinator reports to and fetches through.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn MediaApi>,
    pub store: Arc<dyn ResultStore>,
    pub notifier: Arc<dyn NotificationSink>,
    pub guard: Arc<InFlightGuard>,
}

pub struct FetchCoordinator {
    provider: ProviderType,
    collaborators: Collaborators,
    policy: StalePolicy,
    snapshot: Option<FetchSnapshot>,
}

impl FetchCoordinator {
    pub fn new(provider: ProviderType, collaborators: Collaborators, policy: StalePolicy) -> Self {
        Self {
            provider,
            collaborators,
            policy,
            snapshot: None,
        }
    }

    pub fn provider(&self) -> &ProviderType {
        &self.provider
    }

    pub fn snapshot(&self) -> Option<&FetchSnapshot> {
        self.snapshot.as_ref()
    }

    /// Re-evaluates the fetch decision for new inputs.
    ///
    /// The snapshot is replaced on every call. When a fetch is due, the start
    /// is reported before this returns. Under [`StalePolicy::Supersede`], a
    /// filter or page change that does not start a fetch (an inactive tab)
    /// still cancels the request in flight for the old inputs.
    pub fn evaluate(&mut self, inputs: &FetchInputs) -> Option<FetchTask> {
        if inputs.provider != self.provider {
            media_warn!(
                "Coordinator for {} ignored inputs bound to {}",
                self.provider,
                inputs.provider
            );
            return None;
        }

        let current = inputs.snapshot();
        let changed = has_changed(self.snapshot.as_ref(), &current);
        let previous = self.snapshot.replace(current);
        if !should_fetch(previous.as_ref(), inputs) {
            if changed
                && self.policy == StalePolicy::Supersede
                && self.collaborators.guard.invalidate(&self.provider)
            {
                media_debug!(
                    "Cancelled in-flight fetch for inactive provider={} after its inputs changed",
                    self.provider
                );
            }
            return None;
        }

        let key = inputs.key();
        self.collaborators
            .store
            .fetch_start(&key.provider, key.page_token.as_deref());
        let ticket = match self.policy {
            StalePolicy::Supersede => Some(self.collaborators.guard.begin(&key.provider)),
            StalePolicy::ReportAll => None,
        };
        media_debug!(
            "FetchMedia provider={} page_token={:?} search={:?} category={:?}",
            key.provider,
            key.page_token,
            key.search_term,
            key.category_id
        );

        Some(FetchTask {
            key,
            collaborators: self.collaborators.clone(),
            ticket,
        })
    }
}

/// A started page request. Dropping it without running leaves the store in
/// its loading state.
pub struct FetchTask {
    key: FetchRequestKey,
    collaborators: Collaborators,
    ticket: Option<Ticket>,
}

impl FetchTask {
    pub fn key(&self) -> &FetchRequestKey {
        &self.key
    }

    pub async fn run(self) -> FetchOutcome {
        let result = match self.ticket.clone() {
            Some(ticket) => {
                tokio::select! {
                    biased;
                    _ = ticket.cancel.cancelled() => None,
                    result = self.request() => Some(result),
                }
            }
            None => Some(self.request().await),
        };

        let Some(result) = result.filter(|_| self.is_latest()) else {
            media_debug!(
                "Dropping superseded fetch provider={} page_token={:?}",
                self.key.provider,
                self.key.page_token
            );
            return FetchOutcome::Superseded;
        };

        let provider = &self.key.provider;
        let page_token = self.key.page_token.as_deref();
        let outcome = match result {
            Ok(MediaPage {
                media,
                next_page_token,
            }) => {
                self.collaborators
                    .store
                    .fetch_success(provider, media, page_token, next_page_token);
                FetchOutcome::Succeeded
            }
            Err(err) => {
                media_warn!(
                    "Fetch failed provider={} page_token={:?}: {}",
                    provider,
                    page_token,
                    err
                );
                self.collaborators.store.fetch_error(provider, page_token);
                self.collaborators
                    .notifier
                    .notify(fetch_media_error_message(provider));
                FetchOutcome::Failed
            }
        };

        if let Some(ticket) = &self.ticket {
            self.collaborators.guard.finish(provider, ticket.generation);
        }
        outcome
    }

    async fn request(&self) -> Result<MediaPage, ApiError> {
        let api = &self.collaborators.api;
        let provider = &self.key.provider;
        let page_token = self.key.page_token.as_deref();
        match self.key.scope() {
            FetchScope::Category(category_id) => {
                api.list_category_media(provider, category_id, page_token)
                    .await
            }
            FetchScope::Search(search_term) => {
                api.list_media(provider, search_term, page_token).await
            }
        }
    }

    fn is_latest(&self) -> bool {
        match &self.ticket {
            Some(ticket) => self
                .collaborators
                .guard
                .is_latest(&self.key.provider, ticket.generation),
            None => true,
        }
    }
}
