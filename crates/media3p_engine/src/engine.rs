use std::collections::BTreeMap;
use std::sync::{mpsc, Arc};

use media3p_core::{
    fetch_categories_error_message, update, Effect, MediaItem, MediaState, MediaViewModel, Msg,
    ProviderType,
};
use media3p_logging::{media_error, media_info, media_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::coordinator::{
    Collaborators, FetchCoordinator, InFlightGuard, NotificationSink, ResultStore, StalePolicy,
};
use crate::MediaApi;

/// Result store that turns coordinator reports into store messages.
pub struct ChannelResultStore {
    tx: mpsc::Sender<Msg>,
}

impl ChannelResultStore {
    pub fn new(tx: mpsc::Sender<Msg>) -> Self {
        Self { tx }
    }
}

impl ResultStore for ChannelResultStore {
    fn fetch_start(&self, provider: &ProviderType, page_token: Option<&str>) {
        let _ = self.tx.send(Msg::FetchMediaStart {
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
        let _ = self.tx.send(Msg::FetchMediaSuccess {
            provider: provider.clone(),
            media,
            page_token: page_token.map(str::to_string),
            next_page_token,
        });
    }

    fn fetch_error(&self, provider: &ProviderType, page_token: Option<&str>) {
        let _ = self.tx.send(Msg::FetchMediaError {
            provider: provider.clone(),
            page_token: page_token.map(str::to_string),
        });
    }
}

/// Owns the media store and one fetch coordinator per provider tab.
///
/// Messages are applied with the pure `update` function; the effects it
/// returns drive coordinator evaluation and category loading. Network work
/// runs on the given tokio runtime and reports back through a channel that is
/// drained on every `dispatch` and by `settle`.
pub struct MediaEngine {
    state: MediaState,
    coordinators: BTreeMap<ProviderType, FetchCoordinator>,
    api: Arc<dyn MediaApi>,
    notifier: Arc<dyn NotificationSink>,
    runtime: Handle,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    pending: Vec<JoinHandle<()>>,
}

impl MediaEngine {
    pub fn new(
        state: MediaState,
        api: Arc<dyn MediaApi>,
        notifier: Arc<dyn NotificationSink>,
        policy: StalePolicy,
        runtime: Handle,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let collaborators = Collaborators {
            api: api.clone(),
            store: Arc::new(ChannelResultStore::new(msg_tx.clone())),
            notifier: notifier.clone(),
            guard: Arc::new(InFlightGuard::new()),
        };
        let coordinators = state
            .providers()
            .map(|provider| {
                (
                    provider.clone(),
                    FetchCoordinator::new(provider.clone(), collaborators.clone(), policy),
                )
            })
            .collect();

        Self {
            state,
            coordinators,
            api,
            notifier,
            runtime,
            msg_tx,
            msg_rx,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &MediaState {
        &self.state
    }

    pub fn view(&self) -> MediaViewModel {
        self.state.view()
    }

    /// First evaluation of every coordinator, plus categories for the active tab.
    pub fn mount(&mut self) {
        media_info!(
            "Mounting media engine with {} providers, selected={}",
            self.coordinators.len(),
            self.state.selected_provider()
        );
        let providers: Vec<ProviderType> = self.coordinators.keys().cloned().collect();
        for provider in &providers {
            self.evaluate(provider);
        }
        let selected = self.state.selected_provider().clone();
        self.dispatch(Msg::SelectProvider(selected));
    }

    /// Applies a message and everything already reported back.
    pub fn dispatch(&mut self, msg: Msg) {
        self.apply(msg);
        self.drain();
    }

    /// Waits for all outstanding requests and applies their results, until
    /// no further work is started.
    pub async fn settle(&mut self) {
        loop {
            self.drain();
            if self.pending.is_empty() {
                break;
            }
            let pending = std::mem::take(&mut self.pending);
            for result in futures_util::future::join_all(pending).await {
                if let Err(err) = result {
                    media_error!("Media task failed to complete: {}", err);
                }
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn apply(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::EvaluateFetch { provider } => self.evaluate(&provider),
                Effect::LoadCategories { provider } => self.load_categories(provider),
            }
        }
    }

    fn drain(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.apply(msg);
        }
    }

    fn evaluate(&mut self, provider: &ProviderType) {
        let Some(inputs) = self.state.fetch_inputs(provider) else {
            return;
        };
        let Some(coordinator) = self.coordinators.get_mut(provider) else {
            return;
        };
        if let Some(task) = coordinator.evaluate(&inputs) {
            self.pending.push(self.runtime.spawn(async move {
                task.run().await;
            }));
        }
    }

    fn load_categories(&mut self, provider: ProviderType) {
        let api = self.api.clone();
        let notifier = self.notifier.clone();
        let tx = self.msg_tx.clone();
        self.pending.push(self.runtime.spawn(async move {
            let result = api.list_categories(&provider).await;
            let msg = match result {
                Ok(categories) => Msg::FetchCategoriesSuccess {
                    provider,
                    categories,
                },
                Err(err) => {
                    media_warn!("Loading categories for {} failed: {}", provider, err);
                    notifier.notify(fetch_categories_error_message(&provider));
                    Msg::FetchCategoriesError { provider }
                }
            };
            let _ = tx.send(msg);
        }));
    }
}
