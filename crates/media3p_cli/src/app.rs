use std::sync::Arc;

use anyhow::Context;
use log::LevelFilter;
use media3p_core::{fetch_categories_error_message, update, MediaState, Msg, ProviderType};
use media3p_engine::{MediaApi, MediaEngine, NotificationSink, ReqwestMediaApi, StalePolicy};
use media3p_logging::{media_debug, media_info, LogDestination};
use tokio::runtime::Handle;

use crate::cli::{Cli, Commands};
use crate::config::{self, CliConfig};
use crate::notify::StderrNotifier;
use crate::render;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let (config, source) = config::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = match &config.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    media3p_logging::initialize(destination, level);
    match &source {
        Some(path) => media_info!("Loaded config from {:?}", path),
        None => media_debug!("No config file found, using defaults"),
    }

    let api: Arc<dyn MediaApi> = Arc::new(
        ReqwestMediaApi::new(config.api_settings()).context("building media API client")?,
    );
    let notifier: Arc<dyn NotificationSink> = Arc::new(StderrNotifier);
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;

    match cli.command {
        Commands::Browse {
            provider,
            search,
            category,
            pages,
        } => {
            let request = BrowseRequest {
                provider: ProviderType::from(provider.as_str()),
                search,
                category,
                pages,
            };
            runtime.block_on(browse(&config, api, notifier, request));
            Ok(())
        }
        Commands::Categories { provider } => {
            runtime.block_on(categories(api, notifier, ProviderType::from(provider.as_str())))
        }
    }
}

struct BrowseRequest {
    provider: ProviderType,
    search: Option<String>,
    category: Option<String>,
    pages: u32,
}

/// Filters are applied to the store before mounting so the first
/// evaluation already requests the filtered listing.
fn initial_state(config: &CliConfig, request: &BrowseRequest) -> MediaState {
    let mut state = MediaState::new(config.providers_with_selected(&request.provider));
    if let Some(term) = &request.search {
        state = update(state, Msg::SetSearchTerm(term.clone())).0;
    }
    if let Some(category_id) = &request.category {
        state = update(
            state,
            Msg::SelectCategory {
                provider: request.provider.clone(),
                category_id: category_id.clone(),
            },
        )
        .0;
    }
    state
}

async fn browse(
    config: &CliConfig,
    api: Arc<dyn MediaApi>,
    notifier: Arc<dyn NotificationSink>,
    request: BrowseRequest,
) {
    let policy: StalePolicy = config.stale_policy();
    let state = initial_state(config, &request);
    let mut engine = MediaEngine::new(state, api, notifier, policy, Handle::current());

    engine.mount();
    engine.settle().await;

    for _ in 1..request.pages {
        let has_more = engine
            .view()
            .selected()
            .is_some_and(|row| row.is_loaded && row.has_more);
        if !has_more {
            break;
        }
        engine.dispatch(Msg::SetNextPage {
            provider: request.provider.clone(),
        });
        engine.settle().await;
    }

    let view = engine.view();
    media_info!("Browse finished: {}", render::render_status(&view));
    println!("{}", render::render_status(&view));
    if let Some(entry) = engine.state().provider(&request.provider) {
        for line in render::render_media(entry.media()) {
            println!("{line}");
        }
    }
}

async fn categories(
    api: Arc<dyn MediaApi>,
    notifier: Arc<dyn NotificationSink>,
    provider: ProviderType,
) -> anyhow::Result<()> {
    match api.list_categories(&provider).await {
        Ok(categories) => {
            for line in render::render_categories(&categories) {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            notifier.notify(fetch_categories_error_message(&provider));
            Err(err).with_context(|| format!("listing categories for {provider}"))
        }
    }
}
