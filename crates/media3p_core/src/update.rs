use crate::{Effect, MediaState, Msg, ProviderType};

/// Pure update function: applies a message to the store and returns any effects.
///
/// Every provider whose fetch inputs differ before and after the message gets
/// an `EvaluateFetch` effect, ahead of any other effect the message produces.
pub fn update(mut state: MediaState, msg: Msg) -> (MediaState, Vec<Effect>) {
    let before = state.all_fetch_inputs();

    let extra = match msg {
        Msg::SelectProvider(provider) => {
            state.set_selected_provider(provider.clone());
            if state.selected_provider() == &provider {
                load_categories_if_needed(&mut state, provider)
            } else {
                Vec::new()
            }
        }
        Msg::SetSearchTerm(term) => {
            state.set_search_term(&term);
            Vec::new()
        }
        Msg::SelectCategory {
            provider,
            category_id,
        } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.select_category(Some(category_id));
            }
            Vec::new()
        }
        Msg::DeselectCategory { provider } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.select_category(None);
            }
            Vec::new()
        }
        Msg::SetNextPage { provider } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.advance_page();
            }
            Vec::new()
        }
        Msg::FetchMediaStart {
            provider,
            page_token,
        } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.start_fetch(page_token);
            }
            Vec::new()
        }
        Msg::FetchMediaSuccess {
            provider,
            media,
            page_token,
            next_page_token,
        } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.apply_success(media, page_token, next_page_token);
            }
            Vec::new()
        }
        Msg::FetchMediaError {
            provider,
            page_token,
        } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.apply_error(page_token);
            }
            Vec::new()
        }
        Msg::FetchCategoriesSuccess {
            provider,
            categories,
        } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.apply_categories(categories);
            }
            Vec::new()
        }
        Msg::FetchCategoriesError { provider } => {
            if let Some(entry) = state.provider_mut(&provider) {
                entry.fail_categories();
            }
            Vec::new()
        }
    };

    let after = state.all_fetch_inputs();
    let mut effects: Vec<Effect> = after
        .into_iter()
        .filter(|inputs| !before.contains(inputs))
        .map(|inputs| Effect::EvaluateFetch {
            provider: inputs.provider,
        })
        .collect();
    effects.extend(extra);

    (state, effects)
}

fn load_categories_if_needed(state: &mut MediaState, provider: ProviderType) -> Vec<Effect> {
    match state.provider_mut(&provider) {
        Some(entry) => {
            if entry.begin_categories_load() {
                vec![Effect::LoadCategories { provider }]
            } else {
                Vec::new()
            }
        }
        None => Vec::new(),
    }
}
