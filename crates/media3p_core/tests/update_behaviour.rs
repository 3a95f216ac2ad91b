use std::sync::Once;

use media3p_core::{update, Category, Effect, MediaItem, MediaState, MediaType, Msg, ProviderType};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(media3p_logging::initialize_for_tests);
}

fn item(name: &str) -> MediaItem {
    MediaItem {
        name: name.to_string(),
        provider: ProviderType::Unsplash,
        media_type: MediaType::Image,
        description: None,
        author_name: None,
        url: None,
        width: None,
        height: None,
    }
}

fn evaluate(provider: ProviderType) -> Effect {
    Effect::EvaluateFetch { provider }
}

fn load_first_page(state: MediaState, names: &[&str], next: Option<&str>) -> MediaState {
    let (state, _) = update(
        state,
        Msg::FetchMediaStart {
            provider: ProviderType::Unsplash,
            page_token: None,
        },
    );
    let (state, _) = update(
        state,
        Msg::FetchMediaSuccess {
            provider: ProviderType::Unsplash,
            media: names.iter().map(|name| item(name)).collect(),
            page_token: None,
            next_page_token: next.map(str::to_string),
        },
    );
    state
}

#[test]
fn default_store_selects_first_provider() {
    let state = MediaState::default();
    assert_eq!(state.selected_provider(), &ProviderType::Unsplash);
    let inputs = state.fetch_inputs(&ProviderType::Coverr).expect("coverr registered");
    assert_eq!(inputs.selected_provider, ProviderType::Unsplash);
    assert_eq!(inputs.search_term, None);
    assert!(state.fetch_inputs(&ProviderType::Local).is_none());
}

#[test]
fn first_page_replaces_and_next_page_appends() {
    init_logging();
    let state = load_first_page(MediaState::default(), &["a", "b"], Some("p2"));
    let entry = state.provider(&ProviderType::Unsplash).unwrap();
    assert_eq!(entry.media().len(), 2);
    assert_eq!(entry.next_page_token(), Some("p2"));
    assert!(entry.has_more());
    assert!(entry.is_media_loaded());
    assert!(!entry.is_media_loading());

    let (state, effects) = update(
        state,
        Msg::SetNextPage {
            provider: ProviderType::Unsplash,
        },
    );
    assert_eq!(effects, vec![evaluate(ProviderType::Unsplash)]);
    assert_eq!(
        state.provider(&ProviderType::Unsplash).unwrap().page_token(),
        Some("p2")
    );

    let (state, _) = update(
        state,
        Msg::FetchMediaStart {
            provider: ProviderType::Unsplash,
            page_token: Some("p2".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::FetchMediaSuccess {
            provider: ProviderType::Unsplash,
            media: vec![item("c")],
            page_token: Some("p2".to_string()),
            next_page_token: None,
        },
    );
    let entry = state.provider(&ProviderType::Unsplash).unwrap();
    let names: Vec<_> = entry.media().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(!entry.has_more());
}

#[test]
fn late_page_for_stale_token_is_ignored() {
    let state = load_first_page(MediaState::default(), &["a"], Some("p2"));
    let (state, _) = update(
        state,
        Msg::FetchMediaStart {
            provider: ProviderType::Unsplash,
            page_token: Some("p2".to_string()),
        },
    );
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::FetchMediaSuccess {
            provider: ProviderType::Unsplash,
            media: vec![item("stale")],
            page_token: Some("p1".to_string()),
            next_page_token: Some("p9".to_string()),
        },
    );
    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn fetch_error_keeps_media_and_flags_error() {
    let state = load_first_page(MediaState::default(), &["a"], Some("p2"));
    let (state, _) = update(
        state,
        Msg::SetNextPage {
            provider: ProviderType::Unsplash,
        },
    );
    let (state, _) = update(
        state,
        Msg::FetchMediaStart {
            provider: ProviderType::Unsplash,
            page_token: Some("p2".to_string()),
        },
    );
    let (state, effects) = update(
        state,
        Msg::FetchMediaError {
            provider: ProviderType::Unsplash,
            page_token: Some("p2".to_string()),
        },
    );

    assert!(effects.is_empty());
    let entry = state.provider(&ProviderType::Unsplash).unwrap();
    assert!(entry.has_error());
    assert!(!entry.is_media_loading());
    assert_eq!(entry.media().len(), 1);
    let view = state.view();
    assert!(view.selected().unwrap().has_error);
}

#[test]
fn set_next_page_is_ignored_while_loading_or_at_end() {
    let state = load_first_page(MediaState::default(), &["a"], None);
    let (state, effects) = update(
        state,
        Msg::SetNextPage {
            provider: ProviderType::Unsplash,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.provider(&ProviderType::Unsplash).unwrap().page_token(), None);

    let (state, _) = update(
        state,
        Msg::FetchMediaStart {
            provider: ProviderType::Unsplash,
            page_token: None,
        },
    );
    let (_state, effects) = update(
        state,
        Msg::SetNextPage {
            provider: ProviderType::Unsplash,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn search_term_resets_every_provider() {
    let state = load_first_page(MediaState::default(), &["a", "b"], Some("p2"));

    let (state, effects) = update(state, Msg::SetSearchTerm("  cats ".to_string()));
    assert_eq!(state.search_term(), "cats");
    assert_eq!(
        effects,
        vec![evaluate(ProviderType::Unsplash), evaluate(ProviderType::Coverr)]
    );
    let entry = state.provider(&ProviderType::Unsplash).unwrap();
    assert!(entry.media().is_empty());
    assert_eq!(entry.next_page_token(), None);
    assert!(entry.has_more());

    let (_state, effects) = update(state, Msg::SetSearchTerm("cats".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn category_selection_only_touches_its_provider() {
    let state = MediaState::default();
    let (state, effects) = update(
        state,
        Msg::SelectCategory {
            provider: ProviderType::Coverr,
            category_id: "cat1".to_string(),
        },
    );
    assert_eq!(effects, vec![evaluate(ProviderType::Coverr)]);
    let inputs = state.fetch_inputs(&ProviderType::Coverr).unwrap();
    assert_eq!(inputs.category_id.as_deref(), Some("cat1"));

    let (state, effects) = update(
        state,
        Msg::DeselectCategory {
            provider: ProviderType::Coverr,
        },
    );
    assert_eq!(effects, vec![evaluate(ProviderType::Coverr)]);
    assert_eq!(
        state.provider(&ProviderType::Coverr).unwrap().selected_category_id(),
        None
    );
}

#[test]
fn switching_tabs_evaluates_all_and_loads_categories_once() {
    let state = MediaState::default();
    let (state, effects) = update(state, Msg::SelectProvider(ProviderType::Coverr));
    assert_eq!(
        effects,
        vec![
            evaluate(ProviderType::Unsplash),
            evaluate(ProviderType::Coverr),
            Effect::LoadCategories {
                provider: ProviderType::Coverr
            },
        ]
    );

    let (state, _) = update(state, Msg::SelectProvider(ProviderType::Unsplash));
    let (state, effects) = update(state, Msg::SelectProvider(ProviderType::Coverr));
    // Still loading from the first switch.
    assert!(!effects.contains(&Effect::LoadCategories {
        provider: ProviderType::Coverr
    }));

    let (state, _) = update(
        state,
        Msg::FetchCategoriesSuccess {
            provider: ProviderType::Coverr,
            categories: vec![Category {
                id: "categories/coverr:1".to_string(),
                label: "Nature".to_string(),
            }],
        },
    );
    let entry = state.provider(&ProviderType::Coverr).unwrap();
    assert!(entry.is_categories_loaded());
    assert_eq!(entry.categories()[0].label, "Nature");
}

#[test]
fn failed_category_load_is_retried_on_next_selection() {
    let (state, _) = update(MediaState::default(), Msg::SelectProvider(ProviderType::Unsplash));
    let (state, _) = update(
        state,
        Msg::FetchCategoriesError {
            provider: ProviderType::Unsplash,
        },
    );
    let (_state, effects) = update(state, Msg::SelectProvider(ProviderType::Unsplash));
    assert_eq!(
        effects,
        vec![Effect::LoadCategories {
            provider: ProviderType::Unsplash
        }]
    );
}

#[test]
fn unknown_provider_messages_are_ignored() {
    let state = MediaState::default();
    let stranger = ProviderType::from("tenor");
    let (next, effects) = update(state.clone(), Msg::SelectProvider(stranger.clone()));
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (next, effects) = update(
        next,
        Msg::FetchMediaStart {
            provider: stranger,
            page_token: None,
        },
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());
}
