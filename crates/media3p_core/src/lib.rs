//! Media3p core: pure fetch decisions, result store reducer and view-model helpers.
mod decide;
mod effect;
mod media;
mod msg;
mod provider;
mod state;
mod update;
mod view_model;

pub use decide::{
    has_changed, is_first_fetch, should_fetch, FetchInputs, FetchRequestKey, FetchScope,
    FetchSnapshot,
};
pub use effect::Effect;
pub use media::{Category, MediaItem, MediaPage, MediaType};
pub use msg::Msg;
pub use provider::{fetch_categories_error_message, fetch_media_error_message, ProviderType};
pub use state::{MediaState, ProviderState};
pub use update::update;
pub use view_model::{MediaViewModel, ProviderRowView};
