//! Media3p engine: provider media API, fetch coordination and effect execution.
mod api;
mod coordinator;
mod engine;
mod http;
mod types;
mod wire;

pub use api::MediaApi;
pub use coordinator::{
    Collaborators, FetchCoordinator, FetchTask, InFlightGuard, NotificationSink, ResultStore,
    StalePolicy,
};
pub use engine::{ChannelResultStore, MediaEngine};
pub use http::{ApiSettings, ReqwestMediaApi};
pub use types::{ApiError, FailureKind, FetchOutcome};
