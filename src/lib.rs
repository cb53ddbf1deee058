pub mod api;
pub mod backend;
pub mod config;
pub mod error;
mod http;
pub mod loader;
pub mod logging;
pub mod story;

use std::sync::Arc;
use backend::BackendClient;
use loader::StoryLoader;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<StoryLoader>,
    pub backend: Arc<BackendClient>,
}
