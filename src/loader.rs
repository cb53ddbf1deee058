use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use crate::error::{AppError, Result};
use crate::http;
use crate::story::{self, Scene, StoryDocument, StoryInfo};

/// Location of the story document relative to the configured base URL.
pub const STORY_PATH: &str = "/story.json";

/// Fetches the story document once and answers every later call from memory.
///
/// Concurrent first calls wait on the same fetch. A failed fetch leaves the
/// cache empty, so the next call tries again.
pub struct StoryLoader {
    url: String,
    cache: OnceCell<Arc<[Scene]>>,
}

impl StoryLoader {
    pub fn new(base_url: &str) -> Self {
        StoryLoader {
            url: format!("{}{}", base_url.trim_end_matches('/'), STORY_PATH),
            cache: OnceCell::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    /// Every scene in the document, in document order.
    pub async fn load_all(&self) -> Result<Arc<[Scene]>> {
        match self.cache.get_or_try_init(|| self.fetch()).await {
            Ok(scenes) => Ok(Arc::clone(scenes)),
            Err(e) => {
                error!(url = %self.url, error = %e, "failed to load story data");
                Err(e)
            }
        }
    }

    pub async fn scenes_for_story(&self, story_id: &str) -> Result<Vec<Scene>> {
        match self.load_all().await {
            Ok(scenes) => Ok(story::scenes_for_story(&scenes, story_id)),
            Err(e) => {
                error!(story_id, error = %e, "failed to load scenes for story");
                Err(e)
            }
        }
    }

    pub async fn list_stories(&self) -> Result<Vec<StoryInfo>> {
        match self.load_all().await {
            Ok(scenes) => Ok(story::list_stories(&scenes)),
            Err(e) => {
                error!(error = %e, "failed to list stories");
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> Result<Arc<[Scene]>> {
        debug!(url = %self.url, "fetching story data");
        let response = http::client().get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RetrievalError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        let document: StoryDocument = serde_json::from_slice(&body)?;
        info!(scenes = document.stories.len(), "story data loaded");

        Ok(document.stories.into())
    }
}
