use axum::{
    routing::get,
    Router,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::models::{HealthResponse, StoryScenesResponse};
use crate::api::response::{self, ApiResponse};
use crate::error::Result;
use crate::story::{Scene, StoryInfo};
use crate::AppState;

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>)>;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/scenes", get(scenes_handler))
        .route("/api/stories", get(stories_handler))
        .route("/api/stories/:story_id/scenes", get(story_scenes_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn scenes_handler(State(state): State<AppState>) -> ApiResult<Vec<Scene>> {
    let scenes = state.loader.load_all().await?;
    Ok(response::success(scenes.to_vec()))
}

async fn stories_handler(State(state): State<AppState>) -> ApiResult<Vec<StoryInfo>> {
    let stories = state.loader.list_stories().await?;
    debug!(count = stories.len(), "listing stories");
    Ok(response::success(stories))
}

async fn story_scenes_handler(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> ApiResult<StoryScenesResponse> {
    let scenes = state.loader.scenes_for_story(&story_id).await?;
    Ok(response::success(StoryScenesResponse {
        story_id,
        scene_count: scenes.len(),
        scenes,
    }))
}

async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let backend_reachable = state.backend.get_session().await.is_ok();
    response::success(HealthResponse {
        stories_loaded: state.loader.is_loaded(),
        backend_reachable,
        backend_placeholder: state.backend.config().is_placeholder(),
    })
}
