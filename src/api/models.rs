use serde::Serialize;

use crate::story::Scene;

#[derive(Serialize)]
pub struct StoryScenesResponse {
    pub story_id: String,
    pub scene_count: usize,
    pub scenes: Vec<Scene>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub stories_loaded: bool,
    pub backend_reachable: bool,
    pub backend_placeholder: bool,
}
