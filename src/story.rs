use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_DESCRIPTION: &str = "一个互动故事";

/// One record of the story document, kept exactly as it was read.
///
/// Only `story_id`, `title` and `description` are ever looked at, and none of
/// them is required to have any particular type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene(Map<String, Value>);

impl Scene {
    /// Raw `story_id`; `None` when the field is missing or null.
    pub fn story_id(&self) -> Option<&Value> {
        self.0.get("story_id").filter(|v| !v.is_null())
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    pub fn description(&self) -> Option<String> {
        self.text("description")
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    fn belongs_to(&self, story_id: &str) -> bool {
        self.story_id().and_then(Value::as_str) == Some(story_id)
    }

    // Non-empty strings and numbers count as text; anything else is absent
    fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
pub struct StoryDocument {
    pub stories: Vec<Scene>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryInfo {
    pub id: Value,
    pub title: String,
    pub description: String,
}

impl StoryInfo {
    fn from_first_scene(id: &Value, scene: &Scene) -> Self {
        StoryInfo {
            id: id.clone(),
            title: scene.title().unwrap_or_else(|| default_title(id)),
            description: scene
                .description()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }
}

pub fn default_title(story_id: &Value) -> String {
    match story_id {
        Value::String(s) => format!("故事 {}", s),
        other => format!("故事 {}", other),
    }
}

/// Scenes whose `story_id` is the string `story_id`, in document order.
pub fn scenes_for_story(scenes: &[Scene], story_id: &str) -> Vec<Scene> {
    scenes
        .iter()
        .filter(|scene| scene.belongs_to(story_id))
        .cloned()
        .collect()
}

/// One entry per distinct `story_id`, in order of first occurrence, described
/// by that story's first scene. Scenes without a `story_id` belong to no story.
pub fn list_stories(scenes: &[Scene]) -> Vec<StoryInfo> {
    // keyed by JSON text so "7" and 7 stay distinct
    let mut seen: HashSet<String> = HashSet::new();
    let mut stories = Vec::new();
    for scene in scenes {
        let Some(id) = scene.story_id() else {
            continue;
        };
        if seen.insert(id.to_string()) {
            stories.push(StoryInfo::from_first_scene(id, scene));
        }
    }
    stories
}
