// Skill-gap recommendation pipeline: match JD to a catalog role, diff skills,
// fetch learning resources for whatever is missing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod gap;
pub mod handlers;
pub mod resources;
pub mod service;
pub mod youtube;

/// Reported by the search backend when it does not know the length of a resource.
pub const UNKNOWN_DURATION: &str = "unknown";

/// A single learning resource for a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub title: String,
    pub url: String,
    pub duration: String,
}

impl ResourceItem {
    pub fn new(title: String, url: String) -> Self {
        Self {
            title,
            url,
            duration: UNKNOWN_DURATION.to_string(),
        }
    }
}

/// Missing skill → resources found for it. Skills with no resources are never present.
pub type RecommendationResult = BTreeMap<String, Vec<ResourceItem>>;
