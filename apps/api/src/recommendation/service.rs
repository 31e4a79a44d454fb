//! Recommendation Service — orchestrates the skill-gap pipeline.
//!
//! Flow: best catalog match → missing skills → clean → fetch resources → filter.
//!
//! Built once at startup and shared behind an `Arc`. The catalog is read-only,
//! so concurrent requests need no locking.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::cleaning::TextCleaner;
use crate::catalog::Catalog;
use crate::recommendation::gap::{compute_missing_skills, dedupe_skills};
use crate::recommendation::resources::ResourceFetcher;
use crate::recommendation::RecommendationResult;

/// Output of one pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recommendations {
    /// Cleaned missing skills, in the matched role's order.
    pub missing_skills: Vec<String>,
    pub resources: RecommendationResult,
    pub matched_role: String,
    /// Cosine similarity of the job description to the matched role. 0.0 means fallback.
    pub match_score: f64,
}

pub struct RecommendationService {
    catalog: Catalog,
    cleaner: Arc<dyn TextCleaner>,
    fetcher: ResourceFetcher,
}

impl RecommendationService {
    pub fn new(catalog: Catalog, cleaner: Arc<dyn TextCleaner>, fetcher: ResourceFetcher) -> Self {
        Self {
            catalog,
            cleaner,
            fetcher,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Runs the full pipeline for one job description and candidate skill list.
    ///
    /// Makes no external calls when nothing is missing. Individual lookup
    /// failures only shrink `resources`; they never fail the call.
    pub async fn get_recommendations(
        &self,
        job_description: &str,
        candidate_skills_csv: &str,
    ) -> Recommendations {
        let matched = self.catalog.best_match(job_description);
        if !matched.is_confident() {
            warn!(
                role = %matched.entry.role_label,
                "Job description shares no terms with the catalog, using first role"
            );
        }
        info!(
            role = %matched.entry.role_label,
            score = matched.score,
            "Matched job description to catalog role"
        );

        let missing = compute_missing_skills(&matched.entry.skills_raw, candidate_skills_csv);
        let mut result = Recommendations {
            matched_role: matched.entry.role_label.clone(),
            match_score: matched.score,
            ..Default::default()
        };

        if missing.is_empty() {
            info!("Candidate covers every required skill");
            return result;
        }

        let missing_skills = self.clean_missing(&missing).await;
        info!(count = missing_skills.len(), "Fetching resources for missing skills");

        let mut resources = self.fetcher.fetch_resources_batch(&missing_skills).await;
        resources.retain(|_, items| !items.is_empty());

        result.missing_skills = missing_skills;
        result.resources = resources;
        result
    }

    /// Cleans the missing list; falls back to the raw list if the cleaner fails or returns nothing.
    async fn clean_missing(&self, missing: &[String]) -> Vec<String> {
        let joined = missing.join(", ");
        let cleaned = match self.cleaner.clean(&joined).await {
            Ok(text) => dedupe_skills(&text),
            Err(e) => {
                warn!(error = %e, "Skill cleaning failed, using uncleaned missing skills");
                Vec::new()
            }
        };
        if cleaned.is_empty() {
            missing.to_vec()
        } else {
            cleaned
        }
    }
}
