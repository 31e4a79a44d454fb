use std::sync::Arc;

use crate::analysis::ats::AtsScorer;
use crate::analysis::cleaning::TextCleaner;
use crate::analysis::skills::SkillExtractor;
use crate::recommendation::service::RecommendationService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Skill-gap pipeline; owns the read-only role catalog.
    pub recommender: Arc<RecommendationService>,
    /// Also held by `recommender`; used directly for candidate skills.
    pub cleaner: Arc<dyn TextCleaner>,
    pub skill_extractor: Arc<dyn SkillExtractor>,
    pub ats_scorer: Arc<dyn AtsScorer>,
}
