//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::recommendation::RecommendationResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub job_description: String,
    /// Comma-separated candidate skills.
    #[serde(default)]
    pub skills: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub missing_skills: Vec<String>,
    pub recommended_courses: RecommendationResult,
    pub matched_role: String,
    pub match_score: f64,
}

/// POST /api/v1/recommendations
///
/// Runs the skill-gap pipeline for an already-known skill list.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let recs = state
        .recommender
        .get_recommendations(&request.job_description, &request.skills)
        .await;

    Ok(Json(RecommendResponse {
        missing_skills: recs.missing_skills,
        recommended_courses: recs.resources,
        matched_role: recs.matched_role,
        match_score: recs.match_score,
    }))
}
