//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::ats::AtsScores;
use crate::analysis::cleaning::normalize_skill_list;
use crate::analysis::extract::extract_resume_text;
use crate::errors::AppError;
use crate::recommendation::RecommendationResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// The multipart fields of an analyze request.
#[derive(Debug, Default)]
pub struct ResumeUpload {
    pub file: Option<Bytes>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub job_desc: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub cleaned_skills: String,
    pub ats_scores: AtsScores,
    pub missing_skills: Vec<String>,
    pub recommended_courses: RecommendationResult,
    pub matched_role: Option<String>,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreRequest {
    pub resume_text: String,
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart `file` (PDF, DOCX, or text) and optional `job_desc`.
/// Always returns the cleaned skills; with a job description it also returns
/// ATS scores and learning resources for the missing skills.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let upload = read_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    info!(%request_id, size = file.len(), "Analyzing resume");

    let resume_text = extract_resume_text(
        upload.content_type.as_deref(),
        upload.file_name.as_deref(),
        &file,
    )
    .await?;

    let raw_skills = state.skill_extractor.extract(&resume_text).await?;
    let raw_skills = raw_skills.join(", ");
    let cleaned_skills = match state.cleaner.clean(&raw_skills).await {
        Ok(cleaned) => cleaned,
        Err(e) => {
            warn!(%request_id, error = %e, "Skill cleaning failed, returning extracted skills");
            normalize_skill_list(&raw_skills)
        }
    };
    info!(%request_id, skills = %cleaned_skills, "Candidate skills extracted");

    let job_desc = upload.job_desc.trim();
    if job_desc.is_empty() {
        return Ok(Json(AnalyzeResponse {
            cleaned_skills,
            ats_scores: AtsScores::NotRequested {},
            missing_skills: Vec::new(),
            recommended_courses: RecommendationResult::new(),
            matched_role: None,
            analyzed_at: Utc::now(),
        }));
    }

    let (recs, ats_scores) = tokio::join!(
        state.recommender.get_recommendations(job_desc, &cleaned_skills),
        state.ats_scorer.score(&resume_text, job_desc),
    );

    info!(
        %request_id,
        missing = recs.missing_skills.len(),
        with_resources = recs.resources.len(),
        "Resume analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        cleaned_skills,
        ats_scores,
        missing_skills: recs.missing_skills,
        recommended_courses: recs.resources,
        matched_role: Some(recs.matched_role),
        analyzed_at: Utc::now(),
    }))
}

/// POST /api/v1/ats-score
///
/// Scores already-extracted resume text against a job description.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<AtsScoreRequest>,
) -> Result<Json<AtsScores>, AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text and job_description are required".to_string(),
        ));
    }
    let scores = state
        .ats_scorer
        .score(&request.resume_text, &request.job_description)
        .await;
    Ok(Json(scores))
}

/// Collects the known fields; unknown fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.file_name = field.file_name().map(String::from);
                upload.content_type = field.content_type().map(String::from);
                upload.file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("failed to read file: {e}")))?,
                );
            }
            "job_desc" => {
                upload.job_desc = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read job_desc: {e}")))?;
            }
            _ => {}
        }
    }

    Ok(upload)
}
