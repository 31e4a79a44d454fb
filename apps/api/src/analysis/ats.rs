//! ATS scoring — six 0–100 scores for resume vs job description, or an explicit failure.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::prompts::{ATS_PROMPT_TEMPLATE, ATS_SYSTEM};
use crate::analysis::skills::truncate_chars;
use crate::llm_client::LlmClient;

pub const SCORING_FAILED: &str = "Failed to generate ATS scores";
const SCORE_COUNT: usize = 6;
const MAX_INPUT_CHARS: usize = 20_000;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern is a valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsBreakdown {
    pub ats: u8,
    pub readability: u8,
    pub grammar: u8,
    pub keywords: u8,
    pub experience: u8,
    pub customization: u8,
}

/// Serializes as the breakdown, `{"error": ...}`, or `{}` when no job description was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AtsScores {
    Scored(AtsBreakdown),
    Failed { error: String },
    NotRequested {},
}

impl AtsScores {
    pub fn failed() -> Self {
        AtsScores::Failed {
            error: SCORING_FAILED.to_string(),
        }
    }
}

/// Extracts exactly six integers in 0..=100, in order. Anything else is a failure.
pub fn parse_ats_scores(text: &str) -> AtsScores {
    let values: Vec<u8> = match INTEGER
        .find_iter(text)
        .map(|m| m.as_str().parse::<u8>().ok().filter(|v| *v <= 100))
        .collect::<Option<Vec<u8>>>()
    {
        Some(values) if values.len() == SCORE_COUNT => values,
        _ => return AtsScores::failed(),
    };

    AtsScores::Scored(AtsBreakdown {
        ats: values[0],
        readability: values[1],
        grammar: values[2],
        keywords: values[3],
        experience: values[4],
        customization: values[5],
    })
}

#[async_trait]
pub trait AtsScorer: Send + Sync {
    /// Never errors; upstream problems come back as `AtsScores::Failed`.
    async fn score(&self, resume_text: &str, job_description: &str) -> AtsScores;
}

pub struct LlmAtsScorer(pub LlmClient);

#[async_trait]
impl AtsScorer for LlmAtsScorer {
    async fn score(&self, resume_text: &str, job_description: &str) -> AtsScores {
        let prompt = ATS_PROMPT_TEMPLATE
            .replace("{resume_text}", truncate_chars(resume_text, MAX_INPUT_CHARS))
            .replace("{job_description}", truncate_chars(job_description, MAX_INPUT_CHARS));

        match self.0.complete(&prompt, ATS_SYSTEM).await {
            Ok(text) => {
                let scores = parse_ats_scores(&text);
                if matches!(scores, AtsScores::Failed { .. }) {
                    warn!(response = %text, "ATS response did not contain six scores");
                }
                scores
            }
            Err(e) => {
                warn!(error = %e, "ATS scoring call failed");
                AtsScores::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::tests::unreachable_client;

    #[tokio::test]
    async fn test_unreachable_scorer_backend_reports_failure_marker() {
        let scorer = LlmAtsScorer(unreachable_client());
        let scores = scorer.score("Rust engineer, 5 years", "Senior Rust role").await;
        assert_eq!(scores, AtsScores::failed());
    }

    #[test]
    fn test_six_scores_parse_in_order() {
        let scores = parse_ats_scores("78,85,92,70,65,60");
        assert_eq!(
            scores,
            AtsScores::Scored(AtsBreakdown {
                ats: 78,
                readability: 85,
                grammar: 92,
                keywords: 70,
                experience: 65,
                customization: 60,
            })
        );
    }

    #[test]
    fn test_scores_with_percent_signs_and_prose() {
        let scores = parse_ats_scores("Scores: 80%, 75%, 90%, 60%, 55%, 70%");
        assert!(matches!(scores, AtsScores::Scored(b) if b.ats == 80 && b.customization == 70));
    }

    #[test]
    fn test_too_few_scores_fail() {
        assert_eq!(parse_ats_scores("80, 75, 90"), AtsScores::failed());
    }

    #[test]
    fn test_too_many_scores_fail() {
        assert_eq!(parse_ats_scores("1, 2, 3, 4, 5, 6, 7"), AtsScores::failed());
    }

    #[test]
    fn test_out_of_range_score_fails() {
        assert_eq!(parse_ats_scores("80, 75, 190, 60, 55, 70"), AtsScores::failed());
    }

    #[test]
    fn test_failed_serializes_as_error_marker() {
        let json = serde_json::to_value(AtsScores::failed()).unwrap();
        assert_eq!(json, serde_json::json!({"error": SCORING_FAILED}));
    }

    #[test]
    fn test_not_requested_serializes_as_empty_object() {
        let json = serde_json::to_value(AtsScores::NotRequested {}).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
