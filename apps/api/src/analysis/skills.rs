//! Skill extraction from raw resume text.

use async_trait::async_trait;
use serde::Deserialize;

use crate::analysis::prompts::SKILL_EXTRACT_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// Resume text beyond this many characters is not sent to the model.
const MAX_RESUME_CHARS: usize = 20_000;

#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<Vec<String>, AppError>;
}

#[derive(Debug, Deserialize)]
struct ExtractedSkills {
    #[serde(default)]
    skills: Vec<String>,
}

pub struct LlmSkillExtractor(pub LlmClient);

#[async_trait]
impl SkillExtractor for LlmSkillExtractor {
    async fn extract(&self, resume_text: &str) -> Result<Vec<String>, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation("resume text is empty".to_string()));
        }

        let prompt =
            SKILL_EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", truncate_chars(resume_text, MAX_RESUME_CHARS));
        let extracted: ExtractedSkills = self
            .0
            .complete_json(&prompt, JSON_ONLY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("skill extraction failed: {e}")))?;

        Ok(extracted
            .skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}

/// Truncates on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_skills_deserialize() {
        let parsed: ExtractedSkills =
            serde_json::from_str(r#"{"skills": ["Rust", "SQL"]}"#).unwrap();
        assert_eq!(parsed.skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_missing_skills_key_is_empty() {
        let parsed: ExtractedSkills = serde_json::from_str("{}").unwrap();
        assert!(parsed.skills.is_empty());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
