//! Skill-list cleaning — comma-joined phrases in, cleaned comma-joined phrases out.
//!
//! Downstream code splits the output on commas and trims, so whatever the
//! backend returns is re-normalized here before it leaves the cleaner.

use async_trait::async_trait;

use crate::analysis::prompts::{CLEAN_PROMPT_TEMPLATE, CLEAN_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::COMMA_LIST_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::recommendation::gap::dedupe_skills;

#[async_trait]
pub trait TextCleaner: Send + Sync {
    async fn clean(&self, text: &str) -> Result<String, AppError>;
}

/// Splits, trims, drops empties and case-insensitive duplicates, then rejoins with ", ".
pub fn normalize_skill_list(text: &str) -> String {
    dedupe_skills(text).join(", ")
}

/// Cleans skill lists with the LLM.
pub struct LlmTextCleaner(pub LlmClient);

#[async_trait]
impl TextCleaner for LlmTextCleaner {
    async fn clean(&self, text: &str) -> Result<String, AppError> {
        let input = normalize_skill_list(text);
        if input.is_empty() {
            return Ok(String::new());
        }

        let prompt = CLEAN_PROMPT_TEMPLATE
            .replace("{list_instruction}", COMMA_LIST_INSTRUCTION)
            .replace("{skills}", &input);

        let output = self
            .0
            .complete(&prompt, CLEAN_SYSTEM)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("skill cleaning failed: {e}")))?;

        // Models sometimes answer one skill per line instead of one line.
        Ok(normalize_skill_list(&output.replace('\n', ",")))
    }
}
