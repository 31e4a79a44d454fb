// Resume analysis: text extraction, skill extraction and cleaning, ATS scoring.
// All LLM calls go through llm_client; each collaborator sits behind a trait
// so AppState can carry test doubles.

pub mod ats;
pub mod cleaning;
pub mod extract;
pub mod handlers;
pub mod prompts;
pub mod skills;
