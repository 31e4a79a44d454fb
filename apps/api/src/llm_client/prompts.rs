// Cross-cutting prompt fragments. Each feature keeps its own prompts.rs next to it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose answer is parsed as a bare comma-separated line.
pub const COMMA_LIST_INSTRUCTION: &str = "\
    Respond with a single line of comma-separated values and nothing else. \
    No numbering, no bullet points, no headings, no trailing commentary.";
