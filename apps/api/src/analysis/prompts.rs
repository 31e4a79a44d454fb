// Prompt constants for resume analysis: cleaning, skill extraction, ATS scoring.

/// System prompt for skill-list cleaning.
pub const CLEAN_SYSTEM: &str = "You normalize lists of professional skills. \
    You never invent skills that are not in the input.";

/// Skill cleaning prompt. Replace `{list_instruction}` and `{skills}` before sending.
pub const CLEAN_PROMPT_TEMPLATE: &str = r#"Clean the following comma-separated list of skills.

Rules:
- Fix obvious spelling and casing ("pyhton" -> "Python", "javascript" -> "JavaScript").
- Remove entries that are not skills (names, dates, company names, stray words).
- Merge duplicates and near-duplicates into one entry.
- Keep the original order of the remaining entries.
- Do NOT add skills that are not present in the input.

{list_instruction}

SKILLS:
{skills}"#;

/// Skill extraction prompt. Replace `{resume_text}` before sending.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract every technical and professional skill from the resume below.

Return a JSON object with this EXACT schema:
{"skills": ["Python", "SQL", "Project Management"]}

Include languages, frameworks, tools, platforms, methodologies and domain skills.
Exclude personal details, company names, job titles and dates.

RESUME:
{resume_text}"#;

/// System prompt for ATS scoring.
pub const ATS_SYSTEM: &str = "You are an applicant tracking system evaluating a resume \
    against a job description. You answer with numbers only.";

/// ATS scoring prompt. Replace `{resume_text}` and `{job_description}` before sending.
pub const ATS_PROMPT_TEMPLATE: &str = r#"Analyze this resume and job description to provide these 6 scores:
1. ATS Score: Match between resume and job description (0-100%)
2. Readability: Resume clarity and structure (0-100%)
3. Grammar: Spelling and grammar correctness (0-100%)
4. Keywords: Industry-specific keyword usage (0-100%)
5. Experience: Relevance of experience (0-100%)
6. Customization: Tailoring to this specific job (0-100%)

Format response ONLY as comma-separated numbers:
ATS,Readability,Grammar,Keywords,Experience,Customization

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;
