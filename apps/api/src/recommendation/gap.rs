//! Skill-gap calculation between a role's required skills and a candidate's skills.

use std::collections::HashSet;

/// Splits a comma-separated skill list into trimmed, non-empty tokens.
pub fn split_skills(csv: &str) -> impl Iterator<Item = &str> {
    csv.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Splits a comma-separated list, keeping the first spelling of each case-insensitive duplicate.
pub fn dedupe_skills(csv: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    split_skills(csv)
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(String::from)
        .collect()
}

/// Returns the required skills the candidate does not have.
///
/// Membership is case-insensitive; output keeps the required list's order and
/// casing, with case-insensitive duplicates collapsed to their first occurrence.
pub fn compute_missing_skills(required_csv: &str, candidate_csv: &str) -> Vec<String> {
    let candidate: HashSet<String> = split_skills(candidate_csv).map(str::to_lowercase).collect();
    let mut seen = HashSet::new();

    split_skills(required_csv)
        .filter(|skill| {
            let key = skill.to_lowercase();
            !candidate.contains(&key) && seen.insert(key)
        })
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_membership_preserves_casing() {
        assert_eq!(
            compute_missing_skills("Python, SQL, Docker", "python, docker"),
            vec!["SQL".to_string()]
        );
    }

    #[test]
    fn test_dedupe_keeps_first_spelling() {
        assert_eq!(dedupe_skills("SQL, sql , ,Go"), vec!["SQL", "Go"]);
    }

    #[test]
    fn test_self_match_leaves_nothing_missing() {
        let skills = "Rust, Tokio, PostgreSQL, gRPC";
        assert!(compute_missing_skills(skills, skills).is_empty());
    }

    #[test]
    fn test_empty_required_list_is_not_an_error() {
        assert!(compute_missing_skills("", "python").is_empty());
        assert!(compute_missing_skills(" , ,", "python").is_empty());
    }

    #[test]
    fn test_empty_candidate_list_misses_everything() {
        assert_eq!(
            compute_missing_skills("Go, Kafka", ""),
            vec!["Go".to_string(), "Kafka".to_string()]
        );
    }

    #[test]
    fn test_order_follows_required_list() {
        assert_eq!(
            compute_missing_skills("Zig, Ada, Lua", "ada"),
            vec!["Zig".to_string(), "Lua".to_string()]
        );
    }

    #[test]
    fn test_duplicate_required_skills_reported_once() {
        assert_eq!(
            compute_missing_skills("Docker, docker, DOCKER, Git", "git"),
            vec!["Docker".to_string()]
        );
    }

    #[test]
    fn test_whitespace_around_tokens_is_ignored() {
        assert!(compute_missing_skills("  Machine Learning ,SQL", "sql,machine learning ").is_empty());
    }
}
