//! Role catalog — the static role → skills dataset and its similarity index.
//!
//! Loaded once in `main` and shared read-only for the life of the process.
//! `Catalog` owns both the entries and the index built from them, so the two
//! can only ever be replaced together.

pub mod index;
mod stopwords;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

pub use index::{match_best_entry, SimilarityIndex};

/// Header names accepted for the role label column, in priority order.
const ROLE_COLUMNS: &[&str] = &["role", "category", "job_title", "title", "label"];
const SKILLS_COLUMN: &str = "skills";

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is a valid regex"));

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Read(#[from] csv::Error),

    #[error("catalog has no 'skills' column")]
    MissingSkillsColumn,

    #[error("catalog has no label column besides 'skills'")]
    MissingLabelColumn,

    #[error("catalog contains no entries")]
    Empty,
}

/// A single role and the skills it declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub role_label: String,
    /// Comma-separated, as written in the source.
    pub skills_raw: String,
    /// Lowercased with punctuation stripped; this is what gets indexed.
    pub skills_normalized: String,
}

impl CatalogEntry {
    pub fn new(role_label: String, skills_raw: String) -> Self {
        let skills_normalized = normalize_skills(&skills_raw);
        Self {
            role_label,
            skills_raw,
            skills_normalized,
        }
    }
}

/// Lowercases and strips every character that is neither a word character nor whitespace.
pub fn normalize_skills(skills: &str) -> String {
    PUNCTUATION.replace_all(&skills.to_lowercase(), "").into_owned()
}

/// Reads the catalog CSV at `path`. Rows with a blank skills cell are skipped.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>, CatalogError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_entries(reader)
}

fn read_entries<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<CatalogEntry>, CatalogError> {
    let headers = reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let skills_col = position(SKILLS_COLUMN).ok_or(CatalogError::MissingSkillsColumn)?;
    let label_col = ROLE_COLUMNS
        .iter()
        .find_map(|&name| position(name))
        .or_else(|| (0..headers.len()).find(|&i| i != skills_col))
        .ok_or(CatalogError::MissingLabelColumn)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let skills = record.get(skills_col).unwrap_or_default();
        if skills.is_empty() {
            continue;
        }
        let label = record.get(label_col).unwrap_or_default();
        entries.push(CatalogEntry::new(label.to_string(), skills.to_string()));
    }

    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(entries)
}

/// Result of matching a job description against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct MatchOutcome<'a> {
    pub entry: &'a CatalogEntry,
    /// Cosine similarity in [0, 1].
    pub score: f64,
}

impl MatchOutcome<'_> {
    /// False when nothing in the job description overlapped the catalog
    /// vocabulary and the first entry was chosen as a fallback.
    pub fn is_confident(&self) -> bool {
        self.score > 0.0
    }
}

/// Catalog entries plus the index built over them.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: SimilarityIndex,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let index = SimilarityIndex::build(&entries);
        Ok(Self { entries, index })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::new(load_catalog(path)?)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn vocabulary_size(&self) -> usize {
        self.index.vocabulary_size()
    }

    pub fn best_match(&self, job_description: &str) -> MatchOutcome<'_> {
        // `new` rejects empty catalogs, so there is always a row 0 to fall back to.
        let (i, score) = match_best_entry(&self.index, job_description).unwrap_or((0, 0.0));
        MatchOutcome {
            entry: &self.entries[i],
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_normalize_strips_punctuation_and_lowercases() {
        assert_eq!(normalize_skills("Node.js, C++, CI/CD"), "nodejs c cicd");
    }

    #[test]
    fn test_load_catalog_reads_role_and_skills() {
        let file = write_csv("role,skills\nData Scientist,\"Python, SQL\"\nDevOps,\"Docker, Linux\"\n");
        let entries = load_catalog(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role_label, "Data Scientist");
        assert_eq!(entries[0].skills_raw, "Python, SQL");
        assert_eq!(entries[0].skills_normalized, "python sql");
    }

    #[test]
    fn test_load_catalog_falls_back_to_first_other_column_for_label() {
        let file = write_csv("Skills,Position\n\"Rust, Go\",Systems\n");
        let entries = load_catalog(file.path()).unwrap();
        assert_eq!(entries[0].role_label, "Systems");
    }

    #[test]
    fn test_load_catalog_skips_blank_skills() {
        let file = write_csv("category,skills\nA,\nB,\"Python\"\n");
        let entries = load_catalog(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role_label, "B");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = load_catalog("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Read(_)));
    }

    #[test]
    fn test_missing_skills_column_is_rejected() {
        let file = write_csv("role,tools\nA,Python\n");
        assert!(matches!(
            load_catalog(file.path()),
            Err(CatalogError::MissingSkillsColumn)
        ));
    }

    #[test]
    fn test_header_only_catalog_is_empty() {
        let file = write_csv("role,skills\n");
        assert!(matches!(load_catalog(file.path()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_catalog_rejects_empty_entries() {
        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_best_match_reports_fallback_as_not_confident() {
        let catalog = Catalog::new(vec![
            CatalogEntry::new("A".into(), "Python, SQL".into()),
            CatalogEntry::new("B".into(), "Docker, Linux".into()),
        ])
        .unwrap();

        let fallback = catalog.best_match("");
        assert_eq!(fallback.entry.role_label, "A");
        assert!(!fallback.is_confident());

        let matched = catalog.best_match("Looking for Docker and Linux skills");
        assert_eq!(matched.entry.role_label, "B");
        assert!(matched.is_confident());
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/skill_set.csv");
        let catalog = Catalog::from_path(path).unwrap();
        assert!(catalog.entries().len() >= 10);
        assert!(catalog.vocabulary_size() > 0);
    }
}
