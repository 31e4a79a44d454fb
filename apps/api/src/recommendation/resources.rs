//! Resource Fetcher — concurrent learning-resource lookups for missing skills.
//!
//! One task per skill in a `JoinSet`, gated by a semaphore so at most
//! `concurrency` lookups are in flight. Each lookup has its own timeout; a
//! failed, timed-out, or panicked lookup only drops that skill from the result.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::recommendation::{RecommendationResult, ResourceItem};

pub const DEFAULT_MAX_RESULTS_PER_SKILL: usize = 2;
pub const DEFAULT_PER_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Appended to a skill to steer search towards complete courses.
const QUERY_SUFFIX: &str = "full course computer science";

/// External search backend. Swap implementations without touching the fetcher.
#[async_trait]
pub trait ResourceSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<ResourceItem>, AppError>;
}

#[derive(Debug, Clone, Copy)]
pub struct FetchConfig {
    pub max_results_per_skill: usize,
    pub per_request_timeout: Duration,
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_results_per_skill: DEFAULT_MAX_RESULTS_PER_SKILL,
            per_request_timeout: DEFAULT_PER_REQUEST_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Clone)]
pub struct ResourceFetcher {
    search: Arc<dyn ResourceSearch>,
    config: FetchConfig,
}

/// Builds the search query for `skill`. Skills that already ask for a course are used as-is.
pub fn build_query(skill: &str) -> String {
    let skill = skill.trim();
    if skill.to_lowercase().contains("course") {
        skill.to_string()
    } else {
        format!("{skill} {QUERY_SUFFIX}")
    }
}

impl ResourceFetcher {
    pub fn new(search: Arc<dyn ResourceSearch>, config: FetchConfig) -> Self {
        Self { search, config }
    }

    /// Looks up resources for every skill and returns only the skills that got results.
    ///
    /// Returns once every dispatched lookup has finished, failed, or timed out.
    /// Blank skills are skipped and case-insensitive duplicates are looked up once.
    pub async fn fetch_resources_batch(&self, skills: &[String]) -> RecommendationResult {
        let permits = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let max_results = self.config.max_results_per_skill;
        let per_request_timeout = self.config.per_request_timeout;

        let mut seen = HashSet::new();
        let mut tasks = JoinSet::new();

        for skill in skills {
            let skill = skill.trim();
            if skill.is_empty() || !seen.insert(skill.to_lowercase()) {
                continue;
            }

            let skill = skill.to_string();
            let search = Arc::clone(&self.search);
            let permits = Arc::clone(&permits);

            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails if that changes.
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (skill, Err(AppError::Internal(anyhow::anyhow!("lookup pool closed"))));
                };

                let query = build_query(&skill);
                let outcome = match tokio::time::timeout(
                    per_request_timeout,
                    search.search(&query, max_results),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(AppError::Timeout(per_request_timeout.as_millis())),
                };
                (skill, outcome)
            });
        }

        let dispatched = tasks.len();
        let mut results = RecommendationResult::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((skill, Ok(mut items))) => {
                    items.truncate(max_results);
                    debug!(skill = %skill, count = items.len(), "Resource lookup finished");
                    if !items.is_empty() {
                        results.insert(skill, items);
                    }
                }
                Ok((skill, Err(e))) => {
                    warn!(skill = %skill, error = %e, "Resource lookup failed, skipping skill");
                }
                Err(e) => {
                    error!(error = ?e, "Resource lookup task panicked");
                }
            }
        }

        info!(
            dispatched,
            with_resources = results.len(),
            "Resource batch complete"
        );
        results
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// How the mock search answers a given query.
    #[derive(Clone, Copy)]
    pub enum Behaviour {
        Results(usize),
        Fail,
        Hang,
    }

    pub struct MockSearch {
        behaviour: HashMap<String, Behaviour>,
        default: Behaviour,
        pub calls: AtomicUsize,
        in_flight: AtomicUsize,
        pub max_in_flight: AtomicUsize,
        pub queries: Mutex<Vec<String>>,
    }

    impl MockSearch {
        pub fn new(default: Behaviour) -> Self {
            Self {
                behaviour: HashMap::new(),
                default,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
            }
        }

        /// Overrides the behaviour for queries built from `skill`.
        pub fn with(mut self, skill: &str, behaviour: Behaviour) -> Self {
            self.behaviour.insert(build_query(skill), behaviour);
            self
        }
    }

    #[async_trait]
    impl ResourceSearch for MockSearch {
        async fn search(&self, query: &str, _max_results: usize) -> Result<Vec<ResourceItem>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let behaviour = self.behaviour.get(query).copied().unwrap_or(self.default);
            let result = match behaviour {
                Behaviour::Results(n) => {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok((0..n)
                        .map(|i| ResourceItem::new(format!("{query} #{i}"), format!("https://example.com/{i}")))
                        .collect())
                }
                Behaviour::Fail => Err(AppError::UpstreamUnavailable("boom".to_string())),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(vec![])
                }
            };

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn fetcher(search: Arc<MockSearch>) -> ResourceFetcher {
        ResourceFetcher::new(search, FetchConfig::default())
    }

    #[test]
    fn test_build_query_appends_suffix() {
        assert_eq!(build_query(" Rust "), "Rust full course computer science");
    }

    #[test]
    fn test_build_query_keeps_course_phrasing() {
        assert_eq!(build_query("SQL Crash Course"), "SQL Crash Course");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_skill_is_absent() {
        let search = Arc::new(MockSearch::new(Behaviour::Results(2)).with("Kafka", Behaviour::Hang));
        let result = fetcher(search).fetch_resources_batch(&skills(&["Kafka", "Rust"])).await;

        assert!(!result.contains_key("Kafka"));
        assert_eq!(result["Rust"].len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_hanging_skill_yields_empty_map() {
        let search = Arc::new(MockSearch::new(Behaviour::Hang));
        let result = fetcher(search).fetch_resources_batch(&skills(&["Kafka"])).await;
        assert!(result.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failures_keep_successful_skills() {
        let names: Vec<String> = (0..10).map(|i| format!("skill-{i}")).collect();
        let mut search = MockSearch::new(Behaviour::Results(5));
        for failing in ["skill-1", "skill-4", "skill-8"] {
            search = search.with(failing, Behaviour::Fail);
        }
        let search = Arc::new(search);

        let result = fetcher(Arc::clone(&search)).fetch_resources_batch(&names).await;

        assert_eq!(result.len(), 7);
        assert!(result.values().all(|items| items.len() <= DEFAULT_MAX_RESULTS_PER_SKILL));
        assert!(!result.contains_key("skill-4"));
        assert_eq!(search.calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_result_skills_are_dropped() {
        let search = Arc::new(MockSearch::new(Behaviour::Results(1)).with("Cobol", Behaviour::Results(0)));
        let result = fetcher(search).fetch_resources_batch(&skills(&["Cobol", "Go"])).await;

        assert_eq!(result.len(), 1);
        assert!(result.contains_key("Go"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_capped() {
        let names: Vec<String> = (0..12).map(|i| format!("skill-{i}")).collect();
        let search = Arc::new(MockSearch::new(Behaviour::Results(1)));

        fetcher(Arc::clone(&search)).fetch_resources_batch(&names).await;

        let peak = search.max_in_flight.load(Ordering::SeqCst);
        assert!(peak <= DEFAULT_CONCURRENCY, "peak in-flight was {peak}");
        assert_eq!(search.calls.load(Ordering::SeqCst), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_and_blank_skills_are_looked_up_once() {
        let search = Arc::new(MockSearch::new(Behaviour::Results(1)));
        let result = fetcher(Arc::clone(&search))
            .fetch_resources_batch(&skills(&["Docker", "docker ", "", "  "]))
            .await;

        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *search.queries.lock().unwrap(),
            vec!["Docker full course computer science".to_string()]
        );
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["Docker"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_skill_list_makes_no_calls() {
        let search = Arc::new(MockSearch::new(Behaviour::Results(1)));
        let result = fetcher(Arc::clone(&search)).fetch_resources_batch(&[]).await;

        assert!(result.is_empty());
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }
}
