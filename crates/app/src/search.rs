use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use liftlog_domain::{CatalogExercise, MIN_QUERY_LENGTH, ReadError};
use log::debug;

/// Pause after the last keystroke before a search request is dispatched.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// A dispatchable catalog search. Obtained from [`ExerciseSearch::due_request`]
/// and handed back to [`ExerciseSearch::complete`] with the fetched result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    generation: u64,
}

impl SearchRequest {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Debounced, single-flight search against the exercise catalog.
///
/// The caller feeds keystrokes through [`set_query`] and polls
/// [`due_request`] from its tick loop; when a request is due it performs
/// the fetch and reports back through [`complete`]. Every keystroke
/// supersedes the previous request: the caller drops the superseded fetch
/// future (which aborts it), and a completion that still arrives is
/// discarded by its generation. Results are cached per normalized query
/// for the lifetime of the process.
///
/// [`set_query`]: ExerciseSearch::set_query
/// [`due_request`]: ExerciseSearch::due_request
/// [`complete`]: ExerciseSearch::complete
#[derive(Debug, Default)]
pub struct ExerciseSearch {
    query: String,
    deadline: Option<Instant>,
    generation: u64,
    cache: HashMap<String, Vec<CatalogExercise>>,
    results: Vec<CatalogExercise>,
    error: Option<String>,
    loading: bool,
}

impl ExerciseSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn results(&self) -> &[CatalogExercise] {
        &self.results
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_query(&mut self, query: &str, now: Instant) {
        let trimmed = query.trim();
        self.generation += 1;

        if trimmed.chars().count() < MIN_QUERY_LENGTH {
            self.query.clear();
            self.deadline = None;
            self.results.clear();
            self.error = None;
            self.loading = false;
            return;
        }

        self.query = trimmed.to_string();
        self.deadline = Some(now + DEBOUNCE);
        self.loading = true;
    }

    /// The request to dispatch once the debounce interval has passed.
    /// Queries answered from the cache produce no request.
    pub fn due_request(&mut self, now: Instant) -> Option<SearchRequest> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;

        if let Some(cached) = self.cache.get(&normalize(&self.query)) {
            self.results = cached.clone();
            self.error = None;
            self.loading = false;
            return None;
        }

        Some(SearchRequest {
            query: self.query.clone(),
            generation: self.generation,
        })
    }

    /// Publishes a finished fetch. Completions of superseded requests are
    /// dropped; fetch errors surface as a message alongside empty results
    /// and never beyond this value.
    pub fn complete(
        &mut self,
        request: &SearchRequest,
        result: Result<Vec<CatalogExercise>, ReadError>,
    ) {
        if request.generation != self.generation {
            debug!("dropping superseded search result for {:?}", request.query);
            return;
        }

        self.loading = false;
        match result {
            Ok(exercises) => {
                self.cache
                    .insert(normalize(&request.query), exercises.clone());
                self.results = exercises;
                self.error = None;
            }
            Err(err) => {
                self.results.clear();
                self.error = Some(err.to_string());
            }
        }
    }
}

fn normalize(query: &str) -> String {
    query.to_lowercase()
}

#[cfg(test)]
mod tests {
    use liftlog_domain::StorageError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog_exercise(name: &str) -> CatalogExercise {
        CatalogExercise {
            name: name.to_string(),
            muscle_group: "chest".to_string(),
            difficulty: "beginner".to_string(),
            equipment: vec!["barbell".to_string()],
        }
    }

    #[test]
    fn test_short_query_is_not_dispatched() {
        let now = Instant::now();
        let mut search = ExerciseSearch::new();

        search.set_query("b", now);
        assert!(!search.is_loading());
        assert_eq!(search.due_request(now + DEBOUNCE), None);
    }

    #[test]
    fn test_request_due_only_after_debounce() {
        let now = Instant::now();
        let mut search = ExerciseSearch::new();

        search.set_query("bench", now);
        assert!(search.is_loading());
        assert_eq!(search.due_request(now), None);
        assert_eq!(search.due_request(now + Duration::from_millis(100)), None);

        let request = search.due_request(now + DEBOUNCE).unwrap();
        assert_eq!(request.query(), "bench");
        // dispatched once, not again on the next poll
        assert_eq!(search.due_request(now + DEBOUNCE), None);
    }

    #[test]
    fn test_complete_publishes_results_and_fills_cache() {
        let now = Instant::now();
        let mut search = ExerciseSearch::new();

        search.set_query("Bench", now);
        let request = search.due_request(now + DEBOUNCE).unwrap();
        search.complete(&request, Ok(vec![catalog_exercise("Bench Press")]));

        assert_eq!(search.results(), [catalog_exercise("Bench Press")]);
        assert!(!search.is_loading());
        assert_eq!(search.error(), None);

        // same query, different case: served from the cache, no request
        search.set_query("bench", now);
        assert_eq!(search.due_request(now + DEBOUNCE), None);
        assert_eq!(search.results(), [catalog_exercise("Bench Press")]);
    }

    #[test]
    fn test_superseded_completion_is_dropped() {
        let now = Instant::now();
        let mut search = ExerciseSearch::new();

        search.set_query("bench", now);
        let stale = search.due_request(now + DEBOUNCE).unwrap();

        search.set_query("bench press", now + DEBOUNCE);
        search.complete(&stale, Ok(vec![catalog_exercise("Bench Press")]));

        assert!(search.results().is_empty());
        assert!(search.is_loading());
    }

    #[test]
    fn test_fetch_error_surfaces_as_message() {
        let now = Instant::now();
        let mut search = ExerciseSearch::new();

        search.set_query("bench", now);
        let request = search.due_request(now + DEBOUNCE).unwrap();
        search.complete(&request, Err(ReadError::Storage(StorageError::NoConnection)));

        assert!(search.results().is_empty());
        assert_eq!(search.error(), Some("no connection"));
        assert!(!search.is_loading());
    }
}
