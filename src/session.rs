use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{MovieId, RecommendationSet, DEFAULT_RECOMMENDATIONS};

/// Result of the last "Get Recommendations" action in a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResults {
    /// Title the user picked, even when it matched nothing
    pub selected_title: String,
    /// `None` when the title is not in the movie table
    pub set: Option<RecommendationSet>,
}

/// Interaction state of one browser session.
///
/// A session only holds results once a selection has been made; toggles are
/// reset whenever new results are stored.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub results: Option<SessionResults>,
    pub last_count: usize,
    pub show_original_details: bool,
    /// Recommendation panels currently expanded, keyed by movie id
    pub expanded: HashSet<MovieId>,
    pub(crate) last_seen: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            results: None,
            last_count: DEFAULT_RECOMMENDATIONS,
            show_original_details: false,
            expanded: HashSet::new(),
            last_seen: Instant::now(),
        }
    }
}

impl SessionState {
    pub fn is_expanded(&self, id: MovieId) -> bool {
        self.expanded.contains(&id)
    }
}

/// In-process session registry.
///
/// Sessions never share state; each one is addressed by its own id.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionState>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Copy of the session's state, or a fresh state for unknown ids
    pub async fn snapshot(&self, id: Uuid) -> SessionState {
        self.with_session(id, |session| session.clone()).await
    }

    /// Replaces the session's results and collapses every panel
    pub async fn store_results(&self, id: Uuid, results: SessionResults, count: usize) {
        self.with_session(id, |session| {
            session.results = Some(results);
            session.last_count = count;
            session.show_original_details = false;
            session.expanded.clear();
        })
        .await
    }

    /// Flips the selected movie's detail panel; returns the new state
    pub async fn toggle_original_details(&self, id: Uuid) -> bool {
        self.with_session(id, |session| {
            session.show_original_details = !session.show_original_details;
            session.show_original_details
        })
        .await
    }

    /// Flips one recommendation's detail panel; returns the new state
    pub async fn toggle_details(&self, id: Uuid, movie_id: MovieId) -> bool {
        self.with_session(id, |session| {
            if session.expanded.remove(&movie_id) {
                false
            } else {
                session.expanded.insert(movie_id);
                true
            }
        })
        .await
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut sessions = self.inner.write().await;

        if !sessions.contains_key(&id) {
            let before = sessions.len();
            let timeout = self.idle_timeout;
            sessions.retain(|_, s| s.last_seen.elapsed() < timeout);
            let purged = before - sessions.len();
            if purged > 0 {
                tracing::debug!(purged, "Dropped idle sessions");
            }
        }

        let session = sessions.entry(id).or_default();
        session.last_seen = Instant::now();
        f(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn test_new_session_has_no_results() {
        let sessions = store();
        let state = sessions.snapshot(Uuid::new_v4()).await;
        assert!(state.results.is_none());
        assert_eq!(state.last_count, DEFAULT_RECOMMENDATIONS);
        assert!(!state.show_original_details);
    }

    #[tokio::test]
    async fn test_toggle_details_flips() {
        let sessions = store();
        let id = Uuid::new_v4();

        assert!(sessions.toggle_details(id, MovieId(7)).await);
        assert!(sessions.snapshot(id).await.is_expanded(MovieId(7)));
        assert!(!sessions.toggle_details(id, MovieId(7)).await);
        assert!(!sessions.snapshot(id).await.is_expanded(MovieId(7)));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let sessions = store();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        sessions.toggle_original_details(a).await;
        assert!(sessions.snapshot(a).await.show_original_details);
        assert!(!sessions.snapshot(b).await.show_original_details);
        assert_eq!(sessions.len().await, 2);
    }

    #[tokio::test]
    async fn test_store_results_resets_toggles() {
        let sessions = store();
        let id = Uuid::new_v4();
        sessions.toggle_original_details(id).await;
        sessions.toggle_details(id, MovieId(1)).await;

        let results = SessionResults {
            selected_title: "Heat".to_string(),
            set: None,
        };
        sessions.store_results(id, results.clone(), 3).await;

        let state = sessions.snapshot(id).await;
        assert_eq!(state.results, Some(results));
        assert_eq!(state.last_count, 3);
        assert!(!state.show_original_details);
        assert!(state.expanded.is_empty());
    }

    #[tokio::test]
    async fn test_idle_sessions_purged_when_new_session_created() {
        let sessions = SessionStore::new(Duration::ZERO);
        sessions.toggle_original_details(Uuid::new_v4()).await;
        sessions.toggle_original_details(Uuid::new_v4()).await;
        assert_eq!(sessions.len().await, 1);
    }
}
