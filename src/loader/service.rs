//! Load-once, share-concurrently access to the backend config.
//!
//! # States
//! ```text
//! Empty ──load()──▶ Loading ──ok──▶ Ready
//!                      │
//!                      └──err / abort──▶ Empty
//! ```
//!
//! Callers arriving while `Loading` await the same shared fetch. `Ready` is
//! terminal for the lifetime of the loader.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::backend::types::BackendConfig;
use crate::loader::error::{ConfigLoadError, LoadResult};
use crate::loader::source::ConfigSource;
use crate::observability::metrics;

type SharedFetch = Shared<BoxFuture<'static, LoadResult<Arc<BackendConfig>>>>;

enum LoaderState {
    Empty,
    Loading { id: u64, fetch: SharedFetch },
    Ready(Arc<BackendConfig>),
}

/// Observable phase of a [`ConfigLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Empty,
    Loading,
    Ready,
}

struct LoaderInner {
    source: Box<dyn ConfigSource>,
    state: Mutex<LoaderState>,
    next_fetch_id: AtomicU64,
}

impl LoaderInner {
    fn state(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop back to `Empty` if fetch `id` still owns the `Loading` state.
    fn abandon_fetch(&self, id: u64) {
        let mut state = self.state();
        if matches!(*state, LoaderState::Loading { id: current, .. } if current == id) {
            tracing::warn!(fetch_id = id, "Backend config fetch aborted");
            metrics::record_config_fetch("aborted");
            *state = LoaderState::Empty;
        }
    }
}

/// Shared handle to the backend config.
///
/// Cloning is cheap; all clones observe the same cache and in-flight fetch.
#[derive(Clone)]
pub struct ConfigLoader {
    inner: Arc<LoaderInner>,
}

impl ConfigLoader {
    pub fn new<S: ConfigSource>(source: S) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                source: Box::new(source),
                state: Mutex::new(LoaderState::Empty),
                next_fetch_id: AtomicU64::new(0),
            }),
        }
    }

    /// Return the backend config, fetching it if nobody has yet.
    ///
    /// Must be called from within a Tokio runtime: the fetch is spawned so
    /// it completes even if every caller stops waiting.
    pub async fn load(&self) -> LoadResult<Arc<BackendConfig>> {
        let pending = {
            let mut state = self.inner.state();
            match &*state {
                LoaderState::Ready(config) => return Ok(Arc::clone(config)),
                LoaderState::Loading { fetch, .. } => fetch.clone(),
                LoaderState::Empty => {
                    let id = self.inner.next_fetch_id.fetch_add(1, Ordering::Relaxed);
                    let fetch = self.start_fetch(id);
                    *state = LoaderState::Loading {
                        id,
                        fetch: fetch.clone(),
                    };
                    fetch
                }
            }
        };
        pending.await
    }

    /// The cached config, if a load already succeeded.
    pub fn cached(&self) -> Option<Arc<BackendConfig>> {
        match &*self.inner.state() {
            LoaderState::Ready(config) => Some(Arc::clone(config)),
            _ => None,
        }
    }

    pub fn phase(&self) -> LoaderPhase {
        match &*self.inner.state() {
            LoaderState::Empty => LoaderPhase::Empty,
            LoaderState::Loading { .. } => LoaderPhase::Loading,
            LoaderState::Ready(_) => LoaderPhase::Ready,
        }
    }

    // Called with the state lock held. The spawned task takes the same lock
    // to publish its outcome, so it cannot overtake the `Loading` write.
    fn start_fetch(&self, id: u64) -> SharedFetch {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            // Created on first poll: a task dropped unpolled never runs it
            // while the caller still holds the state lock.
            let mut guard = FetchGuard {
                inner: Arc::clone(&inner),
                id,
                published: false,
            };
            let result = inner.source.fetch().await.map(Arc::new);
            let next = match &result {
                Ok(config) => {
                    tracing::info!(project_id = %config.project_id, "Backend config loaded");
                    metrics::record_config_fetch("ok");
                    LoaderState::Ready(Arc::clone(config))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Backend config load failed");
                    metrics::record_config_fetch(outcome_label(e));
                    LoaderState::Empty
                }
            };
            *inner.state() = next;
            guard.published = true;
            result
        });

        let inner = Arc::clone(&self.inner);
        async move {
            task.await.unwrap_or_else(|e| {
                inner.abandon_fetch(id);
                Err(ConfigLoadError::Transport {
                    status: None,
                    status_text: format!("config fetch task failed: {}", e),
                })
            })
        }
        .boxed()
        .shared()
    }
}

/// Releases the `Loading` state when a fetch task ends without publishing,
/// i.e. the source panicked or the runtime dropped the task.
struct FetchGuard {
    inner: Arc<LoaderInner>,
    id: u64,
    published: bool,
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        if !self.published {
            self.inner.abandon_fetch(self.id);
        }
    }
}

fn outcome_label(err: &ConfigLoadError) -> &'static str {
    match err {
        ConfigLoadError::Transport { .. } => "transport_error",
        ConfigLoadError::Decode(_) => "decode_error",
        ConfigLoadError::Validation(_) => "validation_error",
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("phase", &self.phase())
            .finish()
    }
}
