//! Environment lookup for backend credentials.
//!
//! Every value is looked up under a primary name (the `VITE_`-prefixed
//! variable a bundler would expose) and then a fallback name. Empty values
//! count as unset.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::types::BackendConfig;

/// A primary/fallback pair of environment variable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvKey {
    pub primary: &'static str,
    pub fallback: &'static str,
}

pub const API_KEY: EnvKey = EnvKey {
    primary: "VITE_FIREBASE_API_KEY",
    fallback: "FIREBASE_API_KEY",
};

pub const PROJECT_ID: EnvKey = EnvKey {
    primary: "VITE_FIREBASE_PROJECT_ID",
    fallback: "FIREBASE_PROJECT_ID",
};

pub const AUTH_DOMAIN: EnvKey = EnvKey {
    primary: "VITE_FIREBASE_AUTH_DOMAIN",
    fallback: "FIREBASE_AUTH_DOMAIN",
};

pub const STORAGE_BUCKET: EnvKey = EnvKey {
    primary: "VITE_FIREBASE_STORAGE_BUCKET",
    fallback: "FIREBASE_STORAGE_BUCKET",
};

pub const MESSAGING_SENDER_ID: EnvKey = EnvKey {
    primary: "VITE_FIREBASE_MESSAGING_SENDER_ID",
    fallback: "FIREBASE_MESSAGING_SENDER_ID",
};

pub const APP_ID: EnvKey = EnvKey {
    primary: "VITE_FIREBASE_APP_ID",
    fallback: "FIREBASE_APP_ID",
};

type Lookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Source of environment variables.
///
/// The process environment in production; a fixed map in tests.
#[derive(Clone)]
pub struct Environment {
    lookup: Arc<Lookup>,
}

impl Environment {
    /// Read from the process environment at lookup time.
    pub fn process() -> Self {
        Self {
            lookup: Arc::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Read from a fixed set of variables.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            lookup: Arc::new(move |name: &str| vars.get(name).cloned()),
        }
    }

    /// An environment with no variables set.
    pub fn empty() -> Self {
        Self {
            lookup: Arc::new(|_: &str| None::<String>),
        }
    }

    /// Resolve a key, preferring the primary name.
    pub fn get(&self, key: EnvKey) -> Option<String> {
        self.non_empty(key.primary)
            .or_else(|| self.non_empty(key.fallback))
    }

    fn non_empty(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.is_empty())
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish_non_exhaustive()
    }
}

/// Outcome of resolving backend credentials from the environment.
#[derive(Debug)]
pub enum EnvResolution {
    Complete(BackendConfig),
    /// Names of the required keys (primary form) that were not set.
    Missing(Vec<&'static str>),
}

/// Resolve the backend config from the environment.
pub fn resolve_backend_config(env: &Environment) -> EnvResolution {
    let api_key = env.get(API_KEY);
    let project_id = env.get(PROJECT_ID);

    match (api_key, project_id) {
        (Some(api_key), Some(project_id)) => EnvResolution::Complete(BackendConfig {
            api_key,
            project_id,
            auth_domain: env.get(AUTH_DOMAIN),
            storage_bucket: env.get(STORAGE_BUCKET),
            messaging_sender_id: env.get(MESSAGING_SENDER_ID),
            app_id: env.get(APP_ID),
        }),
        (api_key, project_id) => {
            let mut missing = Vec::new();
            if api_key.is_none() {
                missing.push(API_KEY.primary);
            }
            if project_id.is_none() {
                missing.push(PROJECT_ID.primary);
            }
            EnvResolution::Missing(missing)
        }
    }
}
