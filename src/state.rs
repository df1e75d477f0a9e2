//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::openai::CompletionClient;

/// Application state shared across all handlers.
///
/// The completion client is constructed once at startup from the loaded
/// configuration and injected here; nothing in the process holds global
/// mutable client state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: SqlitePool,
    completion: CompletionClient,
}

impl AppState {
    /// Build the state from configuration and an established pool.
    #[must_use]
    pub fn new(config: AppConfig, pool: SqlitePool) -> Self {
        let completion = CompletionClient::new(config.completion());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                completion,
            }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// The database pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// The completion service client.
    #[must_use]
    pub fn completion(&self) -> &CompletionClient {
        &self.inner.completion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_send_sync() {
        fn assert_clone_send_sync<T: Clone + Send + Sync>() {}
        assert_clone_send_sync::<AppState>();
    }
}
