use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use job_board::board::auth::TokenIssuer;
use job_board::board::store::MemoryStore;
use job_board::board::BoardState;
use job_board::config::AuthConfig;
use metrics_exporter_prometheus::PrometheusHandle;

/// Process-level state for the operational endpoints.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Board services over a fresh in-memory store.
pub(crate) fn in_memory_board(auth: &AuthConfig) -> BoardState<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let tokens = Arc::new(TokenIssuer::from_config(auth));
    BoardState::new(store, tokens)
}
