use crate::db::SqlBackend;
use crate::history::ChatHistory;

/// Everything one conversation owns: the live database handle and the
/// append-only transcript. Passed explicitly into every chain invocation
/// rather than living in ambient global state.
pub struct SessionState {
    pub backend: Box<dyn SqlBackend + Send + Sync>,
    pub history: ChatHistory,
}

impl SessionState {
    pub fn new(backend: Box<dyn SqlBackend + Send + Sync>) -> Self {
        Self {
            backend,
            history: ChatHistory::with_greeting(),
        }
    }
}
