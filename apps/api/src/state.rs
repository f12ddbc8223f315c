use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::session::store::KeyValueStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `OpenAiClient` in production, a stub in tests.
    pub completion: Arc<dyn CompletionService>,
    /// Per-session form drafts. In-process only; nothing outlives the server.
    pub sessions: Arc<dyn KeyValueStore>,
    pub config: Config,
}
