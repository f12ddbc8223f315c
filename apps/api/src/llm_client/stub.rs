//! Canned `CompletionService` for handler and pipeline tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::generation::compiler::CompletionRequest;
use crate::llm_client::{Completion, CompletionError, CompletionService, Usage};

#[derive(Debug, Clone)]
pub enum StubOutcome {
    Text(String),
    RateLimited,
    InvalidCredentials,
    InsufficientQuota,
    ServerError,
}

pub struct StubCompletion {
    outcome: StubOutcome,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletion {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(StubOutcome::Text(text.to_string()))
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            StubOutcome::Text(text) => Ok(Completion {
                text: text.clone(),
                usage: Usage {
                    prompt_tokens: 120,
                    completion_tokens: 40,
                    total_tokens: 160,
                },
            }),
            StubOutcome::RateLimited => Err(CompletionError::RateLimited(
                "Rate limit reached".to_string(),
            )),
            StubOutcome::InvalidCredentials => Err(CompletionError::InvalidCredentials(
                "Incorrect API key provided".to_string(),
            )),
            StubOutcome::InsufficientQuota => Err(CompletionError::InsufficientQuota(
                "You exceeded your current quota".to_string(),
            )),
            StubOutcome::ServerError => Err(CompletionError::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            }),
        }
    }
}
