//! Cover letter generation — orchestrates one request end to end.
//!
//! Flow: validate → snapshot configuration → compile → completion call →
//!       (rate limited? substitute the fallback letter) → response.
//!
//! The only recovered failure is a rate-limited outcome, and recovery is a substitution,
//! not a retry. Auth and billing failures propagate as their own error classes.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::compiler::compile;
use crate::generation::fallback::fallback_letter;
use crate::llm_client::{CompletionError, CompletionService, Usage};
use crate::models::letter::{LetterConfiguration, MAX_FOCUS_AREAS};
use crate::models::profile::{CandidateProfile, JobProfile};

/// Result of one generation, shaped for the HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLetter {
    pub success: bool,
    pub cover_letter: String,
    pub usage: Usage,
    #[serde(rename = "demo_mode", skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<bool>,
}

/// Rejects requests whose required fields are blank or whose focus list is too long.
pub fn validate_inputs(
    candidate: &CandidateProfile,
    job: &JobProfile,
    config: &LetterConfiguration,
) -> Result<(), AppError> {
    let mut missing = candidate.missing_fields();
    missing.extend(job.missing_fields());
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let focus_count = config.snapshot().focus.len();
    if focus_count > MAX_FOCUS_AREAS {
        return Err(AppError::Validation(format!(
            "At most {MAX_FOCUS_AREAS} focus areas may be selected (got {focus_count})"
        )));
    }

    Ok(())
}

/// Generates a cover letter, substituting the fallback letter on a rate-limited outcome.
pub async fn generate_cover_letter(
    completion: &dyn CompletionService,
    candidate: &CandidateProfile,
    job: &JobProfile,
    config: &LetterConfiguration,
    expose_details: bool,
) -> Result<GeneratedLetter, AppError> {
    validate_inputs(candidate, job, config)?;

    let snapshot = config.snapshot();
    let request = compile(candidate, job, &snapshot);

    info!(
        "Generating cover letter: length={:?}, trust_mode={}, focus={}, max_tokens={}",
        snapshot.length,
        snapshot.trust_mode,
        snapshot.focus.len(),
        request.max_output_tokens
    );

    match completion.complete(&request).await {
        Ok(result) => {
            info!(
                "Cover letter generated: total_tokens={}",
                result.usage.total_tokens
            );
            Ok(GeneratedLetter {
                success: true,
                cover_letter: result.text,
                usage: result.usage,
                demo_mode: None,
            })
        }
        Err(CompletionError::RateLimited(msg)) => {
            warn!("Completion rate limited, using fallback letter: {msg}");
            Ok(GeneratedLetter {
                success: true,
                cover_letter: fallback_letter(candidate, job),
                usage: Usage::default(),
                demo_mode: Some(true),
            })
        }
        Err(e) => Err(AppError::from_completion(e, expose_details)),
    }
}
