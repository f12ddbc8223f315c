//! Axum route handlers for the stateless Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiJson, AppError};
use crate::generation::generator::{generate_cover_letter, GeneratedLetter};
use crate::generation::posting_parser::{extract, ExtractedPosting};
use crate::models::letter::LetterConfiguration;
use crate::models::profile::{CandidateProfile, JobProfile};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default, alias = "candidate")]
    pub user_info: Option<CandidateProfile>,
    #[serde(default, alias = "job")]
    pub job_info: Option<JobProfile>,
    #[serde(default, alias = "configuration")]
    pub letter_options: LetterConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct ParsePostingRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsePostingResponse {
    #[serde(flatten)]
    pub posting: ExtractedPosting,
    pub filled_fields: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-cover-letter
///
/// Compiles instructions from the submitted profiles and configuration and calls the
/// completion service. A rate-limited outcome returns the demo fallback letter.
pub async fn handle_generate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<GeneratedLetter>, AppError> {
    let (Some(candidate), Some(job)) = (request.user_info, request.job_info) else {
        return Err(AppError::Validation(
            "Missing required data: userInfo and jobInfo are required".to_string(),
        ));
    };

    let letter = generate_cover_letter(
        state.completion.as_ref(),
        &candidate,
        &job,
        &request.letter_options,
        state.config.expose_error_details,
    )
    .await?;

    Ok(Json(letter))
}

/// POST /api/parse-job-posting
///
/// Extracts company, title, and application URL from pasted posting text.
pub async fn handle_parse_posting(
    ApiJson(request): ApiJson<ParsePostingRequest>,
) -> Result<Json<ParsePostingResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let posting = extract(&request.text);
    let filled_fields = posting.filled_fields();

    Ok(Json(ParsePostingResponse {
        posting,
        filled_fields,
    }))
}
