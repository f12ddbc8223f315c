use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiJson, AppError};
use crate::generation::generator::{generate_cover_letter, GeneratedLetter};
use crate::generation::posting_parser::extract;
use crate::models::letter::{FocusArea, LetterConfiguration, LetterLength, MAX_FOCUS_AREAS};
use crate::models::profile::{CandidateProfile, JobProfile};
use crate::session::{FormSession, FormStep, SessionError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PastePostingRequest {
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PastePostingResponse {
    pub job_info: JobProfile,
    pub filled_fields: Vec<&'static str>,
}

/// Changes applied in order: trust mode, then length, then focus toggle.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterOptionsUpdate {
    pub trust_mode: Option<bool>,
    pub length: Option<LetterLength>,
    pub toggle_focus: Option<FocusArea>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// PUT /api/session/:id/user-info
pub async fn handle_put_user_info(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    ApiJson(candidate): ApiJson<CandidateProfile>,
) -> Result<Json<CandidateProfile>, AppError> {
    let missing = candidate.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    FormSession::new(state.sessions.as_ref(), &session_id).save_candidate(&candidate)?;
    Ok(Json(candidate))
}

/// GET /api/session/:id/user-info
pub async fn handle_get_user_info(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CandidateProfile>, AppError> {
    FormSession::new(state.sessions.as_ref(), &session_id)
        .candidate()?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No user info saved for session {session_id}")))
}

/// PUT /api/session/:id/job-info
pub async fn handle_put_job_info(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    ApiJson(job): ApiJson<JobProfile>,
) -> Result<Json<JobProfile>, AppError> {
    let session = FormSession::new(state.sessions.as_ref(), &session_id);
    // Step order is checked before field completeness.
    if session.candidate()?.is_none() {
        return Err(SessionError::StepMissing(FormStep::UserInfo).into());
    }

    let missing = job.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    session.save_job(&job)?;
    Ok(Json(job))
}

/// GET /api/session/:id/job-info
pub async fn handle_get_job_info(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<JobProfile>, AppError> {
    FormSession::new(state.sessions.as_ref(), &session_id)
        .job()?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No job info saved for session {session_id}")))
}

/// POST /api/session/:id/job-posting
///
/// Extracts fields from pasted posting text and merges them into the stored job draft.
/// Extracted values only fill blank fields; the draft is saved even if still incomplete.
pub async fn handle_paste_posting(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    ApiJson(request): ApiJson<PastePostingRequest>,
) -> Result<Json<PastePostingResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let session = FormSession::new(state.sessions.as_ref(), &session_id);
    let mut job = session.job()?.unwrap_or_default();

    let posting = extract(&request.text);
    posting.merge_into(&mut job, &request.text);
    session.save_job(&job)?;

    Ok(Json(PastePostingResponse {
        job_info: job,
        filled_fields: posting.filled_fields(),
    }))
}

/// GET /api/session/:id/letter-options
pub async fn handle_get_letter_options(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<LetterConfiguration>, AppError> {
    let options = FormSession::new(state.sessions.as_ref(), &session_id).letter_options()?;
    Ok(Json(options))
}

/// PATCH /api/session/:id/letter-options
///
/// Nothing is saved if any part of the update is refused.
pub async fn handle_update_letter_options(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    ApiJson(update): ApiJson<LetterOptionsUpdate>,
) -> Result<Json<LetterConfiguration>, AppError> {
    let session = FormSession::new(state.sessions.as_ref(), &session_id);
    let mut options = session.letter_options()?;

    if let Some(enabled) = update.trust_mode {
        options.set_trust_mode(enabled);
    }
    if let Some(length) = update.length {
        if !options.set_length(length) {
            return Err(AppError::Validation(
                "Length is chosen automatically in trust mode".to_string(),
            ));
        }
    }
    if let Some(area) = update.toggle_focus {
        if !options.toggle_focus(area) {
            let reason = if options.trust_mode {
                "Focus areas are chosen automatically in trust mode".to_string()
            } else {
                format!("You can select up to {MAX_FOCUS_AREAS} key focus areas")
            };
            return Err(AppError::Validation(reason));
        }
    }

    session.save_letter_options(&options)?;
    Ok(Json(options))
}

/// POST /api/session/:id/generate
///
/// Generates from the stored drafts using a snapshot of the current letter options,
/// and keeps the result for later retrieval.
pub async fn handle_session_generate(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GeneratedLetter>, AppError> {
    let session = FormSession::new(state.sessions.as_ref(), &session_id);
    let (candidate, job) = session.generation_inputs()?;
    let config = session.letter_options()?.snapshot();

    let letter = generate_cover_letter(
        state.completion.as_ref(),
        &candidate,
        &job,
        &config,
        state.config.expose_error_details,
    )
    .await?;

    session.save_cover_letter(&letter.cover_letter);
    Ok(Json(letter))
}

/// GET /api/session/:id/cover-letter
pub async fn handle_get_cover_letter(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    FormSession::new(state.sessions.as_ref(), &session_id)
        .cover_letter()
        .map(|cover_letter| Json(CoverLetterResponse { cover_letter }))
        .ok_or_else(|| {
            AppError::NotFound(format!("No cover letter generated for session {session_id}"))
        })
}
