pub mod health;

use std::path::Path;

use axum::{
    extract::OriginalUri,
    routing::{get, post, put},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::errors::AppError;
use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;

/// Unknown `/api/*` paths, and known paths hit with the wrong method, get a JSON 404
/// rather than the client shell.
async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

/// Static client files, with `index.html` served for any path that is not a file so
/// client-side routes resolve.
fn client_shell(static_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")))
}

pub fn build_router(state: AppState) -> Router {
    let shell = client_shell(&state.config.static_dir);

    let api = Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-cover-letter", post(generation::handle_generate))
        .route("/parse-job-posting", post(generation::handle_parse_posting))
        // Form session drafts
        .route(
            "/session/:id/user-info",
            put(session::handle_put_user_info).get(session::handle_get_user_info),
        )
        .route(
            "/session/:id/job-info",
            put(session::handle_put_job_info).get(session::handle_get_job_info),
        )
        .route("/session/:id/job-posting", post(session::handle_paste_posting))
        .route(
            "/session/:id/letter-options",
            get(session::handle_get_letter_options).patch(session::handle_update_letter_options),
        )
        .route("/session/:id/generate", post(session::handle_session_generate))
        .route(
            "/session/:id/cover-letter",
            get(session::handle_get_cover_letter),
        )
        // Applies to the routes registered above, so it must stay after them.
        .method_not_allowed_fallback(api_not_found)
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api)
        .fallback_service(shell)
        .with_state(state)
}
