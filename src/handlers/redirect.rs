//! Fixed-code redirect handlers.
//!
//! Each endpoint unconditionally redirects to the configured landing page
//! with its documented status code, so an edge configuration can observe
//! how each 3xx variant is cached and replayed.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

fn redirect_to_final(state: &AppState, status: StatusCode) -> Response {
    (
        status,
        [(header::LOCATION, state.config.site.final_path.clone())],
    )
        .into_response()
}

/// `GET /r/301`: permanent, method may change on replay.
pub async fn moved_permanently(State(state): State<AppState>) -> Response {
    redirect_to_final(&state, StatusCode::MOVED_PERMANENTLY)
}

/// `GET /r/302`: temporary, method may change on replay.
pub async fn found(State(state): State<AppState>) -> Response {
    redirect_to_final(&state, StatusCode::FOUND)
}

/// `GET /r/307`: temporary, method preserved.
pub async fn temporary_redirect(State(state): State<AppState>) -> Response {
    redirect_to_final(&state, StatusCode::TEMPORARY_REDIRECT)
}

/// `GET /r/308`: permanent, method preserved.
pub async fn permanent_redirect(State(state): State<AppState>) -> Response {
    redirect_to_final(&state, StatusCode::PERMANENT_REDIRECT)
}
