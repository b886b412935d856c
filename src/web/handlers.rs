// POST /analyze — validate the request, run the engine, map failures.
//
// Boundary contract: requests missing an audit id or a page collection
// are rejected with 400 before the core runs; a malformed page is the
// core's one structured validation failure and maps to 422 so callers
// can tell a data defect apart from "nothing found".

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AnalysisError;
use crate::model::AuditRequest;
use crate::web::{api_error, AppState};

pub async fn analyze(State(state): State<AppState>, Json(request): Json<AuditRequest>) -> Response {
    if request.audit_id.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "audit_id is required");
    }
    if request.pages.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "pages must not be empty");
    }

    match state
        .analyzer
        .analyze(&request.audit_id, &request.pages, state.suggestion_limit)
    {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(AnalysisError::MalformedPage { url }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "error": "malformed_page",
                "url": url,
            })),
        )
            .into_response(),
    }
}
