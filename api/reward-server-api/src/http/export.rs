use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::AppState;

/// Streams the player level report as CSV, page by page. A storage failure
/// after the first chunk aborts the body since the status is already sent.
pub async fn player_levels_csv(State(app_state): State<AppState>) -> Response {
    let stream = app_state.app.player_levels_export_use_case.export();

    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"player_levels.csv\"",
            ),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}
