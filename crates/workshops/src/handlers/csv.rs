use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use workshops_core::ids::generate_id;

use crate::{handlers::AppError, models::CsvResponse, orchestration::Orchestration};

/// Start a CSV export (POST /csv).
///
/// Responds `202 Accepted` with the tracking id as soon as the job is
/// queued; the export itself runs in the background.
pub async fn create_csv(
    State(orchestration): State<Arc<dyn Orchestration>>,
) -> Result<impl IntoResponse, AppError> {
    let tracking_id = generate_id();

    orchestration.create_csv(&tracking_id)?;

    tracing::info!(%tracking_id, "Accepted CSV export");

    Ok((StatusCode::ACCEPTED, Json(CsvResponse { tracking_id })))
}
