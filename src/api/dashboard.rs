use axum::Json;
use axum::extract::State;
use tracing::error;

use crate::api::ApiResponse;
use crate::db::repository;
use crate::error::AppError;
use crate::models::DashboardStats;
use crate::state::AppState;

/// Fans out the five count queries concurrently and joins on all of them.
/// Any single failure fails the whole summary; no partial result leaves the
/// handler.
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let db = &state.db;

    let (mahasiswa, jurusan, fakultas, matakuliah, krs) = tokio::try_join!(
        repository::count_mahasiswa(db),
        repository::count_jurusan(db),
        repository::count_fakultas(db),
        repository::count_matakuliah(db),
        repository::count_enrolled_mahasiswa(db),
    )
    .map_err(|err| {
        error!("dashboard aggregation failed: {}", err);
        AppError::Aggregation
    })?;

    Ok(ApiResponse::data(DashboardStats {
        mahasiswa,
        jurusan,
        fakultas,
        matakuliah,
        krs,
    }))
}
