use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::ApiResponse;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{KrsPayload, KrsRow};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<KrsRow>>>, AppError> {
    let rows = repository::fetch_krs(&state.db).await?;
    Ok(ApiResponse::data(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<KrsPayload>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    req.validate()?;
    repository::insert_krs(&state.db, &req).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::message("Data KRS berhasil disimpan"),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<KrsPayload>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    req.validate()?;
    repository::update_krs(&state.db, id, &req).await?;
    Ok(ApiResponse::message("Data KRS berhasil diupdate"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    repository::delete_krs(&state.db, id).await?;
    Ok(ApiResponse::message("Data KRS dihapus"))
}
