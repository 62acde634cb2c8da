use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::ApiResponse;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Matakuliah, MatakuliahPayload};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Matakuliah>>>, AppError> {
    let rows = repository::fetch_matakuliah(&state.db).await?;
    Ok(ApiResponse::data(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<MatakuliahPayload>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    req.validate()?;
    repository::insert_matakuliah(&state.db, &req).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::message("Matakuliah berhasil disimpan"),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<MatakuliahPayload>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    req.validate()?;
    repository::update_matakuliah(&state.db, id, &req).await?;
    Ok(ApiResponse::message("Matakuliah berhasil diupdate"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    repository::delete_matakuliah(&state.db, id).await?;
    Ok(ApiResponse::message("Matakuliah berhasil dihapus"))
}
