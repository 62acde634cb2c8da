use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::ApiResponse;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Jurusan, JurusanPayload};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Jurusan>>>, AppError> {
    let rows = repository::fetch_jurusan(&state.db).await?;
    Ok(ApiResponse::data(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<JurusanPayload>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    req.validate()?;
    repository::insert_jurusan(&state.db, &req).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::message("Jurusan berhasil dibuat"),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<JurusanPayload>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    req.validate()?;
    repository::update_jurusan(&state.db, id, &req).await?;
    Ok(ApiResponse::message("Jurusan berhasil diupdate"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    repository::delete_jurusan(&state.db, id).await?;
    Ok(ApiResponse::message("Jurusan dihapus"))
}
