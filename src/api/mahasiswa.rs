use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::ApiResponse;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Mahasiswa, MahasiswaPayload};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Mahasiswa>>>, AppError> {
    let rows = repository::fetch_mahasiswa(&state.db).await?;
    Ok(ApiResponse::data(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<MahasiswaPayload>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    req.validate()?;
    repository::insert_mahasiswa(&state.db, &req).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::message("Berhasil tambah data"),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<MahasiswaPayload>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    req.validate()?;
    repository::update_mahasiswa(&state.db, id, &req).await?;
    Ok(ApiResponse::message("Berhasil update data"))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    repository::delete_mahasiswa(&state.db, id).await?;
    Ok(ApiResponse::message("Berhasil hapus data"))
}
