use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, warn};

use crate::api::ApiResponse;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{LoginPayload, LoginResponse, RegisterPayload, Role, UserProfile};
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = repository::find_user_by_username(&state.db, &req.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let matches = bcrypt::verify(&req.password, &user.password)
        .map_err(|_| AppError::InternalServerError)?;
    if !matches {
        warn!("failed login attempt for {}", req.username);
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .jwt
        .issue(&user)
        .map_err(|_| AppError::InternalServerError)?;

    info!("login berhasil: {}", user.username);

    Ok(Json(LoginResponse {
        success: true,
        message: "Login berhasil".to_string(),
        token,
        user: UserProfile::from_user(&user),
    }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), AppError> {
    req.validate()?;

    if repository::find_user_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(AppError::Duplicate("Username sudah digunakan!".to_string()));
    }

    let hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|_| AppError::InternalServerError)?;

    repository::insert_user(&state.db, &req.nama_lengkap, &req.username, &hash, Role::Admin)
        .await?;

    info!("akun baru terdaftar: {}", req.username);

    Ok((
        StatusCode::CREATED,
        ApiResponse::message("Registrasi berhasil! Silakan login."),
    ))
}
