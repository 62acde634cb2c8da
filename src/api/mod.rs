pub mod auth;
pub mod dashboard;
pub mod jurusan;
pub mod krs;
pub mod mahasiswa;
pub mod matakuliah;

use axum::middleware;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::error::AppError;
use crate::state::AppState;

/// JSON envelope shared by every endpoint:
/// `{ success, message?, data? }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data: Some(data),
        })
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.to_string()),
            data: None,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/mahasiswa", get(mahasiswa::list).post(mahasiswa::create))
        .route(
            "/api/mahasiswa/{id}",
            put(mahasiswa::update).delete(mahasiswa::remove),
        )
        .route("/api/jurusan", get(jurusan::list).post(jurusan::create))
        .route(
            "/api/jurusan/{id}",
            put(jurusan::update).delete(jurusan::remove),
        )
        .route(
            "/api/matakuliah",
            get(matakuliah::list).post(matakuliah::create),
        )
        .route(
            "/api/matakuliah/{id}",
            put(matakuliah::update).delete(matakuliah::remove),
        )
        .route("/api/krs", get(krs::list).post(krs::create))
        .route("/api/krs/{id}", put(krs::update).delete(krs::remove))
        .route("/api/dashboard", get(dashboard::stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .merge(protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
