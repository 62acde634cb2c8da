use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Account role, carried end-to-end: users table -> token claims -> request
/// context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nama_lengkap: String,
    pub username: String,
    // bcrypt hash, never serialized
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub created_at: String,
}

/// Sanitized profile returned by login; the hash never leaves the store.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub nama: String,
    pub username: String,
    pub role: Role,
}

impl UserProfile {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            nama: user.nama_lengkap.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterPayload {
    #[serde(default)]
    pub nama_lengkap: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.nama_lengkap.trim().is_empty()
            || self.username.trim().is_empty()
            || self.password.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Nama Lengkap, Username, dan Password wajib diisi!".to_string(),
            ));
        }
        Ok(())
    }
}
