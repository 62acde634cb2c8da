use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// List view row: mahasiswa left-joined with jurusan, so nama_jurusan is
/// null when the major reference is missing or dangling.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mahasiswa {
    pub id: i64,
    pub nim: String,
    pub nama_lengkap: String,
    pub email: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub tanggal_lahir: Option<String>,
    pub id_jurusan: Option<i64>,
    pub nama_jurusan: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MahasiswaPayload {
    #[serde(default)]
    pub nim: String,
    #[serde(default)]
    pub nama_lengkap: String,
    pub email: Option<String>,
    pub jenis_kelamin: Option<String>,
    pub tanggal_lahir: Option<String>,
    pub id_jurusan: Option<i64>,
}

impl MahasiswaPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.nim.trim().is_empty() || self.nama_lengkap.trim().is_empty() {
            return Err(AppError::Validation(
                "NIM dan Nama Lengkap wajib diisi!".to_string(),
            ));
        }
        Ok(())
    }
}
