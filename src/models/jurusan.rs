use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Jurusan {
    pub id: i64,
    pub kode_jurusan: String,
    pub nama_jurusan: String,
    pub fakultas: String,
    pub jenjang: String,
}

/// Full-replace payload: create and update write every column.
#[derive(Debug, Clone, Deserialize)]
pub struct JurusanPayload {
    #[serde(default)]
    pub kode_jurusan: String,
    #[serde(default)]
    pub nama_jurusan: String,
    #[serde(default)]
    pub fakultas: String,
    #[serde(default)]
    pub jenjang: String,
}

impl JurusanPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.kode_jurusan.trim().is_empty()
            || self.nama_jurusan.trim().is_empty()
            || self.fakultas.trim().is_empty()
            || self.jenjang.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Semua data (Kode, Nama, Fakultas, Jenjang) wajib diisi!".to_string(),
            ));
        }
        Ok(())
    }
}
