use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

const KODE_MK_MIN_LEN: usize = 8;
const KODE_MK_MAX_LEN: usize = 12;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Matakuliah {
    pub id: i64,
    pub kode_mk: String,
    pub nama_mk: String,
    pub sks: i64,
    pub semester: i64,
    // NULL for general courses that belong to no single major
    pub id_jurusan: Option<i64>,
    pub nama_jurusan: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatakuliahPayload {
    #[serde(default)]
    pub kode_mk: String,
    #[serde(default)]
    pub nama_mk: String,
    pub sks: Option<i64>,
    pub semester: Option<i64>,
    pub id_jurusan: Option<i64>,
}

impl MatakuliahPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        let kode_len = self.kode_mk.trim().chars().count();
        if !(KODE_MK_MIN_LEN..=KODE_MK_MAX_LEN).contains(&kode_len) {
            return Err(AppError::Validation(
                "Kode MK harus 8-12 karakter!".to_string(),
            ));
        }
        if self.nama_mk.trim().is_empty() || self.sks.is_none() || self.semester.is_none() {
            return Err(AppError::Validation(
                "Semua data (Kode, Nama, SKS, Semester) wajib diisi!".to_string(),
            ));
        }
        Ok(())
    }
}
