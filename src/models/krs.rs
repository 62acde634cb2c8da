use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Denormalized KRS list row. The joined mahasiswa/matakuliah/jurusan columns
/// stay null when a reference dangles; score columns are coalesced to 0 and
/// 'E' at the read boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KrsRow {
    pub id: i64,
    pub semester: i64,
    pub id_mahasiswa: i64,
    pub id_matakuliah: i64,
    pub nilai_tugas: f64,
    pub nilai_praktikum: f64,
    pub nilai_uts: f64,
    pub nilai_uas: f64,
    pub nilai_akhir: f64,
    pub nilai_huruf: String,
    pub nama_lengkap: Option<String>,
    pub nim: Option<String>,
    pub nama_mk: Option<String>,
    pub kode_mk: Option<String>,
    pub sks: Option<i64>,
    pub nama_jurusan: Option<String>,
    pub fakultas: Option<String>,
    pub jenjang: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KrsPayload {
    pub id_mahasiswa: Option<i64>,
    pub id_matakuliah: Option<i64>,
    pub semester: Option<i64>,
    pub nilai_tugas: Option<f64>,
    pub nilai_praktikum: Option<f64>,
    pub nilai_uts: Option<f64>,
    pub nilai_uas: Option<f64>,
}

impl KrsPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.id_mahasiswa.is_none() || self.id_matakuliah.is_none() || self.semester.is_none() {
            return Err(AppError::Validation(
                "Mahasiswa, Matakuliah, dan Semester wajib diisi!".to_string(),
            ));
        }
        Ok(())
    }
}
