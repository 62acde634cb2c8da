use serde::Serialize;

/// Summary counts for the dashboard. `krs` counts distinct students with at
/// least one enrollment row, not raw rows.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub mahasiswa: i64,
    pub jurusan: i64,
    pub fakultas: i64,
    pub matakuliah: i64,
    pub krs: i64,
}
