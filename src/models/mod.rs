pub mod dashboard;
pub mod jurusan;
pub mod krs;
pub mod mahasiswa;
pub mod matakuliah;
pub mod user;

pub use dashboard::DashboardStats;
pub use jurusan::{Jurusan, JurusanPayload};
pub use krs::{KrsPayload, KrsRow};
pub use mahasiswa::{Mahasiswa, MahasiswaPayload};
pub use matakuliah::{Matakuliah, MatakuliahPayload};
pub use user::{LoginPayload, LoginResponse, RegisterPayload, Role, User, UserProfile};
