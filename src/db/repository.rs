use sqlx::SqlitePool;

use crate::error::AppError;
use crate::grade;
use crate::models::{
    Jurusan, JurusanPayload, KrsPayload, KrsRow, Mahasiswa, MahasiswaPayload, Matakuliah,
    MatakuliahPayload, Role, User,
};

/// Unique-constraint violations get a domain message instead of surfacing as
/// a generic store failure.
fn map_unique(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Duplicate(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

// ---------------------------------------------------------------------------
// users

pub async fn find_user_by_username(
    db: &SqlitePool,
    username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, nama_lengkap, username, password, role, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(db)
    .await?;

    Ok(user)
}

pub async fn insert_user(
    db: &SqlitePool,
    nama_lengkap: &str,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO users (nama_lengkap, username, password, role, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(nama_lengkap)
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(db)
    .await
    .map_err(|e| map_unique(e, "Username sudah digunakan!"))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// jurusan

pub async fn fetch_jurusan(db: &SqlitePool) -> Result<Vec<Jurusan>, AppError> {
    let rows = sqlx::query_as::<_, Jurusan>(
        "SELECT id, kode_jurusan, nama_jurusan, fakultas, jenjang FROM jurusan ORDER BY kode_jurusan ASC",
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn insert_jurusan(db: &SqlitePool, req: &JurusanPayload) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO jurusan (kode_jurusan, nama_jurusan, fakultas, jenjang) VALUES (?, ?, ?, ?)",
    )
    .bind(&req.kode_jurusan)
    .bind(&req.nama_jurusan)
    .bind(&req.fakultas)
    .bind(&req.jenjang)
    .execute(db)
    .await
    .map_err(|e| map_unique(e, "Kode Jurusan sudah digunakan!"))?;

    Ok(())
}

pub async fn update_jurusan(
    db: &SqlitePool,
    id: i64,
    req: &JurusanPayload,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE jurusan SET kode_jurusan = ?, nama_jurusan = ?, fakultas = ?, jenjang = ? WHERE id = ?",
    )
    .bind(&req.kode_jurusan)
    .bind(&req.nama_jurusan)
    .bind(&req.fakultas)
    .bind(&req.jenjang)
    .bind(id)
    .execute(db)
    .await
    .map_err(|e| map_unique(e, "Kode Jurusan sudah digunakan!"))?;

    Ok(())
}

// Idempotent: no existence check, deleting a missing id is a no-op success.
pub async fn delete_jurusan(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM jurusan WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// mahasiswa

pub async fn fetch_mahasiswa(db: &SqlitePool) -> Result<Vec<Mahasiswa>, AppError> {
    let rows = sqlx::query_as::<_, Mahasiswa>(
        r#"
        SELECT
            m.id,
            m.nim,
            m.nama_lengkap,
            m.email,
            m.jenis_kelamin,
            m.tanggal_lahir,
            m.id_jurusan,
            j.nama_jurusan
        FROM mahasiswa m
        LEFT JOIN jurusan j ON m.id_jurusan = j.id
        ORDER BY m.id DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn insert_mahasiswa(db: &SqlitePool, req: &MahasiswaPayload) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO mahasiswa (nim, nama_lengkap, email, id_jurusan, jenis_kelamin, tanggal_lahir)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.nim)
    .bind(&req.nama_lengkap)
    .bind(&req.email)
    .bind(req.id_jurusan)
    .bind(&req.jenis_kelamin)
    .bind(&req.tanggal_lahir)
    .execute(db)
    .await
    .map_err(|e| map_unique(e, "NIM sudah terdaftar!"))?;

    Ok(())
}

pub async fn update_mahasiswa(
    db: &SqlitePool,
    id: i64,
    req: &MahasiswaPayload,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE mahasiswa
        SET nim = ?, nama_lengkap = ?, email = ?, id_jurusan = ?, jenis_kelamin = ?, tanggal_lahir = ?
        WHERE id = ?
        "#,
    )
    .bind(&req.nim)
    .bind(&req.nama_lengkap)
    .bind(&req.email)
    .bind(req.id_jurusan)
    .bind(&req.jenis_kelamin)
    .bind(&req.tanggal_lahir)
    .bind(id)
    .execute(db)
    .await
    .map_err(|e| map_unique(e, "NIM sudah terdaftar!"))?;

    Ok(())
}

pub async fn delete_mahasiswa(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM mahasiswa WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// matakuliah

pub async fn fetch_matakuliah(db: &SqlitePool) -> Result<Vec<Matakuliah>, AppError> {
    let rows = sqlx::query_as::<_, Matakuliah>(
        r#"
        SELECT
            mk.id,
            mk.kode_mk,
            mk.nama_mk,
            mk.sks,
            mk.semester,
            mk.id_jurusan,
            j.nama_jurusan
        FROM matakuliah mk
        LEFT JOIN jurusan j ON mk.id_jurusan = j.id
        ORDER BY mk.semester ASC, j.nama_jurusan ASC, mk.nama_mk ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn insert_matakuliah(db: &SqlitePool, req: &MatakuliahPayload) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO matakuliah (kode_mk, nama_mk, sks, semester, id_jurusan) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&req.kode_mk)
    .bind(&req.nama_mk)
    .bind(req.sks)
    .bind(req.semester)
    .bind(req.id_jurusan)
    .execute(db)
    .await
    .map_err(|e| map_unique(e, "Kode MK sudah digunakan!"))?;

    Ok(())
}

pub async fn update_matakuliah(
    db: &SqlitePool,
    id: i64,
    req: &MatakuliahPayload,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE matakuliah SET kode_mk = ?, nama_mk = ?, sks = ?, semester = ?, id_jurusan = ? WHERE id = ?",
    )
    .bind(&req.kode_mk)
    .bind(&req.nama_mk)
    .bind(req.sks)
    .bind(req.semester)
    .bind(req.id_jurusan)
    .bind(id)
    .execute(db)
    .await
    .map_err(|e| map_unique(e, "Kode MK sudah digunakan!"))?;

    Ok(())
}

pub async fn delete_matakuliah(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM matakuliah WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// krs

pub async fn fetch_krs(db: &SqlitePool) -> Result<Vec<KrsRow>, AppError> {
    let rows = sqlx::query_as::<_, KrsRow>(
        r#"
        SELECT
            k.id,
            k.semester,
            k.id_mahasiswa,
            k.id_matakuliah,
            COALESCE(k.nilai_tugas, 0.0) AS nilai_tugas,
            COALESCE(k.nilai_praktikum, 0.0) AS nilai_praktikum,
            COALESCE(k.nilai_uts, 0.0) AS nilai_uts,
            COALESCE(k.nilai_uas, 0.0) AS nilai_uas,
            COALESCE(k.nilai_akhir, 0.0) AS nilai_akhir,
            COALESCE(k.nilai_huruf, 'E') AS nilai_huruf,
            m.nama_lengkap,
            m.nim,
            mk.nama_mk,
            mk.kode_mk,
            mk.sks,
            j.nama_jurusan,
            j.fakultas,
            j.jenjang
        FROM krs k
        LEFT JOIN mahasiswa m ON k.id_mahasiswa = m.id
        LEFT JOIN matakuliah mk ON k.id_matakuliah = mk.id
        LEFT JOIN jurusan j ON m.id_jurusan = j.id
        ORDER BY k.semester DESC, m.nama_lengkap ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn insert_krs(db: &SqlitePool, req: &KrsPayload) -> Result<(), AppError> {
    let nilai_akhir = grade::final_score(
        req.nilai_tugas,
        req.nilai_praktikum,
        req.nilai_uts,
        req.nilai_uas,
    );
    let nilai_huruf = nilai_akhir.map(grade::letter);

    sqlx::query(
        r#"
        INSERT INTO krs
            (id_mahasiswa, id_matakuliah, semester,
            nilai_tugas, nilai_praktikum, nilai_uts, nilai_uas,
            nilai_akhir, nilai_huruf)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.id_mahasiswa)
    .bind(req.id_matakuliah)
    .bind(req.semester)
    .bind(req.nilai_tugas)
    .bind(req.nilai_praktikum)
    .bind(req.nilai_uts)
    .bind(req.nilai_uas)
    .bind(nilai_akhir)
    .bind(nilai_huruf)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_krs(db: &SqlitePool, id: i64, req: &KrsPayload) -> Result<(), AppError> {
    let nilai_akhir = grade::final_score(
        req.nilai_tugas,
        req.nilai_praktikum,
        req.nilai_uts,
        req.nilai_uas,
    );
    let nilai_huruf = nilai_akhir.map(grade::letter);

    sqlx::query(
        r#"
        UPDATE krs
        SET id_mahasiswa = ?, id_matakuliah = ?, semester = ?,
            nilai_tugas = ?, nilai_praktikum = ?, nilai_uts = ?, nilai_uas = ?,
            nilai_akhir = ?, nilai_huruf = ?
        WHERE id = ?
        "#,
    )
    .bind(req.id_mahasiswa)
    .bind(req.id_matakuliah)
    .bind(req.semester)
    .bind(req.nilai_tugas)
    .bind(req.nilai_praktikum)
    .bind(req.nilai_uts)
    .bind(req.nilai_uas)
    .bind(nilai_akhir)
    .bind(nilai_huruf)
    .bind(id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn delete_krs(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM krs WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// dashboard counts

pub async fn count_mahasiswa(db: &SqlitePool) -> Result<i64, AppError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM mahasiswa")
        .fetch_one(db)
        .await?;
    Ok(n)
}

pub async fn count_jurusan(db: &SqlitePool) -> Result<i64, AppError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jurusan")
        .fetch_one(db)
        .await?;
    Ok(n)
}

pub async fn count_fakultas(db: &SqlitePool) -> Result<i64, AppError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT fakultas) FROM jurusan")
        .fetch_one(db)
        .await?;
    Ok(n)
}

pub async fn count_matakuliah(db: &SqlitePool) -> Result<i64, AppError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM matakuliah")
        .fetch_one(db)
        .await?;
    Ok(n)
}

// Distinct students holding at least one KRS row, not raw row count.
pub async fn count_enrolled_mahasiswa(db: &SqlitePool) -> Result<i64, AppError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT id_mahasiswa) FROM krs")
        .fetch_one(db)
        .await?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn jurusan_payload(kode: &str) -> JurusanPayload {
        JurusanPayload {
            kode_jurusan: kode.to_string(),
            nama_jurusan: "Teknik Informatika".to_string(),
            fakultas: "Fakultas Teknik".to_string(),
            jenjang: "S1".to_string(),
        }
    }

    fn mahasiswa_payload(nim: &str, nama: &str) -> MahasiswaPayload {
        MahasiswaPayload {
            nim: nim.to_string(),
            nama_lengkap: nama.to_string(),
            email: Some(format!("{nim}@kampus.ac.id")),
            jenis_kelamin: Some("L".to_string()),
            tanggal_lahir: Some("2003-05-17".to_string()),
            id_jurusan: None,
        }
    }

    fn krs_payload(id_mahasiswa: i64, id_matakuliah: i64) -> KrsPayload {
        KrsPayload {
            id_mahasiswa: Some(id_mahasiswa),
            id_matakuliah: Some(id_matakuliah),
            semester: Some(1),
            nilai_tugas: None,
            nilai_praktikum: None,
            nilai_uts: None,
            nilai_uas: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_jurusan_ordered_by_kode() {
        let pool = setup_test_db().await;

        insert_jurusan(&pool, &jurusan_payload("TI"))
            .await
            .expect("Failed to insert jurusan");
        insert_jurusan(&pool, &jurusan_payload("SI"))
            .await
            .expect("Failed to insert jurusan");

        let rows = fetch_jurusan(&pool).await.expect("Failed to fetch jurusan");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kode_jurusan, "SI");
        assert_eq!(rows[1].kode_jurusan, "TI");
    }

    #[tokio::test]
    async fn test_duplicate_jurusan_kode_rejected() {
        let pool = setup_test_db().await;

        insert_jurusan(&pool, &jurusan_payload("TI"))
            .await
            .expect("Failed to insert jurusan");

        let err = insert_jurusan(&pool, &jurusan_payload("TI"))
            .await
            .expect_err("duplicate kode must be rejected");
        assert!(matches!(err, AppError::Duplicate(_)));

        // first row remains the sole row
        let rows = fetch_jurusan(&pool).await.expect("Failed to fetch jurusan");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_mahasiswa_is_idempotent() {
        let pool = setup_test_db().await;

        insert_mahasiswa(&pool, &mahasiswa_payload("2021001", "Budi Santoso"))
            .await
            .expect("Failed to insert mahasiswa");

        delete_mahasiswa(&pool, 999)
            .await
            .expect("deleting a missing id must succeed");

        let rows = fetch_mahasiswa(&pool)
            .await
            .expect("Failed to fetch mahasiswa");
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_nim_rejected() {
        let pool = setup_test_db().await;

        insert_mahasiswa(&pool, &mahasiswa_payload("2021001", "Budi Santoso"))
            .await
            .expect("Failed to insert mahasiswa");

        let err = insert_mahasiswa(&pool, &mahasiswa_payload("2021001", "Siti Aminah"))
            .await
            .expect_err("duplicate nim must be rejected");
        assert!(matches!(err, AppError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_krs_row_with_dangling_references_still_lists() {
        let pool = setup_test_db().await;

        // No mahasiswa/matakuliah rows exist for these ids.
        insert_krs(&pool, &krs_payload(999, 998))
            .await
            .expect("Failed to insert krs");

        let rows = fetch_krs(&pool).await.expect("Failed to fetch krs");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id_mahasiswa, 999);
        assert!(rows[0].nama_lengkap.is_none());
        assert!(rows[0].nama_mk.is_none());
        assert_eq!(rows[0].nilai_huruf, "E");
        assert_eq!(rows[0].nilai_akhir, 0.0);
    }

    #[tokio::test]
    async fn test_krs_grade_computed_when_all_components_present() {
        let pool = setup_test_db().await;

        let mut req = krs_payload(1, 1);
        req.nilai_tugas = Some(90.0);
        req.nilai_praktikum = Some(90.0);
        req.nilai_uts = Some(80.0);
        req.nilai_uas = Some(85.0);
        insert_krs(&pool, &req).await.expect("Failed to insert krs");

        let rows = fetch_krs(&pool).await.expect("Failed to fetch krs");
        assert_eq!(rows.len(), 1);
        // 90*0.2 + 90*0.2 + 80*0.25 + 85*0.35 = 85.75
        assert!((rows[0].nilai_akhir - 85.75).abs() < 1e-9);
        assert_eq!(rows[0].nilai_huruf, "A");
    }

    #[tokio::test]
    async fn test_krs_partial_components_stay_null_until_read() {
        let pool = setup_test_db().await;

        let mut req = krs_payload(1, 1);
        req.nilai_tugas = Some(90.0);
        insert_krs(&pool, &req).await.expect("Failed to insert krs");

        let rows = fetch_krs(&pool).await.expect("Failed to fetch krs");
        assert_eq!(rows[0].nilai_tugas, 90.0);
        // missing components and the final grade coalesce to display defaults
        assert_eq!(rows[0].nilai_uas, 0.0);
        assert_eq!(rows[0].nilai_akhir, 0.0);
        assert_eq!(rows[0].nilai_huruf, "E");
    }

    #[tokio::test]
    async fn test_dashboard_counts_distinct_enrolled_students() {
        let pool = setup_test_db().await;

        insert_mahasiswa(&pool, &mahasiswa_payload("2021001", "Budi Santoso"))
            .await
            .expect("Failed to insert mahasiswa");
        insert_mahasiswa(&pool, &mahasiswa_payload("2021002", "Siti Aminah"))
            .await
            .expect("Failed to insert mahasiswa");

        // Budi enrolls in three courses, Siti in none.
        for id_mk in 1..=3 {
            insert_krs(&pool, &krs_payload(1, id_mk))
                .await
                .expect("Failed to insert krs");
        }

        assert_eq!(count_mahasiswa(&pool).await.unwrap(), 2);
        assert_eq!(count_enrolled_mahasiswa(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_fakultas_is_distinct() {
        let pool = setup_test_db().await;

        let mut ti = jurusan_payload("TI");
        ti.fakultas = "Fakultas Teknik".to_string();
        let mut si = jurusan_payload("SI");
        si.fakultas = "Fakultas Teknik".to_string();
        let mut hk = jurusan_payload("HK");
        hk.fakultas = "Fakultas Hukum".to_string();

        for req in [&ti, &si, &hk] {
            insert_jurusan(&pool, req)
                .await
                .expect("Failed to insert jurusan");
        }

        assert_eq!(count_jurusan(&pool).await.unwrap(), 3);
        assert_eq!(count_fakultas(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_matakuliah_list_joins_jurusan() {
        let pool = setup_test_db().await;

        insert_jurusan(&pool, &jurusan_payload("TI"))
            .await
            .expect("Failed to insert jurusan");

        let with_jurusan = MatakuliahPayload {
            kode_mk: "TI-2101-01".to_string(),
            nama_mk: "Struktur Data".to_string(),
            sks: Some(3),
            semester: Some(2),
            id_jurusan: Some(1),
        };
        let general = MatakuliahPayload {
            kode_mk: "UM-1101-01".to_string(),
            nama_mk: "Bahasa Indonesia".to_string(),
            sks: Some(2),
            semester: Some(1),
            id_jurusan: None,
        };

        insert_matakuliah(&pool, &with_jurusan)
            .await
            .expect("Failed to insert matakuliah");
        insert_matakuliah(&pool, &general)
            .await
            .expect("Failed to insert matakuliah");

        let rows = fetch_matakuliah(&pool)
            .await
            .expect("Failed to fetch matakuliah");
        assert_eq!(rows.len(), 2);
        // semester ASC puts the general course first, with no joined jurusan
        assert_eq!(rows[0].kode_mk, "UM-1101-01");
        assert!(rows[0].nama_jurusan.is_none());
        assert_eq!(rows[1].nama_jurusan.as_deref(), Some("Teknik Informatika"));
    }

    #[tokio::test]
    async fn test_full_replace_update_clears_absent_fields() {
        let pool = setup_test_db().await;

        insert_mahasiswa(&pool, &mahasiswa_payload("2021001", "Budi Santoso"))
            .await
            .expect("Failed to insert mahasiswa");

        // update with no email: the column is overwritten with NULL
        let req = MahasiswaPayload {
            nim: "2021001".to_string(),
            nama_lengkap: "Budi Santoso".to_string(),
            email: None,
            jenis_kelamin: Some("L".to_string()),
            tanggal_lahir: None,
            id_jurusan: None,
        };
        update_mahasiswa(&pool, 1, &req)
            .await
            .expect("Failed to update mahasiswa");

        let rows = fetch_mahasiswa(&pool)
            .await
            .expect("Failed to fetch mahasiswa");
        assert!(rows[0].email.is_none());
        assert!(rows[0].tanggal_lahir.is_none());
    }
}
