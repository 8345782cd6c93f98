// src/db/madrasah_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::madrasah::{Madrasah, MadrasahPayload, MadrasahRingkas, ProfilMadrasahPayload},
};

const KOLOM_MADRASAH: &str = "id_madrasah, nama_madrasah, npsn, nsm, alamat, desa, kecamatan, \
     kabupaten, provinsi, latitude, longitude, status_aktif, nama_kepala, nip_kepala, no_telp, \
     email, created_at, updated_at";

// Petakan pelanggaran unik ke error domain, sisanya diteruskan.
fn petakan_error_unik(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    "madrasah_npsn_unik" => AppError::NpsnSudahAda,
                    _ => AppError::UniqueConstraintViolation(constraint.to_string()),
                };
            }
        }
    }
    e.into()
}

#[derive(Clone)]
pub struct MadrasahRepository {
    pool: PgPool,
}

impl MadrasahRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Madrasah>, AppError> {
        let daftar = sqlx::query_as::<_, Madrasah>(&format!(
            "SELECT {KOLOM_MADRASAH} FROM madrasah ORDER BY nama_madrasah"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(daftar)
    }

    pub async fn find_by_id(&self, id_madrasah: i32) -> Result<Option<Madrasah>, AppError> {
        let madrasah = sqlx::query_as::<_, Madrasah>(&format!(
            "SELECT {KOLOM_MADRASAH} FROM madrasah WHERE id_madrasah = $1"
        ))
        .bind(id_madrasah)
        .fetch_optional(&self.pool)
        .await?;
        Ok(madrasah)
    }

    pub async fn find_ringkas(&self, id_madrasah: i32) -> Result<Option<MadrasahRingkas>, AppError> {
        let ringkas = sqlx::query_as::<_, MadrasahRingkas>(
            "SELECT id_madrasah, nama_madrasah, npsn, alamat, kecamatan \
             FROM madrasah WHERE id_madrasah = $1",
        )
        .bind(id_madrasah)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ringkas)
    }

    pub async fn create(&self, payload: &MadrasahPayload) -> Result<Madrasah, AppError> {
        let madrasah = sqlx::query_as::<_, Madrasah>(&format!(
            "INSERT INTO madrasah (nama_madrasah, npsn, nsm, alamat, desa, kecamatan, kabupaten, \
             provinsi, latitude, longitude, status_aktif, nama_kepala, nip_kepala, no_telp, email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {KOLOM_MADRASAH}"
        ))
        .bind(&payload.nama_madrasah)
        .bind(&payload.npsn)
        .bind(&payload.nsm)
        .bind(&payload.alamat)
        .bind(&payload.desa)
        .bind(&payload.kecamatan)
        .bind(&payload.kabupaten)
        .bind(&payload.provinsi)
        .bind(&payload.latitude)
        .bind(&payload.longitude)
        .bind(payload.status_aktif)
        .bind(&payload.nama_kepala)
        .bind(&payload.nip_kepala)
        .bind(&payload.no_telp)
        .bind(&payload.email)
        .fetch_one(&self.pool)
        .await
        .map_err(petakan_error_unik)?;

        Ok(madrasah)
    }

    pub async fn update(
        &self,
        id_madrasah: i32,
        payload: &MadrasahPayload,
    ) -> Result<bool, AppError> {
        let res = sqlx::query(
            "UPDATE madrasah SET nama_madrasah = $2, npsn = $3, nsm = $4, alamat = $5, desa = $6, \
             kecamatan = $7, kabupaten = $8, provinsi = $9, latitude = $10, longitude = $11, \
             status_aktif = $12, nama_kepala = $13, nip_kepala = $14, no_telp = $15, email = $16, \
             updated_at = NOW() \
             WHERE id_madrasah = $1",
        )
        .bind(id_madrasah)
        .bind(&payload.nama_madrasah)
        .bind(&payload.npsn)
        .bind(&payload.nsm)
        .bind(&payload.alamat)
        .bind(&payload.desa)
        .bind(&payload.kecamatan)
        .bind(&payload.kabupaten)
        .bind(&payload.provinsi)
        .bind(&payload.latitude)
        .bind(&payload.longitude)
        .bind(payload.status_aktif)
        .bind(&payload.nama_kepala)
        .bind(&payload.nip_kepala)
        .bind(&payload.no_telp)
        .bind(&payload.email)
        .execute(&self.pool)
        .await
        .map_err(petakan_error_unik)?;

        Ok(res.rows_affected() == 1)
    }

    // Pembaruan profil oleh operator: tanpa menyentuh status_aktif.
    pub async fn update_profil(
        &self,
        id_madrasah: i32,
        payload: &ProfilMadrasahPayload,
    ) -> Result<bool, AppError> {
        let res = sqlx::query(
            "UPDATE madrasah SET nama_madrasah = $2, npsn = $3, nsm = $4, alamat = $5, desa = $6, \
             kecamatan = $7, kabupaten = $8, provinsi = $9, latitude = $10, longitude = $11, \
             nama_kepala = $12, nip_kepala = $13, no_telp = $14, email = $15, updated_at = NOW() \
             WHERE id_madrasah = $1",
        )
        .bind(id_madrasah)
        .bind(&payload.nama_madrasah)
        .bind(&payload.npsn)
        .bind(&payload.nsm)
        .bind(&payload.alamat)
        .bind(&payload.desa)
        .bind(&payload.kecamatan)
        .bind(&payload.kabupaten)
        .bind(&payload.provinsi)
        .bind(&payload.latitude)
        .bind(&payload.longitude)
        .bind(&payload.nama_kepala)
        .bind(&payload.nip_kepala)
        .bind(&payload.no_telp)
        .bind(&payload.email)
        .execute(&self.pool)
        .await
        .map_err(petakan_error_unik)?;

        Ok(res.rows_affected() == 1)
    }

    pub async fn delete(&self, id_madrasah: i32) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM madrasah WHERE id_madrasah = $1")
            .bind(id_madrasah)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}
