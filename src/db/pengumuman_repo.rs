// src/db/pengumuman_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::pengumuman::{Pengumuman, PengumumanPayload},
};

#[derive(Clone)]
pub struct PengumumanRepository {
    pool: PgPool,
}

impl PengumumanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Pengumuman>, AppError> {
        let daftar = sqlx::query_as::<_, Pengumuman>(
            "SELECT id, judul, isi_info, created_at FROM pengumuman ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(daftar)
    }

    pub async fn create(&self, payload: &PengumumanPayload) -> Result<Pengumuman, AppError> {
        let pengumuman = sqlx::query_as::<_, Pengumuman>(
            "INSERT INTO pengumuman (judul, isi_info) VALUES ($1, $2) \
             RETURNING id, judul, isi_info, created_at",
        )
        .bind(&payload.judul)
        .bind(&payload.isi_info)
        .fetch_one(&self.pool)
        .await?;
        Ok(pengumuman)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM pengumuman WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }
}
