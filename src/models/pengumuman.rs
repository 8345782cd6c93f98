// src/models/pengumuman.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Pengumuman {
    pub id: i32,
    pub judul: String,
    pub isi_info: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PengumumanPayload {
    #[validate(length(min = 1, message = "Judul wajib diisi."))]
    pub judul: String,
    #[validate(length(min = 1, message = "Isi pengumuman wajib diisi."))]
    pub isi_info: String,
}
