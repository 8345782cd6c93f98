// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Peran menentukan gerbang rute: kasi_penmad memvalidasi laporan
// se-kabupaten, operator_madrasah terikat pada satu madrasah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    KasiPenmad,
    OperatorMadrasah,
}

// Akun pengguna dari tabel 'users'
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,

    #[serde(skip_serializing)] // jangan pernah ikut ke respons
    pub password_hash: String,

    pub nama_user: String,
    pub role: Role,
    pub id_madrasah: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Username wajib diisi."))]
    pub username: String,
    #[validate(length(min = 6, message = "Password minimal 6 karakter."))]
    pub password: String,
}

// Respons login: token dipakai sebagai Bearer, objek user disimpan klien.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

// Isi ("claims") di dalam JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub id_madrasah: Option<i32>,
    pub exp: usize,
    pub iat: usize,
}
