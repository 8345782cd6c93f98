use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::laporan::StatusLaporan;

// Tipe error aplikasi. Pesan di sini dikirim apa adanya ke klien
// (field `message`), jadi semuanya berbahasa Indonesia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validasi gagal")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Username atau password salah")]
    KredensialSalah,

    #[error("Token autentikasi tidak valid atau tidak ditemukan")]
    TokenTidakValid,

    #[error("Anda tidak memiliki akses untuk operasi ini")]
    AksesDitolak,

    #[error("Pengguna tidak ditemukan")]
    UserTidakDitemukan,

    #[error("Madrasah tidak ditemukan")]
    MadrasahTidakDitemukan,

    #[error("Laporan tidak ditemukan")]
    LaporanTidakDitemukan,

    #[error("Pengumuman tidak ditemukan")]
    PengumumanTidakDitemukan,

    #[error("NPSN tersebut sudah terdaftar")]
    NpsnSudahAda,

    #[error("Laporan untuk bulan tersebut sudah ada")]
    LaporanSudahAda,

    #[error("Laporan berstatus {0} dan tidak dapat diubah")]
    LaporanTerkunci(StatusLaporan),

    #[error("Laporan berstatus {0}, bukan submitted, sehingga tidak dapat divalidasi")]
    BelumMenungguValidasi(StatusLaporan),

    #[error("Bagian laporan berikut masih kosong: {}", .0.join(", "))]
    LaporanBelumLengkap(Vec<String>),

    #[error("Pelanggaran batasan unik: {0}")]
    UniqueConstraintViolation(String),

    #[error("Kesalahan database")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Kesalahan internal server")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Kesalahan bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Kesalahan JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Detail per field untuk error validasi.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": "Satu atau beberapa field tidak valid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::KredensialSalah | AppError::TokenTidakValid => StatusCode::UNAUTHORIZED,
            AppError::AksesDitolak => StatusCode::FORBIDDEN,
            AppError::UserTidakDitemukan
            | AppError::MadrasahTidakDitemukan
            | AppError::LaporanTidakDitemukan
            | AppError::PengumumanTidakDitemukan => StatusCode::NOT_FOUND,
            AppError::NpsnSudahAda
            | AppError::LaporanSudahAda
            | AppError::LaporanTerkunci(_)
            | AppError::BelumMenungguValidasi(_)
            | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::LaporanBelumLengkap(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // Sisanya 500: detail dicatat di log, klien menerima pesan umum.
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => {
                tracing::error!("Kesalahan internal server: {self}");
                let body = Json(json!({ "message": "Terjadi kesalahan tak terduga." }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
