// src/common/response.rs

use serde::Serialize;
use utoipa::ToSchema;

// Amplop baca: payload dibungkus sebagai { "data": ... } mengikuti
// kontrak API lama yang dibaca klien.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn baru(data: T) -> Self {
        Self { data }
    }
}

// Amplop mutasi: cukup pesan konfirmasi.
#[derive(Debug, Serialize, ToSchema)]
pub struct Pesan {
    pub message: String,
}

impl Pesan {
    pub fn baru(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
