// src/handlers/master.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{error::AppError, response::{Data, Pesan}},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::Role,
        madrasah::{Madrasah, MadrasahPayload},
        pengumuman::{Pengumuman, PengumumanPayload},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MadrasahFilterQuery {
    /// Nama (substring, tanpa memperhatikan kapital) atau NPSN.
    pub search: Option<String>,
    /// Status aktif persis: 1 atau 0.
    pub status: Option<i16>,
}

#[utoipa::path(
    get,
    path = "/api/master/madrasah",
    params(MadrasahFilterQuery),
    responses((status = 200, description = "Daftar madrasah", body = [Madrasah])),
    security(("bearer_auth" = [])),
    tag = "master"
)]
pub async fn list_madrasah(
    State(app_state): State<AppState>,
    Query(query): Query<MadrasahFilterQuery>,
) -> Result<Json<Data<Vec<Madrasah>>>, AppError> {
    let daftar = app_state
        .madrasah_service
        .daftar(query.search.as_deref().unwrap_or(""), query.status)
        .await?;
    Ok(Json(Data::baru(daftar)))
}

#[utoipa::path(
    post,
    path = "/api/master/madrasah",
    request_body = MadrasahPayload,
    responses(
        (status = 201, description = "Madrasah tersimpan", body = Madrasah),
        (status = 409, description = "NPSN sudah terdaftar"),
    ),
    security(("bearer_auth" = [])),
    tag = "master"
)]
pub async fn store_madrasah(
    State(app_state): State<AppState>,
    Json(payload): Json<MadrasahPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let madrasah = app_state.madrasah_service.simpan(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Data madrasah berhasil disimpan.", "data": madrasah })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/master/madrasah/{id}",
    params(("id" = i32, Path, description = "ID madrasah")),
    request_body = MadrasahPayload,
    responses(
        (status = 200, description = "Madrasah diperbarui", body = Pesan),
        (status = 404, description = "Madrasah tidak ditemukan"),
    ),
    security(("bearer_auth" = [])),
    tag = "master"
)]
pub async fn update_madrasah(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MadrasahPayload>,
) -> Result<Json<Pesan>, AppError> {
    payload.validate()?;
    app_state.madrasah_service.perbarui(id, &payload).await?;
    Ok(Json(Pesan::baru("Data madrasah berhasil diperbarui.")))
}

// Hapus permanen; konfirmasi ada di sisi klien, panggilan ini final.
#[utoipa::path(
    delete,
    path = "/api/master/madrasah/{id}",
    params(("id" = i32, Path, description = "ID madrasah")),
    responses(
        (status = 200, description = "Madrasah dihapus", body = Pesan),
        (status = 404, description = "Madrasah tidak ditemukan"),
    ),
    security(("bearer_auth" = [])),
    tag = "master"
)]
pub async fn delete_madrasah(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Pesan>, AppError> {
    app_state.madrasah_service.hapus(id).await?;
    Ok(Json(Pesan::baru("Madrasah telah dihapus.")))
}

// ---
// Pengumuman. Daftar terbuka untuk semua peran yang login; tulis/hapus
// khusus kasi_penmad, diperiksa di handler.
// ---

#[utoipa::path(
    get,
    path = "/api/master/pengumuman",
    responses((status = 200, description = "Daftar pengumuman", body = [Pengumuman])),
    security(("bearer_auth" = [])),
    tag = "master"
)]
pub async fn list_pengumuman(
    State(app_state): State<AppState>,
) -> Result<Json<Data<Vec<Pengumuman>>>, AppError> {
    let daftar = app_state.madrasah_service.daftar_pengumuman().await?;
    Ok(Json(Data::baru(daftar)))
}

#[utoipa::path(
    post,
    path = "/api/master/pengumuman",
    request_body = PengumumanPayload,
    responses(
        (status = 201, description = "Pengumuman terbit", body = Pengumuman),
        (status = 403, description = "Bukan kasi_penmad"),
    ),
    security(("bearer_auth" = [])),
    tag = "master"
)]
pub async fn store_pengumuman(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<PengumumanPayload>,
) -> Result<impl IntoResponse, AppError> {
    if user.role != Role::KasiPenmad {
        return Err(AppError::AksesDitolak);
    }
    payload.validate()?;
    let pengumuman = app_state.madrasah_service.buat_pengumuman(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Pengumuman berhasil diterbitkan.", "data": pengumuman })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/master/pengumuman/{id}",
    params(("id" = i32, Path, description = "ID pengumuman")),
    responses(
        (status = 200, description = "Pengumuman dihapus", body = Pesan),
        (status = 403, description = "Bukan kasi_penmad"),
        (status = 404, description = "Pengumuman tidak ditemukan"),
    ),
    security(("bearer_auth" = [])),
    tag = "master"
)]
pub async fn delete_pengumuman(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<Pesan>, AppError> {
    if user.role != Role::KasiPenmad {
        return Err(AppError::AksesDitolak);
    }
    app_state.madrasah_service.hapus_pengumuman(id).await?;
    Ok(Json(Pesan::baru("Pengumuman telah dihapus.")))
}
