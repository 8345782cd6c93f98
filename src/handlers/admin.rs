// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{error::AppError, response::{Data, Pesan}},
    config::AppState,
    models::{
        dashboard::{AdminStats, RecapRow},
        laporan::{LaporanDetail, LaporanMasuk, MintaRevisiPayload},
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LaporanFilterQuery {
    /// Nama madrasah (substring, tanpa memperhatikan kapital) atau NPSN.
    pub search: Option<String>,
    /// Status persis: submitted | revisi | verified.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecapQuery {
    /// Kunci bulan YYYY-MM.
    pub bulan: Option<String>,
    pub kecamatan: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses((status = 200, description = "Statistik monitoring kabupaten", body = AdminStats)),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
) -> Result<Json<Data<AdminStats>>, AppError> {
    let stats = app_state.dashboard_service.statistik_admin().await?;
    Ok(Json(Data::baru(stats)))
}

// Daftar validasi: seluruh laporan yang sudah pernah dikirim.
#[utoipa::path(
    get,
    path = "/api/admin/laporan",
    params(LaporanFilterQuery),
    responses((status = 200, description = "Daftar laporan masuk", body = [LaporanMasuk])),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_laporan(
    State(app_state): State<AppState>,
    Query(query): Query<LaporanFilterQuery>,
) -> Result<Json<Data<Vec<LaporanMasuk>>>, AppError> {
    let daftar = app_state
        .laporan_service
        .daftar_masuk(
            query.search.as_deref().unwrap_or(""),
            query.status.as_deref(),
        )
        .await?;
    Ok(Json(Data::baru(daftar)))
}

#[utoipa::path(
    get,
    path = "/api/admin/laporan/{id}",
    params(("id" = i32, Path, description = "ID laporan")),
    responses(
        (status = 200, description = "Detail laporan beserta seluruh bagiannya", body = LaporanDetail),
        (status = 404, description = "Laporan tidak ditemukan"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_laporan_detail(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Data<LaporanDetail>>, AppError> {
    let detail = app_state.laporan_service.detail_admin(id).await?;
    Ok(Json(Data::baru(detail)))
}

// Terima laporan: submitted -> verified, final.
#[utoipa::path(
    post,
    path = "/api/admin/laporan/{id}/verify",
    params(("id" = i32, Path, description = "ID laporan")),
    responses(
        (status = 200, description = "Laporan diterima", body = Pesan),
        (status = 409, description = "Laporan tidak berstatus submitted"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn verify_laporan(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Pesan>, AppError> {
    app_state.laporan_service.verifikasi(id).await?;
    Ok(Json(Pesan::baru("Laporan diterima.")))
}

// Kembalikan laporan untuk revisi, dengan catatan opsional.
#[utoipa::path(
    post,
    path = "/api/admin/laporan/{id}/revisi",
    params(("id" = i32, Path, description = "ID laporan")),
    request_body = MintaRevisiPayload,
    responses(
        (status = 200, description = "Laporan dikembalikan untuk revisi", body = Pesan),
        (status = 409, description = "Laporan tidak berstatus submitted"),
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn minta_revisi(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MintaRevisiPayload>,
) -> Result<Json<Pesan>, AppError> {
    payload.validate()?;
    app_state
        .laporan_service
        .minta_revisi(id, payload.catatan.as_deref())
        .await?;
    Ok(Json(Pesan::baru("Laporan dikembalikan untuk revisi.")))
}

#[utoipa::path(
    get,
    path = "/api/admin/recap",
    params(RecapQuery),
    responses((status = 200, description = "Rekapitulasi laporan kabupaten", body = [RecapRow])),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_recap(
    State(app_state): State<AppState>,
    Query(query): Query<RecapQuery>,
) -> Result<Json<Data<Vec<RecapRow>>>, AppError> {
    let daftar = app_state
        .dashboard_service
        .rekap(query.bulan.as_deref(), query.kecamatan.as_deref())
        .await?;
    Ok(Json(Data::baru(daftar)))
}
