// src/handlers/operator.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::{error::AppError, response::{Data, Pesan}},
    config::AppState,
    handlers::admin::LaporanFilterQuery,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::User,
        dashboard::OperatorDashboard,
        laporan::{
            BagianLaporan, BuatLaporanPayload, GuruRow, KeuanganRow, Laporan, LaporanDetail,
            MobilerRow, RekapPersonalRow, SarprasRow, SiswaRow,
        },
        madrasah::{Madrasah, ProfilMadrasahPayload},
    },
};

// operator_guard sudah memastikan id_madrasah terisi; helper ini
// tinggal membongkarnya.
fn id_madrasah(user: &User) -> Result<i32, AppError> {
    user.id_madrasah.ok_or(AppError::AksesDitolak)
}

#[utoipa::path(
    get,
    path = "/api/operator/dashboard",
    responses((status = 200, description = "Ringkasan madrasah operator", body = OperatorDashboard)),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Data<OperatorDashboard>>, AppError> {
    let dashboard = app_state
        .dashboard_service
        .dashboard_operator(id_madrasah(&user)?)
        .await?;
    Ok(Json(Data::baru(dashboard)))
}

#[utoipa::path(
    get,
    path = "/api/operator/laporan",
    params(LaporanFilterQuery),
    responses((status = 200, description = "Arsip laporan madrasah", body = [Laporan])),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn list_laporan(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<LaporanFilterQuery>,
) -> Result<Json<Data<Vec<Laporan>>>, AppError> {
    let daftar = app_state
        .laporan_service
        .daftar_operator(
            id_madrasah(&user)?,
            query.search.as_deref().unwrap_or(""),
            query.status.as_deref(),
        )
        .await?;
    Ok(Json(Data::baru(daftar)))
}

// Buat laporan bulan baru (status draft, baris template tertanam).
#[utoipa::path(
    post,
    path = "/api/operator/laporan",
    request_body = BuatLaporanPayload,
    responses(
        (status = 201, description = "Laporan dibuat", body = Laporan),
        (status = 409, description = "Laporan bulan tersebut sudah ada"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn create_laporan(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<BuatLaporanPayload>,
) -> Result<impl IntoResponse, AppError> {
    let laporan = app_state
        .laporan_service
        .buat(id_madrasah(&user)?, payload.bulan_tahun)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Laporan berhasil dibuat.", "data": laporan })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/operator/laporan/{id}",
    params(("id" = i32, Path, description = "ID laporan")),
    responses(
        (status = 200, description = "Detail laporan", body = LaporanDetail),
        (status = 403, description = "Bukan laporan madrasah ini"),
        (status = 404, description = "Laporan tidak ditemukan"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn get_laporan_detail(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<Data<LaporanDetail>>, AppError> {
    let detail = app_state
        .laporan_service
        .detail_operator(id, id_madrasah(&user)?)
        .await?;
    Ok(Json(Data::baru(detail)))
}

// Kirim laporan untuk divalidasi. Setelah ini isi terkunci sampai
// admin meminta revisi.
#[utoipa::path(
    post,
    path = "/api/operator/laporan/{id}/submit",
    params(("id" = i32, Path, description = "ID laporan")),
    responses(
        (status = 200, description = "Laporan terkirim", body = Pesan),
        (status = 409, description = "Status tidak memungkinkan kirim"),
        (status = 422, description = "Bagian wajib masih kosong"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn submit_laporan(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<Pesan>, AppError> {
    app_state
        .laporan_service
        .kirim(id, id_madrasah(&user)?)
        .await?;
    Ok(Json(Pesan::baru("Laporan berhasil dikirim.")))
}

// ---
// Simpan bagian. Satu endpoint per bagian; isi lama bagian tersebut
// diganti seluruhnya dengan array yang dikirim.
// ---

async fn simpan_bagian(
    app_state: &AppState,
    user: &User,
    id_laporan: i32,
    bagian: BagianLaporan,
) -> Result<Json<Pesan>, AppError> {
    let nama = bagian.nama();
    app_state
        .laporan_service
        .simpan_bagian(id_laporan, id_madrasah(user)?, bagian)
        .await?;
    Ok(Json(Pesan::baru(format!(
        "Data {nama} berhasil disimpan."
    ))))
}

#[utoipa::path(
    put,
    path = "/api/operator/laporan/{id}/siswa",
    params(("id" = i32, Path, description = "ID laporan")),
    request_body = Vec<SiswaRow>,
    responses(
        (status = 200, description = "Bagian tersimpan", body = Pesan),
        (status = 409, description = "Laporan terkunci"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn update_siswa(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(rows): Json<Vec<SiswaRow>>,
) -> Result<Json<Pesan>, AppError> {
    simpan_bagian(&app_state, &user, id, BagianLaporan::Siswa(rows)).await
}

#[utoipa::path(
    put,
    path = "/api/operator/laporan/{id}/rekap-personal",
    params(("id" = i32, Path, description = "ID laporan")),
    request_body = Vec<RekapPersonalRow>,
    responses(
        (status = 200, description = "Bagian tersimpan", body = Pesan),
        (status = 409, description = "Laporan terkunci"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn update_rekap_personal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(rows): Json<Vec<RekapPersonalRow>>,
) -> Result<Json<Pesan>, AppError> {
    simpan_bagian(&app_state, &user, id, BagianLaporan::RekapPersonal(rows)).await
}

#[utoipa::path(
    put,
    path = "/api/operator/laporan/{id}/guru",
    params(("id" = i32, Path, description = "ID laporan")),
    request_body = Vec<GuruRow>,
    responses(
        (status = 200, description = "Bagian tersimpan", body = Pesan),
        (status = 409, description = "Laporan terkunci"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn update_guru(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(rows): Json<Vec<GuruRow>>,
) -> Result<Json<Pesan>, AppError> {
    simpan_bagian(&app_state, &user, id, BagianLaporan::Guru(rows)).await
}

#[utoipa::path(
    put,
    path = "/api/operator/laporan/{id}/sarpras",
    params(("id" = i32, Path, description = "ID laporan")),
    request_body = Vec<SarprasRow>,
    responses(
        (status = 200, description = "Bagian tersimpan", body = Pesan),
        (status = 409, description = "Laporan terkunci"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn update_sarpras(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(rows): Json<Vec<SarprasRow>>,
) -> Result<Json<Pesan>, AppError> {
    simpan_bagian(&app_state, &user, id, BagianLaporan::Sarpras(rows)).await
}

#[utoipa::path(
    put,
    path = "/api/operator/laporan/{id}/mobiler",
    params(("id" = i32, Path, description = "ID laporan")),
    request_body = Vec<MobilerRow>,
    responses(
        (status = 200, description = "Bagian tersimpan", body = Pesan),
        (status = 409, description = "Laporan terkunci"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn update_mobiler(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(rows): Json<Vec<MobilerRow>>,
) -> Result<Json<Pesan>, AppError> {
    simpan_bagian(&app_state, &user, id, BagianLaporan::Mobiler(rows)).await
}

#[utoipa::path(
    put,
    path = "/api/operator/laporan/{id}/keuangan",
    params(("id" = i32, Path, description = "ID laporan")),
    request_body = Vec<KeuanganRow>,
    responses(
        (status = 200, description = "Bagian tersimpan", body = Pesan),
        (status = 409, description = "Laporan terkunci"),
    ),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn update_keuangan(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(rows): Json<Vec<KeuanganRow>>,
) -> Result<Json<Pesan>, AppError> {
    simpan_bagian(&app_state, &user, id, BagianLaporan::Keuangan(rows)).await
}

// ---
// Profil madrasah milik operator
// ---

#[utoipa::path(
    get,
    path = "/api/operator/madrasah",
    responses((status = 200, description = "Profil madrasah", body = Madrasah)),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn get_madrasah(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Data<Madrasah>>, AppError> {
    let madrasah = app_state
        .madrasah_service
        .profil(id_madrasah(&user)?)
        .await?;
    Ok(Json(Data::baru(madrasah)))
}

#[utoipa::path(
    put,
    path = "/api/operator/madrasah",
    request_body = ProfilMadrasahPayload,
    responses((status = 200, description = "Profil diperbarui", body = Pesan)),
    security(("bearer_auth" = [])),
    tag = "operator"
)]
pub async fn update_madrasah(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProfilMadrasahPayload>,
) -> Result<Json<Pesan>, AppError> {
    payload.validate()?;
    app_state
        .madrasah_service
        .perbarui_profil(id_madrasah(&user)?, &payload)
        .await?;
    Ok(Json(Pesan::baru("Profil madrasah berhasil diperbarui.")))
}
