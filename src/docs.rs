// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Admin ---
        handlers::admin::get_stats,
        handlers::admin::list_laporan,
        handlers::admin::get_laporan_detail,
        handlers::admin::verify_laporan,
        handlers::admin::minta_revisi,
        handlers::admin::get_recap,

        // --- Master ---
        handlers::master::list_madrasah,
        handlers::master::store_madrasah,
        handlers::master::update_madrasah,
        handlers::master::delete_madrasah,
        handlers::master::list_pengumuman,
        handlers::master::store_pengumuman,
        handlers::master::delete_pengumuman,

        // --- Operator ---
        handlers::operator::get_dashboard,
        handlers::operator::list_laporan,
        handlers::operator::create_laporan,
        handlers::operator::get_laporan_detail,
        handlers::operator::submit_laporan,
        handlers::operator::update_siswa,
        handlers::operator::update_rekap_personal,
        handlers::operator::update_guru,
        handlers::operator::update_sarpras,
        handlers::operator::update_mobiler,
        handlers::operator::update_keuangan,
        handlers::operator::get_madrasah,
        handlers::operator::update_madrasah,
    ),
    components(
        schemas(
            models::auth::LoginPayload,
            models::auth::LoginResponse,
            models::auth::User,
            models::auth::Role,
            models::madrasah::Madrasah,
            models::madrasah::MadrasahRingkas,
            models::madrasah::MadrasahPayload,
            models::madrasah::ProfilMadrasahPayload,
            models::laporan::Laporan,
            models::laporan::StatusLaporan,
            models::laporan::BuatLaporanPayload,
            models::laporan::MintaRevisiPayload,
            models::laporan::SiswaRow,
            models::laporan::RekapPersonalRow,
            models::laporan::GuruRow,
            models::laporan::SarprasRow,
            models::laporan::MobilerRow,
            models::laporan::KeuanganRow,
            models::laporan::RekapKolom,
            models::laporan::LaporanDetail,
            models::laporan::LaporanMasuk,
            models::dashboard::AdminStats,
            models::dashboard::KecamatanProgress,
            models::dashboard::RecapRow,
            models::dashboard::OperatorDashboard,
            models::pengumuman::Pengumuman,
            models::pengumuman::PengumumanPayload,
            crate::common::response::Pesan,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login dan sesi"),
        (name = "admin", description = "Validasi laporan dan monitoring kabupaten"),
        (name = "master", description = "Data master madrasah dan pengumuman"),
        (name = "operator", description = "Laporan bulanan madrasah"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
