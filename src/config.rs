// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        DashboardRepository, LaporanRepository, MadrasahRepository, PengumumanRepository,
        UserRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, laporan_service::LaporanService,
        madrasah_service::MadrasahService,
    },
};

// State bersama yang dapat diakses seluruh aplikasi
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub laporan_service: LaporanService,
    pub madrasah_service: MadrasahService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL harus didefinisikan");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET harus didefinisikan");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Koneksi database berhasil dibuat!");

        // --- Rangkai graf dependensi ---
        let user_repo = UserRepository::new(db_pool.clone());
        let madrasah_repo = MadrasahRepository::new(db_pool.clone());
        let laporan_repo = LaporanRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let pengumuman_repo = PengumumanRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let laporan_service = LaporanService::new(laporan_repo.clone(), madrasah_repo.clone());
        let madrasah_service = MadrasahService::new(madrasah_repo, pengumuman_repo);
        let dashboard_service = DashboardService::new(dashboard_repo, laporan_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            laporan_service,
            madrasah_service,
            dashboard_service,
        })
    }
}
