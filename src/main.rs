// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard, operator_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Kalau konfigurasi gagal, aplikasi memang tidak boleh jalan.
    let app_state = AppState::new()
        .await
        .expect("Gagal menginisialisasi state aplikasi.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Gagal menjalankan migrasi database.");

    tracing::info!("✅ Migrasi database selesai dijalankan!");

    // Rute publik
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rute admin kabupaten (kasi_penmad)
    let admin_routes = Router::new()
        .route("/stats", get(handlers::admin::get_stats))
        .route("/laporan", get(handlers::admin::list_laporan))
        .route("/laporan/{id}", get(handlers::admin::get_laporan_detail))
        .route("/laporan/{id}/verify", post(handlers::admin::verify_laporan))
        .route("/laporan/{id}/revisi", post(handlers::admin::minta_revisi))
        .route("/recap", get(handlers::admin::get_recap))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Data master madrasah: khusus admin
    let madrasah_routes = Router::new()
        .route(
            "/madrasah",
            post(handlers::master::store_madrasah).get(handlers::master::list_madrasah),
        )
        .route(
            "/madrasah/{id}",
            put(handlers::master::update_madrasah).delete(handlers::master::delete_madrasah),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Pengumuman: daftar terbuka untuk semua peran yang login,
    // tulis/hapus diperiksa per handler
    let pengumuman_routes = Router::new()
        .route(
            "/pengumuman",
            get(handlers::master::list_pengumuman).post(handlers::master::store_pengumuman),
        )
        .route("/pengumuman/{id}", delete(handlers::master::delete_pengumuman))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let master_routes = madrasah_routes.merge(pengumuman_routes);

    // Rute operator madrasah
    let operator_routes = Router::new()
        .route("/dashboard", get(handlers::operator::get_dashboard))
        .route(
            "/laporan",
            get(handlers::operator::list_laporan).post(handlers::operator::create_laporan),
        )
        .route("/laporan/{id}", get(handlers::operator::get_laporan_detail))
        .route("/laporan/{id}/submit", post(handlers::operator::submit_laporan))
        .route("/laporan/{id}/siswa", put(handlers::operator::update_siswa))
        .route(
            "/laporan/{id}/rekap-personal",
            put(handlers::operator::update_rekap_personal),
        )
        .route("/laporan/{id}/guru", put(handlers::operator::update_guru))
        .route("/laporan/{id}/sarpras", put(handlers::operator::update_sarpras))
        .route("/laporan/{id}/mobiler", put(handlers::operator::update_mobiler))
        .route("/laporan/{id}/keuangan", put(handlers::operator::update_keuangan))
        .route(
            "/madrasah",
            get(handlers::operator::get_madrasah).put(handlers::operator::update_madrasah),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            operator_guard,
        ));

    // Gabungkan semuanya di router utama
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/master", master_routes)
        .nest("/api/operator", operator_routes)
        .with_state(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Gagal membuka listener TCP");
    tracing::info!("🚀 SI-LAPOR mendengarkan di {}", addr);
    axum::serve(listener, app).await.expect("Server axum berhenti dengan error");
}
