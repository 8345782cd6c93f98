// src/handlers/auth.rs

use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, LoginResponse},
};

// Login dengan username/password; respons memuat token Bearer dan
// objek user yang disimpan klien untuk pengalihan per peran.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login berhasil", body = LoginResponse),
        (status = 401, description = "Username atau password salah"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let respons = app_state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    tracing::info!(username = %payload.username, "Pengguna berhasil login");
    Ok(Json(respons))
}
