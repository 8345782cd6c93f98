// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Role, User},
};

// Token dibaca dari header Authorization pada setiap panggilan; tidak
// ada sesi sisi server, logout cukup membuang token di klien.
async fn autentikasi(
    app_state: &AppState,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<User, AppError> {
    let TypedHeader(auth) = bearer.ok_or(AppError::TokenTidakValid)?;
    app_state.auth_service.validate_token(auth.token()).await
}

// Gerbang dasar: cukup login, peran apa pun.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = autentikasi(&app_state, bearer).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Gerbang admin kabupaten (kasi_penmad).
pub async fn admin_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = autentikasi(&app_state, bearer).await?;
    if user.role != Role::KasiPenmad {
        return Err(AppError::AksesDitolak);
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Gerbang operator: harus berperan operator dan terikat satu madrasah.
pub async fn operator_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = autentikasi(&app_state, bearer).await?;
    if user.role != Role::OperatorMadrasah || user.id_madrasah.is_none() {
        return Err(AppError::AksesDitolak);
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extractor untuk mengambil pengguna terautentikasi di handler
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::TokenTidakValid)
    }
}
