//! Registration and login. These routes are the only `/api` routes that do
//! not need a bearer token.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use hospital_app::ports::{HospitalStore, PasswordHasher, TokenCodec};
use hospital_app::services::auth_service::Session;
use hospital_domain::time::Timestamp;
use hospital_domain::user::User;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for register and login.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// An issued token, as returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionBody {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: Timestamp,
    pub user: User,
}

impl From<Session> for SessionBody {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            token_type: "Bearer",
            expires_at: session.expires_at,
            user: session.user,
        }
    }
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    Created(SessionBody),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(body) => {
                Envelope::success(StatusCode::CREATED, "User registered", body).into_response()
            }
        }
    }
}

/// Possible responses from the login endpoint.
pub enum LoginResponse {
    Ok(SessionBody),
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(body) => {
                Envelope::success(StatusCode::OK, "Login successful", body).into_response()
            }
        }
    }
}

/// `POST /api/auth/register`
pub async fn register<S, H, C>(
    State(state): State<AppState<S, H, C>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<RegisterResponse, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let Json(credentials) = body?;
    let session = state
        .auth
        .register(&credentials.username, &credentials.password)
        .await?;
    Ok(RegisterResponse::Created(session.into()))
}

/// `POST /api/auth/login`
pub async fn login<S, H, C>(
    State(state): State<AppState<S, H, C>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<LoginResponse, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let Json(credentials) = body?;
    let session = state
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;
    Ok(LoginResponse::Ok(session.into()))
}
