//! User administration, guarded by the `users` permissions.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hospital_app::ports::{HospitalStore, PasswordHasher, TokenCodec};
use hospital_domain::id::UserId;
use hospital_domain::user::User;

use crate::api::records::parse_id;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for replacing a user's permissions.
#[derive(Deserialize)]
pub struct PermissionsRequest {
    pub permissions: Vec<String>,
}

pub enum UsersResponse {
    List(Vec<User>),
    Found(User),
    Updated(User),
    Deleted,
}

impl IntoResponse for UsersResponse {
    fn into_response(self) -> Response {
        match self {
            Self::List(users) => {
                Envelope::success(StatusCode::OK, "User list retrieved", users).into_response()
            }
            Self::Found(user) => {
                Envelope::success(StatusCode::OK, "User retrieved", user).into_response()
            }
            Self::Updated(user) => {
                Envelope::success(StatusCode::OK, "User permissions updated", user)
                    .into_response()
            }
            Self::Deleted => Envelope::empty(StatusCode::OK, "User deleted").into_response(),
        }
    }
}

/// `GET /api/users`
pub async fn list<S, H, C>(
    State(state): State<AppState<S, H, C>>,
) -> Result<UsersResponse, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let users = state.auth.list_users().await?;
    Ok(UsersResponse::List(users))
}

/// `GET /api/users/{id}`
pub async fn get<S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
) -> Result<UsersResponse, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let id = parse_id::<UserId>(&id)?;
    let user = state.auth.get_user(id).await?;
    Ok(UsersResponse::Found(user))
}

/// `PUT /api/users/{id}/permissions`
pub async fn set_permissions<S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
    body: Result<Json<PermissionsRequest>, JsonRejection>,
) -> Result<UsersResponse, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let id = parse_id::<UserId>(&id)?;
    let Json(request) = body?;
    let user = state.auth.set_permissions(id, request.permissions).await?;
    Ok(UsersResponse::Updated(user))
}

/// `DELETE /api/users/{id}`
pub async fn delete<S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
) -> Result<UsersResponse, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let id = parse_id::<UserId>(&id)?;
    state.auth.delete_user(id).await?;
    Ok(UsersResponse::Deleted)
}
