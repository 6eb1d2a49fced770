//! Bearer-token middleware for the protected `/api` routes.
//!
//! The required permission is derived from the request: the first path
//! segment after `/api` names the resource, `GET` and `HEAD` need `read`,
//! every other method needs `write`.

use axum::extract::{Request, State};
use axum::http::{Method, header};
use axum::middleware::Next;
use axum::response::Response;

use hospital_app::ports::{HospitalStore, PasswordHasher, TokenCodec};
use hospital_domain::error::{AuthError, HospitalError};
use hospital_domain::permission::{self, Access};

use crate::error::ApiError;
use crate::state::AppState;

/// Reject the request unless it carries a token granting the permission the
/// route needs. On success the decoded
/// [`AccessClaims`](hospital_domain::user::AccessClaims) are added to the
/// request extensions.
pub async fn require_permission<S, H, C>(
    State(state): State<AppState<S, H, C>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let token = bearer_token(&request)?;
    let required = required_permission(request.method(), request.uri().path());
    let claims = state.auth.authorize(token, &required)?;
    tracing::debug!(username = %claims.username, %required, "request authorized");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Result<&str, HospitalError> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::MissingToken.into())
}

/// Permission needed for `method` on `path`.
///
/// `path` may still carry the `/api` prefix or already be relative to it.
fn required_permission(method: &Method, path: &str) -> String {
    let path = path.trim_start_matches('/');
    let path = path.strip_prefix("api/").unwrap_or(path);
    let resource = path.split('/').next().unwrap_or_default();
    let access = if *method == Method::GET || *method == Method::HEAD {
        Access::Read
    } else {
        Access::Write
    };
    permission::required(resource, access)
}
