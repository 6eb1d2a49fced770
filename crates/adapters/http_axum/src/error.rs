//! HTTP error response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use hospital_domain::error::{AuthError, HospitalError, ValidationError};

use crate::envelope::Envelope;

/// Maps [`HospitalError`] to an enveloped HTTP response with the
/// appropriate status code.
#[derive(Debug)]
pub struct ApiError(HospitalError);

impl From<HospitalError> for ApiError {
    fn from(err: HospitalError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ValidationError::MalformedBody(rejection.body_text()).into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HospitalError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HospitalError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HospitalError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            HospitalError::Auth(err @ AuthError::Forbidden { .. }) => {
                (StatusCode::FORBIDDEN, err.to_string())
            }
            HospitalError::Auth(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            HospitalError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            HospitalError::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let mut response = Envelope::failure(status, message).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_domain::error::{ConflictError, NotFoundError};
    use hospital_domain::id::RoomId;

    fn status_of(err: impl Into<HospitalError>) -> StatusCode {
        let err: HospitalError = err.into();
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_each_error_kind_to_its_status() {
        assert_eq!(
            status_of(ValidationError::EmptyField("name")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(NotFoundError {
                entity: "Room",
                id: "x".to_string()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ConflictError::RoomOccupied {
                room_id: RoomId::new()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(AuthError::MissingToken), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthError::Forbidden {
                permission: "rooms.write".to_string()
            }),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(HospitalError::Storage("disk on fire".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn should_ask_for_bearer_token_on_unauthorized() {
        let response = ApiError::from(HospitalError::from(AuthError::InvalidToken)).into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
