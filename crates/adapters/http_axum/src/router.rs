//! Axum router assembly.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hospital_app::ports::{HospitalStore, PasswordHasher, TokenCodec};

use crate::envelope::Envelope;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api` and answers unknown paths and
/// unsupported methods with an enveloped 404 or 405. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<S, H, C>(state: AppState<S, H, C>) -> Router
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes(state.clone()))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> Envelope<()> {
    Envelope::failure(StatusCode::NOT_FOUND, "route not found")
}

pub(crate) async fn method_not_allowed() -> Envelope<()> {
    Envelope::failure(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use hospital_app::ports::{ChildRepository, OccupancyRepository, Repository, UserRepository};
    use hospital_app::services::auth_service::{AuthPolicy, AuthService};
    use hospital_domain::error::{AuthError, HospitalError};
    use hospital_domain::id::{BuildingId, RoomId, UserId};
    use hospital_domain::occupancy::RoomClaim;
    use hospital_domain::record::Record;
    use hospital_domain::user::{AccessClaims, User};
    use tower::ServiceExt;

    /// Store that holds nothing and accepts every write.
    #[derive(Clone)]
    struct StubStore;

    impl<T: Record> Repository<T> for StubStore {
        async fn create(&self, record: T) -> Result<T, HospitalError> {
            Ok(record)
        }
        async fn get_by_id(&self, _id: T::Id) -> Result<Option<T>, HospitalError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<T>, HospitalError> {
            Ok(vec![])
        }
        async fn update(&self, record: T) -> Result<T, HospitalError> {
            Ok(record)
        }
        async fn delete(&self, _id: T::Id) -> Result<(), HospitalError> {
            Ok(())
        }
    }

    impl<T: Record, P: Record> ChildRepository<T, P> for StubStore {
        async fn find_by_parent(&self, _parent_id: P::Id) -> Result<Vec<T>, HospitalError> {
            Ok(vec![])
        }
    }

    impl OccupancyRepository for StubStore {
        async fn find_claim(&self, _room_id: RoomId) -> Result<Option<RoomClaim>, HospitalError> {
            Ok(None)
        }
    }

    impl UserRepository for StubStore {
        async fn find_by_username(&self, _username: &str) -> Result<Option<User>, HospitalError> {
            Ok(None)
        }
    }

    struct StubHasher;

    impl PasswordHasher for StubHasher {
        fn hash(&self, password: &str) -> Result<String, HospitalError> {
            Ok(format!("hashed:{password}"))
        }
        fn verify(&self, password: &str, hash: &str) -> Result<bool, HospitalError> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    /// Knows two fixed tokens: `admin-token` grants everything,
    /// `reader-token` grants read access to every resource.
    struct StubCodec;

    impl TokenCodec for StubCodec {
        fn encode(&self, claims: &AccessClaims) -> Result<String, HospitalError> {
            Ok(format!("token-for-{}", claims.username))
        }
        fn decode(&self, token: &str) -> Result<AccessClaims, HospitalError> {
            let permissions = match token {
                "admin-token" => vec!["*".to_string()],
                "reader-token" => vec!["*.read".to_string()],
                _ => return Err(AuthError::InvalidToken.into()),
            };
            Ok(AccessClaims {
                sub: UserId::new(),
                username: token.to_string(),
                permissions,
                iat: 0,
                exp: i64::MAX,
            })
        }
    }

    fn test_state() -> AppState<StubStore, StubHasher, StubCodec> {
        let policy = AuthPolicy {
            token_ttl: chrono::Duration::hours(1),
            default_permissions: vec!["*.read".to_string()],
        };
        AppState::new(
            StubStore,
            AuthService::new(StubStore, StubHasher, StubCodec, policy),
        )
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = build(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_request_without_token() {
        let (status, body) = send(request("GET", "/api/buildings", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 401);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn should_reject_unknown_token() {
        let (status, _) = send(request("GET", "/api/rooms", Some("forged"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_list_records_with_read_permission() {
        let (status, body) =
            send(request("GET", "/api/buildings", Some("reader-token"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn should_forbid_write_with_read_only_token() {
        let (status, body) = send(request(
            "POST",
            "/api/buildings",
            Some("reader-token"),
            Some(r#"{"name":"Main"}"#),
        ))
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["status"], 403);
    }

    #[tokio::test]
    async fn should_create_record_with_write_permission() {
        let (status, body) = send(request(
            "POST",
            "/api/buildings",
            Some("admin-token"),
            Some(r#"{"name":"Main","address":"1 Hospital Road"}"#),
        ))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Building created");
        assert_eq!(body["data"]["name"], "Main");
        assert!(body["data"]["id"].is_string());
    }

    #[tokio::test]
    async fn should_reject_invalid_record() {
        let (status, body) = send(request(
            "POST",
            "/api/buildings",
            Some("admin-token"),
            Some(r#"{"name":"  "}"#),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn should_reject_malformed_body() {
        let (status, body) = send(request(
            "POST",
            "/api/buildings",
            Some("admin-token"),
            Some("{not json"),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn should_reject_malformed_id() {
        let (status, _) = send(request(
            "GET",
            "/api/buildings/not-a-uuid",
            Some("admin-token"),
            None,
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_not_found_for_missing_record() {
        let uri = format!("/api/buildings/{}", BuildingId::new());
        let (status, body) = send(request("GET", &uri, Some("admin-token"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn should_return_not_found_for_children_of_missing_parent() {
        let uri = format!("/api/buildings/{}/floors", BuildingId::new());
        let (status, _) = send(request("GET", &uri, Some("reader-token"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_register_without_token() {
        let (status, body) = send(request(
            "POST",
            "/api/auth/register",
            None,
            Some(r#"{"username":"alice","password":"correct horse"}"#),
        ))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["token"], "token-for-alice");
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["user"]["username"], "alice");
        assert!(body["data"]["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn should_wrap_unknown_route_in_envelope() {
        let (status, body) = send(request("GET", "/nowhere", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn should_wrap_unsupported_method_in_envelope() {
        let (status, body) =
            send(request("PATCH", "/api/buildings", Some("admin-token"), None)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 405);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn should_wrap_unsupported_method_on_health_in_envelope() {
        let (status, body) = send(request("DELETE", "/health", None, None)).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["message"], "method not allowed");
    }
}
