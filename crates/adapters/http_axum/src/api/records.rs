//! Generic JSON REST handlers shared by every record type.
//!
//! Each route in [`crate::api::routes`] instantiates these handlers for one
//! [`Resource`].

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use hospital_app::lifecycle::Lifecycle;
use hospital_app::ports::{HospitalStore, PasswordHasher, Repository, TokenCodec};
use hospital_domain::error::{HospitalError, ValidationError};

use crate::api::resource::Resource;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse<T> {
    Ok(Vec<T>),
}

impl<T: Resource> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(records) => Envelope::success(
                StatusCode::OK,
                format!("{} list retrieved", T::NAME),
                records,
            )
            .into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse<T> {
    Ok(T),
}

impl<T: Resource> IntoResponse for GetResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(record) => {
                Envelope::success(StatusCode::OK, format!("{} retrieved", T::NAME), record)
                    .into_response()
            }
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse<T> {
    Created(T),
}

impl<T: Resource> IntoResponse for CreateResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Created(record) => {
                Envelope::success(StatusCode::CREATED, format!("{} created", T::NAME), record)
                    .into_response()
            }
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse<T> {
    Ok(T),
}

impl<T: Resource> IntoResponse for UpdateResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(record) => {
                Envelope::success(StatusCode::OK, format!("{} updated", T::NAME), record)
                    .into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted(&'static str),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted(name) => {
                Envelope::empty(StatusCode::OK, format!("{name} deleted")).into_response()
            }
        }
    }
}

/// Parse an identifier taken from the request path.
pub(crate) fn parse_id<I: FromStr>(raw: &str) -> Result<I, ApiError> {
    I::from_str(raw)
        .map_err(|_| HospitalError::from(ValidationError::InvalidId(raw.to_string())).into())
}

/// `GET /api/<resource>`
pub async fn list<T, S, H, C>(
    State(state): State<AppState<S, H, C>>,
) -> Result<ListResponse<T>, ApiError>
where
    T: Resource + Lifecycle<S>,
    S: HospitalStore + Repository<T>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let records = state.records::<T>().list().await?;
    Ok(ListResponse::Ok(records))
}

/// `GET /api/<resource>/{id}`
pub async fn get<T, S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
) -> Result<GetResponse<T>, ApiError>
where
    T: Resource + Lifecycle<S>,
    S: HospitalStore + Repository<T>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let id = parse_id::<T::Id>(&id)?;
    let record = state.records::<T>().get(id).await?;
    Ok(GetResponse::Ok(record))
}

/// `POST /api/<resource>`
pub async fn create<T, S, H, C>(
    State(state): State<AppState<S, H, C>>,
    body: Result<Json<T::Payload>, JsonRejection>,
) -> Result<CreateResponse<T>, ApiError>
where
    T: Resource + Lifecycle<S>,
    S: HospitalStore + Repository<T>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
    T::Id: Default,
{
    let Json(payload) = body?;
    let record = T::from_payload(T::Id::default(), payload);
    let created = state.records::<T>().create(record).await?;
    Ok(CreateResponse::Created(created))
}

/// `PUT /api/<resource>/{id}`
pub async fn update<T, S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
    body: Result<Json<T::Payload>, JsonRejection>,
) -> Result<UpdateResponse<T>, ApiError>
where
    T: Resource + Lifecycle<S>,
    S: HospitalStore + Repository<T>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let id = parse_id::<T::Id>(&id)?;
    let Json(payload) = body?;
    let updated = state
        .records::<T>()
        .update(T::from_payload(id, payload))
        .await?;
    Ok(UpdateResponse::Ok(updated))
}

/// `DELETE /api/<resource>/{id}`
pub async fn delete<T, S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    T: Resource + Lifecycle<S>,
    S: HospitalStore + Repository<T>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let id = parse_id::<T::Id>(&id)?;
    state.records::<T>().delete(id).await?;
    Ok(DeleteResponse::Deleted(T::NAME))
}
