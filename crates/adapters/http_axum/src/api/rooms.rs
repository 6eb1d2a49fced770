//! Room occupancy endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hospital_app::ports::{HospitalStore, PasswordHasher, TokenCodec};
use hospital_app::services::room_allocator::Availability;
use hospital_domain::id::RoomId;
use hospital_domain::occupancy::RoomClaim;

use crate::api::records::parse_id;
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::state::AppState;

/// Response body for `GET /api/rooms/{id}/availability`.
#[derive(Debug, Serialize)]
pub struct AvailabilityBody {
    pub room_id: RoomId,
    pub available: bool,
    pub occupant: Option<RoomClaim>,
}

impl From<Availability> for AvailabilityBody {
    fn from(availability: Availability) -> Self {
        Self {
            room_id: availability.room_id,
            available: availability.available,
            occupant: availability.occupant,
        }
    }
}

/// Possible responses from the availability endpoint.
pub enum AvailabilityResponse {
    Ok(AvailabilityBody),
}

impl IntoResponse for AvailabilityResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(body) => {
                Envelope::success(StatusCode::OK, "Room availability retrieved", body)
                    .into_response()
            }
        }
    }
}

/// `GET /api/rooms/{id}/availability`
pub async fn availability<S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
) -> Result<AvailabilityResponse, ApiError>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let room_id = parse_id::<RoomId>(&id)?;
    let availability = state.allocator().availability(room_id).await?;
    Ok(AvailabilityResponse::Ok(availability.into()))
}
