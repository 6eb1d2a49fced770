//! Relationship queries: the children of one parent record.

use axum::extract::{Path, State};

use hospital_app::lifecycle::Lifecycle;
use hospital_app::ports::{ChildRepository, HospitalStore, PasswordHasher, Repository, TokenCodec};
use hospital_domain::record::Record;

use crate::api::records::{ListResponse, parse_id};
use crate::api::resource::Resource;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/<parent>/{id}/<children>`
///
/// Answers 404 when the parent does not exist, and an empty list when it
/// exists without children.
pub async fn list_children<T, P, S, H, C>(
    State(state): State<AppState<S, H, C>>,
    Path(id): Path<String>,
) -> Result<ListResponse<T>, ApiError>
where
    T: Resource + Lifecycle<S>,
    P: Record,
    S: HospitalStore + Repository<T> + Repository<P> + ChildRepository<T, P>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let parent_id = parse_id::<P::Id>(&id)?;
    let children = state
        .records::<T>()
        .list_by_parent::<P>(parent_id)
        .await?;
    Ok(ListResponse::Ok(children))
}
