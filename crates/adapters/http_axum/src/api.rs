//! JSON REST API handler modules and the `/api` sub-router.

#[allow(clippy::missing_errors_doc)]
pub mod auth;
#[allow(clippy::missing_errors_doc)]
pub mod nested;
#[allow(clippy::missing_errors_doc)]
pub mod records;
pub mod resource;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use hospital_app::lifecycle::Lifecycle;
use hospital_app::ports::{ChildRepository, HospitalStore, PasswordHasher, Repository, TokenCodec};
use hospital_domain::building::{Building, Floor};
use hospital_domain::facility::{Clinic, Pharmacy, Warehouse};
use hospital_domain::medicine::{Medicine, Supplier};
use hospital_domain::patient::Patient;
use hospital_domain::prescription::Prescription;
use hospital_domain::reservation::Reservation;
use hospital_domain::room::{Room, RoomType};
use hospital_domain::staff::{Doctor, Staff};

use crate::permission::require_permission;
use crate::router::method_not_allowed;
use crate::state::AppState;

use self::resource::Resource;

/// Build the `/api` sub-router.
///
/// Everything except `/auth/*` goes through [`require_permission`], which
/// needs `state` to decode tokens.
pub fn routes<S, H, C>(state: AppState<S, H, C>) -> Router<AppState<S, H, C>>
where
    S: HospitalStore,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    let protected = Router::new();
    let protected = crud::<Building, S, H, C>(protected);
    let protected = crud::<Floor, S, H, C>(protected);
    let protected = crud::<RoomType, S, H, C>(protected);
    let protected = crud::<Room, S, H, C>(protected);
    let protected = crud::<Staff, S, H, C>(protected);
    let protected = crud::<Doctor, S, H, C>(protected);
    let protected = crud::<Patient, S, H, C>(protected);
    let protected = crud::<Pharmacy, S, H, C>(protected);
    let protected = crud::<Clinic, S, H, C>(protected);
    let protected = crud::<Warehouse, S, H, C>(protected);
    let protected = crud::<Supplier, S, H, C>(protected);
    let protected = crud::<Medicine, S, H, C>(protected);
    let protected = crud::<Reservation, S, H, C>(protected);
    let protected = crud::<Prescription, S, H, C>(protected);

    // Relationships
    let protected = children::<Floor, Building, S, H, C>(protected);
    let protected = children::<Room, Floor, S, H, C>(protected);
    let protected = children::<Medicine, Supplier, S, H, C>(protected);
    let protected = children::<Medicine, Pharmacy, S, H, C>(protected);
    let protected = children::<Reservation, Patient, S, H, C>(protected);
    let protected = children::<Prescription, Patient, S, H, C>(protected);
    let protected = children::<Reservation, Doctor, S, H, C>(protected);
    let protected = children::<Prescription, Doctor, S, H, C>(protected);

    let protected = protected
        // Occupancy
        .route(
            "/rooms/{id}/availability",
            get(rooms::availability::<S, H, C>),
        )
        // Users
        .route("/users", get(users::list::<S, H, C>))
        .route(
            "/users/{id}",
            get(users::get::<S, H, C>).delete(users::delete::<S, H, C>),
        )
        .route(
            "/users/{id}/permissions",
            put(users::set_permissions::<S, H, C>),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            require_permission::<S, H, C>,
        ));

    Router::new()
        .route("/auth/register", post(auth::register::<S, H, C>))
        .route("/auth/login", post(auth::login::<S, H, C>))
        .merge(protected)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Register list, get, create, update and delete for `T`.
fn crud<T, S, H, C>(router: Router<AppState<S, H, C>>) -> Router<AppState<S, H, C>>
where
    T: Resource + Lifecycle<S>,
    T::Id: Default,
    S: HospitalStore + Repository<T>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    router
        .route(
            &format!("/{}", T::PATH),
            get(records::list::<T, S, H, C>).post(records::create::<T, S, H, C>),
        )
        .route(
            &format!("/{}/{{id}}", T::PATH),
            get(records::get::<T, S, H, C>)
                .put(records::update::<T, S, H, C>)
                .delete(records::delete::<T, S, H, C>),
        )
}

/// Register `GET /<parent>/{id}/<children>`.
fn children<T, P, S, H, C>(router: Router<AppState<S, H, C>>) -> Router<AppState<S, H, C>>
where
    T: Resource + Lifecycle<S>,
    P: Resource,
    S: HospitalStore + Repository<T> + Repository<P> + ChildRepository<T, P>,
    H: PasswordHasher + 'static,
    C: TokenCodec + 'static,
{
    router.route(
        &format!("/{}/{{id}}/{}", P::PATH, T::PATH),
        get(nested::list_children::<T, P, S, H, C>),
    )
}
