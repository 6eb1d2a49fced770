//! `SQLite` implementation of the storage ports.
//!
//! Occupant rows and their room claim are written in one transaction. The
//! claim is inserted first so that two concurrent claims on the same room
//! serialize on the `room_claims` primary key: the loser gets
//! [`ConflictError::RoomOccupied`](hospital_domain::error::ConflictError::RoomOccupied).

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use hospital_app::ports::{ChildRepository, OccupancyRepository, Repository, UserRepository};
use hospital_domain::error::{HospitalError, NotFoundError};
use hospital_domain::id::RoomId;
use hospital_domain::occupancy::{OccupantKind, RoomClaim};
use hospital_domain::record::Record;
use hospital_domain::user::User;

use crate::error::{StorageError, claim_error, delete_error, write_error};
use crate::table::{
    ChildOf, Table, Wrapper, delete_sql, get_id, insert_sql, select_all_sql, select_by_id_sql,
    select_by_parent_sql, update_sql,
};

const INSERT_CLAIM: &str =
    "INSERT INTO room_claims (room_id, occupant_kind, occupant_id) VALUES (?, ?, ?)";
const RELEASE_CLAIM: &str = "DELETE FROM room_claims WHERE occupant_id = ?";
const SELECT_CLAIM: &str =
    "SELECT room_id, occupant_kind, occupant_id FROM room_claims WHERE room_id = ?";
const SELECT_USER_BY_NAME: &str = "SELECT * FROM users WHERE username = ?";

/// `SQLite`-backed store for every hospital record.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn not_found<T: Record>(id: T::Id) -> HospitalError {
    NotFoundError {
        entity: T::NAME,
        id: id.to_string(),
    }
    .into()
}

async fn insert_claim(conn: &mut SqliteConnection, claim: &RoomClaim) -> Result<(), HospitalError> {
    sqlx::query(INSERT_CLAIM)
        .bind(claim.room_id.to_string())
        .bind(claim.kind.as_str())
        .bind(claim.occupant_id.to_string())
        .execute(&mut *conn)
        .await
        .map_err(|err| {
            tracing::debug!(room_id = %claim.room_id, kind = %claim.kind, "room claim refused");
            claim_error(err, claim)
        })?;
    Ok(())
}

async fn release_claim(conn: &mut SqliteConnection, occupant_id: String) -> Result<(), HospitalError> {
    sqlx::query(RELEASE_CLAIM)
        .bind(occupant_id)
        .execute(&mut *conn)
        .await
        .map_err(StorageError::from)?;
    Ok(())
}

struct ClaimRow(RoomClaim);

impl<'r> sqlx::FromRow<'r, SqliteRow> for ClaimRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("occupant_kind")?;
        let occupant_id: String = row.try_get("occupant_id")?;
        Ok(Self(RoomClaim {
            room_id: get_id(row, "room_id")?,
            kind: OccupantKind::from_str(&kind).map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            occupant_id: uuid::Uuid::parse_str(&occupant_id)
                .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
        }))
    }
}

impl<T: Table> Repository<T> for SqliteStore {
    fn create(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = insert_sql::<T>();
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            if let Some(claim) = record.room_claim() {
                insert_claim(&mut tx, &claim).await?;
            }

            record
                .bind_columns(sqlx::query(&sql).bind(record.id().to_string()))?
                .execute(&mut *tx)
                .await
                .map_err(|err| write_error(err, T::NAME))?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(record)
        }
    }

    fn get_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, HospitalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = select_by_id_sql::<T>();
            let row: Option<Wrapper<T>> = sqlx::query_as(&sql)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = select_all_sql::<T>();
            let rows: Vec<Wrapper<T>> = sqlx::query_as(&sql)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, record: T) -> impl Future<Output = Result<T, HospitalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = update_sql::<T>();
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            if T::OCCUPANT_KIND.is_some() {
                release_claim(&mut tx, record.id().to_string()).await?;
            }
            if let Some(claim) = record.room_claim() {
                insert_claim(&mut tx, &claim).await?;
            }

            let result = record
                .bind_columns(sqlx::query(&sql))?
                .bind(record.id().to_string())
                .execute(&mut *tx)
                .await
                .map_err(|err| write_error(err, T::NAME))?;
            if result.rows_affected() == 0 {
                return Err(not_found::<T>(record.id()));
            }

            tx.commit().await.map_err(StorageError::from)?;
            Ok(record)
        }
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HospitalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = delete_sql::<T>();
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            if T::OCCUPANT_KIND.is_some() {
                release_claim(&mut tx, id.to_string()).await?;
            }

            let result = sqlx::query(&sql)
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|err| delete_error(err, T::NAME))?;
            if result.rows_affected() == 0 {
                return Err(not_found::<T>(id));
            }

            tx.commit().await.map_err(StorageError::from)?;
            Ok(())
        }
    }
}

impl<T, P> ChildRepository<T, P> for SqliteStore
where
    T: ChildOf<P>,
    P: Table,
{
    fn find_by_parent(
        &self,
        parent_id: P::Id,
    ) -> impl Future<Output = Result<Vec<T>, HospitalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let sql = select_by_parent_sql::<T, P>();
            let rows: Vec<Wrapper<T>> = sqlx::query_as(&sql)
                .bind(parent_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

impl OccupancyRepository for SqliteStore {
    fn find_claim(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Option<RoomClaim>, HospitalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<ClaimRow> = sqlx::query_as(SELECT_CLAIM)
                .bind(room_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|r| r.0))
        }
    }
}

impl UserRepository for SqliteStore {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, HospitalError>> + Send {
        let pool = self.pool.clone();
        let username = username.to_string();
        async move {
            let row: Option<Wrapper<User>> = sqlx::query_as(SELECT_USER_BY_NAME)
                .bind(username)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }
}
