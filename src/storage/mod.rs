//! Store gateway for the Car entity.
//!
//! Handlers only ever talk to [`CarStore`]; the concrete backend is chosen at
//! startup and injected through the router state.

pub mod memory;
pub mod postgres;

use crate::domain::{Car, CarPatch, NewCar};
use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryCarStore;
pub use postgres::PostgresCarStore;

/// Failures reported by a [`CarStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row carries the requested id.
    #[error("car {0} not found")]
    NotFound(i64),

    /// The store refused the data itself (bad value, constraint violation).
    #[error("rejected by store: {0}")]
    Rejected(String),

    /// Connectivity, pool or query failure.
    #[error("database error: {0}")]
    Backend(#[source] sqlx::Error),
}

impl StoreError {
    /// True when the failure is caused by the submitted data rather than the backend.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Rejected(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // SQLSTATE class 22 = data exception, 23 = integrity constraint violation.
            let rejected = db_err
                .code()
                .map(|code| code.starts_with("22") || code.starts_with("23"))
                .unwrap_or(false);
            if rejected {
                return StoreError::Rejected(db_err.message().to_string());
            }
        }
        StoreError::Backend(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Contract every car backend provides.
///
/// Implementations own their connection resources and must be safe to share
/// between concurrent requests. No method spans more than one statement.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Returns every car, ordered by id.
    async fn find_all(&self) -> StoreResult<Vec<Car>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Car>;

    /// Persists `car` under a freshly assigned id and returns the stored row.
    async fn insert(&self, car: NewCar) -> StoreResult<Car>;

    /// Overwrites the fields present in `patch` on row `id`.
    ///
    /// Fails with [`StoreError::NotFound`] when the row does not exist, even if
    /// the patch is empty.
    async fn update_by_id(&self, id: i64, patch: &CarPatch) -> StoreResult<()>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> StoreResult<()>;
}
