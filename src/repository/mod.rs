//! Generic persistence interface and its implementations.

mod memory;
mod pg;

pub use memory::MemoryRepository;
pub use pg::PgRepository;

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::entity::Entity;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure modes. Absence on read is not an error; lookups
/// return `Ok(None)` instead.
#[derive(Debug)]
pub enum RepoError {
    /// The datastore rejected or failed the operation. Propagated to the
    /// caller, never retried here.
    Storage(tokio_postgres::Error),
    /// Delete or update targeted an identifier that does not exist.
    NotFound,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage failure: {e}"),
            Self::NotFound => write!(f, "entity not found"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::NotFound => None,
        }
    }
}

impl From<tokio_postgres::Error> for RepoError {
    fn from(value: tokio_postgres::Error) -> Self {
        Self::Storage(value)
    }
}

/// Uniform persistence operations over any [`Entity`].
///
/// Declared once per entity type and fulfilled by a generic implementation;
/// see [`PgRepository`] for the Postgres engine and [`MemoryRepository`]
/// for the in-memory one.
#[allow(async_fn_in_trait)]
pub trait Repository<E: Entity> {
    /// Inserts an entity without an id, or updates the stored row for its
    /// id. Stamps `created_at`/`updated_at` on insert and restamps
    /// `updated_at` on update. Returns the persisted entity with generated
    /// fields populated. Updating a missing id fails with
    /// [`RepoError::NotFound`].
    async fn save(&self, entity: E) -> RepoResult<E>;

    /// Looks up one entity. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: E::Key) -> RepoResult<Option<E>>;

    /// Returns all entities in insertion order. Re-fetched on every call.
    async fn find_all(&self) -> RepoResult<Vec<E>>;

    /// Removes one entity, failing with [`RepoError::NotFound`] if the id
    /// does not exist.
    async fn delete_by_id(&self, id: E::Key) -> RepoResult<()>;

    /// Number of stored entities.
    async fn count(&self) -> RepoResult<i64>;
}
