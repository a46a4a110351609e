//! Shape contract a type must satisfy to be persisted by the generic
//! repository.

use chrono::{DateTime, Utc};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Minimal persistence contract for an entity type.
///
/// The generic repository derives all SQL from `TABLE` and `COLUMNS` and
/// moves data through `bind_values`/`from_row`, so declaring a new entity
/// requires no hand-written CRUD. The `id`, `created_at` and `updated_at`
/// columns are repository conventions and must not appear in `COLUMNS`;
/// audit timestamps are stamped by the repository on every save.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Primary key type, assigned by the datastore on first save.
    type Key: ToSql + Clone + PartialEq + Send + Sync + 'static;

    /// Table the entity maps to.
    const TABLE: &'static str;

    /// Data columns in declaration order, excluding `id` and the audit
    /// timestamps.
    const COLUMNS: &'static [&'static str];

    /// Returns the identifier, or `None` for an entity not yet saved.
    fn id(&self) -> Option<Self::Key>;

    fn set_id(&mut self, id: Self::Key);

    fn created_at(&self) -> DateTime<Utc>;

    fn set_created_at(&mut self, at: DateTime<Utc>);

    fn updated_at(&self) -> DateTime<Utc>;

    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// Decodes one row selected with `id`, `COLUMNS`, `created_at`,
    /// `updated_at`.
    fn from_row(row: &Row) -> Self;

    /// Query parameters for the data columns, in `COLUMNS` order.
    fn bind_values(&self) -> Vec<&(dyn ToSql + Sync)>;
}
