//! Persistent entities and their many-to-one references.

use querycraft_core::{Column, FromSource, Result, Selection, traits::SQLTableInfo, types::BigInt};
use querycraft_sqlite::{FromSQLiteRow, SQLiteValue, builder::InsertBuilder};

/// A record mapped to one table row, identified by a generated integer key.
///
/// Rows are materialized through [`FromSQLiteRow`]; new rows are written
/// through the insert statement returned by [`Entity::insert`].
pub trait Entity: FromSQLiteRow + Clone + 'static {
    /// Table handle of this entity.
    type Table: SQLTableInfo
        + Default
        + for<'a> Selection<'a, SQLiteValue<'a>>
        + for<'a> FromSource<'a, SQLiteValue<'a>>;

    /// Entity name, used in errors and as first-level cache key.
    const NAME: &'static str;

    /// Generated identity, `None` until persisted.
    fn id(&self) -> Option<i64>;

    fn assign_id(&mut self, id: i64);

    fn id_column(table: &Self::Table) -> Column<BigInt>;

    /// INSERT of this entity's current state.
    ///
    /// Fails with [`QueryError::TransientReference`](querycraft_core::QueryError::TransientReference)
    /// when the entity references another entity that has no identity yet.
    fn insert<'a>(&'a self, table: Self::Table) -> Result<InsertBuilder<'a, Self::Table>>;
}

/// A many-to-one association, loaded or not.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    /// Only the foreign key is known
    Unloaded(i64),
    Loaded(T),
}

impl<T: Entity> Reference<T> {
    /// Identity of the referenced entity, `None` if it is loaded but transient.
    pub fn id(&self) -> Option<i64> {
        match self {
            Reference::Unloaded(id) => Some(*id),
            Reference::Loaded(entity) => entity.id(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Reference::Loaded(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Reference::Loaded(entity) => Some(entity),
            Reference::Unloaded(_) => None,
        }
    }
}
