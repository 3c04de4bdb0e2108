use querycraft_core::{FromSource, Selection};
use querycraft_sqlite::{
    SQLiteValue,
    builder::{QueryBuilder, SelectFromSet, SelectInitial},
};

use crate::query::Query;
use crate::session::Session;

/// Starts queries that execute through a [`Session`].
///
/// Creating a factory is free; it only borrows the session.
#[derive(Debug, Clone, Copy)]
pub struct QueryFactory<'a> {
    session: &'a Session<'a>,
}

impl<'a> QueryFactory<'a> {
    pub fn new(session: &'a Session<'a>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &'a Session<'a> {
        self.session
    }

    /// Begins a SELECT query with the specified columns.
    pub fn select<T>(&self, selection: T) -> Query<'a, SelectInitial, T>
    where
        T: Selection<'a, SQLiteValue<'a>>,
    {
        Query::new(self.session, QueryBuilder::new().select(selection))
    }

    /// Begins a SELECT DISTINCT query with the specified columns.
    pub fn select_distinct<T>(&self, selection: T) -> Query<'a, SelectInitial, T>
    where
        T: Selection<'a, SQLiteValue<'a>>,
    {
        Query::new(self.session, QueryBuilder::new().select_distinct(selection))
    }

    /// Selects every column of `table` from `table`.
    pub fn select_from<T>(&self, table: T) -> Query<'a, SelectFromSet, T>
    where
        T: Selection<'a, SQLiteValue<'a>> + FromSource<'a, SQLiteValue<'a>>,
    {
        Query::new(self.session, QueryBuilder::new().select_from(table))
    }
}
