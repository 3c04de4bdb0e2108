use querycraft_core::{
    Expr, FromSource, OrderList, Predicate, Relation, Result, SQL, Selection, ToSQL,
    traits::SQLTableInfo, types::Bool,
};
use querycraft_sqlite::{
    FromSQLiteRow, SQLiteValue,
    builder::{ExecutableState, SelectBuilder, SelectFromSet, SelectInitial, SelectJoinSet},
};

use crate::results::QueryResults;
use crate::session::Session;
use paste::paste;

macro_rules! query_join_impl {
    () => {
        query_join_impl!(inner);
        query_join_impl!(left);
        query_join_impl!(left_outer);
        query_join_impl!(right);
        query_join_impl!(full);
    };
    ($type:ident) => {
        paste! {
            pub fn [<$type _join>]<U>(
                self,
                relation: Relation<U>,
                target: U,
            ) -> Query<'a, SelectJoinSet, Sel>
            where
                U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
            {
                self.map(|builder| builder.[<$type _join>](relation, target))
            }

            pub fn [<$type _join_on>]<U, E>(
                self,
                target: U,
                condition: E,
            ) -> Query<'a, SelectJoinSet, Sel>
            where
                U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
                E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
            {
                self.map(|builder| builder.[<$type _join_on>](target, condition))
            }
        }
    };
}

/// A select statement bound to a [`Session`], executed with the `fetch*`
/// family.
#[derive(Debug, Clone)]
pub struct Query<'a, State, Sel> {
    session: &'a Session<'a>,
    builder: SelectBuilder<'a, State, Sel>,
}

impl<'a, State, Sel> Query<'a, State, Sel> {
    pub(crate) fn new(session: &'a Session<'a>, builder: SelectBuilder<'a, State, Sel>) -> Self {
        Self { session, builder }
    }

    fn map<NextState, F>(self, f: F) -> Query<'a, NextState, Sel>
    where
        F: FnOnce(SelectBuilder<'a, State, Sel>) -> SelectBuilder<'a, NextState, Sel>,
    {
        Query {
            session: self.session,
            builder: f(self.builder),
        }
    }

    /// The connection-less builder behind this query.
    pub fn builder(&self) -> &SelectBuilder<'a, State, Sel> {
        &self.builder
    }

    pub fn into_builder(self) -> SelectBuilder<'a, State, Sel> {
        self.builder
    }
}

impl<'a, Sel> Query<'a, SelectInitial, Sel> {
    #[inline]
    pub fn from<F>(self, source: F) -> Query<'a, SelectFromSet, Sel>
    where
        F: FromSource<'a, SQLiteValue<'a>>,
    {
        self.map(|builder| builder.from(source))
    }
}

impl<'a, State: ExecutableState, Sel> Query<'a, State, Sel> {
    pub fn join<U>(self, relation: Relation<U>, target: U) -> Query<'a, SelectJoinSet, Sel>
    where
        U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
    {
        self.map(|builder| builder.join(relation, target))
    }

    pub fn join_on<U, E>(self, target: U, condition: E) -> Query<'a, SelectJoinSet, Sel>
    where
        U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        self.map(|builder| builder.join_on(target, condition))
    }

    query_join_impl!();

    pub fn r#where<E>(self, condition: E) -> Query<'a, SelectFromSet, Sel>
    where
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        self.map(|builder| builder.r#where(condition))
    }

    pub fn filter(self, predicate: Predicate<'a, SQLiteValue<'a>>) -> Query<'a, SelectFromSet, Sel> {
        self.map(|builder| builder.filter(predicate))
    }

    pub fn group_by<G>(self, expressions: G) -> Query<'a, SelectFromSet, Sel>
    where
        G: Selection<'a, SQLiteValue<'a>>,
    {
        self.map(|builder| builder.group_by(expressions))
    }

    pub fn having<E>(self, condition: E) -> Query<'a, SelectFromSet, Sel>
    where
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        self.map(|builder| builder.having(condition))
    }

    pub fn order_by<O>(self, order: O) -> Query<'a, SelectFromSet, Sel>
    where
        O: OrderList<'a, SQLiteValue<'a>>,
    {
        self.map(|builder| builder.order_by(order))
    }

    #[inline]
    pub fn limit(self, limit: usize) -> Query<'a, SelectFromSet, Sel> {
        self.map(|builder| builder.limit(limit))
    }

    #[inline]
    pub fn offset(self, offset: usize) -> Query<'a, SelectFromSet, Sel> {
        self.map(|builder| builder.offset(offset))
    }

    /// Rendered SQL text with `?` placeholders.
    pub fn sql(&self) -> String {
        self.builder.to_sql().sql()
    }

    /// All matching rows, in query order.
    pub fn fetch<T: FromSQLiteRow>(&self) -> Result<Vec<T>> {
        self.builder.all(self.session.connection())
    }

    /// The only matching row, `None` when nothing matches.
    ///
    /// Fails with [`QueryError::NonUniqueResult`](querycraft_core::QueryError::NonUniqueResult)
    /// when more than one row matches.
    pub fn fetch_one<T: FromSQLiteRow>(&self) -> Result<Option<T>> {
        self.builder.one(self.session.connection())
    }

    /// The first row under `LIMIT 1`.
    pub fn fetch_first<T: FromSQLiteRow>(&self) -> Result<Option<T>> {
        self.builder.first(self.session.connection())
    }

    /// Total rows matched, ignoring ORDER BY, LIMIT and OFFSET.
    pub fn fetch_count(&self) -> Result<i64> {
        self.builder.count(self.session.connection())
    }

    /// The current page plus the total count, in two round trips.
    pub fn fetch_results<T: FromSQLiteRow>(&self) -> Result<QueryResults<T>> {
        let results = self.fetch()?;
        let total = self.fetch_count()?;
        Ok(QueryResults::new(
            results,
            total,
            self.builder.offset_value(),
            self.builder.limit_value(),
        ))
    }
}

impl<'a, Sel> Query<'a, SelectJoinSet, Sel> {
    /// Adds a condition to the ON clause of the last join.
    pub fn on<E>(self, condition: E) -> Self
    where
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        self.map(|builder| builder.on(condition))
    }

    /// Loads the last joined entity in the same round trip.
    pub fn fetch_join(self) -> Self {
        self.map(SelectBuilder::fetch_join)
    }
}

impl<'a, State: ExecutableState, Sel> ToSQL<'a, SQLiteValue<'a>> for Query<'a, State, Sel> {
    fn to_sql(&self) -> SQL<'a, SQLiteValue<'a>> {
        self.builder.to_sql()
    }
}
