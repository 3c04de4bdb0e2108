// Local imports
use crate::values::SQLiteValue;
use querycraft_core::{FromSource, SQL, Selection, traits::SQLTableInfo};

// Import modules - these provide specific builder types
pub mod insert;
#[cfg(feature = "rusqlite")]
mod rusqlite;
pub mod select;

pub use insert::InsertBuilder;
// Export state markers for easier use
pub use select::{SelectBuilder, SelectFromSet, SelectInitial, SelectJoinSet};

pub(crate) type SQLiteSQL<'a> = SQL<'a, SQLiteValue<'a>>;

/// Builder states from which a statement can be rendered and executed.
pub trait ExecutableState {}

/// Main query builder for SQLite operations.
///
/// `QueryBuilder` is the entry point of the fluent API. Selections are typed:
/// the select list determines the Rust row type, and every predicate passed
/// to `r#where` must be a boolean expression.
///
/// ```ignore
/// let member = QMember::new();
/// let team = QTeam::new();
///
/// let query = QueryBuilder::new()
///     .select((member.username, team.name))
///     .from(member)
///     .join(member.team, team)
///     .r#where(eq(member.username, "member1"));
///
/// assert_eq!(
///     query.to_sql().sql(),
///     r#"SELECT "member"."username", "team"."name" FROM "member" JOIN "team" ON "member"."team_id" = "team"."id" WHERE "member"."username" = ?"#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    pub const fn new() -> Self {
        Self
    }

    /// Begins a SELECT query with the specified columns.
    pub fn select<'a, T>(&self, selection: T) -> SelectBuilder<'a, SelectInitial, T>
    where
        T: Selection<'a, SQLiteValue<'a>>,
    {
        SelectBuilder::new(selection.columns(), false)
    }

    /// Begins a SELECT DISTINCT query with the specified columns.
    pub fn select_distinct<'a, T>(&self, selection: T) -> SelectBuilder<'a, SelectInitial, T>
    where
        T: Selection<'a, SQLiteValue<'a>>,
    {
        SelectBuilder::new(selection.columns(), true)
    }

    /// Selects every column of `table` from `table`.
    pub fn select_from<'a, T>(&self, table: T) -> SelectBuilder<'a, SelectFromSet, T>
    where
        T: Selection<'a, SQLiteValue<'a>> + FromSource<'a, SQLiteValue<'a>>,
    {
        SelectBuilder::new(table.columns(), false).from(table)
    }

    /// Begins an INSERT query for the specified table.
    pub fn insert<'a, T: SQLTableInfo>(&self, table: T) -> InsertBuilder<'a, T> {
        InsertBuilder::new(table)
    }
}

/// Shorthand for `QueryBuilder::new().select(selection)`.
pub fn select<'a, T>(selection: T) -> SelectBuilder<'a, SelectInitial, T>
where
    T: Selection<'a, SQLiteValue<'a>>,
{
    QueryBuilder::new().select(selection)
}
