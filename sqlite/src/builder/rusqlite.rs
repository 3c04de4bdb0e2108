use crate::builder::{ExecutableState, InsertBuilder, SQLiteSQL, SelectBuilder};
use crate::row::{FromSQLiteRow, ResultRow, RowLayout};
use querycraft_core::{QueryError, Result, ToSQL, querycraft_trace_query, traits::SQLTableInfo};
use rusqlite::{Connection, params_from_iter};

/// Rejects statements whose columns reference an alias that no FROM or JOIN
/// declares; SQLite would otherwise fail with a less precise message.
fn check_aliases(sql: &SQLiteSQL<'_>) -> Result<()> {
    match sql.undeclared_aliases().first() {
        Some(alias) => Err(QueryError::UndeclaredAlias((*alias).to_string())),
        None => Ok(()),
    }
}

impl<'a, State, Sel> SelectBuilder<'a, State, Sel>
where
    State: ExecutableState,
{
    /// Column layout of every row this query returns.
    pub fn row_layout(&self) -> RowLayout {
        RowLayout {
            keys: self.column_keys(),
            fetched: self.fetched_tables(),
        }
    }

    /// Runs the query and returns all matching rows
    pub fn all<T: FromSQLiteRow>(&self, conn: &Connection) -> Result<Vec<T>> {
        self.query(conn, &self.to_sql(), None)
    }

    /// Runs the query and returns its only row, `None` when nothing matches.
    ///
    /// Fails with [`QueryError::NonUniqueResult`] when more than one row matches.
    pub fn one<T: FromSQLiteRow>(&self, conn: &Connection) -> Result<Option<T>> {
        let mut rows = self.query(conn, &self.to_sql(), Some(2))?;
        if rows.len() > 1 {
            return Err(QueryError::NonUniqueResult);
        }
        Ok(rows.pop())
    }

    /// Runs the query with its limit capped at 1 and returns the first row,
    /// if any. A `LIMIT 0` query still returns nothing.
    pub fn first<T: FromSQLiteRow>(&self, conn: &Connection) -> Result<Option<T>> {
        let limit = self.limit_value().map_or(1, |limit| limit.min(1));
        let sql = self.render(Some(limit), self.offset_value());
        let mut rows = self.query(conn, &sql, Some(limit))?;
        Ok(rows.pop())
    }

    /// Number of rows the query matches, ignoring ORDER BY, LIMIT and OFFSET.
    pub fn count(&self, conn: &Connection) -> Result<i64> {
        let sql = self.count_sql();
        check_aliases(&sql)?;

        let (sql_str, params) = sql.build();
        querycraft_trace_query!(&sql_str, params.len());

        Ok(conn.query_row(&sql_str, params_from_iter(params), |row| row.get(0))?)
    }

    fn query<T: FromSQLiteRow>(
        &self,
        conn: &Connection,
        sql: &SQLiteSQL<'a>,
        max_rows: Option<usize>,
    ) -> Result<Vec<T>> {
        check_aliases(sql)?;

        let (sql_str, params) = sql.build();
        querycraft_trace_query!(&sql_str, params.len());

        let layout = self.row_layout();
        let mut stmt = conn.prepare(&sql_str)?;
        let mut rows = stmt.query(params_from_iter(params))?;

        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            if max_rows.is_some_and(|max| results.len() >= max) {
                break;
            }
            results.push(T::from_row(&ResultRow::new(row, &layout))?);
        }

        Ok(results)
    }
}

impl<'a, T: SQLTableInfo> InsertBuilder<'a, T> {
    /// Runs the insert and returns the number of affected rows
    pub fn execute(&self, conn: &Connection) -> Result<usize> {
        let sql = self.to_sql();
        let (sql_str, params) = sql.build();
        querycraft_trace_query!(&sql_str, params.len());

        Ok(conn.execute(&sql_str, params_from_iter(params))?)
    }

    /// Runs the insert and returns the generated row id.
    pub fn execute_returning_id(&self, conn: &Connection) -> Result<i64> {
        self.execute(conn)?;
        Ok(conn.last_insert_rowid())
    }
}
