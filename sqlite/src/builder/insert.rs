use crate::values::SQLiteValue;
use querycraft_core::{
    Column, Expr, SQL, ToSQL, Token,
    traits::SQLTableInfo,
    types::{Compatible, DataType},
};

use super::SQLiteSQL;

/// Builds an INSERT of a single row.
///
/// Values are type-checked against their column:
///
/// ```ignore
/// let team = QTeam::new();
/// QueryBuilder::new().insert(team).value(team.name, "teamA");   // OK
/// QueryBuilder::new().insert(team).value(team.name, 10);        // Compile error
/// ```
#[derive(Debug, Clone)]
pub struct InsertBuilder<'a, T> {
    table: T,
    columns: Vec<&'static str>,
    values: Vec<SQLiteSQL<'a>>,
}

impl<'a, T: SQLTableInfo> InsertBuilder<'a, T> {
    pub(crate) fn new(table: T) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Sets the value of one column.
    pub fn value<C, E>(mut self, column: Column<C>, value: E) -> Self
    where
        C: DataType + Compatible<E::SQLType>,
        E: Expr<'a, SQLiteValue<'a>>,
    {
        self.columns.push(column.name());
        self.values.push(value.into_sql());
        self
    }
}

impl<'a, T: SQLTableInfo> ToSQL<'a, SQLiteValue<'a>> for InsertBuilder<'a, T> {
    fn to_sql(&self) -> SQLiteSQL<'a> {
        let sql = SQL::token(Token::INSERT)
            .push(Token::INTO)
            .append(SQL::ident(self.table.name()));

        if self.columns.is_empty() {
            return sql.append(SQL::raw("DEFAULT VALUES"));
        }

        let columns = SQL::join(self.columns.iter().map(|name| SQL::ident(*name)), Token::COMMA);
        sql.append(columns.parens())
            .push(Token::VALUES)
            .append(SQL::join(self.values.iter().cloned(), Token::COMMA).parens())
    }
}
