//! Membership and existence tests (IN, EXISTS).

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};
use crate::types::{Bool, Compatible};

use super::{Expr, SQLExpr};

fn in_list<'a, V, E, I, R>(expr: E, values: I, negate: bool) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    I: IntoIterator<Item = R>,
    R: Expr<'a, V>,
{
    let list = SQL::join(values, Token::COMMA);
    // IN () is a syntax error in SQLite; an empty list matches nothing
    if list.is_empty() {
        return SQL::raw(if negate { "1 = 1" } else { "1 = 0" });
    }
    let sql = expr.into_sql();
    let sql = if negate { sql.push(Token::NOT) } else { sql };
    sql.push(Token::IN).append(list.parens())
}

/// `expr IN (v1, v2, ...)`
pub fn in_array<'a, V, E, I, R>(expr: E, values: I) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    I: IntoIterator<Item = R>,
    R: Expr<'a, V>,
    E::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(in_list(expr, values, false))
}

/// `expr NOT IN (v1, v2, ...)`
pub fn not_in_array<'a, V, E, I, R>(expr: E, values: I) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    I: IntoIterator<Item = R>,
    R: Expr<'a, V>,
    E::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(in_list(expr, values, true))
}

/// `expr IN (SELECT ...)`
pub fn in_subquery<'a, V, E, S>(expr: E, subquery: S) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    S: Expr<'a, V>,
    E::SQLType: Compatible<S::SQLType>,
{
    SQLExpr::new(
        expr.into_sql()
            .push(Token::IN)
            .append(subquery.into_sql().parens()),
    )
}

/// `EXISTS (SELECT ...)`
pub fn exists<'a, V, S>(subquery: S) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    S: ToSQL<'a, V>,
{
    SQLExpr::new(SQL::token(Token::EXISTS).append(subquery.into_sql().parens()))
}

/// `NOT EXISTS (SELECT ...)`
pub fn not_exists<'a, V, S>(subquery: S) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    S: ToSQL<'a, V>,
{
    SQLExpr::new(
        SQL::token(Token::NOT)
            .push(Token::EXISTS)
            .append(subquery.into_sql().parens()),
    )
}
