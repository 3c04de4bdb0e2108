//! Aggregate functions.
//!
//! `count` and `count_all` return `BigInt`; `sum`, `min` and `max` keep the
//! input type; `avg` always returns `Double`.

use crate::sql::SQL;
use crate::traits::SQLParam;
use crate::types::{BigInt, DataType, Double, Numeric};

use super::{Expr, SQLExpr};

/// COUNT(*)
pub fn count_all<'a, V>() -> SQLExpr<'a, V, BigInt>
where
    V: SQLParam + 'a,
{
    SQLExpr::new(SQL::func("COUNT", SQL::raw("*")))
}

/// COUNT(expr), counting non-null values.
pub fn count<'a, V, E>(expr: E) -> SQLExpr<'a, V, BigInt>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
{
    SQLExpr::new(SQL::func("COUNT", expr.into_sql()))
}

/// SUM(expr)
pub fn sum<'a, V, E>(expr: E) -> SQLExpr<'a, V, E::SQLType>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    E::SQLType: Numeric,
{
    SQLExpr::new(SQL::func("SUM", expr.into_sql()))
}

/// AVG(expr)
pub fn avg<'a, V, E>(expr: E) -> SQLExpr<'a, V, Double>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    E::SQLType: Numeric,
{
    SQLExpr::new(SQL::func("AVG", expr.into_sql()))
}

/// MIN(expr)
pub fn min<'a, V, E>(expr: E) -> SQLExpr<'a, V, E::SQLType>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    E::SQLType: DataType,
{
    SQLExpr::new(SQL::func("MIN", expr.into_sql()))
}

/// MAX(expr)
pub fn max<'a, V, E>(expr: E) -> SQLExpr<'a, V, E::SQLType>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    E::SQLType: DataType,
{
    SQLExpr::new(SQL::func("MAX", expr.into_sql()))
}
