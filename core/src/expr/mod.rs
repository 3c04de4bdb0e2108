//! Typed SQL expressions.
//!
//! Every expression carries its SQL type as a marker (see [`crate::types`]).
//! Comparison functions require both operands to be [`Compatible`], filters
//! require [`Bool`], and aggregates like `sum` require [`Numeric`] input, so
//! ill-typed queries fail to compile.
//!
//! [`Compatible`]: crate::types::Compatible
//! [`Bool`]: crate::types::Bool
//! [`Numeric`]: crate::types::Numeric

mod agg;
mod cmp;
mod logical;
mod set;

pub use agg::*;
pub use cmp::*;
pub use logical::*;
pub use set::*;

use core::marker::PhantomData;

use crate::sql::SQL;
use crate::traits::{SQLParam, Selection, ToSQL};
use crate::types::{BigInt, Bool, DataType, Double, Int, Text};

/// A SQL expression with a known SQL type.
pub trait Expr<'a, V: SQLParam>: ToSQL<'a, V> {
    type SQLType: DataType;
}

/// A SQL expression that carries type information.
///
/// This wrapper preserves the SQL type through operations, enabling
/// compile-time type checking of SQL expressions.
#[derive(Debug, Clone)]
pub struct SQLExpr<'a, V: SQLParam, T: DataType> {
    sql: SQL<'a, V>,
    _ty: PhantomData<T>,
}

impl<'a, V: SQLParam, T: DataType> SQLExpr<'a, V, T> {
    /// Create a new typed expression from raw SQL.
    #[inline]
    pub fn new(sql: SQL<'a, V>) -> Self {
        Self {
            sql,
            _ty: PhantomData,
        }
    }

    /// Get a reference to the inner SQL.
    #[inline]
    pub fn as_sql(&self) -> &SQL<'a, V> {
        &self.sql
    }
}

impl<'a, V: SQLParam, T: DataType> ToSQL<'a, V> for SQLExpr<'a, V, T> {
    fn to_sql(&self) -> SQL<'a, V> {
        self.sql.clone()
    }

    fn into_sql(self) -> SQL<'a, V> {
        self.sql
    }
}

impl<'a, V: SQLParam, T: DataType> From<SQLExpr<'a, V, T>> for SQL<'a, V> {
    fn from(expr: SQLExpr<'a, V, T>) -> Self {
        expr.sql
    }
}

impl<'a, V: SQLParam, T: DataType> Expr<'a, V> for SQLExpr<'a, V, T> {
    type SQLType = T;
}

impl<'a, V: SQLParam + 'a, T: DataType> Selection<'a, V> for SQLExpr<'a, V, T> {
    fn columns(&self) -> Vec<SQL<'a, V>> {
        vec![self.sql.clone().parens_if_subquery()]
    }

    fn width(&self) -> usize {
        1
    }
}

// Literals bind as parameters with the SQL type of their Rust type.

macro_rules! impl_expr_for_literal {
    ($($ty:ty => $sql:ty),* $(,)?) => {
        $(
            impl<'a, V> Expr<'a, V> for $ty
            where
                V: SQLParam + 'a + From<$ty>,
            {
                type SQLType = $sql;
            }
        )*
    };
}

impl_expr_for_literal!(
    i32 => Int,
    i64 => BigInt,
    f64 => Double,
    bool => Bool,
    String => Text,
);

impl<'a, V> Expr<'a, V> for &'a str
where
    V: SQLParam + 'a + From<&'a str>,
{
    type SQLType = Text;
}

// `None` renders as NULL under the SQL type of the wrapped expression.
impl<'a, V, T> Expr<'a, V> for Option<T>
where
    V: SQLParam + 'a,
    T: Expr<'a, V>,
{
    type SQLType = T::SQLType;
}
