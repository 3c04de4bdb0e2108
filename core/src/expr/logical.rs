//! Logical operators (AND, OR, NOT).
//!
//! ```ignore
//! // Function style
//! and2(condition1, condition2)
//! or2(condition1, condition2)
//! not(condition)
//!
//! // Operator style
//! condition1 & condition2
//! condition1 | condition2
//! ```

use core::ops::{BitAnd, BitOr};

use crate::sql::{SQL, Token};
use crate::traits::SQLParam;
use crate::types::Bool;

use super::{Expr, SQLExpr};

/// Logical NOT of a boolean expression.
pub fn not<'a, V, E>(expr: E) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V, SQLType = Bool>,
{
    SQLExpr::new(SQL::token(Token::NOT).append(expr.into_sql().parens()))
}

fn fold<'a, V, I, E>(conditions: I, separator: Token) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    I: IntoIterator<Item = E>,
    E: Expr<'a, V, SQLType = Bool>,
{
    let mut iter = conditions.into_iter();
    let Some(first) = iter.next() else {
        return SQL::empty();
    };
    let first = first.into_sql();
    let Some(second) = iter.next() else {
        return first;
    };
    let all = core::iter::once(first)
        .chain(core::iter::once(second.into_sql()))
        .chain(iter.map(|c| c.into_sql()));
    SQL::join(all, separator).parens()
}

/// Logical AND of multiple conditions.
///
/// Zero conditions yield an empty fragment, one condition is returned as
/// is, two or more are joined and parenthesized.
pub fn and<'a, V, I, E>(conditions: I) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    I: IntoIterator<Item = E>,
    E: Expr<'a, V, SQLType = Bool>,
{
    SQLExpr::new(fold(conditions, Token::AND))
}

/// Logical OR of multiple conditions.
pub fn or<'a, V, I, E>(conditions: I) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    I: IntoIterator<Item = E>,
    E: Expr<'a, V, SQLType = Bool>,
{
    SQLExpr::new(fold(conditions, Token::OR))
}

/// Logical AND of two expressions.
pub fn and2<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V, SQLType = Bool>,
    R: Expr<'a, V, SQLType = Bool>,
{
    SQLExpr::new(
        left.into_sql()
            .push(Token::AND)
            .append(right.into_sql())
            .parens(),
    )
}

/// Logical OR of two expressions.
pub fn or2<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V, SQLType = Bool>,
    R: Expr<'a, V, SQLType = Bool>,
{
    SQLExpr::new(
        left.into_sql()
            .push(Token::OR)
            .append(right.into_sql())
            .parens(),
    )
}

impl<'a, V, R> BitAnd<R> for SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    R: Expr<'a, V, SQLType = Bool>,
{
    type Output = SQLExpr<'a, V, Bool>;

    fn bitand(self, rhs: R) -> Self::Output {
        and2(self, rhs)
    }
}

impl<'a, V, R> BitOr<R> for SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    R: Expr<'a, V, SQLType = Bool>,
{
    type Output = SQLExpr<'a, V, Bool>;

    fn bitor(self, rhs: R) -> Self::Output {
        or2(self, rhs)
    }
}
