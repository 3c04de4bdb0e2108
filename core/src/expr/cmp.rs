//! Type-safe comparison functions.
//!
//! - `eq`, `neq`, `gt`, `gte`, `lt`, `lte`: Require compatible types
//! - `like`, `contains`, `starts_with`: Require textual types
//! - `between`: Requires expr compatible with both bounds
//! - `is_null`, `is_not_null`: No type constraint

use crate::sql::{SQL, Token};
use crate::traits::{SQLParam, ToSQL};
use crate::types::{Bool, Compatible, Textual};

use super::{Expr, SQLExpr};

fn binary_op<'a, V, L, R>(left: L, operator: Token, right: R) -> SQL<'a, V>
where
    V: SQLParam + 'a,
    L: ToSQL<'a, V>,
    R: ToSQL<'a, V>,
{
    // Subqueries on either side are wrapped in parentheses
    left.into_sql()
        .parens_if_subquery()
        .push(operator)
        .append(right.into_sql().parens_if_subquery())
}

/// Equality comparison (`=`).
///
/// ```ignore
/// eq(member.age, 10);          // OK: Int compared with i32
/// eq(member.team_id, team.id); // OK: BigInt compared with BigInt
/// eq(member.age, "ten");       // Compile error: Int cannot be compared with Text
/// ```
pub fn eq<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V>,
    R: Expr<'a, V>,
    L::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(binary_op(left, Token::EQ, right))
}

/// Inequality comparison (`<>`).
pub fn neq<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V>,
    R: Expr<'a, V>,
    L::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(binary_op(left, Token::NE, right))
}

/// Greater-than comparison (`>`).
pub fn gt<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V>,
    R: Expr<'a, V>,
    L::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(binary_op(left, Token::GT, right))
}

/// Greater-than-or-equal comparison (`>=`).
pub fn gte<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V>,
    R: Expr<'a, V>,
    L::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(binary_op(left, Token::GE, right))
}

/// Less-than comparison (`<`).
pub fn lt<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V>,
    R: Expr<'a, V>,
    L::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(binary_op(left, Token::LT, right))
}

/// Less-than-or-equal comparison (`<=`).
pub fn lte<'a, V, L, R>(left: L, right: R) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    L: Expr<'a, V>,
    R: Expr<'a, V>,
    L::SQLType: Compatible<R::SQLType>,
{
    SQLExpr::new(binary_op(left, Token::LE, right))
}

/// BETWEEN comparison, inclusive on both ends.
pub fn between<'a, V, E, L, H>(expr: E, low: L, high: H) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    L: Expr<'a, V>,
    H: Expr<'a, V>,
    E::SQLType: Compatible<L::SQLType> + Compatible<H::SQLType>,
{
    SQLExpr::new(
        expr.into_sql()
            .push(Token::BETWEEN)
            .append(low.into_sql())
            .push(Token::AND)
            .append(high.into_sql()),
    )
}

/// LIKE pattern matching.
pub fn like<'a, V, E, P>(expr: E, pattern: P) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
    P: Expr<'a, V>,
    E::SQLType: Textual,
    P::SQLType: Textual,
{
    SQLExpr::new(binary_op(expr, Token::LIKE, pattern))
}

/// `expr LIKE '%needle%'`
pub fn contains<'a, V, E>(expr: E, needle: &str) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a + From<String>,
    E: Expr<'a, V>,
    E::SQLType: Textual,
{
    like(expr, format!("%{needle}%"))
}

/// `expr LIKE 'prefix%'`
pub fn starts_with<'a, V, E>(expr: E, prefix: &str) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a + From<String>,
    E: Expr<'a, V>,
    E::SQLType: Textual,
{
    like(expr, format!("{prefix}%"))
}

/// IS NULL check.
pub fn is_null<'a, V, E>(expr: E) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
{
    SQLExpr::new(expr.into_sql().push(Token::IS).push(Token::NULL))
}

/// IS NOT NULL check.
pub fn is_not_null<'a, V, E>(expr: E) -> SQLExpr<'a, V, Bool>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
{
    SQLExpr::new(
        expr.into_sql()
            .push(Token::IS)
            .push(Token::NOT)
            .push(Token::NULL),
    )
}
