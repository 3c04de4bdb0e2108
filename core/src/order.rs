//! ORDER BY specifiers.

use crate::{
    expr::Expr,
    sql::{SQL, Token},
    traits::{SQLParam, ToSQL},
};

/// Sort direction for ORDER BY clauses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderBy {
    Asc,
    Desc,
}

/// Placement of NULL values in an ORDER BY clause
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullOrdering {
    First,
    Last,
}

impl<'a, V: SQLParam + 'a> ToSQL<'a, V> for OrderBy {
    fn to_sql(&self) -> SQL<'a, V> {
        match self {
            OrderBy::Asc => SQL::token(Token::ASC),
            OrderBy::Desc => SQL::token(Token::DESC),
        }
    }
}

/// One sort key: an expression, a direction and an optional NULL placement.
#[derive(Debug, Clone)]
pub struct OrderSpecifier<'a, V: SQLParam> {
    target: SQL<'a, V>,
    order: OrderBy,
    nulls: Option<NullOrdering>,
}

impl<'a, V: SQLParam + 'a> OrderSpecifier<'a, V> {
    pub fn new<E: Expr<'a, V>>(target: E, order: OrderBy) -> Self {
        Self {
            target: target.into_sql().parens_if_subquery(),
            order,
            nulls: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullOrdering::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullOrdering::Last);
        self
    }

    pub fn order(&self) -> OrderBy {
        self.order
    }
}

impl<'a, V: SQLParam + 'a> ToSQL<'a, V> for OrderSpecifier<'a, V> {
    fn to_sql(&self) -> SQL<'a, V> {
        self.clone().into_sql()
    }

    fn into_sql(self) -> SQL<'a, V> {
        let sql = self.target.append(self.order.to_sql());
        match self.nulls {
            Some(NullOrdering::First) => sql.push(Token::NULLS).push(Token::FIRST),
            Some(NullOrdering::Last) => sql.push(Token::NULLS).push(Token::LAST),
            None => sql,
        }
    }
}

/// Creates an ascending sort key: "expr ASC"
pub fn asc<'a, V, E>(expr: E) -> OrderSpecifier<'a, V>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
{
    OrderSpecifier::new(expr, OrderBy::Asc)
}

/// Creates a descending sort key: "expr DESC"
pub fn desc<'a, V, E>(expr: E) -> OrderSpecifier<'a, V>
where
    V: SQLParam + 'a,
    E: Expr<'a, V>,
{
    OrderSpecifier::new(expr, OrderBy::Desc)
}

/// One or more sort keys accepted by `order_by`.
pub trait OrderList<'a, V: SQLParam> {
    fn into_specifiers(self) -> Vec<OrderSpecifier<'a, V>>;
}

impl<'a, V: SQLParam + 'a> OrderList<'a, V> for OrderSpecifier<'a, V> {
    fn into_specifiers(self) -> Vec<OrderSpecifier<'a, V>> {
        vec![self]
    }
}

impl<'a, V: SQLParam + 'a> OrderList<'a, V> for Vec<OrderSpecifier<'a, V>> {
    fn into_specifiers(self) -> Vec<OrderSpecifier<'a, V>> {
        self
    }
}

macro_rules! impl_order_list_for_tuple {
    ($($T:ident),+) => {
        impl<'a, V: SQLParam + 'a> OrderList<'a, V> for ($(impl_order_list_for_tuple!(@spec $T),)+) {
            #[allow(non_snake_case)]
            fn into_specifiers(self) -> Vec<OrderSpecifier<'a, V>> {
                let ($($T,)+) = self;
                vec![$($T),+]
            }
        }
    };
    (@spec $T:ident) => { OrderSpecifier<'a, V> };
}

impl_order_list_for_tuple!(A, B);
impl_order_list_for_tuple!(A, B, C);
impl_order_list_for_tuple!(A, B, C, D);
