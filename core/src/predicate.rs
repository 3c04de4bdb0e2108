//! Dynamic predicate building.
//!
//! A [`Predicate`] folds optional conditions into one conjunction, skipping
//! unset ones, and remembers which joins the active conditions depend on.
//! Attaching it to a select adds those joins unless the query already joins
//! the same alias.
//!
//! ```ignore
//! let predicate = Predicate::new()
//!     .and_option(cond.username.as_deref().map(|u| eq(member.username, u)))
//!     .and_joined(
//!         cond.team_name.as_deref().map(|n| eq(team.name, n)),
//!         member.team.required(Join::new().left(), team),
//!     );
//! ```

use crate::{
    expr::{Expr, SQLExpr, and},
    join::Join,
    sql::SQL,
    traits::{SQLParam, SQLTableInfo, ToSQL},
    types::Bool,
};

/// A join that some condition needs in order to be valid.
#[derive(Debug, Clone)]
pub struct RequiredJoin<'a, V: SQLParam> {
    pub join: Join,
    pub alias: &'static str,
    pub table: SQL<'a, V>,
    pub on: SQL<'a, V>,
}

impl<'a, V: SQLParam + 'a> RequiredJoin<'a, V> {
    pub fn new<T, E>(join: Join, target: T, on: E) -> Self
    where
        T: SQLTableInfo,
        E: Expr<'a, V, SQLType = Bool>,
    {
        Self {
            join,
            alias: target.alias(),
            table: target.table_sql(),
            on: on.into_sql(),
        }
    }
}

/// A conjunction of zero or more boolean conditions plus their required joins.
#[derive(Debug, Clone)]
pub struct Predicate<'a, V: SQLParam> {
    conditions: Vec<SQL<'a, V>>,
    joins: Vec<RequiredJoin<'a, V>>,
}

impl<'a, V: SQLParam + 'a> Default for Predicate<'a, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V: SQLParam + 'a> Predicate<'a, V> {
    /// The identity predicate: matches every row.
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            joins: Vec::new(),
        }
    }

    pub fn and<E>(mut self, condition: E) -> Self
    where
        E: Expr<'a, V, SQLType = Bool>,
    {
        self.conditions.push(condition.into_sql());
        self
    }

    /// Adds the condition when present; `None` leaves the predicate unchanged.
    pub fn and_option<E>(self, condition: Option<E>) -> Self
    where
        E: Expr<'a, V, SQLType = Bool>,
    {
        match condition {
            Some(condition) => self.and(condition),
            None => self,
        }
    }

    /// Adds the condition and its join when present.
    pub fn and_joined<E>(self, condition: Option<E>, join: RequiredJoin<'a, V>) -> Self
    where
        E: Expr<'a, V, SQLType = Bool>,
    {
        match condition {
            Some(condition) => self.and(condition).require(join),
            None => self,
        }
    }

    /// Records a join, ignoring it if the alias is already required.
    pub fn require(mut self, join: RequiredJoin<'a, V>) -> Self {
        if !self.joins.iter().any(|j| j.alias == join.alias) {
            self.joins.push(join);
        }
        self
    }

    /// True when no condition is active.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn joins(&self) -> &[RequiredJoin<'a, V>] {
        &self.joins
    }

    /// Splits into the conjunction (`None` for the identity) and required joins.
    pub fn into_parts(self) -> (Option<SQLExpr<'a, V, Bool>>, Vec<RequiredJoin<'a, V>>) {
        let condition = if self.conditions.is_empty() {
            None
        } else {
            Some(and(self.conditions.into_iter().map(SQLExpr::<V, Bool>::new)))
        };
        (condition, self.joins)
    }

    pub fn into_condition(self) -> Option<SQLExpr<'a, V, Bool>> {
        self.into_parts().0
    }
}

impl<'a, V, E> FromIterator<Option<E>> for Predicate<'a, V>
where
    V: SQLParam + 'a,
    E: Expr<'a, V, SQLType = Bool>,
{
    fn from_iter<I: IntoIterator<Item = Option<E>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Predicate::new(), |predicate, condition| {
                predicate.and_option(condition)
            })
    }
}
