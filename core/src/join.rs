//! Join kinds for SQL JOIN clauses

use crate::{SQL, ToSQL, traits::SQLParam};

/// The type of JOIN operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum JoinType {
    #[default]
    Join,
    Inner,
    Left,
    Right,
    Full,
}

/// Builder for constructing JOIN clauses
///
/// This struct uses a builder pattern with const fn methods to allow
/// compile-time construction of JOIN specifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Join {
    pub join_type: JoinType,
    pub outer: bool, // only meaningful for LEFT/RIGHT/FULL
}

impl Join {
    /// Creates a new Join with default settings (basic JOIN)
    pub const fn new() -> Self {
        Self {
            join_type: JoinType::Join,
            outer: false,
        }
    }

    /// Makes this an INNER join
    pub const fn inner(mut self) -> Self {
        self.join_type = JoinType::Inner;
        self
    }

    /// Makes this a LEFT join
    pub const fn left(mut self) -> Self {
        self.join_type = JoinType::Left;
        self
    }

    /// Makes this a RIGHT join
    pub const fn right(mut self) -> Self {
        self.join_type = JoinType::Right;
        self
    }

    /// Makes this a FULL join
    pub const fn full(mut self) -> Self {
        self.join_type = JoinType::Full;
        self
    }

    /// Makes this an OUTER join (LEFT OUTER, RIGHT OUTER, FULL OUTER)
    pub const fn outer(mut self) -> Self {
        self.outer = true;
        self
    }
}

impl<'a, V: SQLParam + 'a> ToSQL<'a, V> for Join {
    fn to_sql(&self) -> SQL<'a, V> {
        let join_str = match (self.join_type, self.outer) {
            (JoinType::Join, _) => "JOIN",
            (JoinType::Inner, _) => "INNER JOIN",
            (JoinType::Left, false) => "LEFT JOIN",
            (JoinType::Left, true) => "LEFT OUTER JOIN",
            (JoinType::Right, false) => "RIGHT JOIN",
            (JoinType::Right, true) => "RIGHT OUTER JOIN",
            (JoinType::Full, false) => "FULL JOIN",
            (JoinType::Full, true) => "FULL OUTER JOIN",
        };
        SQL::raw(join_str)
    }
}
