//! SQLite implementation for querycraft
//!
//! This crate provides the SQLite parameter value type, the table
//! declaration macro, the connection-less select and insert builders, and
//! (with the `rusqlite` feature) their execution against a
//! [`rusqlite::Connection`].

pub mod builder;
mod macros;
#[cfg(feature = "rusqlite")]
pub mod row;
pub mod values;

pub mod types {
    pub use querycraft_core::types::*;

    pub type Integer = BigInt;
    pub type Real = Double;
}

pub use builder::{QueryBuilder, select};
#[cfg(feature = "rusqlite")]
pub use row::{FromSQLiteRow, ResultRow, RowLayout};
pub use values::{OwnedSQLiteValue, SQLiteValue};

#[doc(hidden)]
pub mod __private {
    pub use querycraft_core as core;
}

pub mod prelude {
    pub use crate::builder::{
        ExecutableState, InsertBuilder, QueryBuilder, SelectBuilder, SelectFromSet,
        SelectInitial, SelectJoinSet, select,
    };
    #[cfg(feature = "rusqlite")]
    pub use crate::row::{FromSQLiteRow, ResultRow, RowLayout};
    pub use crate::sqlite_table;
    pub use crate::values::SQLiteValue;
    pub use querycraft_core::types::{BigInt, Bool, Double, Int, Text};
    pub use querycraft_core::{
        Column, Expr, FromSource, Join, OrderSpecifier, Predicate, Relation, RequiredJoin,
        SQLExpr, SQLTableInfo, Selection, ToSQL, and, and2, asc, avg, between, contains,
        count, count_all, desc, eq, exists, gt, gte, in_array, in_subquery, is_not_null,
        is_null, like, lt, lte, max, min, neq, not, not_exists, not_in_array, or, or2,
        starts_with, sum,
    };
}
