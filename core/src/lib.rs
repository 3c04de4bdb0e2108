//! Dialect-independent building blocks for querycraft.
//!
//! This crate owns the SQL fragment representation ([`SQL`]), the typed
//! expression layer ([`expr`]), the SQL type markers used to reject
//! ill-typed comparisons at compile time ([`types`]), and the predicate
//! builder that folds optional filter conditions into one conjunction
//! ([`predicate`]). Dialect crates supply the parameter value type and the
//! statement builders.

pub mod column;
pub mod error;
pub mod expr;
pub mod join;
pub mod order;
pub mod predicate;
pub mod relation;
pub mod sql;
pub mod traits;
pub mod types;

#[macro_use]
mod tracing;

// Re-export key types and traits
pub use column::Column;
pub use error::{QueryError, Result};
pub use expr::*;
pub use join::{Join, JoinType};
pub use order::*;
pub use predicate::{Predicate, RequiredJoin};
pub use relation::Relation;
pub use sql::{SQL, SQLChunk, Token};
pub use traits::*;

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "tracing")]
    pub use ::tracing;
}
