//! # querycraft
//!
//! A type-safe dynamic query builder over SQLite.
//!
//! ## Quick Start
//!
//! ```rust
//! use querycraft::prelude::*;
//!
//! # fn main() -> querycraft::Result<()> {
//! let conn = rusqlite::Connection::open_in_memory()?;
//! let session = Session::new(&conn);
//! session.create_schema()?;
//!
//! let mut team = Team::new("teamA");
//! session.persist(&mut team)?;
//! for (name, age) in [("member1", 10), ("member2", 20)] {
//!     session.persist(&mut Member::new(name, age, Some(&team)))?;
//! }
//!
//! let member = QMember::new();
//! let names: Vec<Option<String>> = QueryFactory::new(&session)
//!     .select(member.username)
//!     .from(member)
//!     .r#where(gte(member.age, 20))
//!     .fetch()?;
//! assert_eq!(names, vec![Some("member2".to_string())]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Dynamic filters
//!
//! A [`MemberSearchCondition`](domain::MemberSearchCondition) folds its set
//! fields into one [`Predicate`](core::Predicate); unset fields add nothing,
//! and joins the active conditions need are added once:
//!
//! ```rust
//! # use querycraft::prelude::*;
//! # fn main() -> querycraft::Result<()> {
//! # let conn = rusqlite::Connection::open_in_memory()?;
//! # let session = Session::new(&conn);
//! # session.create_schema()?;
//! let condition = MemberSearchCondition::new().team_name("teamB").age_goe(35);
//! let rows = MemberRepository::new(&session).search(&condition)?;
//! assert!(rows.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Type safety
//!
//! Comparing a column with a value of another SQL type does not compile:
//!
//! ```compile_fail
//! use querycraft::prelude::*;
//! let member = QMember::new();
//! let _ = select(member.id).from(member).r#where(eq(member.age, "ten"));
//! ```
//!
//! Neither does filtering with a non-boolean expression:
//!
//! ```compile_fail
//! use querycraft::prelude::*;
//! let member = QMember::new();
//! let _ = select(member.id).from(member).r#where(member.age);
//! ```
//!
//! Nor joining a relation onto the wrong table:
//!
//! ```compile_fail
//! use querycraft::prelude::*;
//! let member = QMember::new();
//! let other = QMember::aliased("other");
//! let _ = select(member.id).from(member).join(member.team, other);
//! ```
//!
//! A statement without FROM cannot be rendered or executed:
//!
//! ```compile_fail
//! use querycraft::prelude::*;
//! let member = QMember::new();
//! let _ = select(member.id).to_sql();
//! ```

pub mod domain;
pub mod entity;
pub mod factory;
pub mod query;
pub mod results;
pub mod session;
pub mod tuple;

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for querycraft operations
pub use querycraft_core::error::Result;

/// Error types
pub mod error {
    pub use querycraft_core::error::QueryError;
}

pub use entity::{Entity, Reference};
pub use factory::QueryFactory;
pub use query::Query;
pub use results::QueryResults;
pub use session::Session;
pub use tuple::Tuple;

/// Core types and expression functions shared by all statements.
///
/// ```rust,ignore
/// use querycraft::core::{eq, gt, and, or, count, avg};
/// ```
pub mod core {
    pub use querycraft_core::*;
}

/// SQLite value type, table macro and connection-less builders.
///
/// Subqueries are built here, without a session:
///
/// ```rust,ignore
/// let sub = QMember::aliased("member_sub");
/// let oldest = querycraft::sqlite::select(max(sub.age)).from(sub);
/// ```
pub mod sqlite {
    pub use querycraft_sqlite::*;
}

pub mod prelude {
    pub use crate::domain::{
        Member, MemberRepository, MemberSearchCondition, MemberTeamDto, Page, Pageable, QMember,
        QTeam, Team,
    };
    pub use crate::{
        Entity, Query, QueryFactory, QueryResults, Reference, Session, Tuple,
        error::QueryError,
    };
    pub use querycraft_sqlite::prelude::*;
}
