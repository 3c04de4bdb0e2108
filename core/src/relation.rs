use core::marker::PhantomData;

use crate::{
    column::Column,
    expr::{SQLExpr, eq},
    join::Join,
    predicate::RequiredJoin,
    traits::{SQLParam, SQLTableInfo},
    types::{BigInt, Bool},
};

/// A declared many-to-one association: a foreign key column on the owning
/// table instance pointing at the key column of `T`.
///
/// Joining through a relation is checked at compile time: `T` must be the
/// table type the relation was declared against.
#[derive(Debug, Clone, Copy)]
pub struct Relation<T: SQLTableInfo> {
    source: Column<BigInt>,
    target_key: &'static str,
    _target: PhantomData<T>,
}

impl<T: SQLTableInfo> Relation<T> {
    pub const fn new(source: Column<BigInt>, target_key: &'static str) -> Self {
        Self {
            source,
            target_key,
            _target: PhantomData,
        }
    }

    /// Foreign key column on the owning side
    pub const fn source(&self) -> Column<BigInt> {
        self.source
    }

    /// Join condition against one instance of the target table.
    pub fn on<'a, V: SQLParam + 'a>(&self, target: &T) -> SQLExpr<'a, V, Bool> {
        eq(
            self.source,
            Column::<BigInt>::new(target.alias(), self.target_key),
        )
    }

    /// Describes the join a predicate on `target` needs.
    pub fn required<'a, V: SQLParam + 'a>(&self, join: Join, target: T) -> RequiredJoin<'a, V> {
        RequiredJoin::new(join, target, self.on(&target))
    }
}
