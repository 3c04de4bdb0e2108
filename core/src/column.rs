use core::marker::PhantomData;

use crate::{
    expr::Expr,
    sql::SQL,
    traits::{SQLParam, Selection, ToSQL},
    types::DataType,
};

/// A column of one table instance, typed by its SQL type.
///
/// Columns are `Copy` and carry the alias of the table instance they belong
/// to, so `member.age` and `member_sub.age` render as different references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<T: DataType> {
    table: &'static str,
    name: &'static str,
    _ty: PhantomData<T>,
}

impl<T: DataType> Column<T> {
    pub const fn new(table: &'static str, name: &'static str) -> Self {
        Self {
            table,
            name,
            _ty: PhantomData,
        }
    }

    /// Alias of the owning table instance
    pub const fn table(&self) -> &'static str {
        self.table
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<'a, V: SQLParam + 'a, T: DataType> ToSQL<'a, V> for Column<T> {
    fn to_sql(&self) -> SQL<'a, V> {
        SQL::column(self.table, self.name)
    }
}

impl<'a, V: SQLParam + 'a, T: DataType> Expr<'a, V> for Column<T> {
    type SQLType = T;
}

impl<'a, V: SQLParam + 'a, T: DataType> Selection<'a, V> for Column<T> {
    fn columns(&self) -> Vec<SQL<'a, V>> {
        vec![self.to_sql()]
    }

    fn width(&self) -> usize {
        1
    }
}
