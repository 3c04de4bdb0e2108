//! Offset-based extraction of Rust values from result rows.
//!
//! A single result row can be split across several types: `(A, B)` reads
//! `A` at `offset`, then `B` at `offset + A::COLUMN_COUNT`. Entities that
//! were fetch-joined find their columns through [`ResultRow::fetched`].

use querycraft_core::Result;
use rusqlite::types::{FromSql, ValueRef};

use crate::values::OwnedSQLiteValue;

/// Column layout shared by every row of one statement.
#[derive(Debug, Clone, Default)]
pub struct RowLayout {
    /// Rendered select list items, in order
    pub keys: Vec<String>,
    /// Table name and first column of every fetch-joined table
    pub fetched: Vec<(&'static str, usize)>,
}

/// One row of a result set together with its [`RowLayout`].
#[derive(Clone, Copy)]
pub struct ResultRow<'r, 's> {
    row: &'r rusqlite::Row<'s>,
    layout: &'r RowLayout,
}

impl<'r, 's> ResultRow<'r, 's> {
    pub fn new(row: &'r rusqlite::Row<'s>, layout: &'r RowLayout) -> Self {
        Self { row, layout }
    }

    pub fn get<T: FromSql>(&self, index: usize) -> Result<T> {
        Ok(self.row.get(index)?)
    }

    pub fn get_ref(&self, index: usize) -> Result<ValueRef<'_>> {
        Ok(self.row.get_ref(index)?)
    }

    pub fn is_null(&self, index: usize) -> Result<bool> {
        Ok(matches!(self.get_ref(index)?, ValueRef::Null))
    }

    /// First column of the fetch-joined table `name`, if it was fetched.
    pub fn fetched(&self, name: &str) -> Option<usize> {
        self.layout
            .fetched
            .iter()
            .find(|(table, _)| *table == name)
            .map(|(_, offset)| *offset)
    }

    pub fn keys(&self) -> &[String] {
        &self.layout.keys
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.row.as_ref().column_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extracts a Rust value from a result row at a given column offset.
#[diagnostic::on_unimplemented(
    message = "cannot read `{Self}` from a result row",
    label = "this type does not implement FromSQLiteRow"
)]
pub trait FromSQLiteRow: Sized {
    /// Number of columns this type reads from the row.
    const COLUMN_COUNT: usize;

    /// Read this type from `row` starting at column `offset`.
    fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self>;

    /// Read from offset 0.
    fn from_row(row: &ResultRow<'_, '_>) -> Result<Self> {
        Self::from_row_at(row, 0)
    }
}

macro_rules! impl_leaf_via_get {
    ($($ty:ty),*) => { $(
        impl FromSQLiteRow for $ty {
            const COLUMN_COUNT: usize = 1;
            fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
                row.get(offset)
            }
        }
    )* }
}

impl_leaf_via_get!(i64, f64, bool, String, OwnedSQLiteValue);

impl FromSQLiteRow for i32 {
    const COLUMN_COUNT: usize = 1;
    fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
        Ok(row.get::<i64>(offset)?.try_into()?)
    }
}

// -- Option<T>: NULL-aware wrapper --

impl<T: FromSQLiteRow> FromSQLiteRow for Option<T> {
    const COLUMN_COUNT: usize = T::COLUMN_COUNT;
    fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
        if row.is_null(offset)? {
            Ok(None)
        } else {
            T::from_row_at(row, offset).map(Some)
        }
    }
}

// -- Tuple impls --

macro_rules! impl_from_row_tuple {
    ($($T:ident),+) => {
        impl<$($T: FromSQLiteRow),+> FromSQLiteRow for ($($T,)+) {
            const COLUMN_COUNT: usize = 0 $(+ <$T as FromSQLiteRow>::COLUMN_COUNT)+;

            #[allow(non_snake_case)]
            fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
                let mut __off = offset;
                $(
                    let $T = <$T as FromSQLiteRow>::from_row_at(row, __off)?;
                    __off += <$T as FromSQLiteRow>::COLUMN_COUNT;
                )+
                let _ = __off;
                Ok(($($T,)+))
            }
        }
    };
}

impl_from_row_tuple!(A);
impl_from_row_tuple!(A, B);
impl_from_row_tuple!(A, B, C);
impl_from_row_tuple!(A, B, C, D);
impl_from_row_tuple!(A, B, C, D, E);
impl_from_row_tuple!(A, B, C, D, E, F);
impl_from_row_tuple!(A, B, C, D, E, F, G);
impl_from_row_tuple!(A, B, C, D, E, F, G, H);
