use compact_str::CompactString;
use querycraft_core::{QueryError, Result, Selection};
use querycraft_sqlite::{FromSQLiteRow, ResultRow, SQLiteValue};
use rusqlite::types::{FromSql, Value, ValueRef};
use smallvec::SmallVec;

/// An untyped projection row, read back by the expressions that were
/// selected.
///
/// ```ignore
/// let rows: Vec<Tuple> = factory
///     .select((member.username, member.age))
///     .from(member)
///     .fetch()?;
/// let username: Option<String> = rows[0].get(member.username)?;
/// ```
///
/// A `Tuple` reads every select-list column from its offset on, so it must
/// be the last element when combined with other row types.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    keys: SmallVec<[CompactString; 4]>,
    values: SmallVec<[Value; 4]>,
}

impl Tuple {
    /// Value of the column rendered from `expr`; `None` for SQL NULL.
    ///
    /// Columns are matched by their SQL text, not by bound parameters, so
    /// when two select items render alike (`age > ?` twice with different
    /// values) this returns the first one. Read such columns with
    /// [`Tuple::get_at`].
    pub fn get<'a, T, E>(&self, expr: E) -> Result<Option<T>>
    where
        T: FromSql,
        E: Selection<'a, SQLiteValue<'a>>,
    {
        let key = expr
            .columns()
            .first()
            .map(|column| column.sql())
            .unwrap_or_default();
        let index = self
            .keys
            .iter()
            .position(|candidate| *candidate == key)
            .ok_or_else(|| QueryError::Mapping(format!("{key} is not part of this tuple")))?;
        self.get_at(index)
    }

    /// Value at a select-list position; `None` for SQL NULL.
    pub fn get_at<T: FromSql>(&self, index: usize) -> Result<Option<T>> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| QueryError::Mapping(format!("tuple has no column {index}")))?;
        match ValueRef::from(value) {
            ValueRef::Null => Ok(None),
            value => T::column_result(value)
                .map(Some)
                .map_err(|e| QueryError::Mapping(e.to_string())),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(CompactString::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromSQLiteRow for Tuple {
    // Width is only known per statement
    const COLUMN_COUNT: usize = 0;

    fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
        let keys = row.keys().get(offset..).unwrap_or_default();
        let mut values = SmallVec::with_capacity(keys.len());
        for index in offset..offset + keys.len() {
            values.push(row.get::<Value>(index)?);
        }
        Ok(Self {
            keys: keys.iter().map(|key| CompactString::from(key.as_str())).collect(),
            values,
        })
    }
}
