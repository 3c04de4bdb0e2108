//! SQLite parameter values.

use std::borrow::Cow;

use querycraft_core::SQLParam;

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SQLiteValue<'a> {
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value (borrowed or owned string)
    Text(Cow<'a, str>),
    /// Blob value (borrowed or owned binary data)
    Blob(Cow<'a, [u8]>),
    /// NULL value
    #[default]
    Null,
}

/// A parameter value that owns its data.
pub type OwnedSQLiteValue = SQLiteValue<'static>;

impl<'a> SQLParam for SQLiteValue<'a> {}

impl<'a> SQLiteValue<'a> {
    /// Returns true if this value is NULL.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, SQLiteValue::Null)
    }

    /// Returns the integer value if this is an INTEGER.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            SQLiteValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text value if this is TEXT.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SQLiteValue::Text(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Converts this value into an owned representation.
    pub fn into_owned(self) -> OwnedSQLiteValue {
        match self {
            SQLiteValue::Integer(i) => SQLiteValue::Integer(i),
            SQLiteValue::Real(r) => SQLiteValue::Real(r),
            SQLiteValue::Text(s) => SQLiteValue::Text(Cow::Owned(s.into_owned())),
            SQLiteValue::Blob(b) => SQLiteValue::Blob(Cow::Owned(b.into_owned())),
            SQLiteValue::Null => SQLiteValue::Null,
        }
    }
}

impl<'a> core::fmt::Display for SQLiteValue<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SQLiteValue::Integer(i) => write!(f, "{i}"),
            SQLiteValue::Real(r) => write!(f, "{r}"),
            SQLiteValue::Text(s) => write!(f, "'{s}'"),
            SQLiteValue::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
            SQLiteValue::Null => f.write_str("NULL"),
        }
    }
}

// Conversions from Rust literals

impl<'a> From<i32> for SQLiteValue<'a> {
    fn from(value: i32) -> Self {
        SQLiteValue::Integer(i64::from(value))
    }
}

impl<'a> From<i64> for SQLiteValue<'a> {
    fn from(value: i64) -> Self {
        SQLiteValue::Integer(value)
    }
}

impl<'a> From<f64> for SQLiteValue<'a> {
    fn from(value: f64) -> Self {
        SQLiteValue::Real(value)
    }
}

impl<'a> From<bool> for SQLiteValue<'a> {
    fn from(value: bool) -> Self {
        SQLiteValue::Integer(i64::from(value))
    }
}

impl<'a> From<&'a str> for SQLiteValue<'a> {
    fn from(value: &'a str) -> Self {
        SQLiteValue::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<String> for SQLiteValue<'a> {
    fn from(value: String) -> Self {
        SQLiteValue::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a [u8]> for SQLiteValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        SQLiteValue::Blob(Cow::Borrowed(value))
    }
}

impl<'a, T> From<Option<T>> for SQLiteValue<'a>
where
    T: Into<SQLiteValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(SQLiteValue::Null, Into::into)
    }
}

#[cfg(feature = "rusqlite")]
impl<'a> rusqlite::ToSql for SQLiteValue<'a> {
    fn to_sql(&self) -> ::rusqlite::Result<::rusqlite::types::ToSqlOutput<'_>> {
        use rusqlite::types::{ToSqlOutput, Value, ValueRef};

        Ok(match self {
            SQLiteValue::Null => ToSqlOutput::Owned(Value::Null),
            SQLiteValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SQLiteValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SQLiteValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SQLiteValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b.as_ref())),
        })
    }
}

#[cfg(feature = "rusqlite")]
impl rusqlite::types::FromSql for OwnedSQLiteValue {
    fn column_result(
        value: rusqlite::types::ValueRef<'_>,
    ) -> rusqlite::types::FromSqlResult<Self> {
        use rusqlite::types::ValueRef;

        Ok(match value {
            ValueRef::Null => SQLiteValue::Null,
            ValueRef::Integer(i) => SQLiteValue::Integer(i),
            ValueRef::Real(r) => SQLiteValue::Real(r),
            ValueRef::Text(bytes) => SQLiteValue::Text(Cow::Owned(
                std::str::from_utf8(bytes)
                    .map_err(|e| rusqlite::types::FromSqlError::Other(Box::new(e)))?
                    .to_owned(),
            )),
            ValueRef::Blob(bytes) => SQLiteValue::Blob(Cow::Owned(bytes.to_vec())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_convert_to_storage_classes() {
        assert_eq!(SQLiteValue::from(10i32), SQLiteValue::Integer(10));
        assert_eq!(SQLiteValue::from(true), SQLiteValue::Integer(1));
        assert_eq!(SQLiteValue::from(2.5f64), SQLiteValue::Real(2.5));
        assert_eq!(SQLiteValue::from("teamA").as_str(), Some("teamA"));
        assert!(SQLiteValue::from(None::<&str>).is_null());
    }

    #[test]
    fn into_owned_detaches_borrowed_text() {
        let name = String::from("member1");
        let owned: OwnedSQLiteValue = SQLiteValue::from(name.as_str()).into_owned();
        drop(name);
        assert_eq!(owned.as_str(), Some("member1"));
    }
}
