use std::borrow::Cow;

use crate::{sql::tokens::Token, traits::SQLParam};

/// A SQL chunk represents a part of an SQL statement.
///
/// - `Token` - SQL keywords and operators (SELECT, FROM, =, etc.)
/// - `Ident` - Quoted identifiers ("cnt", "username")
/// - `Raw` - Unquoted raw SQL text (function names, literals)
/// - `Number` - Unsigned integer literal (LIMIT/OFFSET values)
/// - `Param` - Positional parameter carrying its value
/// - `Table` - Table reference under an alias
/// - `Column` - Column reference qualified by its table alias
#[derive(Debug, Clone)]
pub enum SQLChunk<'a, V: SQLParam> {
    /// SQL keywords and operators: SELECT, FROM, WHERE, =, AND, etc.
    Token(Token),

    /// Quoted identifier
    /// Renders as: "name"
    Ident(Cow<'a, str>),

    /// Raw SQL text, rendered as-is
    Raw(Cow<'a, str>),

    /// Unsigned integer literal
    Number(usize),

    /// Parameter value
    /// Renders as: ?
    Param(V),

    /// Table reference
    /// Renders as: "name", or "name" AS "alias" when the alias differs
    Table {
        name: &'static str,
        alias: &'static str,
    },

    /// Column reference
    /// Renders as: "alias"."column"
    Column {
        table: &'static str,
        name: &'static str,
    },
}

impl<'a, V: SQLParam> SQLChunk<'a, V> {
    /// Creates a token chunk - const
    #[inline]
    pub const fn token(t: Token) -> Self {
        Self::Token(t)
    }

    /// Creates a quoted identifier from a static string - const
    #[inline]
    pub const fn ident_static(name: &'static str) -> Self {
        Self::Ident(Cow::Borrowed(name))
    }

    /// Creates raw SQL text from a static string - const
    #[inline]
    pub const fn raw_static(text: &'static str) -> Self {
        Self::Raw(Cow::Borrowed(text))
    }

    /// Creates a table chunk - const
    #[inline]
    pub const fn table(name: &'static str, alias: &'static str) -> Self {
        Self::Table { name, alias }
    }

    /// Creates a column chunk - const
    #[inline]
    pub const fn column(table: &'static str, name: &'static str) -> Self {
        Self::Column { table, name }
    }

    /// Write chunk content to buffer. Parameters render as `?`.
    pub(crate) fn write(&self, buf: &mut impl core::fmt::Write) {
        match self {
            SQLChunk::Token(token) => {
                let _ = buf.write_str(token.as_str());
            }
            SQLChunk::Ident(name) => {
                let _ = buf.write_char('"');
                let _ = buf.write_str(name);
                let _ = buf.write_char('"');
            }
            SQLChunk::Raw(text) => {
                let _ = buf.write_str(text);
            }
            SQLChunk::Number(n) => {
                let _ = write!(buf, "{n}");
            }
            SQLChunk::Param(_) => {
                let _ = buf.write_char('?');
            }
            SQLChunk::Table { name, alias } => {
                let _ = buf.write_char('"');
                let _ = buf.write_str(name);
                let _ = buf.write_char('"');
                if name != alias {
                    let _ = buf.write_str(" AS \"");
                    let _ = buf.write_str(alias);
                    let _ = buf.write_char('"');
                }
            }
            SQLChunk::Column { table, name } => {
                let _ = buf.write_char('"');
                let _ = buf.write_str(table);
                let _ = buf.write_str("\".\"");
                let _ = buf.write_str(name);
                let _ = buf.write_char('"');
            }
        }
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SQLChunk::Token(t) => !t.is_punctuation() && !t.is_operator(),
            SQLChunk::Ident(_)
            | SQLChunk::Raw(_)
            | SQLChunk::Number(_)
            | SQLChunk::Param(_)
            | SQLChunk::Table { .. }
            | SQLChunk::Column { .. } => true,
        }
    }
}

impl<'a, V: SQLParam> From<Token> for SQLChunk<'a, V> {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}
