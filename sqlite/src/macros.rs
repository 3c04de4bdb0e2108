/// Declares a table handle ("Q-type"): a `Copy` struct with one typed
/// [`Column`](querycraft_core::Column) per column and one
/// [`Relation`](querycraft_core::Relation) per many-to-one association.
///
/// Each handle is bound to an alias. `new()` uses the table name as alias;
/// `aliased("member_sub")` creates a second, independent instance for
/// subqueries and self joins.
///
/// ```ignore
/// sqlite_table! {
///     pub struct QTeam("team") {
///         id: BigInt = "INTEGER PRIMARY KEY AUTOINCREMENT",
///         name: Text = "TEXT NOT NULL",
///     }
/// }
///
/// sqlite_table! {
///     pub struct QMember("member") {
///         id: BigInt = "INTEGER PRIMARY KEY AUTOINCREMENT",
///         username: Text = "TEXT",
///         age: Int = "INTEGER NOT NULL",
///         team_id: BigInt = "INTEGER REFERENCES team(id)",
///     }
///     relations {
///         team: QTeam = team_id => id,
///     }
/// }
/// ```
#[macro_export]
macro_rules! sqlite_table {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($table:literal) {
            $($col:ident : $ty:ident = $ddl:literal),+ $(,)?
        }
        $(relations {
            $($rel:ident : $target:ident = $fk:ident => $key:ident),+ $(,)?
        })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name {
            alias: &'static str,
            $(pub $col: $crate::__private::core::Column<$crate::__private::core::types::$ty>,)+
            $($(pub $rel: $crate::__private::core::Relation<$target>,)+)?
        }

        impl $name {
            pub const NAME: &'static str = $table;
            pub const COLUMNS: &'static [&'static str] = &[$(stringify!($col)),+];

            /// Instance aliased by the table name itself.
            pub const fn new() -> Self {
                Self::aliased($table)
            }

            /// Independent instance under another alias.
            pub const fn aliased(alias: &'static str) -> Self {
                Self {
                    alias,
                    $($col: $crate::__private::core::Column::new(alias, stringify!($col)),)+
                    $($($rel: $crate::__private::core::Relation::new(
                        $crate::__private::core::Column::new(alias, stringify!($fk)),
                        stringify!($key),
                    ),)+)?
                }
            }

            /// `CREATE TABLE IF NOT EXISTS` statement for this table.
            pub fn create_table_sql() -> String {
                let columns: Vec<String> = [$((stringify!($col), $ddl)),+]
                    .iter()
                    .map(|(name, ddl)| format!("\"{}\" {}", name, ddl))
                    .collect();
                format!(
                    "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
                    $table,
                    columns.join(", ")
                )
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::__private::core::SQLTableInfo for $name {
            fn name(&self) -> &'static str {
                $table
            }

            fn alias(&self) -> &'static str {
                self.alias
            }

            fn column_names(&self) -> &'static [&'static str] {
                Self::COLUMNS
            }
        }

        impl<'a> $crate::__private::core::Selection<'a, $crate::values::SQLiteValue<'a>> for $name {
            fn columns(&self) -> Vec<$crate::__private::core::SQL<'a, $crate::values::SQLiteValue<'a>>> {
                $crate::__private::core::SQLTableInfo::qualified_columns(self)
            }

            fn width(&self) -> usize {
                Self::COLUMNS.len()
            }
        }

        impl<'a> $crate::__private::core::FromSource<'a, $crate::values::SQLiteValue<'a>> for $name {
            fn from_sql(&self) -> $crate::__private::core::SQL<'a, $crate::values::SQLiteValue<'a>> {
                $crate::__private::core::SQLTableInfo::table_sql(self)
            }
        }
    };
}
