use crate::{sql::SQL, traits::SQLParam};

/// Static metadata of one table instance: its name, the alias it is
/// referenced under, and its column names in declaration order.
///
/// Two instances of the same table with different aliases (for example a
/// correlated subquery over `member`) render as distinct sources.
pub trait SQLTableInfo: Copy {
    fn name(&self) -> &'static str;

    fn alias(&self) -> &'static str;

    fn column_names(&self) -> &'static [&'static str];

    /// `"name"` or `"name" AS "alias"`
    fn table_sql<'a, V: SQLParam>(&self) -> SQL<'a, V> {
        SQL::table(self.name(), self.alias())
    }

    /// Every column qualified by this instance's alias, in declaration order.
    fn qualified_columns<'a, V: SQLParam>(&self) -> Vec<SQL<'a, V>> {
        let alias = self.alias();
        self.column_names()
            .iter()
            .map(|name| SQL::column(alias, *name))
            .collect()
    }
}
