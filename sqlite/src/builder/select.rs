use crate::values::SQLiteValue;
use paste::paste;
use querycraft_core::{
    Expr, FromSource, Join, OrderList, OrderSpecifier, Predicate, Relation, RequiredJoin, SQL,
    SQLChunk, Selection, ToSQL, Token, count_all, traits::SQLTableInfo, types::Bool,
};
use std::marker::PhantomData;

// Import the ExecutableState trait
use super::{ExecutableState, SQLiteSQL};

//------------------------------------------------------------------------------
// Type State Markers
//------------------------------------------------------------------------------

/// Marker for the initial state of SelectBuilder.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectInitial;

/// Marker for the state after FROM clause
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectFromSet;

/// Marker for the state after JOIN clause. Only here can the last join be
/// refined with `on` or marked with `fetch_join`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectJoinSet;

// Const constructors for all marker types
impl SelectInitial {
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}
impl SelectFromSet {
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}
impl SelectJoinSet {
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl ExecutableState for SelectFromSet {}
impl ExecutableState for SelectJoinSet {}

#[doc(hidden)]
macro_rules! join_impl {
    () => {
        join_impl!(inner, Join::new().inner());
        join_impl!(left, Join::new().left());
        join_impl!(left_outer, Join::new().left().outer());
        join_impl!(right, Join::new().right());
        join_impl!(full, Join::new().full());
    };
    ($type:ident, $join:expr) => {
        paste! {
            pub fn [<$type _join>]<U: SQLTableInfo>(
                self,
                relation: Relation<U>,
                target: U,
            ) -> SelectBuilder<'a, SelectJoinSet, Sel>
            where
                U: Selection<'a, SQLiteValue<'a>>,
            {
                let on = relation.on(&target);
                self.push_join($join, target, on)
            }

            pub fn [<$type _join_on>]<U, E>(
                self,
                target: U,
                condition: E,
            ) -> SelectBuilder<'a, SelectJoinSet, Sel>
            where
                U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
                E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
            {
                self.push_join($join, target, condition)
            }
        }
    };
}

/// One JOIN clause, kept structured until render time so that a trailing
/// `on` can extend it and `fetch_join` can add its columns to the select list.
#[derive(Debug, Clone)]
struct JoinClause<'a> {
    join: Join,
    alias: &'static str,
    name: &'static str,
    table: SQLiteSQL<'a>,
    on: SQLiteSQL<'a>,
    columns: Vec<SQLiteSQL<'a>>,
    fetch: bool,
}

impl<'a> JoinClause<'a> {
    fn to_sql(&self) -> SQLiteSQL<'a> {
        self.join
            .to_sql()
            .append(self.table.clone())
            .push(Token::ON)
            .append(self.on.clone())
    }
}

impl<'a> From<RequiredJoin<'a, SQLiteValue<'a>>> for JoinClause<'a> {
    fn from(required: RequiredJoin<'a, SQLiteValue<'a>>) -> Self {
        Self {
            join: required.join,
            alias: required.alias,
            name: required.alias,
            table: required.table,
            on: required.on,
            columns: Vec::new(),
            fetch: false,
        }
    }
}

/// Builds a SELECT query specifically for SQLite.
///
/// `State` tracks which clauses are legal next; `Sel` is the selection the
/// builder was started with and determines the SQL type of the query when it
/// is used as a scalar subquery.
#[derive(Debug, Clone)]
pub struct SelectBuilder<'a, State, Sel> {
    distinct: bool,
    columns: Vec<SQLiteSQL<'a>>,
    from: SQLiteSQL<'a>,
    joins: Vec<JoinClause<'a>>,
    filters: Vec<SQLiteSQL<'a>>,
    group_by: Vec<SQLiteSQL<'a>>,
    having: Vec<SQLiteSQL<'a>>,
    order_by: Vec<OrderSpecifier<'a, SQLiteValue<'a>>>,
    limit: Option<usize>,
    offset: Option<usize>,
    state: PhantomData<(State, Sel)>,
}

impl<'a, State, Sel> SelectBuilder<'a, State, Sel> {
    fn into_state<Next>(self) -> SelectBuilder<'a, Next, Sel> {
        SelectBuilder {
            distinct: self.distinct,
            columns: self.columns,
            from: self.from,
            joins: self.joins,
            filters: self.filters,
            group_by: self.group_by,
            having: self.having,
            order_by: self.order_by,
            limit: self.limit,
            offset: self.offset,
            state: PhantomData,
        }
    }
}

//------------------------------------------------------------------------------
// Initial State Implementation
//------------------------------------------------------------------------------

impl<'a, Sel> SelectBuilder<'a, SelectInitial, Sel> {
    pub(crate) fn new(columns: Vec<SQLiteSQL<'a>>, distinct: bool) -> Self {
        Self {
            distinct,
            columns,
            from: SQL::empty(),
            joins: Vec::new(),
            filters: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            state: PhantomData,
        }
    }

    /// Specifies the table (or tuple of tables) to select FROM.
    #[inline]
    pub fn from<F>(self, source: F) -> SelectBuilder<'a, SelectFromSet, Sel>
    where
        F: FromSource<'a, SQLiteValue<'a>>,
    {
        let mut next = self.into_state::<SelectFromSet>();
        next.from = source.from_sql();
        next
    }
}

//------------------------------------------------------------------------------
// Executable State Implementation
//------------------------------------------------------------------------------

impl<'a, State: ExecutableState, Sel> SelectBuilder<'a, State, Sel> {
    /// Joins `target` through a declared relation: `JOIN "t" ON fk = "t"."id"`.
    pub fn join<U>(self, relation: Relation<U>, target: U) -> SelectBuilder<'a, SelectJoinSet, Sel>
    where
        U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
    {
        let on = relation.on(&target);
        self.push_join(Join::new(), target, on)
    }

    /// Joins `target` on an arbitrary condition (an unrelated or theta join).
    pub fn join_on<U, E>(self, target: U, condition: E) -> SelectBuilder<'a, SelectJoinSet, Sel>
    where
        U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        self.push_join(Join::new(), target, condition)
    }

    join_impl!();

    fn push_join<U, E>(self, join: Join, target: U, on: E) -> SelectBuilder<'a, SelectJoinSet, Sel>
    where
        U: SQLTableInfo + Selection<'a, SQLiteValue<'a>>,
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        let mut next = self.into_state::<SelectJoinSet>();
        let alias = target.alias();
        // An explicit join replaces one a predicate already required, and
        // moves last so `on` and `fetch_join` still refine it.
        next.joins.retain(|clause| clause.alias != alias);
        next.joins.push(JoinClause {
            join,
            alias,
            name: target.name(),
            table: target.table_sql(),
            on: on.into_sql(),
            columns: target.columns(),
            fetch: false,
        });
        next
    }

    /// Adds a WHERE condition. Repeated calls are combined with AND.
    pub fn r#where<E>(self, condition: E) -> SelectBuilder<'a, SelectFromSet, Sel>
    where
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        let mut next = self.into_state::<SelectFromSet>();
        let condition = condition.into_sql();
        if !condition.is_empty() {
            next.filters.push(condition);
        }
        next
    }

    /// Applies a [`Predicate`]: its conjunction goes into WHERE and each join
    /// it requires is added unless the alias is already in the query.
    pub fn filter(
        self,
        predicate: Predicate<'a, SQLiteValue<'a>>,
    ) -> SelectBuilder<'a, SelectFromSet, Sel> {
        let mut next = self.into_state::<SelectFromSet>();
        let (condition, joins) = predicate.into_parts();
        for join in joins {
            if !next.declares(join.alias) {
                next.joins.push(join.into());
            }
        }
        if let Some(condition) = condition {
            next.filters.push(condition.into_sql());
        }
        next
    }

    /// Adds GROUP BY expressions.
    pub fn group_by<G>(self, expressions: G) -> SelectBuilder<'a, SelectFromSet, Sel>
    where
        G: Selection<'a, SQLiteValue<'a>>,
    {
        let mut next = self.into_state::<SelectFromSet>();
        next.group_by.extend(expressions.columns());
        next
    }

    /// Adds a HAVING condition. Repeated calls are combined with AND.
    pub fn having<E>(self, condition: E) -> SelectBuilder<'a, SelectFromSet, Sel>
    where
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        let mut next = self.into_state::<SelectFromSet>();
        let condition = condition.into_sql();
        if !condition.is_empty() {
            next.having.push(condition);
        }
        next
    }

    /// Sorts the query results.
    pub fn order_by<O>(self, order: O) -> SelectBuilder<'a, SelectFromSet, Sel>
    where
        O: OrderList<'a, SQLiteValue<'a>>,
    {
        let mut next = self.into_state::<SelectFromSet>();
        next.order_by.extend(order.into_specifiers());
        next
    }

    /// Limits the number of rows returned.
    #[inline]
    pub fn limit(self, limit: usize) -> SelectBuilder<'a, SelectFromSet, Sel> {
        let mut next = self.into_state::<SelectFromSet>();
        next.limit = Some(limit);
        next
    }

    /// Sets the offset for the query results.
    #[inline]
    pub fn offset(self, offset: usize) -> SelectBuilder<'a, SelectFromSet, Sel> {
        let mut next = self.into_state::<SelectFromSet>();
        next.offset = Some(offset);
        next
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    pub fn offset_value(&self) -> Option<usize> {
        self.offset
    }

    /// Whether FROM or a JOIN already declares `alias`.
    pub fn declares(&self, alias: &str) -> bool {
        self.joins.iter().any(|join| join.alias == alias)
            || self
                .from
                .chunks
                .iter()
                .any(|chunk| matches!(chunk, SQLChunk::Table { alias: a, .. } if *a == alias))
    }

    /// Rendered select list items, in order. Fetched join columns are not
    /// included.
    pub fn column_keys(&self) -> Vec<String> {
        self.columns.iter().map(SQL::sql).collect()
    }

    /// Table name and column offset of every fetch-joined table, in join order.
    pub fn fetched_tables(&self) -> Vec<(&'static str, usize)> {
        let mut offset = self.columns.len();
        let mut tables = Vec::new();
        for join in self.joins.iter().filter(|join| join.fetch) {
            tables.push((join.name, offset));
            offset += join.columns.len();
        }
        tables
    }

    /// `SELECT COUNT(*)` over the same rows, ignoring ORDER BY, LIMIT and
    /// OFFSET. Grouped, filtered-by-HAVING or distinct queries are counted
    /// through a subquery.
    pub fn count_sql(&self) -> SQLiteSQL<'a> {
        let count = SQL::token(Token::SELECT).append(count_all::<SQLiteValue<'a>>());
        if self.distinct || !self.group_by.is_empty() || !self.having.is_empty() {
            let inner = self.select_list().append(self.body());
            count.push(Token::FROM).append(inner.parens())
        } else {
            count.append(self.body())
        }
    }

    /// The statement with LIMIT and OFFSET overridden.
    pub(crate) fn render(&self, limit: Option<usize>, offset: Option<usize>) -> SQLiteSQL<'a> {
        let mut sql = self.select_list().append(self.body());

        if !self.order_by.is_empty() {
            sql.push_mut(Token::ORDER);
            sql.push_mut(Token::BY);
            sql.append_mut(SQL::join(self.order_by.iter().map(|o| o.to_sql()), Token::COMMA));
        }

        match (limit, offset) {
            (Some(limit), offset) => {
                sql.push_mut(Token::LIMIT);
                sql.append_mut(SQL::number(limit));
                if let Some(offset) = offset {
                    sql.push_mut(Token::OFFSET);
                    sql.append_mut(SQL::number(offset));
                }
            }
            // SQLite needs a LIMIT before OFFSET; -1 means no limit
            (None, Some(offset)) => {
                sql.push_mut(Token::LIMIT);
                sql.append_mut(SQL::raw("-1"));
                sql.push_mut(Token::OFFSET);
                sql.append_mut(SQL::number(offset));
            }
            (None, None) => {}
        }

        sql
    }

    fn select_list(&self) -> SQLiteSQL<'a> {
        let mut sql = SQL::token(Token::SELECT);
        if self.distinct {
            sql.push_mut(Token::DISTINCT);
        }
        let fetched = self
            .joins
            .iter()
            .filter(|join| join.fetch)
            .flat_map(|join| join.columns.iter());
        sql.append(SQL::join(
            self.columns.iter().chain(fetched).cloned(),
            Token::COMMA,
        ))
    }

    fn body(&self) -> SQLiteSQL<'a> {
        let mut sql = SQL::token(Token::FROM).append(self.from.clone());

        for join in &self.joins {
            sql.append_mut(join.to_sql());
        }

        if !self.filters.is_empty() {
            sql.push_mut(Token::WHERE);
            sql.append_mut(SQL::join(self.filters.iter().cloned(), Token::AND));
        }

        if !self.group_by.is_empty() {
            sql.push_mut(Token::GROUP);
            sql.push_mut(Token::BY);
            sql.append_mut(SQL::join(self.group_by.iter().cloned(), Token::COMMA));
        }

        if !self.having.is_empty() {
            sql.push_mut(Token::HAVING);
            sql.append_mut(SQL::join(self.having.iter().cloned(), Token::AND));
        }

        sql
    }
}

//------------------------------------------------------------------------------
// Post-JOIN State Implementation
//------------------------------------------------------------------------------

impl<'a, Sel> SelectBuilder<'a, SelectJoinSet, Sel> {
    /// Adds a condition to the ON clause of the last join.
    pub fn on<E>(mut self, condition: E) -> Self
    where
        E: Expr<'a, SQLiteValue<'a>, SQLType = Bool>,
    {
        let condition = condition.into_sql();
        if condition.is_empty() {
            return self;
        }
        if let Some(last) = self.joins.last_mut() {
            let on = std::mem::take(&mut last.on);
            last.on = on.push(Token::AND).append(condition);
        }
        self
    }

    /// Selects the columns of the last joined table as well, so rows can
    /// populate the joined entity.
    pub fn fetch_join(mut self) -> Self {
        if let Some(last) = self.joins.last_mut() {
            last.fetch = true;
        }
        self
    }
}

impl<'a, State: ExecutableState, Sel> ToSQL<'a, SQLiteValue<'a>> for SelectBuilder<'a, State, Sel> {
    fn to_sql(&self) -> SQLiteSQL<'a> {
        self.render(self.limit, self.offset)
    }
}

// A query over a single expression is itself an expression of that type.
impl<'a, State, Sel> Expr<'a, SQLiteValue<'a>> for SelectBuilder<'a, State, Sel>
where
    State: ExecutableState,
    Sel: Expr<'a, SQLiteValue<'a>>,
{
    type SQLType = Sel::SQLType;
}

impl<'a, State, Sel> Selection<'a, SQLiteValue<'a>> for SelectBuilder<'a, State, Sel>
where
    State: ExecutableState,
    Sel: Expr<'a, SQLiteValue<'a>>,
{
    fn columns(&self) -> Vec<SQLiteSQL<'a>> {
        vec![self.to_sql().parens()]
    }

    fn width(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::QueryBuilder;
    use crate::sqlite_table;
    use querycraft_core::{Predicate, SQLExpr, and, asc, avg, count, desc, eq, gt, max};

    sqlite_table! {
        struct QTeam("team") {
            id: BigInt = "INTEGER PRIMARY KEY",
            name: Text = "TEXT NOT NULL",
        }
    }

    sqlite_table! {
        struct QMember("member") {
            id: BigInt = "INTEGER PRIMARY KEY",
            username: Text = "TEXT",
            age: Int = "INTEGER NOT NULL",
            team_id: BigInt = "INTEGER",
        }
        relations {
            team: QTeam = team_id => id,
        }
    }

    #[test]
    fn select_with_where_and_order() {
        let member = QMember::new();
        let query = QueryBuilder::new()
            .select(member.username)
            .from(member)
            .r#where(gt(member.age, 10))
            .order_by((desc(member.age), asc(member.username).nulls_last()));

        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."username" FROM "member" WHERE "member"."age" > ? ORDER BY "member"."age" DESC, "member"."username" ASC NULLS LAST"#
        );
    }

    #[test]
    fn repeated_where_is_a_conjunction() {
        let member = QMember::new();
        let query = QueryBuilder::new()
            .select_from(member)
            .r#where(eq(member.username, "member1"))
            .r#where(eq(member.age, 10));

        let built = query.to_sql();
        let (sql, params) = built.build();
        assert_eq!(
            sql,
            r#"SELECT "member"."id", "member"."username", "member"."age", "member"."team_id" FROM "member" WHERE "member"."username" = ? AND "member"."age" = ?"#
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn join_through_relation_then_on() {
        let member = QMember::new();
        let team = QTeam::new();
        let query = QueryBuilder::new()
            .select((member.username, team.name))
            .from(member)
            .left_join(member.team, team)
            .on(eq(team.name, "teamA"));

        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."username", "team"."name" FROM "member" LEFT JOIN "team" ON "member"."team_id" = "team"."id" AND "team"."name" = ?"#
        );
    }

    #[test]
    fn fetch_join_appends_joined_columns() {
        let member = QMember::new();
        let team = QTeam::new();
        let query = QueryBuilder::new()
            .select_from(member)
            .join(member.team, team)
            .fetch_join();

        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."id", "member"."username", "member"."age", "member"."team_id", "team"."id", "team"."name" FROM "member" JOIN "team" ON "member"."team_id" = "team"."id""#
        );
        assert_eq!(query.fetched_tables(), vec![("team", 4)]);
    }

    #[test]
    fn offset_without_limit() {
        let member = QMember::new();
        let query = QueryBuilder::new().select(member.id).from(member).offset(1);
        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."id" FROM "member" LIMIT -1 OFFSET 1"#
        );

        let query = QueryBuilder::new()
            .select(member.id)
            .from(member)
            .offset(1)
            .limit(2);
        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."id" FROM "member" LIMIT 2 OFFSET 1"#
        );
    }

    #[test]
    fn group_by_having() {
        let member = QMember::new();
        let team = QTeam::new();
        let query = QueryBuilder::new()
            .select((team.name, avg(member.age)))
            .from(member)
            .join(member.team, team)
            .group_by(team.name)
            .having(gt(count(member.id), 1i64));

        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "team"."name", AVG("member"."age") FROM "member" JOIN "team" ON "member"."team_id" = "team"."id" GROUP BY "team"."name" HAVING COUNT("member"."id") > ?"#
        );
    }

    #[test]
    fn scalar_subquery_in_where() {
        let member = QMember::new();
        let sub = QMember::aliased("member_sub");
        let query = QueryBuilder::new()
            .select_from(member)
            .r#where(eq(member.age, QueryBuilder::new().select(max(sub.age)).from(sub)));

        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."id", "member"."username", "member"."age", "member"."team_id" FROM "member" WHERE "member"."age" = (SELECT MAX("member_sub"."age") FROM "member" AS "member_sub")"#
        );
    }

    #[test]
    fn count_ignores_order_and_paging() {
        let member = QMember::new();
        let query = QueryBuilder::new()
            .select(member.username)
            .from(member)
            .r#where(gt(member.age, 10))
            .order_by(desc(member.age))
            .offset(1)
            .limit(2);

        assert_eq!(
            query.count_sql().sql(),
            r#"SELECT COUNT(*) FROM "member" WHERE "member"."age" > ?"#
        );
    }

    #[test]
    fn count_of_grouped_query_uses_subquery() {
        let member = QMember::new();
        let query = QueryBuilder::new()
            .select(member.age)
            .from(member)
            .group_by(member.age);

        assert_eq!(
            query.count_sql().sql(),
            r#"SELECT COUNT(*) FROM (SELECT "member"."age" FROM "member" GROUP BY "member"."age")"#
        );
    }

    #[test]
    fn filter_adds_required_join_once() {
        let member = QMember::new();
        let team = QTeam::new();
        let predicate = Predicate::new()
            .and_joined(
                Some(eq(team.name, "teamB")),
                member.team.required(Join::new().left(), team),
            )
            .and(gt(member.age, 10));

        let query = QueryBuilder::new()
            .select(member.username)
            .from(member)
            .filter(predicate.clone());
        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."username" FROM "member" LEFT JOIN "team" ON "member"."team_id" = "team"."id" WHERE ("team"."name" = ? AND "member"."age" > ?)"#
        );

        let already_joined = QueryBuilder::new()
            .select(member.username)
            .from(member)
            .join(member.team, team)
            .filter(predicate);
        assert_eq!(
            already_joined.to_sql().sql(),
            r#"SELECT "member"."username" FROM "member" JOIN "team" ON "member"."team_id" = "team"."id" WHERE ("team"."name" = ? AND "member"."age" > ?)"#
        );
    }

    #[test]
    fn empty_predicate_adds_no_where() {
        let member = QMember::new();
        let query = QueryBuilder::new()
            .select(member.id)
            .from(member)
            .filter(Predicate::new());
        assert_eq!(query.to_sql().sql(), r#"SELECT "member"."id" FROM "member""#);
    }

    #[test]
    fn explicit_join_after_filter_replaces_required_join() {
        let member = QMember::new();
        let team = QTeam::new();
        let predicate = Predicate::new().and_joined(
            Some(eq(team.name, "teamA")),
            member.team.required(Join::new().left(), team),
        );

        let query = QueryBuilder::new()
            .select((member.username, team.name))
            .from(member)
            .filter(predicate)
            .join(member.team, team)
            .fetch_join();

        let sql = query.to_sql().sql();
        assert_eq!(sql.matches(r#"JOIN "team""#).count(), 1);
        assert_eq!(
            sql,
            r#"SELECT "member"."username", "team"."name", "team"."id", "team"."name" FROM "member" JOIN "team" ON "member"."team_id" = "team"."id" WHERE "team"."name" = ?"#
        );
        assert_eq!(query.fetched_tables(), vec![("team", 2)]);
    }

    #[test]
    fn count_of_having_query_uses_subquery() {
        let member = QMember::new();
        let query = QueryBuilder::new()
            .select(count(member.id))
            .from(member)
            .having(gt(count(member.id), 1i64));

        assert_eq!(
            query.count_sql().sql(),
            r#"SELECT COUNT(*) FROM (SELECT COUNT("member"."id") FROM "member" HAVING COUNT("member"."id") > ?)"#
        );
    }

    #[test]
    fn empty_having_and_on_are_skipped() {
        let member = QMember::new();
        let team = QTeam::new();
        let none = || and(Vec::<SQLExpr<'_, SQLiteValue<'_>, Bool>>::new());

        let query = QueryBuilder::new()
            .select(member.id)
            .from(member)
            .join(member.team, team)
            .on(none())
            .having(none());

        assert_eq!(
            query.to_sql().sql(),
            r#"SELECT "member"."id" FROM "member" JOIN "team" ON "member"."team_id" = "team"."id""#
        );
    }
}
