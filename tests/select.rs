mod common;

use common::{seed, setup_db, usernames};
use querycraft::prelude::*;

fn ages(members: &[Member]) -> Vec<i32> {
    members.iter().map(|m| m.age).collect()
}

//------------------------------------------------------------------------------
// Sorting and paging
//------------------------------------------------------------------------------

#[test]
fn sort_with_nulls_last() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    session.persist(&mut Member::anonymous(100, None)).unwrap();
    session.persist(&mut Member::new("member5", 100, None)).unwrap();
    session.persist(&mut Member::new("member6", 100, None)).unwrap();

    let member = QMember::new();
    let members: Vec<Member> = session
        .query()
        .select_from(member)
        .r#where(eq(member.age, 100))
        .order_by((desc(member.age), asc(member.username).nulls_last()))
        .fetch()
        .unwrap();

    assert_eq!(
        usernames(&members),
        vec![Some("member5"), Some("member6"), None]
    );
}

#[test]
fn paging_reports_total() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let page: QueryResults<Member> = session
        .query()
        .select_from(member)
        .order_by(desc(member.username))
        .offset(1)
        .limit(2)
        .fetch_results()
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total(), 4);
    assert_eq!(page.offset(), Some(1));
    assert_eq!(page.limit(), Some(2));
    assert_eq!(
        usernames(page.results()),
        vec![Some("member3"), Some("member2")]
    );
}

#[test]
fn offset_without_limit() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let members: Vec<Member> = session
        .query()
        .select_from(member)
        .order_by(asc(member.age))
        .offset(3)
        .fetch()
        .unwrap();
    assert_eq!(ages(&members), vec![40]);
}

//------------------------------------------------------------------------------
// Aggregation
//------------------------------------------------------------------------------

#[test]
fn aggregate_functions() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let row: Option<(i64, i32, f64, i32, i32)> = session
        .query()
        .select((
            count_all(),
            sum(member.age),
            avg(member.age),
            max(member.age),
            min(member.age),
        ))
        .from(member)
        .fetch_one()
        .unwrap();

    assert_eq!(row, Some((4, 100, 25.0, 40, 10)));
}

#[test]
fn group_by_team_name() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let rows: Vec<(String, f64)> = session
        .query()
        .select((team.name, avg(member.age)))
        .from(member)
        .join(member.team, team)
        .group_by(team.name)
        .order_by(asc(team.name))
        .fetch()
        .unwrap();

    assert_eq!(
        rows,
        vec![("teamA".to_string(), 15.0), ("teamB".to_string(), 35.0)]
    );
}

#[test]
fn having_filters_groups() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let query = session
        .query()
        .select((team.name, avg(member.age)))
        .from(member)
        .join(member.team, team)
        .group_by(team.name)
        .having(gt(avg(member.age), 20.0));

    let rows: Vec<(String, f64)> = query.fetch().unwrap();
    assert_eq!(rows, vec![("teamB".to_string(), 35.0)]);
    assert_eq!(query.fetch_count().unwrap(), 1);
}

#[test]
fn having_without_group_by_counts_result_rows() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let query = session
        .query()
        .select(count_all())
        .from(member)
        .having(gt(count_all(), 1i64));

    let rows: Vec<i64> = query.fetch().unwrap();
    assert_eq!(rows, vec![4]);
    assert_eq!(query.fetch_count().unwrap(), 1);

    let none = query.having(gt(count_all(), 10i64));
    assert!(none.fetch::<i64>().unwrap().is_empty());
    assert_eq!(none.fetch_count().unwrap(), 0);
}

//------------------------------------------------------------------------------
// Joins
//------------------------------------------------------------------------------

#[test]
fn inner_join_filtered_on_team() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    session.persist(&mut Member::new("loner", 50, None)).unwrap();

    let member = QMember::new();
    let team = QTeam::new();
    let members: Vec<Member> = session
        .query()
        .select_from(member)
        .join(member.team, team)
        .r#where(eq(team.name, "teamA"))
        .order_by(asc(member.id))
        .fetch()
        .unwrap();
    assert_eq!(usernames(&members), vec![Some("member1"), Some("member2")]);

    let joined = session
        .query()
        .select_from(member)
        .inner_join(member.team, team)
        .fetch_count()
        .unwrap();
    assert_eq!(joined, 4);

    let left = session
        .query()
        .select_from(member)
        .left_join(member.team, team)
        .fetch_count()
        .unwrap();
    assert_eq!(left, 5);
}

#[test]
fn select_member_and_team() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let rows: Vec<(Member, Team)> = session
        .query()
        .select((member, team))
        .from(member)
        .join(member.team, team)
        .order_by(asc(member.id))
        .fetch()
        .unwrap();

    assert_eq!(rows.len(), 4);
    let (first, first_team) = &rows[0];
    assert_eq!(first.username.as_deref(), Some("member1"));
    assert_eq!(first_team.name, "teamA");
    assert_eq!(rows[3].1.name, "teamB");
}

#[test]
fn left_join_with_on_condition_keeps_all_members() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let rows: Vec<(Member, Option<Team>)> = session
        .query()
        .select((member, team))
        .from(member)
        .left_join(member.team, team)
        .on(eq(team.name, "teamA"))
        .order_by(asc(member.id))
        .fetch()
        .unwrap();

    let teams: Vec<Option<&str>> = rows
        .iter()
        .map(|(_, team)| team.as_ref().map(|t| t.name.as_str()))
        .collect();
    assert_eq!(teams, vec![Some("teamA"), Some("teamA"), None, None]);
}

fn seed_team_named_members(session: &Session<'_>) {
    for name in ["teamA", "teamB", "teamC"] {
        session.persist(&mut Member::new(name, 0, None)).unwrap();
    }
}

#[test]
fn theta_join_over_unrelated_tables() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    seed_team_named_members(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let names: Vec<String> = session
        .query()
        .select(member.username)
        .from((member, team))
        .r#where(eq(member.username, team.name))
        .order_by(asc(member.username))
        .fetch()
        .unwrap();

    assert_eq!(names, vec!["teamA", "teamB"]);
}

#[test]
fn left_join_on_unrelated_table() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    seed_team_named_members(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let rows: Vec<(Option<String>, Option<String>)> = session
        .query()
        .select((member.username, team.name))
        .from(member)
        .left_join_on(team, eq(member.username, team.name))
        .order_by(asc(member.id))
        .fetch()
        .unwrap();

    assert_eq!(rows.len(), 7);
    let matched: Vec<Option<&str>> = rows.iter().map(|(_, team)| team.as_deref()).collect();
    assert_eq!(
        matched,
        vec![None, None, None, None, Some("teamA"), Some("teamB"), None]
    );
}

//------------------------------------------------------------------------------
// Subqueries
//------------------------------------------------------------------------------

#[test]
fn subquery_equal_to_max() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let sub = QMember::aliased("member_sub");
    let members: Vec<Member> = session
        .query()
        .select_from(member)
        .r#where(eq(member.age, select(max(sub.age)).from(sub)))
        .fetch()
        .unwrap();

    assert_eq!(ages(&members), vec![40]);
}

#[test]
fn subquery_at_least_average() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let sub = QMember::aliased("member_sub");
    let members: Vec<Member> = session
        .query()
        .select_from(member)
        .r#where(gte(member.age, select(avg(sub.age)).from(sub)))
        .order_by(asc(member.age))
        .fetch()
        .unwrap();

    assert_eq!(ages(&members), vec![30, 40]);
}

#[test]
fn subquery_in() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let sub = QMember::aliased("member_sub");
    let members: Vec<Member> = session
        .query()
        .select_from(member)
        .r#where(in_subquery(
            member.age,
            select(sub.age).from(sub).r#where(gt(sub.age, 10)),
        ))
        .order_by(asc(member.age))
        .fetch()
        .unwrap();

    assert_eq!(ages(&members), vec![20, 30, 40]);
}

#[test]
fn scalar_subquery_in_select_list() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let sub = QMember::aliased("member_sub");
    let rows: Vec<(Option<String>, f64)> = session
        .query()
        .select((member.username, select(avg(sub.age)).from(sub)))
        .from(member)
        .order_by(asc(member.id))
        .fetch()
        .unwrap();

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|(_, average)| *average == 25.0));
}

#[test]
fn correlated_exists() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let team = QTeam::new();
    let sub = QMember::aliased("member_sub");
    let names: Vec<String> = session
        .query()
        .select(team.name)
        .from(team)
        .r#where(exists(
            select(sub.id)
                .from(sub)
                .r#where(eq(sub.team_id, team.id) & gt(sub.age, 30)),
        ))
        .fetch()
        .unwrap();
    assert_eq!(names, vec!["teamB"]);

    let without: Vec<String> = session
        .query()
        .select(team.name)
        .from(team)
        .r#where(not_exists(
            select(sub.id)
                .from(sub)
                .r#where(eq(sub.team_id, team.id) & gt(sub.age, 30)),
        ))
        .fetch()
        .unwrap();
    assert_eq!(without, vec!["teamA"]);
}

//------------------------------------------------------------------------------
// Projection
//------------------------------------------------------------------------------

#[test]
fn single_column_projection() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let names: Vec<Option<String>> = session
        .query()
        .select(member.username)
        .from(member)
        .order_by(asc(member.id))
        .fetch()
        .unwrap();
    assert_eq!(names.len(), 4);
    assert_eq!(names[0].as_deref(), Some("member1"));
}

#[test]
fn distinct_projection_and_count() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let query = session
        .query()
        .select_distinct(team.name)
        .from(member)
        .join(member.team, team)
        .order_by(asc(team.name));

    let names: Vec<String> = query.fetch().unwrap();
    assert_eq!(names, vec!["teamA", "teamB"]);
    assert_eq!(query.fetch_count().unwrap(), 2);
}

#[test]
fn projection_into_dto() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let member = QMember::new();
    let team = QTeam::new();
    let rows: Vec<MemberTeamDto> = session
        .query()
        .select((member.id, member.username, member.age, team.id, team.name))
        .from(member)
        .join(member.team, team)
        .r#where(eq(member.username, "member3"))
        .fetch()
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].age, 30);
    assert_eq!(rows[0].team_name.as_deref(), Some("teamB"));
}

//------------------------------------------------------------------------------
// Predicates
//------------------------------------------------------------------------------

fn ages_where<'a>(session: &'a Session<'a>, condition: SQLExpr<'a, SQLiteValue<'a>, Bool>) -> Vec<i32> {
    let member = QMember::new();
    session
        .query()
        .select(member.age)
        .from(member)
        .r#where(condition)
        .order_by(asc(member.age))
        .fetch()
        .unwrap()
}

#[test]
fn predicate_functions() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    let member = QMember::new();
    let all = vec![10, 20, 30, 40];

    assert_eq!(ages_where(&session, between(member.age, 15, 35)), vec![20, 30]);
    assert_eq!(ages_where(&session, like(member.username, "member%")), all);
    assert_eq!(ages_where(&session, contains(member.username, "3")), vec![30]);
    assert_eq!(ages_where(&session, starts_with(member.username, "mem")), all);
    assert_eq!(
        ages_where(&session, or2(eq(member.age, 10), eq(member.age, 40))),
        vec![10, 40]
    );
    assert_eq!(ages_where(&session, not(gt(member.age, 20))), vec![10, 20]);
    assert_eq!(
        ages_where(&session, gt(member.age, 10) & lt(member.age, 40)),
        vec![20, 30]
    );
    assert_eq!(
        ages_where(&session, neq(member.age, 10) | eq(member.age, 10)),
        all
    );
    assert_eq!(ages_where(&session, in_array(member.age, [10, 30])), vec![10, 30]);
    assert!(ages_where(&session, in_array(member.age, Vec::<i32>::new())).is_empty());
    assert_eq!(
        ages_where(&session, not_in_array(member.age, Vec::<i32>::new())),
        all
    );
    assert_eq!(ages_where(&session, is_not_null(member.team_id)), all);
    assert_eq!(
        ages_where(&session, and([gte(member.age, 20), lte(member.age, 30)])),
        vec![20, 30]
    );
    assert_eq!(
        ages_where(&session, or([eq(member.age, 20), eq(member.age, 40)])),
        vec![20, 40]
    );
}

#[test]
fn is_null_matches_missing_username() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    session.persist(&mut Member::anonymous(55, None)).unwrap();

    let member = QMember::new();
    assert_eq!(ages_where(&session, is_null(member.username)), vec![55]);
    assert_eq!(ages_where(&session, is_null(member.team_id)), vec![55]);
}

#[test]
fn empty_conjunction_is_no_filter() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);

    let none: Vec<SQLExpr<'_, SQLiteValue<'_>, Bool>> = Vec::new();
    let member = QMember::new();
    let ages: Vec<i32> = session
        .query()
        .select(member.age)
        .from(member)
        .r#where(and(none))
        .order_by(asc(member.age))
        .fetch()
        .unwrap();
    assert_eq!(ages, vec![10, 20, 30, 40]);
}
