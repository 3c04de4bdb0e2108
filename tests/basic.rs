//! Session, entity and fetch contract tests against an in-memory database.

mod common;

use common::{seed, setup_db, usernames};
use querycraft::prelude::*;

#[test]
fn persist_assigns_ids_and_caches() {
    let conn = setup_db();
    let session = Session::new(&conn);
    let fixture = seed(&session);

    let ids: Vec<i64> = fixture.members.iter().filter_map(Member::id).collect();
    assert_eq!(ids.len(), 4);
    assert!(fixture.team_a.id().is_some());
    assert!(session.contains::<Member>(ids[0]));

    session.clear();
    assert!(!session.contains::<Member>(ids[0]));

    let found = session.find::<Member>(ids[0]).unwrap().unwrap();
    assert_eq!(found.username.as_deref(), Some("member1"));
    assert_eq!(found.age, 10);
    assert!(session.contains::<Member>(ids[0]));

    assert!(session.find::<Member>(9_999).unwrap().is_none());
}

#[test]
fn persisting_twice_keeps_identity() {
    let conn = setup_db();
    let session = Session::new(&conn);
    let mut team = Team::new("teamA");

    let first = session.persist(&mut team).unwrap();
    let second = session.persist(&mut team).unwrap();
    assert_eq!(first, second);

    let team_table = QTeam::new();
    let count = session.query().select_from(team_table).fetch_count().unwrap();
    assert_eq!(count, 1);
}

#[test]
fn member_with_unsaved_team_is_rejected() {
    let conn = setup_db();
    let session = Session::new(&conn);
    let transient = Team::new("unsaved");

    let result = session.persist(&mut Member::new("member1", 10, Some(&transient)));
    assert!(matches!(
        result,
        Err(QueryError::TransientReference {
            entity: "Member",
            reference: "Team"
        })
    ));
}

#[test]
fn default_fetch_leaves_team_unloaded_until_accessed() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    session.clear();

    let member = QMember::new();
    let mut members: Vec<Member> = session
        .query()
        .select_from(member)
        .order_by(asc(member.id))
        .fetch()
        .unwrap();

    let first = &mut members[0];
    assert!(!first.team_ref().unwrap().is_loaded());

    let team = first.team(&session).unwrap().cloned().unwrap();
    assert_eq!(team.name, "teamA");
    assert!(first.team_ref().unwrap().is_loaded());
}

#[test]
fn fetch_join_loads_team_in_one_query() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    session.clear();

    let member = QMember::new();
    let team = QTeam::new();
    let members: Vec<Member> = session
        .query()
        .select_from(member)
        .join(member.team, team)
        .fetch_join()
        .order_by(asc(member.id))
        .fetch()
        .unwrap();

    assert_eq!(members.len(), 4);
    assert!(members.iter().all(|m| m.team_ref().is_some_and(Reference::is_loaded)));
    let team_names: Vec<&str> = members
        .iter()
        .filter_map(|m| m.team_ref().and_then(Reference::get))
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(team_names, vec!["teamA", "teamA", "teamB", "teamB"]);
}

#[test]
fn team_members_are_navigable() {
    let conn = setup_db();
    let session = Session::new(&conn);
    let fixture = seed(&session);

    let members = fixture.team_a.members(&session).unwrap();
    assert_eq!(usernames(&members), vec![Some("member1"), Some("member2")]);

    assert!(Team::new("unsaved").members(&session).unwrap().is_empty());
}

#[test]
fn change_team_moves_reference() {
    let conn = setup_db();
    let session = Session::new(&conn);
    let fixture = seed(&session);

    let mut member = fixture.members[0].clone();
    member.change_team(&fixture.team_b);
    assert_eq!(
        member.team_ref().and_then(Reference::id),
        fixture.team_b.id()
    );
}

#[test]
fn fetch_one_contract() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    let member = QMember::new();

    let one: Option<Member> = session
        .query()
        .select_from(member)
        .r#where(eq(member.username, "member1"))
        .fetch_one()
        .unwrap();
    assert_eq!(one.unwrap().age, 10);

    let none: Option<Member> = session
        .query()
        .select_from(member)
        .r#where(eq(member.username, "nobody"))
        .fetch_one()
        .unwrap();
    assert!(none.is_none());

    let many = session
        .query()
        .select_from(member)
        .r#where(gt(member.age, 10))
        .fetch_one::<Member>();
    assert!(matches!(many, Err(QueryError::NonUniqueResult)));
}

#[test]
fn fetch_first_takes_one_row() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    let member = QMember::new();

    let oldest: Option<Member> = session
        .query()
        .select_from(member)
        .order_by(desc(member.age))
        .fetch_first()
        .unwrap();
    assert_eq!(oldest.unwrap().username.as_deref(), Some("member4"));

    let nobody: Option<Member> = session
        .query()
        .select_from(member)
        .r#where(gt(member.age, 100))
        .fetch_first()
        .unwrap();
    assert!(nobody.is_none());
}

#[test]
fn fetch_first_respects_zero_limit() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    let member = QMember::new();

    let query = session
        .query()
        .select(member.age)
        .from(member)
        .order_by(asc(member.age))
        .limit(0);
    assert!(query.fetch::<i32>().unwrap().is_empty());
    assert_eq!(query.fetch_first::<i32>().unwrap(), None);

    let paged = session
        .query()
        .select(member.age)
        .from(member)
        .order_by(asc(member.age))
        .offset(1)
        .limit(3);
    assert_eq!(paged.fetch_first::<i32>().unwrap(), Some(20));
}

#[test]
fn column_of_unjoined_table_is_a_translation_error() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    let member = QMember::new();
    let team = QTeam::new();

    let result = session
        .query()
        .select_from(member)
        .r#where(eq(team.name, "teamA"))
        .fetch::<Member>();

    match result {
        Err(QueryError::UndeclaredAlias(alias)) => assert_eq!(alias, "team"),
        other => panic!("expected UndeclaredAlias, got {other:?}"),
    }
}

#[test]
fn tuple_rows_are_read_by_expression() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    let member = QMember::new();
    let team = QTeam::new();

    let rows: Vec<Tuple> = session
        .query()
        .select((team.name, count(member.id)))
        .from(member)
        .join(member.team, team)
        .group_by(team.name)
        .order_by(asc(team.name))
        .fetch()
        .unwrap();

    assert_eq!(rows.len(), 2);
    let name: Option<String> = rows[0].get(team.name).unwrap();
    let members: Option<i64> = rows[0].get(count(member.id)).unwrap();
    assert_eq!(name.as_deref(), Some("teamA"));
    assert_eq!(members, Some(2));
    assert!(rows[0].get::<String, _>(member.username).is_err());
}

#[test]
fn tuple_columns_that_render_alike_are_read_by_position() {
    let conn = setup_db();
    let session = Session::new(&conn);
    seed(&session);
    let member = QMember::new();

    let rows: Vec<Tuple> = session
        .query()
        .select((gt(member.age, 10), gt(member.age, 30)))
        .from(member)
        .r#where(eq(member.username, "member3"))
        .fetch()
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_at::<bool>(0).unwrap(), Some(true));
    assert_eq!(rows[0].get_at::<bool>(1).unwrap(), Some(false));
    // Both render as `"member"."age" > ?`; lookup by expression finds the first
    assert_eq!(rows[0].get::<bool, _>(gt(member.age, 30)).unwrap(), Some(true));
}
