#![allow(dead_code)]

use querycraft::prelude::*;
use rusqlite::Connection;

pub fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    Session::new(&conn)
        .create_schema()
        .expect("Failed to create tables");
    conn
}

/// teamA holds member1 (10) and member2 (20); teamB holds member3 (30) and
/// member4 (40).
pub struct Fixture {
    pub team_a: Team,
    pub team_b: Team,
    pub members: Vec<Member>,
}

pub fn seed(session: &Session<'_>) -> Fixture {
    let mut team_a = Team::new("teamA");
    let mut team_b = Team::new("teamB");
    session.persist(&mut team_a).expect("Failed to persist teamA");
    session.persist(&mut team_b).expect("Failed to persist teamB");

    let mut members = vec![
        Member::new("member1", 10, Some(&team_a)),
        Member::new("member2", 20, Some(&team_a)),
        Member::new("member3", 30, Some(&team_b)),
        Member::new("member4", 40, Some(&team_b)),
    ];
    for member in &mut members {
        session.persist(member).expect("Failed to persist member");
    }

    Fixture {
        team_a,
        team_b,
        members,
    }
}

pub fn usernames(members: &[Member]) -> Vec<Option<&str>> {
    members.iter().map(|m| m.username.as_deref()).collect()
}
