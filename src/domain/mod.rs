//! The member/team domain: table handles, entities, search condition,
//! projection and repository.

mod condition;
mod dto;
mod entity;
mod repository;

pub use condition::MemberSearchCondition;
pub use dto::MemberTeamDto;
pub use entity::{Member, Team};
pub use repository::{MemberRepository, Page, Pageable};

use querycraft_sqlite::sqlite_table;

sqlite_table! {
    /// Handle of the `team` table.
    pub struct QTeam("team") {
        id: BigInt = "INTEGER PRIMARY KEY AUTOINCREMENT",
        name: Text = "TEXT NOT NULL",
    }
}

sqlite_table! {
    /// Handle of the `member` table; `team` joins through `team_id`.
    pub struct QMember("member") {
        id: BigInt = "INTEGER PRIMARY KEY AUTOINCREMENT",
        username: Text = "TEXT",
        age: Int = "INTEGER NOT NULL",
        team_id: BigInt = "INTEGER REFERENCES team(id)",
    }
    relations {
        team: QTeam = team_id => id,
    }
}
