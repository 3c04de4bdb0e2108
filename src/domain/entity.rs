use querycraft_core::{Column, QueryError, Result, asc, eq, querycraft_trace_session, types::BigInt};
use querycraft_sqlite::{FromSQLiteRow, QueryBuilder, ResultRow, builder::InsertBuilder};

use super::{QMember, QTeam};
use crate::entity::{Entity, Reference};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    id: Option<i64>,
    pub name: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Members referencing this team, by ascending id. A transient team has
    /// none.
    pub fn members(&self, session: &Session<'_>) -> Result<Vec<Member>> {
        let Some(id) = self.id else {
            return Ok(Vec::new());
        };
        let member = QMember::new();
        session
            .query()
            .select_from(member)
            .r#where(eq(member.team_id, id))
            .order_by(asc(member.id))
            .fetch()
    }
}

impl Entity for Team {
    type Table = QTeam;
    const NAME: &'static str = "Team";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn id_column(table: &QTeam) -> Column<BigInt> {
        table.id
    }

    fn insert<'a>(&'a self, table: QTeam) -> Result<InsertBuilder<'a, QTeam>> {
        Ok(QueryBuilder::new()
            .insert(table)
            .value(table.name, self.name.as_str()))
    }
}

impl FromSQLiteRow for Team {
    const COLUMN_COUNT: usize = 2;

    fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
        Ok(Self {
            id: Some(row.get(offset)?),
            name: row.get(offset + 1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    id: Option<i64>,
    pub username: Option<String>,
    pub age: i32,
    team: Option<Reference<Team>>,
}

impl Member {
    pub fn new(username: impl Into<String>, age: i32, team: Option<&Team>) -> Self {
        Self {
            id: None,
            username: Some(username.into()),
            age,
            team: team.cloned().map(Reference::Loaded),
        }
    }

    /// A member without a username.
    pub fn anonymous(age: i32, team: Option<&Team>) -> Self {
        Self {
            username: None,
            ..Self::new("", age, team)
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The team reference as loaded, without touching the store.
    pub fn team_ref(&self) -> Option<&Reference<Team>> {
        self.team.as_ref()
    }

    /// The member's team, loading it through `session` if only its id is known.
    pub fn team(&mut self, session: &Session<'_>) -> Result<Option<&Team>> {
        if let Some(Reference::Unloaded(id)) = self.team {
            querycraft_trace_session!("lazy_load", Team::NAME, id);
            if let Some(team) = session.find::<Team>(id)? {
                self.team = Some(Reference::Loaded(team));
            }
        }
        Ok(self.team.as_ref().and_then(Reference::get))
    }

    /// Moves the member to `team`. Stored rows are not updated.
    pub fn change_team(&mut self, team: &Team) {
        self.team = Some(Reference::Loaded(team.clone()));
    }
}

impl Entity for Member {
    type Table = QMember;
    const NAME: &'static str = "Member";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn id_column(table: &QMember) -> Column<BigInt> {
        table.id
    }

    fn insert<'a>(&'a self, table: QMember) -> Result<InsertBuilder<'a, QMember>> {
        let team_id = match &self.team {
            Some(reference) => Some(reference.id().ok_or(QueryError::TransientReference {
                entity: Self::NAME,
                reference: Team::NAME,
            })?),
            None => None,
        };

        Ok(QueryBuilder::new()
            .insert(table)
            .value(table.username, self.username.as_deref())
            .value(table.age, self.age)
            .value(table.team_id, team_id))
    }
}

impl FromSQLiteRow for Member {
    const COLUMN_COUNT: usize = 4;

    fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
        let team_id: Option<i64> = row.get(offset + 3)?;
        let team = match (team_id, row.fetched(QTeam::NAME)) {
            (Some(_), Some(at)) if !row.is_null(at)? => {
                Some(Reference::Loaded(Team::from_row_at(row, at)?))
            }
            (Some(id), _) => Some(Reference::Unloaded(id)),
            (None, _) => None,
        };

        Ok(Self {
            id: Some(row.get(offset)?),
            username: row.get(offset + 1)?,
            age: row.get(offset + 2)?,
            team,
        })
    }
}
