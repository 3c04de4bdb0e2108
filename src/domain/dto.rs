use querycraft_core::Result;
use querycraft_sqlite::{FromSQLiteRow, ResultRow};

/// A member row joined with its team, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl FromSQLiteRow for MemberTeamDto {
    const COLUMN_COUNT: usize = 5;

    fn from_row_at(row: &ResultRow<'_, '_>, offset: usize) -> Result<Self> {
        Ok(Self {
            member_id: row.get(offset)?,
            username: row.get(offset + 1)?,
            age: row.get(offset + 2)?,
            team_id: row.get(offset + 3)?,
            team_name: row.get(offset + 4)?,
        })
    }
}
