use querycraft_core::{Join, Predicate, eq, gte, lte};
use querycraft_sqlite::SQLiteValue;

use super::{QMember, QTeam};

/// Optional filters for a member search. Unset fields do not constrain the
/// query; contradictory age bounds simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Conjunction of one comparison per set field, over `member` and, for
    /// `team_name`, a left-joined `team`.
    ///
    /// An empty `username` is compared like any other value.
    pub fn predicate(&self) -> Predicate<'_, SQLiteValue<'_>> {
        let member = QMember::new();
        let team = QTeam::new();

        Predicate::new()
            .and_option(self.username.as_deref().map(|name| eq(member.username, name)))
            .and_joined(
                self.team_name.as_deref().map(|name| eq(team.name, name)),
                member.team.required(Join::new().left(), team),
            )
            .and_option(self.age_goe.map(|age| gte(member.age, age)))
            .and_option(self.age_loe.map(|age| lte(member.age, age)))
    }
}
