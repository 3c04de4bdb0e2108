use querycraft_core::{Result, asc, eq};

use super::{Member, MemberSearchCondition, MemberTeamDto, QMember, QTeam};
use crate::session::Session;

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    pub page: usize,
    pub size: usize,
}

impl Pageable {
    pub const fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Rows skipped before this page; saturates instead of overflowing.
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of content and the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: i64,
    pub pageable: Pageable,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        let total = usize::try_from(self.total).unwrap_or(0);
        match self.pageable.size {
            0 => 0,
            size => total.div_ceil(size),
        }
    }
}

/// Member queries driven by a [`MemberSearchCondition`].
#[derive(Debug, Clone, Copy)]
pub struct MemberRepository<'a> {
    session: &'a Session<'a>,
}

impl<'a> MemberRepository<'a> {
    pub fn new(session: &'a Session<'a>) -> Self {
        Self { session }
    }

    /// Members matching `condition`, left joined with their team, by id.
    pub fn search(&self, condition: &MemberSearchCondition) -> Result<Vec<MemberTeamDto>> {
        let member = QMember::new();
        let team = QTeam::new();

        self.session
            .query()
            .select((member.id, member.username, member.age, team.id, team.name))
            .from(member)
            .left_join(member.team, team)
            .filter(condition.predicate())
            .order_by(asc(member.id))
            .fetch()
    }

    /// One page of [`search`](Self::search) plus the total match count.
    pub fn search_page(
        &self,
        condition: &MemberSearchCondition,
        pageable: Pageable,
    ) -> Result<Page<MemberTeamDto>> {
        let member = QMember::new();
        let team = QTeam::new();

        let results = self
            .session
            .query()
            .select((member.id, member.username, member.age, team.id, team.name))
            .from(member)
            .left_join(member.team, team)
            .filter(condition.predicate())
            .order_by(asc(member.id))
            .offset(pageable.offset())
            .limit(pageable.size)
            .fetch_results()?;

        Ok(Page {
            total: results.total(),
            content: results.into_results(),
            pageable,
        })
    }

    pub fn find_by_username(&self, username: &str) -> Result<Vec<Member>> {
        let member = QMember::new();
        self.session
            .query()
            .select_from(member)
            .r#where(eq(member.username, username))
            .order_by(asc(member.id))
            .fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(Pageable::new(0, 10).offset(), 0);
        assert_eq!(Pageable::new(2, 10).offset(), 20);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        assert_eq!(Pageable::new(usize::MAX, 2).offset(), usize::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::<()> {
            content: Vec::new(),
            total: 5,
            pageable: Pageable::new(0, 2),
        };
        assert_eq!(page.total_pages(), 3);
    }
}
