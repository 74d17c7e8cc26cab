//! DTOs used by the member pages.

use crate::domain::hairstylist::Hairstylist;
use crate::domain::member::Member;
use crate::views::member_table::MemberTableView;

/// Query parameters of `/members`.
#[derive(Debug, Default)]
pub struct MembersPageQuery {
    /// Opens the creation dialog when set.
    pub add: bool,
}

/// Query parameters of `/members/all`.
#[derive(Debug, Default)]
pub struct AllMembersQuery {
    pub search: Option<String>,
}

/// Loaded global member table with the search echoed back.
#[derive(Debug)]
pub struct AllMembersPageData {
    pub table: MemberTableView,
    pub search_query: Option<String>,
}

/// Data displayed on the member detail page.
#[derive(Debug)]
pub struct MemberPageData {
    pub member: Member,
    /// Absent only if the owner row vanished.
    pub owner: Option<Hairstylist>,
}
