//! Member store: repository traits and their Diesel implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::hairstylist::{Hairstylist, NewHairstylist};
use crate::domain::member::{Member, NewMember, NewVisit, UpdateMember};
use crate::domain::types::{HairstylistEmail, HairstylistId, MemberId, PublicId};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod hairstylist;
pub mod member;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Shared Diesel-backed repository handed to every request handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Filter applied when listing members. Without an owner every member is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberListQuery {
    pub owner_hairstylist_id: Option<HairstylistId>,
    pub search: Option<String>,
}

impl MemberListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, hairstylist_id: HairstylistId) -> Self {
        self.owner_hairstylist_id = Some(hairstylist_id);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub trait MemberReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    fn get_member_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Member>>;
    /// Members in store order (ascending id).
    fn list_members(&self, query: MemberListQuery) -> RepositoryResult<Vec<Member>>;
}

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
    fn update_member(&self, id: MemberId, updates: &UpdateMember) -> RepositoryResult<Member>;
    fn record_visit(&self, id: MemberId, visit: &NewVisit) -> RepositoryResult<Member>;
}

pub trait HairstylistReader {
    fn get_hairstylist_by_id(&self, id: HairstylistId) -> RepositoryResult<Option<Hairstylist>>;
    fn get_hairstylist_by_email(
        &self,
        email: &HairstylistEmail,
    ) -> RepositoryResult<Option<Hairstylist>>;
    /// Every hairstylist with the number of members they own.
    fn list_hairstylists_with_member_counts(&self) -> RepositoryResult<Vec<(Hairstylist, usize)>>;
}

pub trait HairstylistWriter {
    fn create_or_update_hairstylist(
        &self,
        new_hairstylist: &NewHairstylist,
    ) -> RepositoryResult<Hairstylist>;
}
