//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::hairstylist::{Hairstylist, NewHairstylist};
use crate::domain::member::{Member, NewMember, NewVisit, UpdateMember};
use crate::domain::types::{HairstylistEmail, HairstylistId, MemberId, PublicId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    HairstylistReader, HairstylistWriter, MemberListQuery, MemberReader, MemberWriter,
};

mock! {
    pub Repository {}

    impl MemberReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        fn get_member_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Member>>;
        fn list_members(&self, query: MemberListQuery) -> RepositoryResult<Vec<Member>>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
        fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
        fn update_member(&self, id: MemberId, updates: &UpdateMember) -> RepositoryResult<Member>;
        fn record_visit(&self, id: MemberId, visit: &NewVisit) -> RepositoryResult<Member>;
    }

    impl HairstylistReader for Repository {
        fn get_hairstylist_by_id(&self, id: HairstylistId) -> RepositoryResult<Option<Hairstylist>>;
        fn get_hairstylist_by_email(
            &self,
            email: &HairstylistEmail,
        ) -> RepositoryResult<Option<Hairstylist>>;
        fn list_hairstylists_with_member_counts(&self) -> RepositoryResult<Vec<(Hairstylist, usize)>>;
    }

    impl HairstylistWriter for Repository {
        fn create_or_update_hairstylist(
            &self,
            new_hairstylist: &NewHairstylist,
        ) -> RepositoryResult<Hairstylist>;
    }
}
