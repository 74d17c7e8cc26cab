use crate::domain::auth::AuthenticatedUser;
use crate::domain::member::Member;
use crate::domain::types::{HairstylistEmail, PublicId};
use crate::dto::api::{MembersQuery, MembersResponse};
use crate::repository::{HairstylistReader, MemberListQuery, MemberReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, SERVICE_HAIRSTYLIST_ROLE};

/// Returns the members visible to the authenticated user. Hairstylists
/// unknown to the store see an empty list.
pub fn list_members<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: MembersQuery,
) -> ServiceResult<MembersResponse>
where
    R: MemberReader + HairstylistReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = MemberListQuery::new();

    if !user.has_role(SERVICE_ADMIN_ROLE) {
        if !user.has_role(SERVICE_HAIRSTYLIST_ROLE) {
            return Err(ServiceError::Unauthorized);
        }
        let email = HairstylistEmail::new(user.email.as_str())?;
        match repo.get_hairstylist_by_email(&email)? {
            Some(hairstylist) => query = query.owner(hairstylist.id),
            None => {
                return Ok(MembersResponse {
                    total: 0,
                    members: Vec::new(),
                });
            }
        }
    }

    if let Some(term) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    let members = repo.list_members(query).map_err(|err| {
        log::error!("Failed to list members: {err}");
        ServiceError::from(err)
    })?;

    Ok(MembersResponse {
        total: members.len(),
        members,
    })
}

/// Looks a member up by its public id. Members outside the caller's scope
/// are reported as missing.
pub fn get_member<R>(repo: &R, user: &AuthenticatedUser, public_id: &str) -> ServiceResult<Member>
where
    R: MemberReader + HairstylistReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let is_admin = user.has_role(SERVICE_ADMIN_ROLE);
    if !is_admin && !user.has_role(SERVICE_HAIRSTYLIST_ROLE) {
        return Err(ServiceError::Unauthorized);
    }

    let public_id: PublicId = public_id.parse().map_err(|_| ServiceError::NotFound)?;

    let member = repo
        .get_member_by_public_id(public_id)
        .map_err(|err| {
            log::error!("Failed to get member {public_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)?;

    if is_admin {
        return Ok(member);
    }

    let email = HairstylistEmail::new(user.email.as_str())?;
    match repo.get_hairstylist_by_email(&email)? {
        Some(hairstylist) if hairstylist.id == member.owner_hairstylist_id => Ok(member),
        _ => Err(ServiceError::NotFound),
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::hairstylist::Hairstylist;
    use crate::domain::types::{HairstylistId, HairstylistName};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, hairstylist_user, sample_member, user_with_roles};

    #[test]
    fn requires_access_role() {
        let mut repo = MockRepository::new();
        repo.expect_list_members().times(0);

        let result = list_members(&repo, &user_with_roles(&[]), MembersQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn admin_lists_everyone_with_search() {
        let mut repo = MockRepository::new();
        repo.expect_list_members()
            .withf(|query| {
                query.owner_hairstylist_id.is_none() && query.search.as_deref() == Some("mar")
            })
            .times(1)
            .returning(|_| Ok(vec![sample_member(1, 3, "Maria")]));

        let response = list_members(
            &repo,
            &admin_user(),
            MembersQuery {
                search: Some("  mar ".to_string()),
            },
        )
        .expect("should list members");

        assert_eq!(response.total, 1);
        assert_eq!(response.members[0].full_name.as_str(), "Maria");
    }

    #[test]
    fn hairstylist_lists_own_members() {
        let mut repo = MockRepository::new();
        repo.expect_get_hairstylist_by_email()
            .times(1)
            .returning(|email| {
                Ok(Some(Hairstylist {
                    id: HairstylistId::new(4).expect("valid id"),
                    name: HairstylistName::new("Ana").expect("valid name"),
                    email: email.clone(),
                }))
            });
        repo.expect_list_members()
            .withf(|query| query.owner_hairstylist_id == HairstylistId::new(4).ok())
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let response = list_members(&repo, &hairstylist_user(), MembersQuery::default())
            .expect("should list members");

        assert_eq!(response.total, 0);
    }

    #[test]
    fn admin_gets_member_by_public_id() {
        let member = sample_member(1, 3, "Maria");
        let public_id = member.public_id;
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_public_id()
            .withf(move |id| *id == public_id)
            .times(1)
            .returning(move |_| Ok(Some(member.clone())));
        repo.expect_get_hairstylist_by_email().times(0);

        let found = get_member(&repo, &admin_user(), &public_id.to_string())
            .expect("should find member");

        assert_eq!(found.full_name.as_str(), "Maria");
    }

    #[test]
    fn malformed_public_id_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_public_id().times(0);

        let result = get_member(&repo, &admin_user(), "not-a-uuid");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn hairstylist_cannot_see_foreign_member() {
        let member = sample_member(1, 3, "Maria");
        let public_id = member.public_id;
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_public_id()
            .times(1)
            .returning(move |_| Ok(Some(member.clone())));
        repo.expect_get_hairstylist_by_email()
            .times(1)
            .returning(|email| {
                Ok(Some(Hairstylist {
                    id: HairstylistId::new(4).expect("valid id"),
                    name: HairstylistName::new("Ana").expect("valid name"),
                    email: email.clone(),
                }))
            });

        let result = get_member(&repo, &hairstylist_user(), &public_id.to_string());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn hairstylist_gets_own_member() {
        let member = sample_member(1, 4, "Maria");
        let public_id = member.public_id;
        let mut repo = MockRepository::new();
        repo.expect_get_member_by_public_id()
            .times(1)
            .returning(move |_| Ok(Some(member.clone())));
        repo.expect_get_hairstylist_by_email()
            .times(1)
            .returning(|email| {
                Ok(Some(Hairstylist {
                    id: HairstylistId::new(4).expect("valid id"),
                    name: HairstylistName::new("Ana").expect("valid name"),
                    email: email.clone(),
                }))
            });

        let found = get_member(&repo, &hairstylist_user(), &public_id.to_string())
            .expect("should find own member");

        assert_eq!(found.owner_hairstylist_id.get(), 4);
    }

    #[test]
    fn unknown_hairstylist_sees_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_get_hairstylist_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_list_members().times(0);

        let response = list_members(&repo, &hairstylist_user(), MembersQuery::default())
            .expect("should succeed");

        assert!(response.members.is_empty());
    }
}
