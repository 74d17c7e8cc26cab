//! Services behind the member pages.

use std::io::Read;

use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::hairstylist::NewHairstylist;
use crate::domain::member::Member;
use crate::domain::types::{HairstylistId, MemberId};
use crate::dto::members::{AllMembersPageData, AllMembersQuery, MemberPageData, MembersPageQuery};
use crate::forms::members::{
    AddMemberForm, RecordVisitForm, RecordVisitPayload, SaveMemberForm, SaveMemberPayload,
    parse_members_csv,
};
use crate::repository::{HairstylistReader, HairstylistWriter, MemberReader, MemberWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::views::member_page::{MemberManagementPage, Notifier};
use crate::views::member_table::MemberTableView;
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE, SERVICE_HAIRSTYLIST_ROLE};

/// Returns the hairstylist record behind `user`, creating or refreshing it
/// from the token claims. `None` for users without the hairstylist role.
pub fn resolve_hairstylist<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Option<HairstylistId>>
where
    R: HairstylistWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if !user.has_role(SERVICE_HAIRSTYLIST_ROLE) {
        return Ok(None);
    }

    let new_hairstylist = NewHairstylist::try_from(user)?;
    let hairstylist = repo
        .create_or_update_hairstylist(&new_hairstylist)
        .inspect_err(|err| log::error!("Failed to update hairstylist: {err}"))?;

    Ok(Some(hairstylist.id))
}

/// Mounts the member management page for the signed-in hairstylist.
pub fn load_member_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: MembersPageQuery,
) -> ServiceResult<MemberManagementPage>
where
    R: MemberReader + HairstylistWriter + ?Sized,
{
    let identity = resolve_hairstylist(repo, user)?;

    let mut page = MemberManagementPage::new();
    page.mount(&identity);
    if query.add {
        page.open_dialog();
    }
    page.refresh(repo)?;

    Ok(page)
}

/// Submits the creation dialog on behalf of the signed-in hairstylist.
pub fn add_member<R, N>(
    repo: &R,
    user: &AuthenticatedUser,
    notifier: &N,
    form: AddMemberForm,
) -> ServiceResult<Member>
where
    R: MemberWriter + HairstylistWriter + ?Sized,
    N: Notifier + ?Sized,
{
    let identity = resolve_hairstylist(repo, user)?;

    let mut page = MemberManagementPage::new();
    page.mount(&identity);
    page.open_dialog();

    page.submit_member(repo, notifier, form)
}

/// Loads the global member table. Admin only.
pub fn load_all_members<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: AllMembersQuery,
) -> ServiceResult<AllMembersPageData>
where
    R: MemberReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut table = MemberTableView::global().with_search(search_query.clone());
    table.sync(repo)?;

    Ok(AllMembersPageData {
        table,
        search_query,
    })
}

/// Admins manage every member, hairstylists only their own.
fn ensure_can_manage<R>(repo: &R, user: &AuthenticatedUser, member: &Member) -> ServiceResult<()>
where
    R: HairstylistWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if user.has_role(SERVICE_ADMIN_ROLE) {
        return Ok(());
    }

    match resolve_hairstylist(repo, user)? {
        Some(id) if id == member.owner_hairstylist_id => Ok(()),
        _ => Err(ServiceError::Unauthorized),
    }
}

fn find_member<R>(repo: &R, id: MemberId) -> ServiceResult<Member>
where
    R: MemberReader + ?Sized,
{
    repo.get_member_by_id(id)
        .inspect_err(|err| log::error!("Failed to load member {id}: {err}"))?
        .ok_or(ServiceError::NotFound)
}

/// Loads a single member with its owner.
pub fn load_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    member_id: i32,
) -> ServiceResult<MemberPageData>
where
    R: MemberReader + HairstylistReader + HairstylistWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let member = find_member(repo, MemberId::new(member_id)?)?;
    ensure_can_manage(repo, user, &member)?;

    let owner = repo.get_hairstylist_by_id(member.owner_hairstylist_id)?;

    Ok(MemberPageData { member, owner })
}

/// Updates contact details of an existing member.
pub fn save_member<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveMemberForm,
) -> ServiceResult<Member>
where
    R: MemberReader + MemberWriter + HairstylistWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = SaveMemberPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate member form: {err}");
        ServiceError::from(err)
    })?;

    let member = find_member(repo, payload.id)?;
    ensure_can_manage(repo, user, &member)?;

    repo.update_member(payload.id, &payload.updates)
        .inspect_err(|err| log::error!("Failed to update member: {err}"))
        .map_err(ServiceError::from)
}

/// Records a completed visit; `now` is used when the form carries no date.
pub fn record_visit<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RecordVisitForm,
    now: NaiveDateTime,
) -> ServiceResult<Member>
where
    R: MemberReader + MemberWriter + HairstylistWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = RecordVisitPayload::parse(form, now).map_err(|err| {
        log::error!("Failed to validate visit form: {err}");
        ServiceError::from(err)
    })?;

    let member = find_member(repo, payload.id)?;
    ensure_can_manage(repo, user, &member)?;

    repo.record_visit(payload.id, &payload.visit)
        .inspect_err(|err| log::error!("Failed to record visit: {err}"))
        .map_err(ServiceError::from)
}

/// Imports members from CSV, owned by the uploading hairstylist. Returns the
/// number of created members.
pub fn upload_members<R, F>(repo: &R, user: &AuthenticatedUser, csv: F) -> ServiceResult<usize>
where
    R: MemberWriter + HairstylistWriter + ?Sized,
    F: Read,
{
    let owner = resolve_hairstylist(repo, user)?.ok_or(ServiceError::Unauthorized)?;

    let members = parse_members_csv(csv, owner).map_err(|err| {
        log::error!("Failed to parse members: {err}");
        ServiceError::from(err)
    })?;

    repo.create_members(&members)
        .inspect_err(|err| log::error!("Failed to add members: {err}"))
        .map_err(ServiceError::from)
}
