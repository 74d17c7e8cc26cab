//! Services handling hairstylist administration.

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::hairstylist::{Hairstylist, NewHairstylist};
use crate::dto::hairstylists::HairstylistsPageData;
use crate::forms::hairstylists::AddHairstylistForm;
use crate::repository::{HairstylistReader, HairstylistWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Loads all hairstylists with their member counts.
pub fn list_hairstylists<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<HairstylistsPageData>
where
    R: HairstylistReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hairstylists = repo.list_hairstylists_with_member_counts()?;

    Ok(HairstylistsPageData { hairstylists })
}

/// Validates the incoming form and creates or renames the hairstylist.
pub fn add_hairstylist<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddHairstylistForm,
) -> ServiceResult<Hairstylist>
where
    R: HairstylistWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_hairstylist = NewHairstylist::try_from(form).map_err(|err| {
        log::error!("Failed to validate hairstylist form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_or_update_hairstylist(&new_hairstylist)
        .inspect_err(|err| log::error!("Failed to add hairstylist: {err}"))
        .map_err(ServiceError::from)
}
