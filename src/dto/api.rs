//! DTOs exposed by the JSON API.

use serde::Serialize;

use crate::domain::member::Member;

/// Query parameters accepted by `/api/v1/members`.
#[derive(Debug, Default)]
pub struct MembersQuery {
    /// Optional free-form search applied to name, WhatsApp and Instagram.
    pub search: Option<String>,
}

/// Result payload returned by [`crate::services::api::list_members`].
#[derive(Debug, Serialize)]
pub struct MembersResponse {
    /// Number of members returned.
    pub total: usize,
    pub members: Vec<Member>,
}
