use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    HairstylistComment, HairstylistId, InstagramHandle, MemberId, MemberName, PhoneNumber,
    PublicId, ServiceType, VisitCount,
};

/// Salon client tracked by visit history and contact info.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub public_id: PublicId,
    pub owner_hairstylist_id: HairstylistId,
    pub full_name: MemberName,
    pub whatsapp_number: PhoneNumber,
    pub instagram_handle: Option<InstagramHandle>,
    pub last_visit_date: Option<NaiveDateTime>,
    pub total_visits: VisitCount,
    pub last_service_type: Option<ServiceType>,
    pub latest_hairstylist_comment: Option<HairstylistComment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Member record ready to be inserted. Starts with zero visits.
#[derive(Clone, Debug)]
pub struct NewMember {
    pub public_id: PublicId,
    pub owner_hairstylist_id: HairstylistId,
    pub full_name: MemberName,
    pub whatsapp_number: PhoneNumber,
    pub instagram_handle: Option<InstagramHandle>,
    pub last_service_type: Option<ServiceType>,
    pub latest_hairstylist_comment: Option<HairstylistComment>,
}

impl NewMember {
    #[must_use]
    pub fn new(
        owner_hairstylist_id: HairstylistId,
        full_name: MemberName,
        whatsapp_number: PhoneNumber,
        instagram_handle: Option<InstagramHandle>,
    ) -> Self {
        Self {
            public_id: PublicId::new(),
            owner_hairstylist_id,
            full_name,
            whatsapp_number,
            instagram_handle,
            last_service_type: None,
            latest_hairstylist_comment: None,
        }
    }

    #[must_use]
    pub fn with_service_type(mut self, service_type: Option<ServiceType>) -> Self {
        self.last_service_type = service_type;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: Option<HairstylistComment>) -> Self {
        self.latest_hairstylist_comment = comment;
        self
    }
}

/// Contact details that may change after creation. Identifiers and ownership
/// are immutable.
#[derive(Clone, Debug)]
pub struct UpdateMember {
    pub full_name: MemberName,
    pub whatsapp_number: PhoneNumber,
    pub instagram_handle: Option<InstagramHandle>,
}

/// A completed salon visit. Recording one bumps `total_visits` by one.
#[derive(Clone, Debug)]
pub struct NewVisit {
    pub visited_at: NaiveDateTime,
    pub service_type: Option<ServiceType>,
    pub comment: Option<HairstylistComment>,
}

/// Most recent of the stored last visit and a newly recorded one. Backdated
/// visits still count but never move the last visit date backwards.
pub fn later_visit(stored: Option<NaiveDateTime>, visited_at: NaiveDateTime) -> NaiveDateTime {
    stored.map_or(visited_at, |stored| stored.max(visited_at))
}

impl Member {
    /// Applies a visit in memory, mirroring what the store does on write.
    #[must_use]
    pub fn with_visit(mut self, visit: &NewVisit) -> Self {
        self.total_visits = self.total_visits.incremented();
        self.last_visit_date = Some(later_visit(self.last_visit_date, visit.visited_at));
        if let Some(service_type) = &visit.service_type {
            self.last_service_type = Some(service_type.clone());
        }
        if let Some(comment) = &visit.comment {
            self.latest_hairstylist_comment = Some(comment.clone());
        }
        self
    }
}
