use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::member::{
    Member as DomainMember, NewMember as DomainNewMember, NewVisit as DomainNewVisit,
    UpdateMember as DomainUpdateMember,
};
use crate::domain::types::{
    HairstylistComment, HairstylistId, InstagramHandle, MemberId, MemberName, PhoneNumber,
    PublicId, ServiceType, TypeConstraintError, VisitCount,
};
use crate::models::hairstylist::Hairstylist;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::members)]
#[diesel(belongs_to(Hairstylist, foreign_key = owner_hairstylist_id))]
/// Diesel model for [`crate::domain::member::Member`].
pub struct Member {
    pub id: i32,
    pub public_id: Vec<u8>,
    pub owner_hairstylist_id: i32,
    pub full_name: String,
    pub whatsapp_number: String,
    pub instagram_handle: Option<String>,
    pub last_visit_date: Option<NaiveDateTime>,
    pub total_visits: i32,
    pub last_service_type: Option<String>,
    pub latest_hairstylist_comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::members)]
/// Insertable form of [`Member`].
pub struct NewMember<'a> {
    pub public_id: &'a [u8],
    pub owner_hairstylist_id: i32,
    pub full_name: &'a str,
    pub whatsapp_number: &'a str,
    pub instagram_handle: Option<&'a str>,
    pub last_service_type: Option<&'a str>,
    pub latest_hairstylist_comment: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::members)]
#[diesel(treat_none_as_null = true)]
/// Contact changes applied to a [`Member`] record.
pub struct UpdateMember<'a> {
    pub full_name: &'a str,
    pub whatsapp_number: &'a str,
    pub instagram_handle: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::members)]
/// Visit fields; `None` leaves the stored value untouched.
pub struct VisitChanges<'a> {
    pub last_visit_date: Option<NaiveDateTime>,
    pub last_service_type: Option<&'a str>,
    pub latest_hairstylist_comment: Option<&'a str>,
}

impl TryFrom<Member> for DomainMember {
    type Error = TypeConstraintError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemberId::try_from(member.id)?,
            public_id: PublicId::from_bytes(&member.public_id)?,
            owner_hairstylist_id: HairstylistId::try_from(member.owner_hairstylist_id)?,
            full_name: MemberName::new(member.full_name)?,
            whatsapp_number: PhoneNumber::new(member.whatsapp_number)?,
            instagram_handle: member
                .instagram_handle
                .map(InstagramHandle::new)
                .transpose()?,
            last_visit_date: member.last_visit_date,
            total_visits: VisitCount::try_from(member.total_visits)?,
            last_service_type: member.last_service_type.map(ServiceType::new).transpose()?,
            latest_hairstylist_comment: member
                .latest_hairstylist_comment
                .map(HairstylistComment::new)
                .transpose()?,
            created_at: member.created_at,
            updated_at: member.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewMember> for NewMember<'a> {
    fn from(member: &'a DomainNewMember) -> Self {
        Self {
            public_id: member.public_id.as_bytes(),
            owner_hairstylist_id: member.owner_hairstylist_id.get(),
            full_name: member.full_name.as_str(),
            whatsapp_number: member.whatsapp_number.as_str(),
            instagram_handle: member.instagram_handle.as_ref().map(InstagramHandle::as_str),
            last_service_type: member.last_service_type.as_ref().map(ServiceType::as_str),
            latest_hairstylist_comment: member
                .latest_hairstylist_comment
                .as_ref()
                .map(HairstylistComment::as_str),
        }
    }
}

impl<'a> From<&'a DomainUpdateMember> for UpdateMember<'a> {
    fn from(member: &'a DomainUpdateMember) -> Self {
        Self {
            full_name: member.full_name.as_str(),
            whatsapp_number: member.whatsapp_number.as_str(),
            instagram_handle: member.instagram_handle.as_ref().map(InstagramHandle::as_str),
        }
    }
}

impl<'a> From<&'a DomainNewVisit> for VisitChanges<'a> {
    fn from(visit: &'a DomainNewVisit) -> Self {
        Self {
            last_visit_date: Some(visit.visited_at),
            last_service_type: visit.service_type.as_ref().map(ServiceType::as_str),
            latest_hairstylist_comment: visit.comment.as_ref().map(HairstylistComment::as_str),
        }
    }
}
