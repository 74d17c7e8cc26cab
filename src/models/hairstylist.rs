//! Diesel models representing hairstylists.

use diesel::prelude::*;

use crate::domain::hairstylist::{
    Hairstylist as DomainHairstylist, NewHairstylist as DomainNewHairstylist,
};
use crate::domain::types::{HairstylistEmail, HairstylistId, HairstylistName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::hairstylists)]
/// Diesel model for [`crate::domain::hairstylist::Hairstylist`].
pub struct Hairstylist {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::hairstylists)]
/// Insertable form of [`Hairstylist`].
pub struct NewHairstylist<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl TryFrom<Hairstylist> for DomainHairstylist {
    type Error = TypeConstraintError;

    fn try_from(hairstylist: Hairstylist) -> Result<Self, Self::Error> {
        Ok(Self {
            id: HairstylistId::try_from(hairstylist.id)?,
            name: HairstylistName::new(hairstylist.name)?,
            email: HairstylistEmail::new(hairstylist.email)?,
        })
    }
}

impl<'a> From<&'a DomainNewHairstylist> for NewHairstylist<'a> {
    fn from(hairstylist: &'a DomainNewHairstylist) -> Self {
        Self {
            name: hairstylist.name.as_str(),
            email: hairstylist.email.as_str(),
        }
    }
}
