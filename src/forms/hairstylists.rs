//! Forms used by hairstylist administration.

use serde::Deserialize;
use validator::Validate;

use crate::domain::hairstylist::NewHairstylist;
use crate::domain::types::{HairstylistEmail, HairstylistName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct AddHairstylistForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

impl TryFrom<AddHairstylistForm> for NewHairstylist {
    type Error = FormError;

    fn try_from(form: AddHairstylistForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = HairstylistName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = HairstylistEmail::new(form.email).map_err(|_| FormError::InvalidEmail)?;

        Ok(NewHairstylist::new(name, email))
    }
}
