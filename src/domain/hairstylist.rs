use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::{HairstylistEmail, HairstylistId, HairstylistName, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Hairstylist {
    pub id: HairstylistId,
    pub name: HairstylistName,
    pub email: HairstylistEmail,
}

#[derive(Clone, Debug)]
pub struct NewHairstylist {
    pub name: HairstylistName,
    pub email: HairstylistEmail,
}

impl NewHairstylist {
    #[must_use]
    pub fn new(name: HairstylistName, email: HairstylistEmail) -> Self {
        Self { name, email }
    }

    /// Builds the payload from raw strings, validating both fields.
    pub fn try_new(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: HairstylistName::new(name)?,
            email: HairstylistEmail::new(email)?,
        })
    }
}

impl TryFrom<&AuthenticatedUser> for NewHairstylist {
    type Error = TypeConstraintError;

    fn try_from(user: &AuthenticatedUser) -> Result<Self, Self::Error> {
        Self::try_new(user.name.as_str(), user.email.as_str())
    }
}
