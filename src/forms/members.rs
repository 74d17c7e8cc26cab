//! Forms for creating members, editing contacts and recording visits.

use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use validator::Validate;

use crate::domain::member::{NewMember, NewVisit, UpdateMember};
use crate::domain::types::{
    HairstylistComment, HairstylistId, InstagramHandle, MemberId, MemberName, PhoneNumber,
    ServiceType,
};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
/// Payload of the "add member" dialog.
pub struct AddMemberForm {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(min = 1, max = 32))]
    pub whatsapp_number: String,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Validated contents of [`AddMemberForm`].
#[derive(Debug)]
pub struct AddMemberPayload {
    pub full_name: MemberName,
    pub whatsapp_number: PhoneNumber,
    pub instagram_handle: Option<InstagramHandle>,
    pub service_type: Option<ServiceType>,
    pub comment: Option<HairstylistComment>,
}

fn parse_name(value: String) -> Result<MemberName, FormError> {
    MemberName::new(value).map_err(|_| FormError::InvalidName)
}

fn parse_phone(value: &str) -> Result<PhoneNumber, FormError> {
    PhoneNumber::new(value).map_err(|_| FormError::InvalidPhoneNumber)
}

fn parse_handle(value: Option<String>) -> Result<Option<InstagramHandle>, FormError> {
    non_blank(value)
        .map(|handle| InstagramHandle::new(handle).map_err(|_| FormError::InvalidInstagramHandle))
        .transpose()
}

fn parse_service_type(value: Option<String>) -> Option<ServiceType> {
    non_blank(value).and_then(|s| ServiceType::new(s).ok())
}

/// Comments that sanitize down to nothing are dropped.
fn parse_comment(value: Option<String>) -> Option<HairstylistComment> {
    non_blank(value).and_then(|c| HairstylistComment::new(c).ok())
}

impl TryFrom<AddMemberForm> for AddMemberPayload {
    type Error = FormError;

    fn try_from(form: AddMemberForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            whatsapp_number: parse_phone(&form.whatsapp_number)?,
            full_name: parse_name(form.full_name)?,
            instagram_handle: parse_handle(form.instagram_handle)?,
            service_type: parse_service_type(form.service_type),
            comment: parse_comment(form.comment),
        })
    }
}

impl AddMemberPayload {
    pub fn into_domain(self, owner: HairstylistId) -> NewMember {
        NewMember::new(
            owner,
            self.full_name,
            self.whatsapp_number,
            self.instagram_handle,
        )
        .with_service_type(self.service_type)
        .with_comment(self.comment)
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating a member's contact details.
pub struct SaveMemberForm {
    pub id: i32,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(min = 1, max = 32))]
    pub whatsapp_number: String,
    #[serde(default)]
    pub instagram_handle: Option<String>,
}

pub struct SaveMemberPayload {
    pub id: MemberId,
    pub updates: UpdateMember,
}

impl TryFrom<SaveMemberForm> for SaveMemberPayload {
    type Error = FormError;

    fn try_from(form: SaveMemberForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            id: MemberId::new(form.id).map_err(|_| FormError::InvalidMemberId)?,
            updates: UpdateMember {
                whatsapp_number: parse_phone(&form.whatsapp_number)?,
                full_name: parse_name(form.full_name)?,
                instagram_handle: parse_handle(form.instagram_handle)?,
            },
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for recording a completed visit.
pub struct RecordVisitForm {
    pub id: i32,
    /// Visit day as `YYYY-MM-DD`; today when omitted.
    #[serde(default)]
    pub visited_on: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub service_type: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

pub struct RecordVisitPayload {
    pub id: MemberId,
    pub visit: NewVisit,
}

impl RecordVisitPayload {
    /// Validates the form, falling back to `now` when no date was given.
    pub fn parse(form: RecordVisitForm, now: NaiveDateTime) -> Result<Self, FormError> {
        form.validate()?;

        let visited_at = match non_blank(form.visited_on) {
            Some(day) => NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .ok_or(FormError::InvalidVisitDate)?,
            None => now,
        };

        Ok(Self {
            id: MemberId::new(form.id).map_err(|_| FormError::InvalidMemberId)?,
            visit: NewVisit {
                visited_at,
                service_type: parse_service_type(form.service_type),
                comment: parse_comment(form.comment),
            },
        })
    }
}

#[derive(MultipartForm)]
pub struct UploadMembersForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

#[derive(Debug, Deserialize)]
struct MemberCsvRow {
    full_name: String,
    whatsapp_number: String,
    #[serde(default)]
    instagram_handle: Option<String>,
}

impl UploadMembersForm {
    /// Reopens the uploaded temp file for reading.
    pub fn open(&self) -> Result<std::fs::File, FormError> {
        self.csv
            .file
            .reopen()
            .map_err(|e| FormError::Csv(e.to_string()))
    }
}

/// Reads `full_name,whatsapp_number[,instagram_handle]` rows. The first invalid
/// row rejects the whole file.
pub fn parse_members_csv<R: Read>(
    reader: R,
    owner: HairstylistId,
) -> Result<Vec<NewMember>, FormError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    rdr.deserialize::<MemberCsvRow>()
        .enumerate()
        .map(|(index, row)| {
            // Header is line 1.
            let line = index + 2;
            let row = row.map_err(|e| FormError::Csv(format!("line {line}: {e}")))?;
            let full_name = MemberName::new(row.full_name)
                .map_err(|_| FormError::Csv(format!("line {line}: empty full_name")))?;
            let whatsapp_number = PhoneNumber::new(row.whatsapp_number.as_str())
                .map_err(|_| FormError::Csv(format!("line {line}: invalid whatsapp_number")))?;
            let instagram_handle = parse_handle(row.instagram_handle)
                .map_err(|_| FormError::Csv(format!("line {line}: invalid instagram_handle")))?;
            Ok(NewMember::new(owner, full_name, whatsapp_number, instagram_handle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn add_form(name: &str, phone: &str, handle: Option<&str>) -> AddMemberForm {
        AddMemberForm {
            full_name: name.to_string(),
            whatsapp_number: phone.to_string(),
            instagram_handle: handle.map(str::to_string),
            service_type: Some("  ".to_string()),
            comment: Some("Prefers mornings".to_string()),
        }
    }

    #[test]
    fn add_member_form_to_payload() {
        let payload =
            AddMemberPayload::try_from(add_form(" Maria ", "+7 916 123 45 67", Some("@Maria")))
                .expect("valid form");

        assert_eq!(payload.full_name.as_str(), "Maria");
        assert_eq!(payload.whatsapp_number.as_str(), "+79161234567");
        assert_eq!(payload.instagram_handle.unwrap().as_str(), "maria");
        assert!(payload.service_type.is_none());
        assert_eq!(payload.comment.unwrap().as_str(), "Prefers mornings");
    }

    #[test]
    fn add_member_form_rejects_bad_input() {
        assert!(matches!(
            AddMemberPayload::try_from(add_form("", "+79161234567", None)),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            AddMemberPayload::try_from(add_form("Maria", "call me", None)),
            Err(FormError::InvalidPhoneNumber)
        ));
        assert!(matches!(
            AddMemberPayload::try_from(add_form("Maria", "+79161234567", Some("no spaces!"))),
            Err(FormError::InvalidInstagramHandle)
        ));
    }

    #[test]
    fn blank_handle_is_absent() {
        let payload = AddMemberPayload::try_from(add_form("Maria", "+79161234567", Some("  ")))
            .expect("valid form");
        assert!(payload.instagram_handle.is_none());
    }

    #[test]
    fn record_visit_uses_given_day_or_now() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();

        let form = RecordVisitForm {
            id: 4,
            visited_on: Some("2026-02-14".to_string()),
            service_type: Some("Balayage".to_string()),
            comment: None,
        };
        let payload = RecordVisitPayload::parse(form, now).expect("valid visit");
        assert_eq!(payload.id.get(), 4);
        assert_eq!(
            payload.visit.visited_at,
            NaiveDate::from_ymd_opt(2026, 2, 14)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(payload.visit.service_type.as_deref(), Some("Balayage"));

        let form = RecordVisitForm {
            id: 4,
            visited_on: None,
            service_type: None,
            comment: None,
        };
        let payload = RecordVisitPayload::parse(form, now).expect("valid visit");
        assert_eq!(payload.visit.visited_at, now);
    }

    #[test]
    fn record_visit_rejects_malformed_date() {
        let form = RecordVisitForm {
            id: 4,
            visited_on: Some("14/02/2026".to_string()),
            service_type: None,
            comment: None,
        };
        assert!(matches!(
            RecordVisitPayload::parse(form, chrono::Utc::now().naive_utc()),
            Err(FormError::InvalidVisitDate)
        ));
    }

    #[test]
    fn csv_rows_become_members() {
        let owner = HairstylistId::new(2).unwrap();
        let data = "full_name,whatsapp_number,instagram_handle\n\
                    Maria Silva,+79161234567,@maria\n\
                    Joana,+79161234568,\n";

        let members = parse_members_csv(data.as_bytes(), owner).expect("valid csv");

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].full_name.as_str(), "Maria Silva");
        assert_eq!(members[0].instagram_handle.as_ref().unwrap().as_str(), "maria");
        assert!(members[1].instagram_handle.is_none());
        assert!(members.iter().all(|m| m.owner_hairstylist_id == owner));
    }

    #[test]
    fn csv_with_invalid_row_is_rejected() {
        let owner = HairstylistId::new(2).unwrap();
        let data = "full_name,whatsapp_number\nMaria,+79161234567\nJoana,not-a-phone\n";

        let err = parse_members_csv(data.as_bytes(), owner).unwrap_err();

        assert!(matches!(err, FormError::Csv(msg) if msg.starts_with("line 3")));
    }
}
