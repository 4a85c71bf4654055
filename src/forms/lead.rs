use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::interaction::InteractionKind;
use crate::domain::lead::{LeadStatus, NewLead, UpdateLead};
use crate::domain::types::{
    CityName, ContactName, HubId, InteractionText, LeadEmail, PhoneNumber, SalonName,
    TypeConstraintError,
};
use crate::forms::FormError;

/// Blank input means "not provided"; anything else must pass `parse`.
fn optional<T>(
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, TypeConstraintError>,
    error: FormError,
) -> Result<Option<T>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse(value).map(Some).map_err(|_| error)
}

struct LeadFields {
    salon_name: SalonName,
    contact_name: Option<ContactName>,
    email: Option<LeadEmail>,
    phone: Option<PhoneNumber>,
    city: Option<CityName>,
}

impl LeadFields {
    fn parse(
        salon_name: &str,
        contact_name: &str,
        email: &str,
        phone: &str,
        city: &str,
    ) -> Result<Self, FormError> {
        Ok(Self {
            salon_name: SalonName::new(salon_name).map_err(|_| FormError::InvalidName)?,
            contact_name: optional(
                contact_name,
                |v| ContactName::new(v),
                FormError::InvalidName,
            )?,
            email: optional(email, |v| LeadEmail::new(v), FormError::InvalidEmail)?,
            phone: optional(phone, |v| PhoneNumber::new(v), FormError::InvalidPhoneNumber)?,
            city: optional(city, |v| CityName::new(v), FormError::InvalidName)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a single lead by hand.
pub struct AddLeadForm {
    #[validate(length(min = 1, max = 200))]
    pub salon_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: String,
}

impl AddLeadForm {
    pub fn to_new_lead(&self, hub_id: HubId) -> Result<NewLead, FormError> {
        let fields = LeadFields::parse(
            &self.salon_name,
            &self.contact_name,
            &self.email,
            &self.phone,
            &self.city,
        )?;

        Ok(NewLead::new(
            hub_id,
            fields.salon_name,
            fields.contact_name,
            fields.email,
            fields.phone,
            fields.city,
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for editing a lead, including its pipeline status and notes.
pub struct SaveLeadForm {
    pub id: i32,
    #[validate(length(min = 1, max = 200))]
    pub salon_name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: String,
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

impl TryFrom<&SaveLeadForm> for UpdateLead {
    type Error = FormError;

    fn try_from(form: &SaveLeadForm) -> Result<Self, Self::Error> {
        let fields = LeadFields::parse(
            &form.salon_name,
            &form.contact_name,
            &form.email,
            &form.phone,
            &form.city,
        )?;
        let status = form
            .status
            .parse::<LeadStatus>()
            .map_err(|_| FormError::InvalidStatus)?;

        Ok(UpdateLead::new(
            fields.salon_name,
            fields.contact_name,
            fields.email,
            fields.phone,
            fields.city,
            status,
            Some(form.notes.clone()),
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding a timeline entry to a lead.
pub struct AddCommentForm {
    /// Lead receiving the entry.
    pub id: i32,
    #[validate(length(min = 1))]
    pub text: String,
    /// `Comment`, `Call`, `Meeting`, ... Anything else is stored verbatim.
    #[serde(default = "default_comment_kind")]
    pub kind: String,
}

fn default_comment_kind() -> String {
    InteractionKind::Comment.to_string()
}

impl AddCommentForm {
    pub fn text(&self) -> Result<InteractionText, FormError> {
        InteractionText::new(self.text.as_str()).map_err(|_| FormError::InvalidName)
    }

    pub fn kind(&self) -> InteractionKind {
        InteractionKind::from(self.kind.trim())
    }
}

#[derive(MultipartForm)]
pub struct UploadLeadsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadLeadsForm {
    pub fn parse(&self, hub_id: HubId) -> Result<Vec<NewLead>, FormError> {
        let file = self.csv.file.reopen()?;
        parse_leads_csv(file, hub_id)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LeadCsvRow {
    salon_name: String,
    contact_name: String,
    email: String,
    phone: String,
    city: String,
}

/// Reads leads from CSV with a `salon_name,contact_name,email,phone,city`
/// header. Columns may come in any order and all but `salon_name` may be
/// missing. Rows without a salon name are skipped.
pub fn parse_leads_csv<R: Read>(reader: R, hub_id: HubId) -> Result<Vec<NewLead>, FormError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut leads = Vec::new();
    for (index, record) in rdr.deserialize::<LeadCsvRow>().enumerate() {
        // Header is line 1.
        let row = index + 2;
        let record = record?;

        if record.salon_name.trim().is_empty() {
            log::warn!("Skipping CSV row {row} without a salon name");
            continue;
        }

        let fields = LeadFields::parse(
            &record.salon_name,
            &record.contact_name,
            &record.email,
            &record.phone,
            &record.city,
        )
        .map_err(|err| FormError::InvalidRow {
            row,
            reason: err.to_string(),
        })?;

        leads.push(NewLead::new(
            hub_id,
            fields.salon_name,
            fields.contact_name,
            fields.email,
            fields.phone,
            fields.city,
        ));
    }

    Ok(leads)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> HubId {
        HubId::new(1).unwrap()
    }

    #[test]
    fn add_lead_form_treats_blank_fields_as_missing() {
        let form = AddLeadForm {
            salon_name: " Studio Urody Ewa ".into(),
            contact_name: "".into(),
            email: "  ".into(),
            phone: "".into(),
            city: "Łódź".into(),
        };
        assert!(form.validate().is_ok());

        let lead = form.to_new_lead(hub()).unwrap();

        assert_eq!(lead.salon_name.as_str(), "Studio Urody Ewa");
        assert!(lead.contact_name.is_none());
        assert!(lead.email.is_none());
        assert!(lead.phone.is_none());
        assert_eq!(lead.city.as_deref(), Some("Łódź"));
    }

    #[test]
    fn add_lead_form_rejects_bad_email() {
        let form = AddLeadForm {
            salon_name: "Salon".into(),
            contact_name: "".into(),
            email: "not-an-email".into(),
            phone: "".into(),
            city: "".into(),
        };

        assert!(matches!(
            form.to_new_lead(hub()),
            Err(FormError::InvalidEmail)
        ));
    }

    #[test]
    fn save_form_parses_status_and_phone() {
        let form = SaveLeadForm {
            id: 3,
            salon_name: "Salon".into(),
            contact_name: "Kasia Nowak".into(),
            email: "Kasia@Example.com".into(),
            phone: "600 700 800".into(),
            city: "Kraków".into(),
            status: "replied".into(),
            notes: "  ".into(),
        };

        let update = UpdateLead::try_from(&form).unwrap();

        assert_eq!(update.status, LeadStatus::Replied);
        assert_eq!(update.phone.unwrap().as_str(), "+48600700800");
        assert_eq!(update.email.unwrap().as_str(), "kasia@example.com");
        assert!(update.notes.is_none());
    }

    #[test]
    fn save_form_rejects_unknown_status() {
        let form = SaveLeadForm {
            id: 3,
            salon_name: "Salon".into(),
            contact_name: "".into(),
            email: "".into(),
            phone: "".into(),
            city: "".into(),
            status: "archived".into(),
            notes: "".into(),
        };

        assert!(matches!(
            UpdateLead::try_from(&form),
            Err(FormError::InvalidStatus)
        ));
    }

    #[test]
    fn comment_form_validates_text() {
        let form = AddCommentForm {
            id: 1,
            text: "".into(),
            kind: "Call".into(),
        };
        assert!(form.validate().is_err());
        assert_eq!(form.kind(), InteractionKind::Call);
    }

    #[test]
    fn csv_import_reads_rows_in_any_column_order() {
        let data = "\
city,salon_name,email,phone,contact_name
Gdynia,Salon Róża,roza@example.com,600700800,Magda Zielińska
,  ,skipped@example.com,,
Poznań,Barber Shop,,,
";

        let leads = parse_leads_csv(data.as_bytes(), hub()).unwrap();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].salon_name.as_str(), "Salon Róża");
        assert_eq!(leads[0].contact_name.as_deref(), Some("Magda Zielińska"));
        assert_eq!(leads[0].phone.as_ref().unwrap().as_str(), "+48600700800");
        assert_eq!(leads[1].city.as_deref(), Some("Poznań"));
        assert!(leads[1].email.is_none());
    }

    #[test]
    fn csv_import_reports_the_offending_row() {
        let data = "salon_name,email\nSalon A,a@example.com\nSalon B,broken\n";

        let err = parse_leads_csv(data.as_bytes(), hub()).unwrap_err();

        assert!(matches!(err, FormError::InvalidRow { row: 3, .. }));
    }
}
