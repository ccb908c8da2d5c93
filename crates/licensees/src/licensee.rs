use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use franchise_core::{DomainError, DomainResult, Entity, LicenseeId};

/// Licensee contract status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseeStatus {
    #[serde(rename = "ACTIVO")]
    Active,
    #[serde(rename = "INACTIVO")]
    Inactive,
    #[serde(rename = "VENCIDO")]
    Expired,
}

/// A business partner. Schools point at it; it does not own them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Licensee {
    pub id: LicenseeId,
    pub commercial_name: String,
    pub legal_name: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub main_contact: String,
    /// Free-form license tier, e.g. "Master".
    pub license_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LicenseeStatus,
    /// Usual licensee share of net revenue (0.0–1.0).
    pub standard_split: f64,
    pub notes: String,
}

impl Licensee {
    pub fn is_active(&self) -> bool {
        self.status == LicenseeStatus::Active
    }

    /// Whether `date` falls inside the contract period (both ends inclusive).
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

impl Entity for Licensee {
    type Id = LicenseeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Builder for a new [`Licensee`].
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseeDraft {
    licensee: Licensee,
}

impl LicenseeDraft {
    pub fn new(
        commercial_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        standard_split: f64,
    ) -> Self {
        Self {
            licensee: Licensee {
                id: LicenseeId::new(),
                commercial_name: commercial_name.into(),
                legal_name: String::new(),
                country: "México".to_string(),
                state: String::new(),
                city: String::new(),
                email: String::new(),
                phone: String::new(),
                main_contact: String::new(),
                license_type: "Master".to_string(),
                start_date,
                end_date,
                status: LicenseeStatus::Active,
                standard_split,
                notes: String::new(),
            },
        }
    }

    pub fn legal_name(mut self, legal_name: impl Into<String>) -> Self {
        self.licensee.legal_name = legal_name.into();
        self
    }

    pub fn location(
        mut self,
        country: impl Into<String>,
        state: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.licensee.country = country.into();
        self.licensee.state = state.into();
        self.licensee.city = city.into();
        self
    }

    pub fn contact(
        mut self,
        main_contact: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        self.licensee.main_contact = main_contact.into();
        self.licensee.email = email.into();
        self.licensee.phone = phone.into();
        self
    }

    pub fn license_type(mut self, license_type: impl Into<String>) -> Self {
        self.licensee.license_type = license_type.into();
        self
    }

    pub fn status(mut self, status: LicenseeStatus) -> Self {
        self.licensee.status = status;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.licensee.notes = notes.into();
        self
    }

    pub fn build(self, id: LicenseeId) -> DomainResult<Licensee> {
        let licensee = Licensee { id, ..self.licensee };
        validate(&licensee)?;
        Ok(licensee)
    }
}

/// Checks shared by creation and update.
pub fn validate(licensee: &Licensee) -> DomainResult<()> {
    if licensee.commercial_name.trim().is_empty() {
        return Err(DomainError::validation("licensee commercial name is required"));
    }
    if !(0.0..=1.0).contains(&licensee.standard_split) {
        return Err(DomainError::validation(
            "licensee standard split must be between 0 and 1",
        ));
    }
    if licensee.end_date < licensee.start_date {
        return Err(DomainError::validation(
            "licensee contract cannot end before it starts",
        ));
    }
    Ok(())
}
