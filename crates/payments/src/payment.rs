use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use franchise_core::{DomainError, DomainResult, Entity, PaymentId, SchoolId};
use franchise_schools::ContractYear;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// Money collected from a school.
    #[serde(rename = "COBRO_ESCUELA")]
    SchoolCollection,
    /// Money paid out to a licensee.
    #[serde(rename = "PAGO_LICENCIA")]
    LicenseePayment,
    #[serde(rename = "OTRO")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "PROGRAMADO")]
    Scheduled,
    #[serde(rename = "PAGADO")]
    Paid,
    #[serde(rename = "VENCIDO")]
    Overdue,
    #[serde(rename = "PARCIAL")]
    Partial,
}

impl PaymentStatus {
    /// Still expecting money: scheduled, overdue or partially paid.
    pub fn is_pending(self) -> bool {
        match self {
            PaymentStatus::Scheduled | PaymentStatus::Overdue | PaymentStatus::Partial => true,
            PaymentStatus::Paid => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub kind: PaymentType,
    /// School the payment belongs to, if any.
    pub reference_id: Option<SchoolId>,
    pub contract_year: Option<ContractYear>,
    pub concept: String,
    pub amount: f64,
    pub scheduled_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub method: Option<String>,
    pub receipt_url: Option<String>,
    pub notes: Option<String>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Scheduled before `today` and still pending.
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.scheduled_date < today
    }

    pub fn belongs_to(&self, school_id: SchoolId) -> bool {
        self.reference_id == Some(school_id)
    }

    /// Copy with status PAGADO and the paid date set.
    pub fn mark_paid(&self, paid_on: NaiveDate) -> Payment {
        Payment {
            status: PaymentStatus::Paid,
            paid_date: Some(paid_on),
            ..self.clone()
        }
    }
}

impl Entity for Payment {
    type Id = PaymentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Builder for a new [`Payment`].
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    payment: Payment,
}

impl PaymentDraft {
    /// Scheduled payment with no school reference.
    pub fn new(
        kind: PaymentType,
        concept: impl Into<String>,
        amount: f64,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            payment: Payment {
                id: PaymentId::new(),
                kind,
                reference_id: None,
                contract_year: None,
                concept: concept.into(),
                amount,
                scheduled_date,
                paid_date: None,
                status: PaymentStatus::Scheduled,
                method: None,
                receipt_url: None,
                notes: None,
            },
        }
    }

    pub fn school(mut self, school_id: SchoolId, year: ContractYear) -> Self {
        self.payment.reference_id = Some(school_id);
        self.payment.contract_year = Some(year);
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.payment.status = status;
        self
    }

    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.payment.status = PaymentStatus::Paid;
        self.payment.paid_date = Some(date);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.payment.method = Some(method.into());
        self
    }

    pub fn receipt_url(mut self, url: impl Into<String>) -> Self {
        self.payment.receipt_url = Some(url.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.payment.notes = Some(notes.into());
        self
    }

    pub fn build(self, id: PaymentId) -> DomainResult<Payment> {
        let payment = Payment { id, ..self.payment };
        validate(&payment)?;
        Ok(payment)
    }
}

/// Checks shared by creation and update.
pub fn validate(payment: &Payment) -> DomainResult<()> {
    if payment.concept.trim().is_empty() {
        return Err(DomainError::validation("payment concept is required"));
    }
    if !payment.amount.is_finite() || payment.amount <= 0.0 {
        return Err(DomainError::validation("payment amount must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lab_payment(school_id: SchoolId) -> PaymentDraft {
        PaymentDraft::new(
            PaymentType::SchoolCollection,
            "Pago Inicial Lab",
            25_000.0,
            date(2024, 2, 15),
        )
        .school(school_id, ContractYear::First)
    }

    #[test]
    fn draft_defaults_to_scheduled() {
        let school_id = SchoolId::new();
        let payment = lab_payment(school_id).build(PaymentId::new()).unwrap();
        assert_eq!(payment.status, PaymentStatus::Scheduled);
        assert!(payment.is_pending());
        assert!(payment.belongs_to(school_id));
        assert_eq!(payment.contract_year, Some(ContractYear::First));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = PaymentDraft::new(PaymentType::Other, "Ajuste", 0.0, date(2024, 1, 1))
            .build(PaymentId::new())
            .unwrap_err();
        assert_eq!(err, DomainError::validation("payment amount must be positive"));
    }

    #[test]
    fn blank_concept_is_rejected() {
        let err = PaymentDraft::new(PaymentType::Other, "", 10.0, date(2024, 1, 1))
            .build(PaymentId::new())
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn mark_paid_sets_status_and_date() {
        let payment = lab_payment(SchoolId::new()).build(PaymentId::new()).unwrap();
        let paid = payment.mark_paid(date(2024, 2, 14));
        assert!(paid.is_paid());
        assert_eq!(paid.paid_date, Some(date(2024, 2, 14)));
        assert!(!payment.is_paid());
    }

    #[test]
    fn late_means_pending_and_past_schedule() {
        let payment = lab_payment(SchoolId::new()).build(PaymentId::new()).unwrap();
        assert!(payment.is_late(date(2024, 3, 1)));
        assert!(!payment.is_late(date(2024, 2, 15)));
        assert!(!payment.mark_paid(date(2024, 3, 1)).is_late(date(2024, 4, 1)));
    }

    #[test]
    fn wire_tags_follow_the_source() {
        let payment = lab_payment(SchoolId::new())
            .paid_on(date(2024, 2, 14))
            .method("Transferencia")
            .build(PaymentId::new())
            .unwrap();
        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["kind"], "COBRO_ESCUELA");
        assert_eq!(json["status"], "PAGADO");
        assert_eq!(json["contract_year"], 1);
        assert_eq!(json["paid_date"], "2024-02-14");
    }
}
