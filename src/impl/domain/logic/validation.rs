use fractic_server_error::ServerError;

use crate::{
    entities::{
        ComplianceChecklist, Disbursement, FundRegistration, FundSource, PlanActivity, Receipt,
    },
    errors::{
        ComplianceChecklistIncomplete, MissingRequiredField, NonPositiveAmount,
        NonPositiveDisbursement, ReceiptActivityMismatch, UnexpectedField,
    },
};

/// Conditional field group a fund source requires, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConditionalGroup {
    RelatedActivity,
    DonationType,
    CarryOverYear,
}

impl ConditionalGroup {
    fn field(&self) -> &'static str {
        match self {
            ConditionalGroup::RelatedActivity => "related_activity",
            ConditionalGroup::DonationType => "donation_type",
            ConditionalGroup::CarryOverYear => "carry_over_year",
        }
    }

    fn for_source(source: FundSource) -> Option<Self> {
        match source {
            FundSource::ErpaPayment => Some(ConditionalGroup::RelatedActivity),
            FundSource::CommunityDonation => Some(ConditionalGroup::DonationType),
            FundSource::CarryOver => Some(ConditionalGroup::CarryOverYear),
            FundSource::PfesPayment | FundSource::StateBudget | FundSource::Other => None,
        }
    }
}

impl FundRegistration {
    /// Runs before any write. The fund source decides which one conditional
    /// group must be filled; the other groups must stay empty.
    pub fn validate(&self) -> Result<(), ServerError> {
        if !(self.amount_received > 0.0) {
            return Err(NonPositiveAmount::new(self.amount_received));
        }
        let required = ConditionalGroup::for_source(self.fund_source);
        let present = [
            (
                ConditionalGroup::RelatedActivity,
                self.related_activity.is_some(),
            ),
            (ConditionalGroup::DonationType, self.donation_type.is_some()),
            (
                ConditionalGroup::CarryOverYear,
                self.carry_over_year.is_some(),
            ),
        ];
        for (group, is_set) in present {
            match (Some(group) == required, is_set) {
                (true, false) => {
                    return Err(MissingRequiredField::new(
                        group.field(),
                        self.fund_source.key(),
                    ))
                }
                (false, true) => {
                    return Err(UnexpectedField::new(group.field(), self.fund_source.key()))
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl ComplianceChecklist {
    pub fn unchecked(&self) -> Vec<&'static str> {
        [
            ("benefits_community", self.benefits_community),
            ("within_eligible_categories", self.within_eligible_categories),
            ("not_funded_elsewhere", self.not_funded_elsewhere),
            ("no_forest_damage", self.no_forest_damage),
        ]
        .into_iter()
        .filter(|(_, checked)| !checked)
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self, idea_title: &str) -> Result<(), ServerError> {
        let unchecked = self.unchecked();
        if unchecked.is_empty() {
            Ok(())
        } else {
            Err(ComplianceChecklistIncomplete::new(
                idea_title,
                &unchecked.join(", "),
            ))
        }
    }
}

impl Disbursement {
    pub fn validate(&self) -> Result<(), ServerError> {
        if !(self.amount > 0.0) {
            return Err(NonPositiveDisbursement::new(self.id.as_str(), self.amount));
        }
        Ok(())
    }
}

impl Receipt {
    /// A receipt may only be attached to the activity it names.
    pub fn validate_for(&self, activity: &PlanActivity) -> Result<(), ServerError> {
        if self.activity_id != activity.id {
            return Err(ReceiptActivityMismatch::new(
                self.id.as_str(),
                self.activity_id.as_str(),
                activity.id.as_str(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::{DonationType, FundPurpose, RegistrationStatus};

    fn registration(source: FundSource) -> FundRegistration {
        FundRegistration {
            id: "f1".into(),
            community_id: "v1".into(),
            fiscal_year_id: "fy".into(),
            fund_source: source,
            fund_purpose: FundPurpose::General,
            amount_received: 5_000_000.0,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            payment_reference: Some("UNC-001".into()),
            payer: Some("Provincial fund".into()),
            related_activity: None,
            donation_type: None,
            carry_over_year: None,
            recorded_by: "u1".into(),
            recorded_date: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            status: RegistrationStatus::Recorded,
        }
    }

    #[test]
    fn erpa_requires_related_activity() {
        let mut reg = registration(FundSource::ErpaPayment);
        assert!(reg.is_erpa());
        assert!(reg.validate().is_err());
        reg.related_activity = Some("a1".into());
        assert!(reg.validate().is_ok());
    }

    #[test]
    fn donation_requires_donation_type_only() {
        let mut reg = registration(FundSource::CommunityDonation);
        assert!(reg.validate().is_err());
        reg.donation_type = Some(DonationType::InKind);
        assert!(reg.validate().is_ok());
        reg.carry_over_year = Some(2023);
        assert!(reg.validate().is_err());
    }

    #[test]
    fn carry_over_requires_year() {
        let mut reg = registration(FundSource::CarryOver);
        assert!(reg.validate().is_err());
        reg.carry_over_year = Some(2023);
        assert!(reg.validate().is_ok());
    }

    #[test]
    fn plain_sources_need_no_conditional_fields() {
        let reg = registration(FundSource::PfesPayment);
        assert!(!reg.is_erpa());
        assert!(reg.validate().is_ok());
        let mut with_extra = registration(FundSource::StateBudget);
        with_extra.related_activity = Some("a1".into());
        assert!(with_extra.validate().is_err());
    }

    #[test]
    fn amount_must_be_positive() {
        let mut reg = registration(FundSource::Other);
        reg.amount_received = 0.0;
        assert!(reg.validate().is_err());
        reg.amount_received = f64::NAN;
        assert!(reg.validate().is_err());
    }

    #[test]
    fn checklist_lists_unchecked_items() {
        let checklist = ComplianceChecklist {
            benefits_community: true,
            within_eligible_categories: true,
            ..Default::default()
        };
        assert_eq!(
            checklist.unchecked(),
            vec!["not_funded_elsewhere", "no_forest_damage"]
        );
        assert!(checklist.validate("Cattle bank").is_err());
        let complete = ComplianceChecklist {
            benefits_community: true,
            within_eligible_categories: true,
            not_funded_elsewhere: true,
            no_forest_damage: true,
        };
        assert!(complete.validate("Cattle bank").is_ok());
    }

    #[test]
    fn disbursement_amount_must_be_positive() {
        use crate::entities::{DisbursementStatus, PaymentChannel, RecipientType};

        let mut disbursement = Disbursement {
            id: "d1".into(),
            commune_id: "c1".into(),
            community_id: Some("v1".into()),
            fiscal_year_id: "fy".into(),
            activity_id: None,
            recipient_type: RecipientType::Cpc,
            recipient_name: "Village board".into(),
            amount: 2_000_000.0,
            scheduled_date: None,
            payment_date: None,
            channel: PaymentChannel::Bank,
            status: DisbursementStatus::Disbursed,
            payment_order_ref: None,
        };
        assert!(disbursement.validate().is_ok());
        disbursement.amount = 0.0;
        assert!(disbursement.validate().is_err());
        disbursement.amount = -5.0;
        assert!(disbursement.validate().is_err());
    }
}
