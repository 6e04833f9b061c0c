//! # Sponsorship Application Form
//!
//! A framework-free state machine for one application. Every edit re-runs
//! validation and recomputes the derived amount explicitly; the form never
//! stores the amount as input.
//!
//! ```text
//! Editing ─▶ Validating ─▶ Invalid ◀─┐
//!                      └─▶ Valid ────┴─▶ Submitting ─▶ SubmitSucceeded
//!                                                   └─▶ SubmitFailed ─▶ (edit / retry)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::{check_letter, AttachmentRejected, AttachmentSource};
use crate::error::{AppError, Result};
use crate::events::{SponsorEvent, SponsorEvents};
use crate::models::SubmissionPayload;
use crate::traits::SubmissionClient;
use crate::validation::{self, composite_phone, Field, FieldErrors, FormValues};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Fresh or cleared; errors are computed but not yet shown.
    Editing,
    /// Rules are being evaluated. Only seen inside a single call.
    Validating,
    Invalid,
    Valid,
    /// Waiting on the submission endpoint.
    Submitting,
    SubmitSucceeded(SubmissionReceipt),
    /// The endpoint failed; all input is kept for another attempt.
    SubmitFailed { notice: String },
}

impl FormState {
    pub fn label(&self) -> &'static str {
        match self {
            FormState::Editing => "editing",
            FormState::Validating => "validating",
            FormState::Invalid => "invalid",
            FormState::Valid => "valid",
            FormState::Submitting => "submitting",
            FormState::SubmitSucceeded(_) => "submit_succeeded",
            FormState::SubmitFailed { .. } => "submit_failed",
        }
    }
}

/// What the confirmation screen echoes back after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub values: FormValues,
    pub payload: SubmissionPayload,
    #[serde(rename = "amountLKR")]
    pub amount_lkr: u64,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SponsorshipForm {
    values: FormValues,
    errors: FieldErrors,
    amount: u64,
    state: FormState,
}

impl Default for SponsorshipForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SponsorshipForm {
    pub fn new() -> Self {
        let values = FormValues::default();
        let errors = validation::validate(&values);
        Self { values, errors, amount: 0, state: FormState::Editing }
    }

    /// Loads a whole set of values at once, as a posted form does.
    ///
    /// The letter filename goes through the attachment check for `source`;
    /// a rejected name is dropped and reported back.
    pub fn from_values(
        mut values: FormValues,
        source: AttachmentSource,
    ) -> (Self, Option<AttachmentRejected>) {
        let letter = std::mem::take(&mut values.letter_filename);
        let mut form = Self { values, ..Self::new() };
        let rejected = if letter.trim().is_empty() {
            None
        } else {
            form.attach_letter(&letter, source).err()
        };
        form.revalidate();
        (form, rejected)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Derived package amount in LKR, current as of the last edit.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match &self.state {
            FormState::SubmitSucceeded(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Updates one field and revalidates.
    ///
    /// The letter filename is routed through [`Self::attach_letter`]; an empty
    /// value clears it.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        if field == Field::LetterFilename {
            if value.trim().is_empty() {
                self.values.letter_filename.clear();
            } else if let Err(e) = self.attach_letter(&value, AttachmentSource::Picker) {
                tracing::debug!(error = %e, "letter selection ignored");
            }
        } else {
            self.values.set(field, value);
        }
        self.revalidate();
    }

    /// Records the company letter's filename.
    ///
    /// Picker and drop go through the same check; on rejection the previous
    /// filename stays.
    pub fn attach_letter(
        &mut self,
        filename: &str,
        source: AttachmentSource,
    ) -> std::result::Result<&str, AttachmentRejected> {
        let name = check_letter(filename)?;
        tracing::debug!(?source, filename = %name, "letter attached");
        self.values.letter_filename = name;
        Ok(&self.values.letter_filename)
    }

    /// Re-runs every rule and the amount derivation.
    pub fn revalidate(&mut self) -> &FieldErrors {
        self.transition(FormState::Validating);
        self.errors = validation::validate(&self.values);
        self.amount = validation::amount(self.values.tier(), &self.values.other_amount);
        let next = if self.errors.is_empty() { FormState::Valid } else { FormState::Invalid };
        self.transition(next);
        &self.errors
    }

    /// The request body for the current values, or `None` while invalid.
    pub fn payload(&self) -> Option<SubmissionPayload> {
        if !self.is_valid() {
            return None;
        }
        let level = self.values.tier()?;
        let v = &self.values;
        Some(SubmissionPayload {
            company_name: v.company_name.trim().to_string(),
            website: non_empty(&v.website),
            contact_person_first_name: v.first_name.trim().to_string(),
            contact_person_last_name: v.last_name.trim().to_string(),
            email: v.email.trim().to_string(),
            contact_number: composite_phone(&v.country_code, &v.contact_number),
            sponsorship_level: level,
            other_amount: non_empty(&v.other_amount),
            amount_lkr: self.amount,
            company_letter_filename: non_empty(&v.letter_filename),
            interest_reason: non_empty(&v.interest),
            additional_comments: non_empty(&v.comments),
        })
    }

    /// Sends the application.
    ///
    /// On success the form holds a [`SubmissionReceipt`] and an
    /// [`SponsorEvent::ApplicationSubmitted`] is published. On failure the
    /// form moves to `SubmitFailed` with every value untouched.
    pub async fn submit(
        &mut self,
        client: &dyn SubmissionClient,
        events: &SponsorEvents,
    ) -> Result<SubmissionReceipt> {
        if matches!(self.state, FormState::SubmitSucceeded(_)) {
            return Err(AppError::Conflict(
                "application already submitted; clear the form to start another".into(),
            ));
        }

        self.revalidate();
        let Some(payload) = self.payload() else {
            return Err(AppError::ValidationError(format!(
                "{} field(s) need attention",
                self.errors.len()
            )));
        };

        self.transition(FormState::Submitting);
        match client.submit(&payload).await {
            Ok(()) => {
                let receipt = SubmissionReceipt {
                    values: self.values.clone(),
                    amount_lkr: self.amount,
                    submitted_at: Utc::now(),
                    payload,
                };
                tracing::info!(
                    company = %receipt.payload.company_name,
                    level = %receipt.payload.sponsorship_level,
                    amount = receipt.amount_lkr,
                    "sponsorship application submitted"
                );
                events.emit(SponsorEvent::ApplicationSubmitted {
                    company: receipt.payload.company_name.clone(),
                    level: receipt.payload.sponsorship_level,
                    submitted_at: receipt.submitted_at,
                });
                self.transition(FormState::SubmitSucceeded(receipt.clone()));
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sponsorship application rejected");
                self.transition(FormState::SubmitFailed {
                    notice: "Submission failed. Please try again in a moment.".into(),
                });
                Err(AppError::Submission(e.to_string()))
            }
        }
    }

    /// Back to defaults, from any state.
    pub fn clear(&mut self) {
        *self = Self::new();
        tracing::debug!("form cleared");
    }

    fn transition(&mut self, next: FormState) {
        tracing::debug!(from = self.state.label(), to = next.label(), "form state");
        self.state = next;
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
