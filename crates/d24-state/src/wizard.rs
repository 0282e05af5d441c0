//! # Guest Driver Registration Wizard
//!
//! Walks a prospective driver through six fixed steps before they have an
//! account. Each step owns a disjoint set of fields and may only be left
//! forwards once all of its validators pass. The final step assembles a
//! [`GuestRegistrationPayload`] for the guest-registration endpoint.
//!
//! | Step | Title | Fields |
//! |------|-------|--------|
//! | 1 | Personal Info | firstName, lastName |
//! | 2 | Contact | email, phoneNumber |
//! | 3 | Documents | dlNumber, panNumber, aadharNumber |
//! | 4 | Address | permanentAddress, operatingAddress |
//! | 5 | Location | city, state, pincode |
//! | 6 | Experience | experience, salaryExpectation |
//!
//! The wizard is a plain state object. It never renders and never performs
//! I/O; the caller sends the prepared submission and reports a backend
//! rejection back through [`RegistrationWizard::record_submission_failure`].

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use d24_core::validation::{self, Field, FieldFailure};
use d24_core::{AadharNumber, DlNumber, Email, PanNumber, PhoneNumber, Pincode};

/// One wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// 1-based position.
    pub number: u8,
    /// Heading shown above the step.
    pub title: &'static str,
    /// Fields the step owns, in display order.
    pub fields: &'static [Field],
}

/// The fixed step table.
pub const STEPS: [Step; 6] = [
    Step {
        number: 1,
        title: "Personal Info",
        fields: &[Field::FirstName, Field::LastName],
    },
    Step {
        number: 2,
        title: "Contact",
        fields: &[Field::Email, Field::PhoneNumber],
    },
    Step {
        number: 3,
        title: "Documents",
        fields: &[Field::DlNumber, Field::PanNumber, Field::AadharNumber],
    },
    Step {
        number: 4,
        title: "Address",
        fields: &[Field::PermanentAddress, Field::OperatingAddress],
    },
    Step {
        number: 5,
        title: "Location",
        fields: &[Field::City, Field::State, Field::Pincode],
    },
    Step {
        number: 6,
        title: "Experience",
        fields: &[Field::Experience, Field::SalaryExpectation],
    },
];

/// Number of the first step.
pub const FIRST_STEP: u8 = 1;

/// Number of the last step.
pub const LAST_STEP: u8 = STEPS.len() as u8;

/// Error shown when the final submission has no DL image.
pub const DL_IMAGE_REQUIRED: &str = "DL image is required";

/// Look up a step by number.
pub fn step(number: u8) -> Option<&'static Step> {
    STEPS.iter().find(|s| s.number == number)
}

fn owning_step(field: Field) -> u8 {
    STEPS
        .iter()
        .find(|s| s.fields.contains(&field))
        .map_or(LAST_STEP, |s| s.number)
}

/// Raw text of every wizard field, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email used to match the account later.
    pub email: String,
    /// Mobile number.
    pub phone_number: String,
    /// Driving licence number.
    pub dl_number: String,
    /// PAN.
    pub pan_number: String,
    /// Aadhar number.
    pub aadhar_number: String,
    /// Permanent address.
    pub permanent_address: String,
    /// Operating address.
    pub operating_address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Pincode.
    pub pincode: String,
    /// Years of experience.
    pub experience: String,
    /// Monthly salary expectation.
    pub salary_expectation: String,
}

impl RegistrationForm {
    fn slot(&self, field: Field) -> Option<&String> {
        Some(match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone_number,
            Field::DlNumber => &self.dl_number,
            Field::PanNumber => &self.pan_number,
            Field::AadharNumber => &self.aadhar_number,
            Field::PermanentAddress => &self.permanent_address,
            Field::OperatingAddress => &self.operating_address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Pincode => &self.pincode,
            Field::Experience => &self.experience,
            Field::SalaryExpectation => &self.salary_expectation,
            Field::Name | Field::RcNumber => return None,
        })
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::PhoneNumber => &mut self.phone_number,
            Field::DlNumber => &mut self.dl_number,
            Field::PanNumber => &mut self.pan_number,
            Field::AadharNumber => &mut self.aadhar_number,
            Field::PermanentAddress => &mut self.permanent_address,
            Field::OperatingAddress => &mut self.operating_address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Pincode => &mut self.pincode,
            Field::Experience => &mut self.experience,
            Field::SalaryExpectation => &mut self.salary_expectation,
            Field::Name | Field::RcNumber => return None,
        })
    }

    /// Current text of `field`, or `""` for fields the wizard does not ask.
    pub fn get(&self, field: Field) -> &str {
        self.slot(field).map(String::as_str).unwrap_or("")
    }

    /// Set `field`. Returns `false` if the wizard has no such field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.slot_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }
}

/// Validate every field of `step` against `form`, returning failures only.
/// An empty list means the step may be left forwards.
pub fn step_failures(step: &Step, form: &RegistrationForm) -> Vec<FieldFailure> {
    step.fields
        .iter()
        .filter_map(|&field| validation::failure(field, validation::validate(field, form.get(field))))
        .collect()
}

/// An uploaded document image.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Document images sent with the registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachments {
    /// Driving licence image. Required.
    pub dl_image: Option<Attachment>,
    /// PAN card image.
    pub pan_image: Option<Attachment>,
    /// Aadhar card image.
    pub aadhar_image: Option<Attachment>,
}

impl Attachments {
    /// Present attachments paired with their multipart part names.
    pub fn parts(&self) -> Vec<(&'static str, &Attachment)> {
        [
            ("dlImage", self.dl_image.as_ref()),
            ("panImage", self.pan_image.as_ref()),
            ("aadharImage", self.aadhar_image.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, a)| a.map(|a| (name, a)))
        .collect()
    }
}

/// Body of the guest-registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRegistrationPayload {
    /// Email used to match the account later.
    pub email: Email,
    /// Canonical 10-digit mobile number.
    pub phone_number: PhoneNumber,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Given and family name joined, for the driver profile.
    pub name: String,
    /// Canonical DL number.
    pub dl_number: DlNumber,
    /// Upper-case PAN.
    pub pan_number: PanNumber,
    /// 12-digit Aadhar number.
    pub aadhar_number: AadharNumber,
    /// Permanent address.
    pub permanent_address: String,
    /// Operating address.
    pub operating_address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Pincode.
    pub pincode: Pincode,
    /// Years of experience.
    pub experience: u32,
    /// Monthly salary expectation.
    pub salary_expectation: u64,
}

impl GuestRegistrationPayload {
    /// Text parts of the multipart variant, in a fixed order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("email", self.email.as_str().to_string()),
            ("phoneNumber", self.phone_number.as_str().to_string()),
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("name", self.name.clone()),
            ("dlNumber", self.dl_number.as_str().to_string()),
            ("panNumber", self.pan_number.as_str().to_string()),
            ("aadharNumber", self.aadhar_number.as_str().to_string()),
            ("permanentAddress", self.permanent_address.clone()),
            ("operatingAddress", self.operating_address.clone()),
            ("city", self.city.clone()),
            ("state", self.state.clone()),
            ("pincode", self.pincode.as_str().to_string()),
            ("experience", self.experience.to_string()),
            ("salaryExpectation", self.salary_expectation.to_string()),
        ]
    }
}

/// A validated registration ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Registration fields.
    pub payload: GuestRegistrationPayload,
    /// Document images; `dl_image` is always present.
    pub attachments: Attachments,
}

/// Why the wizard refused to prepare a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// Submission was attempted before the last step.
    #[error("registration can only be submitted from the last step (currently on step {step})")]
    NotOnFinalStep {
        /// The current step.
        step: u8,
    },

    /// A step failed validation. Displays the first reason.
    #[error("{}", .failures.first().map(|f| f.reason).unwrap_or("Please fill in all required fields"))]
    StepInvalid {
        /// The step that failed.
        step: u8,
        /// Every failing field of that step.
        failures: Vec<FieldFailure>,
    },

    /// No DL image was attached.
    #[error("DL image is required")]
    MissingDlImage,
}

/// Registration wizard state.
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    step: u8,
    form: RegistrationForm,
    step_error: Option<String>,
    field_errors: BTreeMap<Field, &'static str>,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    /// A fresh wizard on step 1 with an empty form.
    pub fn new() -> Self {
        Self {
            step: FIRST_STEP,
            form: RegistrationForm::default(),
            step_error: None,
            field_errors: BTreeMap::new(),
        }
    }

    /// Current step number.
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Current step descriptor.
    pub fn current(&self) -> &'static Step {
        &STEPS[usize::from(self.step - FIRST_STEP)]
    }

    /// Whether the wizard is on the last step.
    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    /// The form as typed so far.
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Set one field. Clears that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        self.field_errors.remove(&field);
        self.form.set(field, value)
    }

    /// Step-level error from the last failed action.
    pub fn step_error(&self) -> Option<&str> {
        self.step_error.as_deref()
    }

    /// Per-field errors from the last failed action, keyed by field.
    pub fn field_errors(&self) -> &BTreeMap<Field, &'static str> {
        &self.field_errors
    }

    /// The error for one field, if any.
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.get(&field).copied()
    }

    /// Failures that would block leaving the current step.
    pub fn can_advance(&self) -> Vec<FieldFailure> {
        step_failures(self.current(), &self.form)
    }

    fn record_failures(&mut self, failures: &[FieldFailure]) {
        self.field_errors = failures.iter().map(|f| (f.field, f.reason)).collect();
        self.step_error = failures.first().map(|f| f.reason.to_string());
    }

    fn clear_errors(&mut self) {
        self.step_error = None;
        self.field_errors.clear();
    }

    /// Move forward one step if the current step is valid.
    ///
    /// On failure the step does not change; the first reason becomes the
    /// step error and every failure is kept per field. Returns whether the
    /// wizard moved.
    pub fn advance(&mut self) -> bool {
        let failures = self.can_advance();
        if !failures.is_empty() {
            tracing::debug!(step = self.step, failed = failures.len(), "wizard step blocked");
            self.record_failures(&failures);
            return false;
        }
        self.clear_errors();
        if self.step < LAST_STEP {
            self.step += 1;
            true
        } else {
            false
        }
    }

    /// Move back one step without validating. Stays on step 1.
    pub fn back(&mut self) {
        self.clear_errors();
        self.step = self.step.saturating_sub(1).max(FIRST_STEP);
    }

    /// Validate everything and assemble the submission.
    ///
    /// Only allowed on the last step. Re-runs every step's validators and
    /// requires a DL image, so nothing is sent for an incomplete form.
    ///
    /// # Errors
    ///
    /// [`WizardError::NotOnFinalStep`], [`WizardError::StepInvalid`] for the
    /// first failing step, or [`WizardError::MissingDlImage`]. The error is
    /// also recorded as the step error.
    pub fn prepare_submission(&mut self, attachments: Attachments) -> Result<Submission, WizardError> {
        let result = self.try_prepare(attachments);
        match &result {
            Ok(_) => self.clear_errors(),
            Err(WizardError::StepInvalid { failures, .. }) => {
                let failures = failures.clone();
                self.record_failures(&failures);
            }
            Err(e) => {
                self.field_errors.clear();
                self.step_error = Some(e.to_string());
            }
        }
        result
    }

    fn try_prepare(&self, attachments: Attachments) -> Result<Submission, WizardError> {
        if !self.is_last_step() {
            return Err(WizardError::NotOnFinalStep { step: self.step });
        }
        let last = self.can_advance();
        if !last.is_empty() {
            return Err(WizardError::StepInvalid {
                step: self.step,
                failures: last,
            });
        }
        for s in &STEPS {
            let failures = step_failures(s, &self.form);
            if !failures.is_empty() {
                return Err(WizardError::StepInvalid {
                    step: s.number,
                    failures,
                });
            }
        }
        if attachments.dl_image.is_none() {
            return Err(WizardError::MissingDlImage);
        }
        let payload = self.payload()?;
        Ok(Submission {
            payload,
            attachments,
        })
    }

    fn payload(&self) -> Result<GuestRegistrationPayload, WizardError> {
        let f = &self.form;
        let rejected = |field: Field| {
            let reason = validation::validate(field, f.get(field))
                .reason
                .unwrap_or("Please fill in all required fields");
            WizardError::StepInvalid {
                step: owning_step(field),
                failures: vec![FieldFailure { field, reason }],
            }
        };
        let experience = f
            .experience
            .trim()
            .parse::<u32>()
            .map_err(|_| rejected(Field::Experience))?;
        let salary_expectation = f
            .salary_expectation
            .trim()
            .parse::<u64>()
            .map_err(|_| rejected(Field::SalaryExpectation))?;
        let first_name = f.first_name.trim().to_string();
        let last_name = f.last_name.trim().to_string();
        Ok(GuestRegistrationPayload {
            email: Email::new(f.email.trim()).map_err(|_| rejected(Field::Email))?,
            phone_number: PhoneNumber::new(f.phone_number.as_str())
                .map_err(|_| rejected(Field::PhoneNumber))?,
            name: format!("{first_name} {last_name}"),
            first_name,
            last_name,
            dl_number: DlNumber::new(f.dl_number.as_str())
                .map_err(|_| rejected(Field::DlNumber))?,
            pan_number: PanNumber::new(f.pan_number.as_str())
                .map_err(|_| rejected(Field::PanNumber))?,
            aadhar_number: AadharNumber::new(f.aadhar_number.as_str())
                .map_err(|_| rejected(Field::AadharNumber))?,
            permanent_address: f.permanent_address.trim().to_string(),
            operating_address: f.operating_address.trim().to_string(),
            city: f.city.trim().to_string(),
            state: f.state.trim().to_string(),
            pincode: Pincode::new(f.pincode.as_str()).map_err(|_| rejected(Field::Pincode))?,
            experience,
            salary_expectation,
        })
    }

    /// Keep the wizard on the last step with its data after the backend
    /// rejected the submission, showing `message`.
    pub fn record_submission_failure(&mut self, message: impl Into<String>) {
        self.step = LAST_STEP;
        self.field_errors.clear();
        self.step_error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegistrationWizard {
        let mut w = RegistrationWizard::new();
        for (field, value) in [
            (Field::FirstName, "Ravi"),
            (Field::LastName, "Kumar"),
            (Field::Email, "ravi.kumar@example.com"),
            (Field::PhoneNumber, "98765 43210"),
            (Field::DlNumber, "mh01-20230001234"),
            (Field::PanNumber, "abcde1234f"),
            (Field::AadharNumber, "1234 5678 9012"),
            (Field::PermanentAddress, "12 MG Road, Andheri East"),
            (Field::OperatingAddress, "45 Link Road, Malad West"),
            (Field::City, "Mumbai"),
            (Field::State, "Maharashtra"),
            (Field::Pincode, "400069"),
            (Field::Experience, "6"),
            (Field::SalaryExpectation, "28000"),
        ] {
            assert!(w.set_field(field, value));
        }
        w
    }

    fn walk_to_end(w: &mut RegistrationWizard) {
        while !w.is_last_step() {
            assert!(w.advance(), "blocked on step {}: {:?}", w.step(), w.step_error());
        }
    }

    fn dl() -> Attachments {
        Attachments {
            dl_image: Some(Attachment::new("dl.jpg", "image/jpeg", vec![0xff, 0xd8])),
            ..Attachments::default()
        }
    }

    #[test]
    fn steps_own_disjoint_fields() {
        let mut seen = std::collections::BTreeSet::new();
        for s in &STEPS {
            for f in s.fields {
                assert!(seen.insert(*f), "{f} appears twice");
            }
        }
        assert_eq!(seen.len(), 14);
        assert_eq!(LAST_STEP, 6);
        assert_eq!(step(3).map(|s| s.title), Some("Documents"));
    }

    #[test]
    fn advance_blocked_records_first_reason_and_all_fields() {
        let mut w = RegistrationWizard::new();
        w.set_field(Field::FirstName, "R");
        assert!(!w.advance());
        assert_eq!(w.step(), 1);
        assert_eq!(w.field_errors().len(), 2);
        assert_eq!(w.step_error(), w.field_error(Field::FirstName));
        assert_eq!(w.field_error(Field::LastName), Some("Last name is required"));
    }

    #[test]
    fn advance_moves_when_step_passes() {
        let mut w = filled();
        assert!(w.can_advance().is_empty());
        assert!(w.advance());
        assert_eq!(w.step(), 2);
        assert!(w.step_error().is_none());
    }

    #[test]
    fn advance_clamped_at_last_step() {
        let mut w = filled();
        walk_to_end(&mut w);
        assert!(!w.advance());
        assert_eq!(w.step(), LAST_STEP);
    }

    #[test]
    fn back_never_validates_and_stops_at_one() {
        let mut w = filled();
        w.advance();
        w.set_field(Field::Email, "broken");
        w.advance();
        assert!(w.step_error().is_some());
        w.back();
        assert_eq!(w.step(), 1);
        assert!(w.step_error().is_none());
        w.back();
        assert_eq!(w.step(), 1);
    }

    #[test]
    fn setting_a_field_clears_its_error() {
        let mut w = RegistrationWizard::new();
        w.advance();
        assert!(w.field_error(Field::LastName).is_some());
        w.set_field(Field::LastName, "Kumar");
        assert!(w.field_error(Field::LastName).is_none());
        assert!(w.field_error(Field::FirstName).is_some());
    }

    #[test]
    fn unknown_fields_are_refused() {
        let mut w = RegistrationWizard::new();
        assert!(!w.set_field(Field::RcNumber, "x"));
        assert_eq!(w.form().get(Field::RcNumber), "");
    }

    #[test]
    fn submit_without_dl_image_is_blocked() {
        let mut w = filled();
        walk_to_end(&mut w);
        let err = w.prepare_submission(Attachments::default()).unwrap_err();
        assert_eq!(err, WizardError::MissingDlImage);
        assert_eq!(w.step_error(), Some(DL_IMAGE_REQUIRED));
    }

    #[test]
    fn submit_only_from_last_step() {
        let mut w = filled();
        assert_eq!(
            w.prepare_submission(dl()).unwrap_err(),
            WizardError::NotOnFinalStep { step: 1 }
        );
    }

    #[test]
    fn submit_revalidates_earlier_steps() {
        let mut w = filled();
        walk_to_end(&mut w);
        w.set_field(Field::PanNumber, "ABCDE12345");
        match w.prepare_submission(dl()).unwrap_err() {
            WizardError::StepInvalid { step, failures } => {
                assert_eq!(step, 3);
                assert_eq!(failures[0].field, Field::PanNumber);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(w.step(), LAST_STEP);
        assert!(w.field_error(Field::PanNumber).is_some());
    }

    #[test]
    fn payload_is_canonicalized() {
        let mut w = filled();
        walk_to_end(&mut w);
        let sub = w.prepare_submission(dl()).unwrap();
        let p = &sub.payload;
        assert_eq!(p.name, "Ravi Kumar");
        assert_eq!(p.phone_number.as_str(), "9876543210");
        assert_eq!(p.dl_number.as_str(), "MH0120230001234");
        assert_eq!(p.pan_number.as_str(), "ABCDE1234F");
        assert_eq!(p.aadhar_number.as_str(), "123456789012");
        assert_eq!(p.experience, 6);
        assert_eq!(p.salary_expectation, 28_000);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["salaryExpectation"], 28_000);
        assert_eq!(json["firstName"], "Ravi");
        assert_eq!(json["dlNumber"], "MH0120230001234");
        assert_eq!(json["aadharNumber"], "123456789012");
        assert_eq!(sub.attachments.parts().len(), 1);
        assert_eq!(p.form_fields().len(), 15);
    }

    #[test]
    fn payload_debug_masks_aadhar() {
        let mut w = filled();
        walk_to_end(&mut w);
        let sub = w.prepare_submission(dl()).unwrap();
        let dbg = format!("{:?}", sub.payload);
        assert!(dbg.contains("XXXX XXXX 9012"));
        assert!(!dbg.contains("123456789012"));
    }

    #[test]
    fn backend_rejection_keeps_data_on_last_step() {
        let mut w = filled();
        walk_to_end(&mut w);
        let before = w.form().clone();
        w.record_submission_failure("A driver with this phone number already exists");
        assert_eq!(w.step(), LAST_STEP);
        assert_eq!(w.form(), &before);
        assert_eq!(w.step_error(), Some("A driver with this phone number already exists"));
        assert!(w.prepare_submission(dl()).is_ok());
    }

    #[test]
    fn attachment_debug_hides_bytes() {
        let a = Attachment::new("pan.png", "image/png", vec![1, 2, 3]);
        let dbg = format!("{a:?}");
        assert!(dbg.contains("len: 3"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn advance_is_noop_when_any_field_fails(first in "\\PC{0,12}", last in "\\PC{0,12}") {
            let mut w = RegistrationWizard::new();
            w.set_field(Field::FirstName, first.clone());
            w.set_field(Field::LastName, last.clone());
            let blocked = !w.can_advance().is_empty();
            let moved = w.advance();
            prop_assert_eq!(moved, !blocked);
            prop_assert_eq!(w.step(), if blocked { 1 } else { 2 });
            prop_assert_eq!(w.form().get(Field::FirstName), first.as_str());
        }
    }
}
