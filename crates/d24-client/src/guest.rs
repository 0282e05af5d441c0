//! Guest driver registration, submitted before the person has an account.
//!
//! The backend keeps the registration pending under its email. After the
//! person signs up with that email, [`crate::AuthClient::complete_pending_registration`]
//! links the two.

use reqwest::multipart::{Form, Part};

use d24_core::GuestDriverRegistration;
use d24_state::{Attachments, GuestRegistrationPayload, RegistrationWizard, Submission};

use crate::envelope::{Reply, Transport};
use crate::error::{ClientError, Surface};
use crate::session::Session;

const ENDPOINT: &str = "POST /api/drivers/register-guest";

/// Step error for a refused session.
pub const SIGN_IN_AGAIN: &str = "Your session has expired. Please sign in again.";

/// Client for `POST /api/drivers/register-guest`. No token is sent.
#[derive(Debug, Clone)]
pub struct GuestClient {
    transport: Transport,
}

impl GuestClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Send the registration fields as JSON, without document images.
    pub async fn register(
        &self,
        payload: &GuestRegistrationPayload,
    ) -> Result<Reply<GuestDriverRegistration>, ClientError> {
        let url = self.transport.url(&["api", "drivers", "register-guest"])?;
        let request = self.transport.http().post(url).json(payload);
        self.transport.call(ENDPOINT, request).await?.into_reply(ENDPOINT)
    }

    /// Send the registration as multipart form data with its images.
    pub async fn register_with_files(
        &self,
        payload: &GuestRegistrationPayload,
        attachments: &Attachments,
    ) -> Result<Reply<GuestDriverRegistration>, ClientError> {
        let form = multipart_form(payload, attachments)?;
        let url = self.transport.url(&["api", "drivers", "register-guest"])?;
        let request = self.transport.http().post(url).multipart(form);
        self.transport.call(ENDPOINT, request).await?.into_reply(ENDPOINT)
    }

    /// Submit the wizard from its last step.
    ///
    /// The wizard checks every step and the DL image first; nothing is sent
    /// if it refuses. A failure is recorded on the wizard, which keeps its
    /// data: a backend rejection word for word, a transport failure as the
    /// generic banner. On success the session remembers the email so the
    /// post-sign-up callback can complete the registration.
    pub async fn submit(
        &self,
        wizard: &mut RegistrationWizard,
        attachments: Attachments,
        session: &mut Session,
    ) -> Result<Reply<GuestDriverRegistration>, ClientError> {
        let Submission {
            payload,
            attachments,
        } = wizard.prepare_submission(attachments)?;

        match self.register_with_files(&payload, &attachments).await {
            Ok(reply) => {
                tracing::info!(images = attachments.parts().len(), "guest registration submitted");
                session.set_pending_driver_email(payload.email.as_str());
                Ok(reply)
            }
            Err(e) => {
                tracing::error!(error = %e, "guest registration failed");
                let message = match e.surface() {
                    Surface::Inline(m) | Surface::Banner(m) | Surface::Verbatim(m) => m,
                    Surface::Redirect(_) => SIGN_IN_AGAIN.to_string(),
                };
                wizard.record_submission_failure(message);
                Err(e)
            }
        }
    }
}

fn multipart_form(
    payload: &GuestRegistrationPayload,
    attachments: &Attachments,
) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (name, value) in payload.form_fields() {
        form = form.text(name, value);
    }
    for (name, attachment) in attachments.parts() {
        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(&attachment.mime_type)
            .map_err(|e| ClientError::Http {
                endpoint: ENDPOINT.to_string(),
                source: e,
            })?;
        form = form.part(name, part);
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use d24_core::{AadharNumber, DlNumber, Email, PanNumber, PhoneNumber, Pincode};
    use d24_state::Attachment;

    fn payload() -> GuestRegistrationPayload {
        GuestRegistrationPayload {
            email: Email::new("ravi.kumar@example.com").unwrap(),
            phone_number: PhoneNumber::new("9876543210").unwrap(),
            first_name: "Ravi".into(),
            last_name: "Kumar".into(),
            name: "Ravi Kumar".into(),
            dl_number: DlNumber::new("MH0120230001234").unwrap(),
            pan_number: PanNumber::new("ABCDE1234F").unwrap(),
            aadhar_number: AadharNumber::new("123456789012").unwrap(),
            permanent_address: "12 MG Road, Andheri East".into(),
            operating_address: "45 Link Road, Malad West".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: Pincode::new("400069").unwrap(),
            experience: 5,
            salary_expectation: 25000,
        }
    }

    #[test]
    fn form_accepts_known_mime_types() {
        let attachments = Attachments {
            dl_image: Some(Attachment::new("dl.jpg", "image/jpeg", vec![0xff, 0xd8])),
            ..Attachments::default()
        };
        let form = multipart_form(&payload(), &attachments).unwrap();
        assert!(form.boundary().len() > 10);
    }

    #[test]
    fn malformed_mime_type_is_rejected() {
        let attachments = Attachments {
            dl_image: Some(Attachment::new("dl.jpg", "not a mime", vec![1])),
            ..Attachments::default()
        };
        assert!(multipart_form(&payload(), &attachments).is_err());
    }
}
