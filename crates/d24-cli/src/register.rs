//! # Register Subcommand
//!
//! `d24 register` fills the guest driver wizard from flags, walking the
//! steps in order and stopping at the first step that does not validate.
//! No account is needed. On success the email is remembered so that
//! `d24 complete` can link the registration after sign-up.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use d24_core::Field;
use d24_state::{Attachment, Attachments, RegistrationWizard};

use crate::context::CliContext;

/// Arguments for `d24 register`.
#[derive(Args, Debug, Default)]
pub struct RegisterArgs {
    /// Given name.
    #[arg(long)]
    pub first_name: Option<String>,
    /// Family name.
    #[arg(long)]
    pub last_name: Option<String>,
    /// Email; sign up with the same address later to link the profile.
    #[arg(long)]
    pub email: Option<String>,
    /// 10-digit mobile number.
    #[arg(long)]
    pub phone: Option<String>,
    /// Driving licence number, e.g. `MH01-20230001234`.
    #[arg(long)]
    pub dl_number: Option<String>,
    /// PAN, e.g. `ABCDE1234F`.
    #[arg(long)]
    pub pan_number: Option<String>,
    /// 12-digit Aadhar number.
    #[arg(long)]
    pub aadhar_number: Option<String>,
    /// Permanent address.
    #[arg(long)]
    pub permanent_address: Option<String>,
    /// Area you drive in.
    #[arg(long)]
    pub operating_address: Option<String>,
    /// City.
    #[arg(long)]
    pub city: Option<String>,
    /// State.
    #[arg(long)]
    pub state: Option<String>,
    /// 6-digit pincode.
    #[arg(long)]
    pub pincode: Option<String>,
    /// Years of driving experience.
    #[arg(long)]
    pub experience: Option<String>,
    /// Expected monthly salary in rupees.
    #[arg(long)]
    pub salary: Option<String>,
    /// Driving licence image. Required.
    #[arg(long)]
    pub dl_image: Option<PathBuf>,
    /// PAN card image.
    #[arg(long)]
    pub pan_image: Option<PathBuf>,
    /// Aadhar card image.
    #[arg(long)]
    pub aadhar_image: Option<PathBuf>,
}

impl RegisterArgs {
    fn value(&self, field: Field) -> Option<&str> {
        let v = match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone,
            Field::DlNumber => &self.dl_number,
            Field::PanNumber => &self.pan_number,
            Field::AadharNumber => &self.aadhar_number,
            Field::PermanentAddress => &self.permanent_address,
            Field::OperatingAddress => &self.operating_address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Pincode => &self.pincode,
            Field::Experience => &self.experience,
            Field::SalaryExpectation => &self.salary,
            _ => return None,
        };
        v.as_deref()
    }

    fn attachments(&self) -> Result<Attachments> {
        let load = |path: &Option<PathBuf>| path.as_deref().map(load_attachment).transpose();
        Ok(Attachments {
            dl_image: load(&self.dl_image)?,
            pan_image: load(&self.pan_image)?,
            aadhar_image: load(&self.aadhar_image)?,
        })
    }
}

/// Fill the wizard from `args`, advancing through every step.
///
/// Returns the wizard on the last step, or the blocked wizard as `Err`.
pub fn fill_wizard(args: &RegisterArgs) -> std::result::Result<RegistrationWizard, RegistrationWizard> {
    let mut wizard = RegistrationWizard::new();
    loop {
        for field in wizard.current().fields {
            if let Some(value) = args.value(*field) {
                wizard.set_field(*field, value);
            }
        }
        if wizard.is_last_step() {
            return Ok(wizard);
        }
        if !wizard.advance() {
            return Err(wizard);
        }
    }
}

/// Execute `d24 register`.
pub async fn run_register(args: &RegisterArgs, ctx: &mut CliContext) -> Result<u8> {
    let mut wizard = match fill_wizard(args) {
        Ok(w) => w,
        Err(blocked) => {
            report(&blocked);
            return Ok(1);
        }
    };
    let attachments = args.attachments()?;

    tracing::info!("Submitting...");
    let submitted = ctx
        .client
        .guest()
        .submit(&mut wizard, attachments, &mut ctx.session)
        .await;
    match submitted {
        Ok(reply) => {
            ctx.persist()?;
            println!(
                "OK: {}",
                reply.message.as_deref().unwrap_or("registration received")
            );
            println!(
                "Sign up with {} and run `d24 complete` to finish.",
                reply.data.email
            );
            Ok(0)
        }
        Err(e) if e.is_local() => {
            report(&wizard);
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

fn report(wizard: &RegistrationWizard) {
    let step = wizard.current();
    eprintln!("Step {} ({}):", step.number, step.title);
    if wizard.field_errors().is_empty() {
        if let Some(message) = wizard.step_error() {
            eprintln!("  {message}");
        }
    }
    for (field, reason) in wizard.field_errors() {
        eprintln!("  {field}: {reason}");
    }
}

fn load_attachment(path: &Path) -> Result<Attachment> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Attachment::new(name, mime_for(path), bytes))
}

/// Content type guessed from the file extension.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_args() -> RegisterArgs {
        RegisterArgs {
            first_name: Some("Ravi".into()),
            last_name: Some("Kumar".into()),
            email: Some("ravi@example.com".into()),
            phone: Some("9876543210".into()),
            dl_number: Some("MH01-20230001234".into()),
            pan_number: Some("ABCDE1234F".into()),
            aadhar_number: Some("123456789012".into()),
            permanent_address: Some("12 MG Road".into()),
            operating_address: Some("Andheri East".into()),
            city: Some("Mumbai".into()),
            state: Some("Maharashtra".into()),
            pincode: Some("400069".into()),
            experience: Some("5".into()),
            salary: Some("25000".into()),
            ..RegisterArgs::default()
        }
    }

    #[test]
    fn every_flag_has_help() {
        let cmd = RegisterArgs::augment_args(clap::Command::new("register"));
        for arg in cmd.get_arguments() {
            assert!(arg.get_help().is_some(), "--{} has no help", arg.get_id());
        }
    }

    #[test]
    fn complete_flags_reach_last_step() {
        let wizard = fill_wizard(&complete_args()).unwrap();
        assert!(wizard.is_last_step());
        assert_eq!(wizard.form().get(Field::City), "Mumbai");
    }

    #[test]
    fn missing_email_stops_on_contact_step() {
        let args = RegisterArgs {
            email: None,
            ..complete_args()
        };
        let blocked = fill_wizard(&args).unwrap_err();
        assert_eq!(blocked.step(), 2);
        assert!(blocked.field_error(Field::Email).is_some());
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("dl.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("pan.png")), "image/png");
        assert_eq!(mime_for(Path::new("scan")), "application/octet-stream");
    }

    #[test]
    fn unreadable_image_is_reported() {
        let args = RegisterArgs {
            dl_image: Some(PathBuf::from("/nonexistent/dl.jpg")),
            ..RegisterArgs::default()
        };
        let err = args.attachments().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dl.jpg"));
    }

    #[test]
    fn image_file_is_loaded_with_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("licence.png");
        std::fs::write(&path, b"png-bytes").unwrap();
        let a = load_attachment(&path).unwrap();
        assert_eq!(a.file_name, "licence.png");
        assert_eq!(a.mime_type, "image/png");
        assert_eq!(a.bytes, b"png-bytes".to_vec());
    }
}
