//! # Driver Subcommands
//!
//! `d24 driver show | save | availability` manage the signed-in driver's
//! own profile. `save` starts from the stored profile (or a blank one with
//! the account's city) and overwrites only the fields given as flags.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use d24_client::DriverProfileForm;
use d24_core::DriverProfile;

use crate::context::CliContext;

/// Arguments for `d24 driver`.
#[derive(Args, Debug)]
pub struct DriverArgs {
    #[command(subcommand)]
    pub command: DriverCommand,
}

/// Driver subcommands.
#[derive(Subcommand, Debug)]
pub enum DriverCommand {
    /// Show the stored profile.
    Show,
    /// Create or update the profile.
    Save(ProfileFields),
    /// Turn availability on or off.
    Availability {
        /// `on` or `off`.
        state: String,
    },
}

/// Profile fields settable from the command line.
#[derive(Args, Debug, Default)]
pub struct ProfileFields {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,
    /// 10-digit mobile number.
    #[arg(long)]
    pub phone: Option<String>,
    /// Vehicle registration certificate number.
    #[arg(long)]
    pub rc_number: Option<String>,
    /// Reference to the RC image.
    #[arg(long)]
    pub rc_image: Option<String>,
    /// Driving licence number.
    #[arg(long)]
    pub dl_number: Option<String>,
    /// Reference to the DL image.
    #[arg(long)]
    pub dl_image: Option<String>,
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
    /// Vehicle type, e.g. `Sedan`.
    #[arg(long)]
    pub vehicle_type: Option<String>,
    /// Vehicle model.
    #[arg(long)]
    pub vehicle_model: Option<String>,
    /// Vehicle registration plate.
    #[arg(long)]
    pub vehicle_number: Option<String>,
    /// Years of driving experience.
    #[arg(long)]
    pub experience: Option<String>,
    /// Expected monthly salary in rupees.
    #[arg(long)]
    pub salary: Option<String>,
}

impl ProfileFields {
    /// Overwrite the form fields that were given.
    pub fn apply_to(&self, form: &mut DriverProfileForm) {
        let pairs: [(&Option<String>, &mut String); 16] = [
            (&self.name, &mut form.name),
            (&self.phone, &mut form.phone_number),
            (&self.rc_number, &mut form.rc_number),
            (&self.rc_image, &mut form.rc_image),
            (&self.dl_number, &mut form.dl_number),
            (&self.dl_image, &mut form.dl_image),
            (&self.permanent_address, &mut form.permanent_address),
            (&self.operating_address, &mut form.operating_address),
            (&self.city, &mut form.city),
            (&self.state, &mut form.state),
            (&self.pincode, &mut form.pincode),
            (&self.vehicle_type, &mut form.vehicle_type),
            (&self.vehicle_model, &mut form.vehicle_model),
            (&self.vehicle_number, &mut form.vehicle_number),
            (&self.experience, &mut form.experience),
            (&self.salary, &mut form.salary_expectation),
        ];
        for (given, slot) in pairs {
            if let Some(value) = given {
                *slot = value.clone();
            }
        }
    }
}

/// Execute `d24 driver`.
pub async fn run_driver(args: &DriverArgs, ctx: &mut CliContext) -> Result<u8> {
    match &args.command {
        DriverCommand::Show => {
            match ctx.client.drivers().my_profile(&ctx.session).await? {
                Some(p) => print_profile(&p),
                None => println!("No driver profile yet. Create one with `d24 driver save`."),
            }
            Ok(0)
        }
        DriverCommand::Save(fields) => run_save(fields, ctx).await,
        DriverCommand::Availability { state } => {
            let available = match state.trim().to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => bail!("expected on or off, got \"{other}\""),
            };
            let role = ctx.fresh_role().await?;
            ctx.persist()?;
            let mut profile = ctx
                .client
                .drivers()
                .my_profile(&ctx.session)
                .await?
                .context("no driver profile yet; run `d24 driver save` first")?;
            let message = ctx
                .client
                .drivers()
                .set_availability(&ctx.session, role, &mut profile, available)
                .await?;
            println!(
                "OK: {} ({})",
                message.as_deref().unwrap_or("availability updated"),
                if profile.availability { "available" } else { "unavailable" }
            );
            Ok(0)
        }
    }
}

async fn run_save(fields: &ProfileFields, ctx: &mut CliContext) -> Result<u8> {
    let existing = ctx.client.drivers().my_profile(&ctx.session).await?;
    let mut form = match &existing {
        Some(p) => DriverProfileForm::from_profile(p),
        None => DriverProfileForm::for_new_profile(ctx.session.city()),
    };
    fields.apply_to(&mut form);

    let failures = form.validate();
    if !failures.is_empty() {
        for f in &failures {
            eprintln!("{}: {}", f.field, f.reason);
        }
        return Ok(1);
    }

    tracing::info!("Saving...");
    let reply = ctx.client.drivers().upsert_profile(&ctx.session, &form).await?;
    println!(
        "OK: {}",
        reply.message.as_deref().unwrap_or(if existing.is_some() {
            "profile updated"
        } else {
            "profile created"
        })
    );
    print_profile(&reply.data);
    Ok(0)
}

fn print_profile(p: &DriverProfile) {
    println!("{} ({})", p.name, p.id);
    println!("  phone: {}", p.phone_number);
    println!("  city: {}", p.city);
    println!("  DL: {}  RC: {}", p.dl_number, p.rc_number);
    if let Some(years) = p.experience {
        println!("  experience: {years} yrs");
    }
    if let Some(salary) = p.salary_expectation {
        println!("  salary expectation: Rs {salary}/month");
    }
    println!(
        "  {}, {}",
        if p.is_verified { "verified" } else { "awaiting verification" },
        if p.availability { "available" } else { "unavailable" }
    );
}
