//! # Account Subcommands
//!
//! - `login`: exchange an identity-provider subject for a backend session,
//!   selecting a role on first use.
//! - `whoami`: show the cached account.
//! - `logout`: drop the token, keeping a pending guest registration.
//! - `complete`: link a pending guest registration after sign-up.

use anyhow::{bail, Result};
use clap::Args;

use d24_client::{Identity, Route, SessionStore};
use d24_core::Role;

use crate::context::CliContext;

/// Arguments for `d24 login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Identity-provider subject id.
    #[arg(long)]
    pub clerk_id: String,
    /// Role to select, for an account without one (`user` or `driver`).
    #[arg(long, requires = "city")]
    pub role: Option<String>,
    /// Home city, required with `--role`.
    #[arg(long)]
    pub city: Option<String>,
}

/// Arguments for `d24 complete`.
#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Identity-provider subject id.
    #[arg(long)]
    pub clerk_id: String,
    /// Primary email of the signed-in account.
    #[arg(long)]
    pub email: String,
    /// Identity-provider session token. Falls back to `D24_IDENTITY_TOKEN`.
    #[arg(long)]
    pub identity_token: Option<String>,
}

/// Execute `d24 login`.
pub async fn run_login(args: &LoginArgs, ctx: &mut CliContext) -> Result<u8> {
    let identity = Identity::new(args.clerk_id.trim());

    let route = match (&args.role, &args.city) {
        (Some(role), Some(city)) => {
            let role: Role = role.parse()?;
            ctx.client
                .auth()
                .sign_in_with_role(&mut ctx.session, &identity, role, city)
                .await?
        }
        _ => ctx.client.auth().gate(&mut ctx.session, Some(&identity)).await,
    };

    match route {
        Route::Dashboard(role) => {
            if let Some(mut user) = ctx.session.user().cloned() {
                if user.clerk_id.is_none() {
                    user.clerk_id = Some(identity.clerk_id.clone());
                    ctx.session.set_user(user);
                }
            }
            ctx.persist()?;
            println!("OK: signed in as {role} ({route})");
            Ok(0)
        }
        Route::SelectRole => {
            println!("This account has no role yet. Run `d24 login --clerk-id {} --role user|driver --city <city>`.", identity.clerk_id);
            Ok(2)
        }
        other => bail!("cannot sign in: redirected to {other}"),
    }
}

/// Execute `d24 whoami`.
pub fn run_whoami(ctx: &CliContext) -> Result<u8> {
    let session = &ctx.session;
    match session.user() {
        Some(user) if session.is_signed_in() => {
            println!("{} <{}>", user.display_name(), user.email);
            if let Some(role) = session.display_role() {
                println!("  role: {role}");
            }
            if let Some(city) = session.city() {
                println!("  city: {city}");
            }
        }
        _ => println!("Not signed in."),
    }
    if let Some(email) = session.pending_driver_email() {
        println!("  pending driver registration: {email}");
    }
    Ok(0)
}

/// Execute `d24 logout`.
pub fn run_logout(ctx: &mut CliContext) -> Result<u8> {
    ctx.store.clear()?;
    ctx.session.sign_out();
    println!("OK: signed out");
    Ok(0)
}

/// Execute `d24 complete`.
pub async fn run_complete(args: &CompleteArgs, ctx: &mut CliContext) -> Result<u8> {
    let mut identity = Identity::new(args.clerk_id.trim()).with_email(args.email.trim());
    let token = args
        .identity_token
        .clone()
        .or_else(|| std::env::var("D24_IDENTITY_TOKEN").ok());
    if let Some(token) = token {
        identity = identity.with_token(token);
    }

    let result = ctx
        .client
        .auth()
        .complete_pending_registration(&mut ctx.session, &identity)
        .await;
    // The pending email is cleared whatever the outcome.
    ctx.persist()?;

    match result? {
        Route::SelectRole => {
            println!("No pending driver registration. Choose a role with `d24 login --role ...`.");
            Ok(2)
        }
        route => {
            println!("OK: registration completed ({route})");
            Ok(0)
        }
    }
}
