//! # d24 CLI entry point
//!
//! Parses command-line arguments, loads the session and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use d24_cli::account::{run_complete, run_login, run_logout, run_whoami, CompleteArgs, LoginArgs};
use d24_cli::admin::{run_admin, AdminArgs};
use d24_cli::bookings::{
    run_book, run_bookings, run_cancel, run_contact, run_requests, run_respond, BookArgs,
    BookingRef, RespondArgs,
};
use d24_cli::context::{CliContext, ContextOptions};
use d24_cli::driver::{run_driver, DriverArgs};
use d24_cli::register::{run_register, RegisterArgs};
use d24_cli::search::{run_search, SearchArgs};
use d24_cli::describe_error;

/// Drivers24 command-line client.
///
/// Find and book verified drivers, manage a driver profile, register as a
/// driver without an account, and run the admin dashboard.
#[derive(Parser, Debug)]
#[command(name = "d24", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend base URL. Overrides `D24_API_URL`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file. Overrides `D24_SESSION_FILE`.
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in, choosing a role on first use.
    Login(LoginArgs),
    /// Show the signed-in account.
    Whoami,
    /// Sign out.
    Logout,
    /// Link a pending driver registration to the new account.
    Complete(CompleteArgs),
    /// Search drivers in a city.
    Search(SearchArgs),
    /// Request a driver.
    Book(BookArgs),
    /// Your booking requests.
    Bookings,
    /// Booking requests addressed to you (drivers).
    Requests,
    /// Accept or reject a booking request (drivers).
    Respond(RespondArgs),
    /// Cancel a pending booking request.
    Cancel(BookingRef),
    /// Driver contact details for an accepted booking.
    Contact(BookingRef),
    /// Your driver profile and availability.
    Driver(DriverArgs),
    /// Register as a driver without an account.
    Register(RegisterArgs),
    /// Admin dashboard.
    Admin(AdminArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "d24 CLI starting");

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let opts = ContextOptions {
        api_url: cli.api_url.clone(),
        session_file: cli.session.clone(),
    };
    let result = runtime.block_on(async {
        let mut ctx = CliContext::load(&opts)?;
        match &cli.command {
            Commands::Login(args) => run_login(args, &mut ctx).await,
            Commands::Whoami => run_whoami(&ctx),
            Commands::Logout => run_logout(&mut ctx),
            Commands::Complete(args) => run_complete(args, &mut ctx).await,
            Commands::Search(args) => run_search(args, &mut ctx).await,
            Commands::Book(args) => run_book(args, &mut ctx).await,
            Commands::Bookings => run_bookings(&mut ctx).await,
            Commands::Requests => run_requests(&mut ctx).await,
            Commands::Respond(args) => run_respond(args, &mut ctx).await,
            Commands::Cancel(args) => run_cancel(args, &mut ctx).await,
            Commands::Contact(args) => run_contact(args, &mut ctx).await,
            Commands::Driver(args) => run_driver(args, &mut ctx).await,
            Commands::Register(args) => run_register(args, &mut ctx).await,
            Commands::Admin(args) => run_admin(args, &mut ctx).await,
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {}", describe_error(&e));
            ExitCode::from(1)
        }
    }
}
