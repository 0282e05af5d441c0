//! # Admin Subcommands
//!
//! Platform counters, analytics, driver verification and booking history.
//! The backend enforces the admin role; verification is also checked
//! locally against a freshly fetched role.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use d24_client::admin::{BookingAnalytics, DriverAnalytics, Overview, UserAnalytics};
use d24_client::AdminBookingFilter;
use d24_core::{Booking, BookingStatus, DriverId, UserId};

use crate::bookings::booking_line;
use crate::context::CliContext;
use crate::search::driver_line;

/// Arguments for `d24 admin`.
#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands.
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Platform counters and recent activity.
    Overview,
    /// Booking, user or driver analytics.
    Analytics {
        #[command(subcommand)]
        report: Report,
    },
    /// List drivers.
    Drivers {
        /// Only verified (`true`) or unverified (`false`) drivers.
        #[arg(long, conflicts_with = "pending")]
        verified: Option<bool>,
        /// Only drivers in this city.
        #[arg(long, conflicts_with = "pending")]
        city: Option<String>,
        /// Only drivers awaiting verification.
        #[arg(long)]
        pending: bool,
    },
    /// Verify one driver.
    Verify {
        /// Driver id.
        driver_id: String,
    },
    /// Verify several drivers at once.
    BulkVerify {
        /// Driver ids.
        driver_ids: Vec<String>,
    },
    /// List bookings.
    Bookings {
        /// Page number, from 1.
        #[arg(long)]
        page: Option<u32>,
        /// Bookings per page.
        #[arg(long)]
        limit: Option<u32>,
        /// PENDING, ACCEPTED, REJECTED, CANCELLED or COMPLETED.
        #[arg(long)]
        status: Option<String>,
        /// Only bookings of this driver id.
        #[arg(long)]
        driver: Option<String>,
        /// Only bookings made by this user id.
        #[arg(long)]
        user: Option<String>,
    },
    /// Booking history of one driver or user.
    History {
        #[command(subcommand)]
        subject: HistorySubject,
    },
}

/// Analytics reports.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Report {
    /// Booking totals, status breakdown and top drivers.
    Bookings,
    /// Sign-ups by role and the most active users.
    Users,
    /// Driver totals by city and vehicle, and top performers.
    Drivers,
}

/// Whose history to show.
#[derive(Subcommand, Debug)]
pub enum HistorySubject {
    /// Bookings received by a driver.
    Driver {
        /// Driver id.
        id: String,
    },
    /// Bookings made by a user.
    User {
        /// User id.
        id: String,
    },
}

/// Execute `d24 admin`.
pub async fn run_admin(args: &AdminArgs, ctx: &mut CliContext) -> Result<u8> {
    let admin = ctx.client.admin();
    let session = &ctx.session;
    match &args.command {
        AdminCommand::Overview => {
            print_overview(&admin.overview(session).await?.data);
        }
        AdminCommand::Analytics { report } => match report {
            Report::Bookings => print_booking_analytics(&admin.booking_analytics(session).await?.data),
            Report::Users => print_user_analytics(&admin.user_analytics(session).await?.data),
            Report::Drivers => print_driver_analytics(&admin.driver_analytics(session).await?.data),
        },
        AdminCommand::Drivers {
            verified,
            city,
            pending,
        } => {
            let drivers = if *pending {
                ctx.client.drivers().pending(session).await?
            } else {
                ctx.client
                    .drivers()
                    .list_all(session, *verified, city.as_deref())
                    .await?
            };
            if drivers.data.is_empty() {
                println!("No drivers.");
            }
            for d in &drivers.data {
                println!("{}", driver_line(d));
            }
        }
        AdminCommand::Verify { driver_id } => return run_verify(driver_id, ctx).await,
        AdminCommand::BulkVerify { driver_ids } => {
            let ids = driver_ids
                .iter()
                .map(|id| DriverId::new(id.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            let message = ctx.client.drivers().bulk_verify(session, &ids).await?;
            println!(
                "OK: {} ({} drivers)",
                message.as_deref().unwrap_or("drivers verified"),
                ids.len()
            );
        }
        AdminCommand::Bookings {
            page,
            limit,
            status,
            driver,
            user,
        } => {
            let filter = AdminBookingFilter {
                page: *page,
                limit: *limit,
                status: status
                    .as_deref()
                    .map(str::parse::<BookingStatus>)
                    .transpose()
                    .map_err(anyhow::Error::msg)?,
                driver_id: driver.as_deref().map(DriverId::new).transpose()?,
                user_id: user.as_deref().map(UserId::new).transpose()?,
            };
            let reply = admin.bookings(session, &filter).await?;
            print_bookings(&reply.data);
            if let Some(p) = reply.pagination {
                println!("page {} of {} ({} bookings)", p.page, p.total_pages, p.total_count);
            }
        }
        AdminCommand::History { subject } => {
            let reply = match subject {
                HistorySubject::Driver { id } => {
                    admin.driver_history(session, &DriverId::new(id.trim())?).await?
                }
                HistorySubject::User { id } => {
                    admin.user_history(session, &UserId::new(id.trim())?).await?
                }
            };
            print_bookings(&reply.data);
        }
    }
    Ok(0)
}

async fn run_verify(driver_id: &str, ctx: &mut CliContext) -> Result<u8> {
    let id = DriverId::new(driver_id.trim())?;
    let role = ctx.fresh_role().await?;
    ctx.persist()?;
    let mut profile = ctx
        .client
        .drivers()
        .list_all(&ctx.session, None, None)
        .await?
        .data
        .into_iter()
        .find(|d| d.id == id)
        .with_context(|| format!("driver {id} not found"))?;
    let message = ctx
        .client
        .drivers()
        .verify(&ctx.session, role, &mut profile)
        .await?;
    println!(
        "OK: {} ({})",
        message.as_deref().unwrap_or("driver verified"),
        profile.name
    );
    Ok(0)
}

fn print_bookings(bookings: &[Booking]) {
    if bookings.is_empty() {
        println!("No bookings.");
    }
    for b in bookings {
        let parties = format!(
            "{} -> {}",
            b.user.as_ref().map(|u| u.display_name()).unwrap_or_else(|| "-".into()),
            b.driver.as_ref().map(|d| d.name.as_str()).unwrap_or("-"),
        );
        println!("{}", booking_line(b, &parties, d24_state::Actor::Backend));
    }
}

/// Overview as printed by `d24 admin overview`.
pub fn print_overview(o: &Overview) {
    let s = &o.stats;
    println!("users:    {}", s.total_users);
    println!(
        "drivers:  {} ({} verified, {} pending)",
        s.total_drivers, s.verified_drivers, s.pending_verification
    );
    println!(
        "bookings: {} ({} pending, {} accepted)",
        s.total_bookings, s.pending_bookings, s.accepted_bookings
    );
    if !o.recent_activity.bookings.is_empty() {
        println!("recent bookings:");
        for b in &o.recent_activity.bookings {
            let driver = b.driver.as_ref().map(|d| d.name.as_str()).unwrap_or("-");
            println!("  {}  {:<9}  {driver}", b.id, b.status.as_str());
        }
    }
    if !o.recent_activity.users.is_empty() {
        println!("recent sign-ups:");
        for u in &o.recent_activity.users {
            let role = u.role.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
            println!("  {}  {role}", u.email);
        }
    }
}

fn print_booking_analytics(a: &BookingAnalytics) {
    let t = &a.overview;
    println!(
        "bookings: {} total, {} this month, {} today",
        t.total_bookings, t.bookings_this_month, t.bookings_today
    );
    for (status, count) in &t.bookings_by_status {
        println!("  {status:<9} {count}");
    }
    if !a.top_drivers.is_empty() {
        println!("top drivers:");
        for d in &a.top_drivers {
            println!("  {}  {}  {}", d.driver.name, d.driver.city, d.booking_count);
        }
    }
}

fn print_user_analytics(a: &UserAnalytics) {
    let t = &a.overview;
    println!(
        "users: {} total, {} this month, {} today",
        t.total_users, t.users_this_month, t.users_today
    );
    for (role, count) in &t.users_by_role {
        println!("  {role:<6} {count}");
    }
    if !a.active_users.is_empty() {
        println!("most active:");
        for u in &a.active_users {
            println!("  {}  {}", u.user.email, u.booking_count);
        }
    }
}

fn print_driver_analytics(a: &DriverAnalytics) {
    let t = &a.overview;
    println!(
        "drivers: {} total, {} verified, {} available, {} pending",
        t.total_drivers, t.verified_drivers, t.available_drivers, t.pending_verification
    );
    println!(
        "  average salary expectation: Rs {:.0}, average experience: {:.1} yrs",
        t.average_salary_expectation, t.average_experience
    );
    for c in &a.drivers_by_city {
        println!("  {}  {}", c.city, c.count);
    }
    for v in &a.drivers_by_vehicle {
        println!("  {}  {}", v.vehicle_type.as_deref().unwrap_or("unspecified"), v.count);
    }
    if !a.top_performers.is_empty() {
        println!("top performers:");
        for p in &a.top_performers {
            println!("  {}  {}", p.driver.name, p.accepted_bookings);
        }
    }
}
