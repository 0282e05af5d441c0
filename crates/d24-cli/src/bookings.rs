//! # Booking Subcommands
//!
//! - `book`: request a driver.
//! - `bookings`: the user's own requests and what can be done with them.
//! - `requests`: requests addressed to the signed-in driver.
//! - `respond`: accept or reject a pending request (driver).
//! - `cancel`: withdraw a pending request (user).
//! - `contact`: the driver's contact record for an accepted booking.
//!
//! Every action works on a freshly fetched copy of the booking, so the
//! transition check runs against the backend's current status.

use anyhow::{Context, Result};
use clap::Args;

use d24_client::NewBooking;
use d24_core::{Booking, BookingId, DriverId};
use d24_state::booking::available_actions;
use d24_state::{Actor, BookingAction, DriverDecision};

use crate::context::CliContext;

/// Arguments for `d24 book`.
#[derive(Args, Debug)]
pub struct BookArgs {
    /// Driver to book.
    pub driver_id: String,
    /// Pickup location.
    #[arg(long)]
    pub pickup: Option<String>,
    /// Drop location.
    #[arg(long)]
    pub drop: Option<String>,
    /// Requested date.
    #[arg(long)]
    pub date: Option<String>,
    /// Notes for the driver.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `d24 respond`.
#[derive(Args, Debug)]
pub struct RespondArgs {
    /// Booking to answer.
    pub booking_id: String,
    /// `accept` or `reject`.
    pub decision: String,
    /// Message for the requester.
    #[arg(long)]
    pub message: Option<String>,
}

/// Arguments for commands that name one booking.
#[derive(Args, Debug)]
pub struct BookingRef {
    /// Booking id.
    pub booking_id: String,
}

/// Execute `d24 book`.
pub async fn run_book(args: &BookArgs, ctx: &mut CliContext) -> Result<u8> {
    let request = NewBooking {
        driver_id: DriverId::new(args.driver_id.trim())?,
        pickup_location: args.pickup.clone(),
        drop_location: args.drop.clone(),
        scheduled_date: args.date.clone(),
        notes: args.notes.clone(),
    };
    tracing::info!("Booking...");
    let reply = ctx.client.bookings().create(&ctx.session, &request).await?;
    println!(
        "OK: {} (booking {}, {})",
        reply.message.as_deref().unwrap_or("booking requested"),
        reply.data.id,
        reply.data.status
    );
    Ok(0)
}

/// Execute `d24 bookings`.
pub async fn run_bookings(ctx: &mut CliContext) -> Result<u8> {
    let bookings = ctx.client.bookings().mine(&ctx.session).await?.data;
    if bookings.is_empty() {
        println!("No bookings yet.");
    }
    for b in &bookings {
        let driver = b.driver.as_ref().map(|d| d.name.as_str()).unwrap_or("-");
        println!("{}", booking_line(b, driver, Actor::User));
    }
    Ok(0)
}

/// Execute `d24 requests`.
pub async fn run_requests(ctx: &mut CliContext) -> Result<u8> {
    let bookings = ctx.client.bookings().driver_requests(&ctx.session).await?.data;
    if bookings.is_empty() {
        println!("No booking requests.");
    }
    for b in &bookings {
        let requester = b
            .user
            .as_ref()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "-".to_string());
        println!("{}", booking_line(b, &requester, Actor::Driver));
    }
    Ok(0)
}

/// Execute `d24 respond`.
pub async fn run_respond(args: &RespondArgs, ctx: &mut CliContext) -> Result<u8> {
    let decision: DriverDecision = args
        .decision
        .parse()
        .map_err(anyhow::Error::msg)?;
    let id = BookingId::new(args.booking_id.trim())?;
    let requests = ctx.client.bookings().driver_requests(&ctx.session).await?.data;
    let mut booking = find(requests, &id)?;

    tracing::info!(
        "{}",
        match decision {
            DriverDecision::Accept => "Accepting...",
            DriverDecision::Reject => "Rejecting...",
        }
    );
    let message = ctx
        .client
        .bookings()
        .respond(&ctx.session, &mut booking, decision, args.message.as_deref())
        .await?;
    println!(
        "OK: {} (booking {} is now {})",
        message.as_deref().unwrap_or("response sent"),
        booking.id,
        booking.status
    );
    Ok(0)
}

/// Execute `d24 cancel`.
pub async fn run_cancel(args: &BookingRef, ctx: &mut CliContext) -> Result<u8> {
    let id = BookingId::new(args.booking_id.trim())?;
    let mine = ctx.client.bookings().mine(&ctx.session).await?.data;
    let mut booking = find(mine, &id)?;
    let message = ctx.client.bookings().cancel(&ctx.session, &mut booking).await?;
    println!(
        "OK: {} (booking {})",
        message.as_deref().unwrap_or("booking cancelled"),
        booking.id
    );
    Ok(0)
}

/// Execute `d24 contact`.
pub async fn run_contact(args: &BookingRef, ctx: &mut CliContext) -> Result<u8> {
    let id = BookingId::new(args.booking_id.trim())?;
    let mine = ctx.client.bookings().mine(&ctx.session).await?.data;
    let booking = find(mine, &id)?;
    let info = ctx
        .client
        .bookings()
        .driver_full_info(&ctx.session, &booking)
        .await?
        .data;
    println!("{}", info.name);
    println!("  phone: {}", info.phone_number);
    if let Some(vehicle) = [info.vehicle_type, info.vehicle_model, info.vehicle_number]
        .into_iter()
        .flatten()
        .reduce(|a, b| format!("{a} {b}"))
    {
        println!("  vehicle: {vehicle}");
    }
    if !info.operating_address.is_empty() {
        println!("  operating from: {}", info.operating_address);
    }
    Ok(0)
}

fn find(bookings: Vec<Booking>, id: &BookingId) -> Result<Booking> {
    bookings
        .into_iter()
        .find(|b| &b.id == id)
        .with_context(|| format!("booking {id} not found"))
}

/// One listing row, with the actions `actor` may take.
pub fn booking_line(b: &Booking, other_party: &str, actor: Actor) -> String {
    let mut line = format!("{}  {:<9}  {}", b.id, b.status.as_str(), other_party);
    if let Some(date) = &b.scheduled_date {
        line.push_str(&format!("  {date}"));
    }
    if let Some(response) = &b.driver_response {
        line.push_str(&format!("  \"{response}\""));
    }
    let actions: Vec<&str> = available_actions(b.status, actor)
        .into_iter()
        .map(|a| match a {
            BookingAction::Accept => "accept",
            BookingAction::Reject => "reject",
            BookingAction::Cancel => "cancel",
            BookingAction::ViewContact => "contact",
        })
        .collect();
    if !actions.is_empty() {
        line.push_str(&format!("  [{}]", actions.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: &str) -> Booking {
        serde_json::from_value(serde_json::json!({"id": "bk_1", "status": status})).unwrap()
    }

    #[test]
    fn pending_request_offers_driver_actions() {
        let line = booking_line(&booking("PENDING"), "Asha Rao", Actor::Driver);
        assert!(line.ends_with("[accept, reject]"));
    }

    #[test]
    fn accepted_booking_offers_contact_to_user() {
        let line = booking_line(&booking("ACCEPTED"), "Ravi Kumar", Actor::User);
        assert!(line.ends_with("[contact]"));
        let line = booking_line(&booking("REJECTED"), "Ravi Kumar", Actor::User);
        assert!(!line.contains('['));
    }

    #[test]
    fn find_reports_unknown_id() {
        let id = BookingId::new("bk_9").unwrap();
        let err = find(vec![booking("PENDING")], &id).unwrap_err();
        assert_eq!(err.to_string(), "booking bk_9 not found");
    }
}
