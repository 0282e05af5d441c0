//! # Search Subcommand
//!
//! `d24 search <city>` lists drivers a page at a time. Filters left out are
//! not sent. Only available drivers are offered for booking.

use anyhow::Result;
use clap::Args;

use d24_core::{DriverFilters, DriverProfile, SearchState};
use d24_state::verification::is_bookable;

use crate::context::CliContext;

/// Arguments for `d24 search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// City to search in.
    pub city: String,
    /// Page number, 1-based.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Minimum monthly salary expectation.
    #[arg(long, default_value = "")]
    pub min_salary: String,
    /// Maximum monthly salary expectation.
    #[arg(long, default_value = "")]
    pub max_salary: String,
    /// Minimum years of experience.
    #[arg(long, default_value = "")]
    pub min_experience: String,
    /// Maximum years of experience.
    #[arg(long, default_value = "")]
    pub max_experience: String,
}

impl SearchArgs {
    fn filters(&self) -> DriverFilters {
        DriverFilters::from_inputs(
            &self.min_salary,
            &self.max_salary,
            &self.min_experience,
            &self.max_experience,
        )
    }
}

/// Execute `d24 search`.
pub async fn run_search(args: &SearchArgs, ctx: &mut CliContext) -> Result<u8> {
    let mut state: SearchState<DriverProfile> = SearchState::new();
    state.set_city(args.city.as_str());
    state.apply_filters(args.filters())?;
    let query = state.page_query(args.page)?;

    tracing::info!("Searching...");
    match ctx.client.drivers().search(&ctx.session, &query).await {
        Ok(reply) => state.apply_success(&query, reply.data, reply.pagination),
        Err(e) => {
            tracing::error!(error = %e, city = query.city(), "driver search failed");
            return Err(e.into());
        }
    }

    if let Some(message) = state.feedback().message() {
        println!("{message}");
        return Ok(0);
    }
    for d in state.results() {
        println!("{}", driver_line(d));
    }
    println!(
        "page {} of {} ({} drivers){}{}",
        state.current_page(),
        state.total_pages(),
        state.total_count(),
        if state.has_previous() { "  [--page prev]" } else { "" },
        if state.has_next() { "  [--page next]" } else { "" },
    );
    Ok(0)
}

/// One result row.
pub fn driver_line(d: &DriverProfile) -> String {
    let mut line = format!("{}  {}  {}", d.id, d.name, d.city);
    if let Some(years) = d.experience {
        line.push_str(&format!("  {years} yrs"));
    }
    if let Some(salary) = d.salary_expectation {
        line.push_str(&format!("  Rs {salary}/month"));
    }
    if let Some(vehicle) = &d.vehicle_type {
        line.push_str(&format!("  {vehicle}"));
    }
    if d.is_verified {
        line.push_str("  verified");
    }
    if is_bookable(d) {
        line.push_str("  [book]");
    } else {
        line.push_str("  (unavailable)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filter_inputs_stay_unset() {
        let args = SearchArgs {
            city: "Mumbai".into(),
            page: 1,
            min_salary: "".into(),
            max_salary: "30000".into(),
            min_experience: " ".into(),
            max_experience: "".into(),
        };
        let f = args.filters();
        assert_eq!(f.max_salary, Some(30000));
        assert!(f.min_salary.is_none() && f.min_experience.is_none());
    }

    #[test]
    fn driver_line_marks_unavailable() {
        let d: DriverProfile = serde_json::from_value(serde_json::json!({
            "id": "drv_1", "name": "Ravi Kumar", "city": "Mumbai",
            "experience": 4, "availability": false
        }))
        .unwrap();
        let line = driver_line(&d);
        assert!(line.contains("4 yrs"));
        assert!(line.ends_with("(unavailable)"));
    }
}
