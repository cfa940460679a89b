//! Schedule command - fee tables per city

use crate::cmd::load_config;
use clap::Args;
use congestion_tax::core::{Threshold, TOLL_FREE_FROM, TOLL_FREE_UNTIL};
use congestion_tax::{FeeSchedule, TaxConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ScheduleCommand {
    /// Only show this city (exact, case-sensitive name)
    #[arg(short, long)]
    city: Option<String>,

    /// JSON configuration file. Uses the built-in schedules if not specified.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
struct BandRow {
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Until")]
    until: String,
    #[tabled(rename = "Fee")]
    fee: u32,
}

#[derive(Debug, Serialize)]
struct ScheduleOutput<'a> {
    daily_maximum: u32,
    window_minutes: i64,
    toll_free_from: String,
    toll_free_until: String,
    exempt_vehicle_types: Vec<&'a str>,
    cities: BTreeMap<&'a str, &'a FeeSchedule>,
}

impl ScheduleCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref())?;
        let cities = select_cities(&config, self.city.as_deref())?;

        if self.json {
            let output = ScheduleOutput {
                daily_maximum: config.daily_maximum,
                window_minutes: config.window_minutes,
                toll_free_from: TOLL_FREE_FROM.to_string(),
                toll_free_until: TOLL_FREE_UNTIL.to_string(),
                exempt_vehicle_types: config.exemptions.vehicle_types().collect(),
                cities,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        let rows: Vec<BandRow> = cities
            .iter()
            .flat_map(|(city, schedule)| band_rows(city, schedule))
            .collect();

        println!();
        println!("FEE SCHEDULES");
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        println!(
            "Toll free {} - {}. Passages within {} minutes are charged once, at most {} per day.",
            TOLL_FREE_FROM, TOLL_FREE_UNTIL, config.window_minutes, config.daily_maximum
        );
        let exempt: Vec<_> = config.exemptions.vehicle_types().collect();
        if !exempt.is_empty() {
            println!("Exempt vehicle types: {}", exempt.join(", "));
        }
        Ok(())
    }
}

fn select_cities<'a>(
    config: &'a TaxConfig,
    city: Option<&str>,
) -> anyhow::Result<BTreeMap<&'a str, &'a FeeSchedule>> {
    let cities: BTreeMap<_, _> = config
        .cities
        .cities()
        .filter(|(name, _)| city.is_none_or(|c| c == *name))
        .collect();
    if let (Some(name), true) = (city, cities.is_empty()) {
        anyhow::bail!("Unknown city: {}", name);
    }
    Ok(cities)
}

/// Rows with each band's lower bound made explicit
fn band_rows(city: &str, schedule: &FeeSchedule) -> Vec<BandRow> {
    let mut from = "00:00:00".to_string();
    schedule
        .bands()
        .iter()
        .map(|band| {
            let row = BandRow {
                city: city.to_string(),
                from: from.clone(),
                until: band.until.to_string(),
                fee: band.fee,
            };
            if let Threshold::Time(until) = band.until {
                from = (until + chrono::Duration::seconds(1)).format("%H:%M:%S").to_string();
            }
            row
        })
        .collect()
}
