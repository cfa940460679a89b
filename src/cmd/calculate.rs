//! Calculate command - daily congestion tax for one vehicle's passages

use crate::cmd::{load_config, read_passages};
use chrono::NaiveDate;
use clap::Args;
use congestion_tax::core::group_by_day;
use congestion_tax::{DailyTax, TaxAggregator, TaxConfig, Vehicle};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// CSV file with a `timestamp` column. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    passages: PathBuf,

    /// City whose fee schedule applies (exact, case-sensitive name)
    #[arg(short, long)]
    city: String,

    /// Vehicle type (e.g. car, motorcycle, emergency)
    #[arg(short, long)]
    vehicle_type: Option<String>,

    /// JSON configuration file. Uses the built-in schedules if not specified.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show how each passage contributed to the total
    #[arg(short, long)]
    breakdown: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// One day's result for JSON output
#[derive(Debug, Serialize)]
struct DayOutput {
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_type: Option<String>,
    #[serde(flatten)]
    tax: DailyTax,
}

#[derive(Debug, Clone, Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Passages")]
    passages: usize,
    #[tabled(rename = "Windows")]
    windows: usize,
    #[tabled(rename = "Uncapped")]
    uncapped: u32,
    #[tabled(rename = "Tax")]
    total: u32,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Debug, Clone, Tabled)]
struct ChargeRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Fee")]
    fee: u32,
    #[tabled(rename = "Window")]
    window: usize,
    #[tabled(rename = "Merged")]
    merged: String,
    #[tabled(rename = "Running Total")]
    running_total: u32,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let config = load_config(self.config.as_deref())?;
        let records = read_passages(&self.passages)?;
        let days = group_by_day(&records)?;
        let vehicle = self.vehicle_type.as_deref().map(Vehicle::new);

        let results = assess_days(&config, vehicle.as_ref(), &days, &self.city);

        if self.json {
            self.print_json(results)
        } else {
            self.print_table(&results);
            Ok(())
        }
    }

    fn print_table(&self, results: &[(NaiveDate, DailyTax)]) {
        if results.is_empty() {
            println!("No passages found");
            return;
        }

        println!();
        match &self.vehicle_type {
            Some(vehicle_type) => println!("CONGESTION TAX ({}, {})", self.city, vehicle_type),
            None => println!("CONGESTION TAX ({})", self.city),
        }
        println!();

        let rows: Vec<DayRow> = results.iter().map(|(date, tax)| day_row(*date, tax)).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        if self.breakdown {
            for (date, tax) in results.iter().filter(|(_, tax)| !tax.charges.is_empty()) {
                println!();
                println!("{}", date.format("%Y-%m-%d"));
                let rows: Vec<ChargeRow> = tax.charges.iter().map(charge_row).collect();
                let table = Table::new(rows)
                    .with(Style::rounded())
                    .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                    .to_string();
                println!("{}", table);
            }
        }
    }

    fn print_json(&self, results: Vec<(NaiveDate, DailyTax)>) -> anyhow::Result<()> {
        let output: Vec<DayOutput> = results
            .into_iter()
            .map(|(date, mut tax)| {
                if !self.breakdown {
                    tax.charges.clear();
                }
                DayOutput {
                    date,
                    vehicle_type: self.vehicle_type.clone(),
                    tax,
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

/// Tax each day independently; days are never summed together
fn assess_days<'a>(
    config: &TaxConfig,
    vehicle: Option<&Vehicle>,
    days: impl IntoIterator<Item = (&'a NaiveDate, &'a congestion_tax::DayPassages)>,
    city: &str,
) -> Vec<(NaiveDate, DailyTax)> {
    let aggregator = TaxAggregator::new(config);
    days.into_iter()
        .map(|(date, passages)| {
            if config.exemptions.is_toll_free_date(*date) {
                log::warn!("{} is a registered toll-free date; holidays are not exempted", date);
            }
            let tax = aggregator.assess(vehicle, passages, city);
            log::info!("{} {}: {} passages, tax {}", date, city, passages.len(), tax.total);
            (*date, tax)
        })
        .collect()
}

fn day_row(date: NaiveDate, tax: &DailyTax) -> DayRow {
    let note = match tax.exempt {
        Some(reason) => reason.to_string(),
        None if tax.is_capped() => "capped".to_string(),
        None => String::new(),
    };
    DayRow {
        date: date.format("%Y-%m-%d").to_string(),
        passages: tax.charges.len(),
        windows: tax.charges.last().map_or(0, |c| c.window),
        uncapped: tax.uncapped_total,
        total: tax.total,
        note,
    }
}

fn charge_row(charge: &congestion_tax::PassageCharge) -> ChargeRow {
    ChargeRow {
        time: charge.timestamp.format("%H:%M:%S").to_string(),
        fee: charge.fee,
        window: charge.window,
        merged: if charge.merged { "yes" } else { "" }.to_string(),
        running_total: charge.running_total,
    }
}
