//! Prints a month of prayer and weekly Iqama times.
//!
//! ```text
//! RUST_LOG=debug cargo run -p miqat-core --example monthly_timetable -- 64.1466 -21.9426 Atlantic/Reykjavik 2026-06
//! ```

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::info;
use miqat_core::prelude::*;
use miqat_core::{compute_schedule, PrayerConfigBuilder};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (lat, lng, tz, month) = match args.as_slice() {
        [lat, lng, tz, month] => (
            lat.parse::<f64>().context("latitude")?,
            lng.parse::<f64>().context("longitude")?,
            tz.as_str(),
            month.as_str(),
        ),
        _ => (47.7580361, -122.1985255, "America/Los_Angeles", "2026-03"),
    };

    let location = Location::new(lat, lng, tz)?;
    let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("month '{}' is not YYYY-MM", month))?;
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next_month.and_then(|d| d.pred_opt()).context("month end")?;

    let config = PrayerConfigBuilder::new()
        .method_name("ISNA")
        .high_latitude(HighLatitudeRule::AngleBased)
        .build()?;
    let rules: IqamaRules = serde_json::from_str(
        r#"{
            "fajr":    { "rule": { "type": "after_athan", "minutes": 20 }, "rounding": 5 },
            "dhuhr":   { "rule": { "type": "fixed_time", "standard": "13:00:00", "dst": "13:30:00" } },
            "asr":     { "rule": { "type": "after_athan", "minutes": 15 }, "rounding": 5 },
            "maghrib": { "rule": { "type": "after_athan", "minutes": 5 } },
            "isha":    { "rule": { "type": "after_athan", "minutes": 15 }, "min": "19:30:00", "max": "22:30:00" }
        }"#,
    )?;

    info!("{} to {} at ({}, {}) {}", start, end, lat, lng, tz);
    let schedule = compute_schedule(start, end, &location, &config, &rules, true)?;

    println!("{:<12} {:<16} {:>13} {:>13} {:>13} {:>13} {:>13}", "date", "hijri", "fajr", "dhuhr", "asr", "maghrib", "isha");
    for day in &schedule {
        let hijri = day.athan.date.hijri(0)?;
        let cell = |p: Prayer| {
            let athan = day.athan.format_one(p, TimeFormat::H24);
            let iqama = day.iqama.get(p).map(|t| t.format("%H:%M").to_string());
            format!("{}/{}", athan, iqama.as_deref().unwrap_or(miqat_core::astronomy::INVALID_TIME))
        };
        println!(
            "{:<12} {:<16} {:>13} {:>13} {:>13} {:>13} {:>13}",
            day.athan.date.to_string(),
            hijri.formatted(),
            cell(Prayer::Fajr),
            cell(Prayer::Dhuhr),
            cell(Prayer::Asr),
            cell(Prayer::Maghrib),
            cell(Prayer::Isha),
        );
    }
    Ok(())
}
