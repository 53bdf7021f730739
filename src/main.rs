//! Command line front-end over a booking snapshot.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;
use serde::Serialize;

use trailer_booking::domain::period::DateRange;
use trailer_booking::domain::types::{BookingId, TrailerId, parse_local_datetime};
use trailer_booking::forms::booking::{BookingDraft, BookingForm};
use trailer_booking::models::config::AppConfig;
use trailer_booking::models::snapshot::{Snapshot, read_bookings_csv_path};
use trailer_booking::repository::SnapshotRepository;
use trailer_booking::services::booking::{
    AvailabilityQuery, check_availability, load_review, validate_draft,
};
use trailer_booking::services::calendar::trailer_calendar;

#[derive(Parser)]
#[command(name = "trailer-booking")]
#[command(about = "Check trailer availability and validate booking drafts")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a trailer is free for a rental period.
    Check {
        #[arg(long)]
        trailer: String,
        /// Pick-up date, e.g. `2024-01-10` or `2024-01-10T09:00`.
        #[arg(long, value_parser = parse_date_arg)]
        start: NaiveDateTime,
        /// Return date.
        #[arg(long, value_parser = parse_date_arg)]
        end: NaiveDateTime,
        /// Booking being edited; it does not conflict with itself.
        #[arg(long)]
        booking: Option<String>,
    },

    /// Validate a booking form stored as JSON.
    Validate {
        #[arg(short, long)]
        file: String,
        #[arg(long)]
        booking: Option<String>,
    },

    /// Show the review summary for a booking form stored as JSON.
    Review {
        #[arg(short, long)]
        file: String,
    },

    /// List a trailer's bookings within a date window.
    Calendar {
        #[arg(long)]
        trailer: String,
        #[arg(long, value_parser = parse_date_arg)]
        from: NaiveDateTime,
        #[arg(long, value_parser = parse_date_arg)]
        to: NaiveDateTime,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_local_datetime(value).map_err(|e| e.to_string())
}

fn load_config() -> Result<AppConfig, String> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .and_then(|settings| settings.try_deserialize::<AppConfig>())
        .map_err(|e| format!("Error loading config: {e}"))
}

fn load_repository(config: &AppConfig) -> Result<SnapshotRepository, String> {
    let snapshot = Snapshot::from_path(&config.snapshot_path)
        .map_err(|e| format!("Failed to load snapshot {}: {e}", config.snapshot_path))?;
    let repo = SnapshotRepository::new(snapshot);

    if let Some(csv_path) = &config.bookings_csv {
        let bookings = read_bookings_csv_path(csv_path)
            .map_err(|e| format!("Failed to import {csv_path}: {e}"))?;
        let count = repo.extend_bookings(bookings).map_err(|e| e.to_string())?;
        log::info!("Imported {count} bookings from {csv_path}");
    }

    Ok(repo)
}

fn read_draft(path: &str) -> Result<BookingDraft, String> {
    let file = File::open(path).map_err(|e| format!("Cannot open {path}: {e}"))?;
    let form: BookingForm = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Cannot parse {path}: {e}"))?;
    BookingDraft::try_from(form).map_err(|e| format!("Invalid booking form: {e}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn booking_id(raw: Option<String>) -> Result<Option<BookingId>, String> {
    raw.map(|id| BookingId::new(id).map_err(|e| e.to_string()))
        .transpose()
}

fn run(command: Command, config: &AppConfig, repo: &SnapshotRepository) -> Result<bool, String> {
    match command {
        Command::Check {
            trailer,
            start,
            end,
            booking,
        } => {
            let trailer_id = TrailerId::new(trailer).map_err(|e| e.to_string())?;
            let mut query = AvailabilityQuery::new(trailer_id, DateRange::new(start, end));
            if let Some(id) = booking_id(booking)? {
                query = query.editing(id);
            }

            let report = check_availability(repo, &query).map_err(|e| e.to_string())?;
            print_json(&report)?;
            Ok(report.available)
        }
        Command::Validate { file, booking } => {
            let draft = read_draft(&file)?;
            let current = booking_id(booking)?;

            let errors =
                validate_draft(repo, &draft, current.as_ref()).map_err(|e| e.to_string())?;
            print_json(&errors)?;
            Ok(errors.is_empty())
        }
        Command::Review { file } => {
            let draft = read_draft(&file)?;
            let review = load_review(repo, &draft).map_err(|e| e.to_string())?;
            print_json(&review)?;
            Ok(true)
        }
        Command::Calendar { trailer, from, to } => {
            let trailer_id = TrailerId::new(trailer).map_err(|e| e.to_string())?;
            let entries = trailer_calendar(repo, &trailer_id, DateRange::new(from, to))
                .map_err(|e| e.to_string())?;

            for entry in &entries {
                let format = config.date_display_format.as_str();
                let returned = entry
                    .end
                    .map(|day| day.format(format).to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.start.format(format),
                    returned,
                    entry.status,
                    entry.booking_id.as_deref().unwrap_or("-"),
                );
            }
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = Args::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::from(2);
        }
    };

    let repo = match load_repository(&config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::from(2);
        }
    };

    match run(args.command, &config, &repo) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(2)
        }
    }
}
