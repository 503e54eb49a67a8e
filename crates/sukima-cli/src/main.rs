//! `sukima` CLI — Japanese holidays and vacant periods from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Holidays for 2026 as JSON
//! sukima holidays --from 2026-01-01 --to 2026-12-31
//!
//! # Same, one holiday per line
//! sukima holidays --from 2026-01-01 --to 2026-12-31 --format text
//!
//! # Vacant periods for the next two years, occupied ranges from a file
//! sukima vacant --from 2026-10-18 -i occupied.json
//!
//! # Occupied ranges on stdin, two-day minimum, any free day counts
//! echo '[{"startDate":"2026-11-01","endDate":"2026-11-03"}]' \
//!   | sukima vacant --from 2026-11-01 --to 2026-11-30 --min-days 2 --policy any-free
//!
//! # Holidays and vacant periods together
//! sukima calendar --from 2026-01-01 -i occupied.json
//!
//! # Expand month/day anniversaries into the window
//! sukima anniversaries --from 2026-01-01 --to 2027-12-31 -i anniversaries.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see pipeline details.

use std::collections::BTreeSet;
use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use sukima_engine::anniversary::{expand_anniversaries, AnniversaryEntry};
use sukima_engine::date::{default_window_end, CalendarDate};
use sukima_engine::holiday::{holiday_dates, holidays_in_range};
use sukima_engine::vacancy::{calculate_vacant_periods_with, DEFAULT_MIN_DAYS};
use sukima_engine::{build_planning_calendar, DateRange, VacancyOptions, VacancyPolicy};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sukima",
    version,
    about = "Japanese holidays and vacant periods for trip planning"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Japanese public holidays in a date range
    Holidays {
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Last date of the range (YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Find vacant periods between occupied date ranges
    Vacant {
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        vacancy: VacancyArgs,
        /// JSON array of YYYY-MM-DD strings replacing the computed holidays
        #[arg(long)]
        holidays: Option<String>,
    },
    /// Holidays and vacant periods for one window
    Calendar {
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        vacancy: VacancyArgs,
    },
    /// Expand month/day anniversaries into dated entries
    Anniversaries {
        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(clap::Args)]
struct WindowArgs {
    /// First date of the scan window (YYYY-MM-DD)
    #[arg(long)]
    from: String,
    /// Last date of the scan window (defaults to two years after --from)
    #[arg(long)]
    to: Option<String>,
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(clap::Args)]
struct VacancyArgs {
    /// Shortest vacant period to report, in days
    #[arg(long, env = "SUKIMA_MIN_DAYS", default_value_t = DEFAULT_MIN_DAYS)]
    min_days: u32,
    /// Which unoccupied dates may form a vacant period
    #[arg(long, value_enum, default_value_t = PolicyArg::DaysOff)]
    policy: PolicyArg,
}

impl VacancyArgs {
    fn options(&self) -> VacancyOptions {
        VacancyOptions {
            min_days: self.min_days,
            policy: match self.policy {
                PolicyArg::DaysOff => VacancyPolicy::DaysOffOnly,
                PolicyArg::AnyFree => VacancyPolicy::AnyFreeDay,
            },
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Only weekends and holidays
    DaysOff,
    /// Any date not covered by an occupied range
    AnyFree,
}

/// Occupied range as it arrives on the wire, validated before use.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeInput {
    start_date: String,
    end_date: String,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Holidays {
            from,
            to,
            format,
            output,
        } => {
            let window = parse_range(&from, &to)?;
            let holidays = holidays_in_range(window.start_date, window.end_date)
                .context("Failed to compute holidays")?;

            let rendered = match format {
                OutputFormat::Json => to_json(&holidays)?,
                OutputFormat::Text => holidays
                    .iter()
                    .map(|h| format!("{}\t{}\n", h.date, h.title))
                    .collect(),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Vacant {
            window,
            vacancy,
            holidays,
        } => {
            let range = parse_window(&window)?;
            let occupied = read_occupied(window.input.as_deref())?;

            let holiday_set = match holidays {
                Some(path) => read_holiday_dates(&path)?,
                None => holiday_dates(
                    &holidays_in_range(range.start_date, range.end_date)
                        .context("Failed to compute holidays")?,
                ),
            };

            let periods = calculate_vacant_periods_with(
                &occupied,
                &holiday_set,
                range.start_date,
                range.end_date,
                &vacancy.options(),
            );
            write_output(window.output.as_deref(), &to_json(&periods)?)?;
        }
        Commands::Calendar { window, vacancy } => {
            let range = parse_window(&window)?;
            let occupied = read_occupied(window.input.as_deref())?;

            let calendar = build_planning_calendar(
                &occupied,
                range.start_date,
                range.end_date,
                &vacancy.options(),
            )
            .context("Failed to build planning calendar")?;
            write_output(window.output.as_deref(), &to_json(&calendar)?)?;
        }
        Commands::Anniversaries { window } => {
            let range = parse_window(&window)?;
            let raw = read_input(window.input.as_deref())?;
            let entries: Vec<AnniversaryEntry> = if raw.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&raw).context("Invalid anniversaries JSON")?
            };

            let expanded = expand_anniversaries(&entries, range.start_date, range.end_date);
            write_output(window.output.as_deref(), &to_json(&expanded)?)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn parse_date(s: &str) -> Result<CalendarDate> {
    s.parse::<CalendarDate>()
        .with_context(|| format!("Invalid date: {}", s))
}

fn parse_range(from: &str, to: &str) -> Result<DateRange> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;
    DateRange::new(start, end).context("Invalid date range")
}

/// Resolve `--from`/`--to`, defaulting the end to two years after the start.
fn parse_window(window: &WindowArgs) -> Result<DateRange> {
    let start = parse_date(&window.from)?;
    let end = match window.to.as_deref() {
        Some(to) => parse_date(to)?,
        None => default_window_end(start)
            .with_context(|| format!("No default window end for {}", start))?,
    };
    let range = DateRange::new(start, end).context("Invalid scan window")?;
    debug!(start = %range.start_date, end = %range.end_date, "scan window");
    Ok(range)
}

/// Read occupied ranges as a JSON array of `{startDate, endDate}`.
///
/// Every range is validated; an inverted one is an error, not an empty range.
fn read_occupied(path: Option<&str>) -> Result<Vec<DateRange>> {
    let raw = read_input(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let inputs: Vec<RangeInput> =
        serde_json::from_str(&raw).context("Invalid occupied ranges JSON")?;
    inputs
        .iter()
        .enumerate()
        .map(|(i, r)| {
            DateRange::parse(&r.start_date, &r.end_date)
                .with_context(|| format!("Invalid occupied range #{}", i))
        })
        .collect()
}

fn read_holiday_dates(path: &str) -> Result<BTreeSet<CalendarDate>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path))?;
    let dates: Vec<String> = serde_json::from_str(&raw).context("Invalid holidays JSON")?;
    dates.iter().map(|s| parse_date(s)).collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

/// Read a file, or stdin when no path is given. An interactive terminal on
/// stdin counts as empty input.
fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Ok(String::new());
            }
            let mut buf = String::new();
            stdin
                .lock()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
