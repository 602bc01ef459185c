//! `stay` CLI — inspect room availability from a reservation snapshot.
//!
//! The snapshot is the JSON array the booking service returns for
//! `GET /bookings` or `GET /bookings/room/:id`.
//!
//! ## Usage
//!
//! ```sh
//! # Month calendar for one room (stdin → stdout)
//! curl -s $API/bookings/room/r1 | stay calendar --month 2024-06
//!
//! # Same, with a check-in already picked: days past a booking show as spanning
//! stay calendar -i bookings.json --month 2024-06 --start 2024-06-05
//!
//! # Can this stay be booked?
//! stay check -i bookings.json --room r1 --from 2024-06-05 --to 2024-06-09
//!
//! # Admin list: upcoming pending bookings matching a guest
//! stay bookings -i bookings.json --status pending --when upcoming --search ada
//!
//! # Everything one guest holds
//! stay bookings -i bookings.json --guest ada@example.com
//! ```
//!
//! `--tz` / `STAY_TZ` picks the zone timestamps are read in, `--today` /
//! `STAY_TODAY` pins the current day, and `STAY_LOG` sets the log filter.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use stay_engine::ledger::{self, BookingFilter, DateFilter, StatusFilter};
use stay_engine::reservation::{for_resource, Reservation};
use stay_engine::{DayStatus, ProposedRange};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stay",
    version,
    about = "Room availability from a booking snapshot"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reservation JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Only consider reservations for this room id
    #[arg(long, global = true)]
    room: Option<String>,

    /// IANA timezone used to turn timestamps into calendar days
    #[arg(long, global = true, env = "STAY_TZ", default_value = "UTC")]
    tz: String,

    /// Current day as YYYY-MM-DD (defaults to today in --tz)
    #[arg(long, global = true, env = "STAY_TODAY")]
    today: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month calendar marking booked and unavailable days
    Calendar {
        /// Month to show, as YYYY-MM
        #[arg(long)]
        month: String,
        /// Check-in day already picked; later days that would span a booking are marked
        #[arg(long)]
        start: Option<String>,
    },
    /// Check whether a stay can be booked
    Check {
        /// Check-in day
        #[arg(long)]
        from: String,
        /// Check-out day
        #[arg(long)]
        to: String,
    },
    /// List bookings with filters, nights and totals
    Bookings {
        /// all, pending, confirmed or cancelled
        #[arg(long, default_value = "all")]
        status: String,
        /// all, upcoming or past
        #[arg(long, default_value = "all")]
        when: String,
        /// Case-insensitive match on guest name or email, substring on phone
        #[arg(long)]
        search: Option<String>,
        /// Only bookings held by this exact guest email
        #[arg(long)]
        guest: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("STAY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let tz = stay_engine::parse_timezone(&cli.tz)?;
    let today = match cli.today.as_deref() {
        Some(s) => stay_engine::parse_day(s, tz).context("Invalid --today")?,
        None => stay_engine::today_in(tz),
    };

    let json = read_input(cli.input.as_deref())?;
    let mut reservations = stay_engine::load_reservations(&json, tz)
        .context("Failed to load reservations")?;
    if let Some(room) = cli.room.as_deref() {
        reservations = for_resource(&reservations, room);
    }
    tracing::info!(count = reservations.len(), %today, timezone = %tz, "reservation snapshot ready");

    match cli.command {
        Commands::Calendar { month, start } => {
            let first = parse_month(&month)?;
            let start = parse_optional_day(start.as_deref(), tz).context("Invalid --start")?;
            print!("{}", render_month(first, &reservations, start, today));
        }
        Commands::Check { from, to } => {
            let range = ProposedRange::new(
                stay_engine::parse_day(&from, tz).context("Invalid --from")?,
                stay_engine::parse_day(&to, tz).context("Invalid --to")?,
            )?;
            check_range(&range, &reservations, today)?;
        }
        Commands::Bookings {
            status,
            when,
            search,
            guest,
        } => {
            let filter = BookingFilter {
                status: status.parse::<StatusFilter>()?,
                when: when.parse::<DateFilter>()?,
                search,
                guest_email: guest,
            };
            list_bookings(&reservations, &filter, today);
        }
    }

    Ok(())
}

/// Parse `YYYY-MM` into the first day of that month.
fn parse_month(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid --month '{}', expected YYYY-MM", month))
}

fn parse_optional_day(s: Option<&str>, tz: Tz) -> Result<Option<NaiveDate>> {
    Ok(s.map(|s| stay_engine::parse_day(s, tz)).transpose()?)
}

fn status_mark(status: DayStatus) -> char {
    match status {
        DayStatus::Available => '·',
        DayStatus::Booked => 'x',
        DayStatus::Past => '-',
        DayStatus::SpansBooked => '~',
    }
}

/// Render a Monday-first month grid. Each cell is the day number followed by
/// its status mark.
fn render_month(
    first: NaiveDate,
    reservations: &[Reservation],
    start: Option<NaiveDate>,
    today: NaiveDate,
) -> String {
    let mut out = format!("{}\n", first.format("%B %Y"));
    out.push_str("  Mo  Tu  We  Th  Fr  Sa  Su\n");

    let next_month = first.checked_add_months(Months::new(1)).unwrap_or(first);
    let lead = first.weekday().num_days_from_monday() as usize;
    out.push_str(&"    ".repeat(lead));

    let mut column = lead;
    for day in first.iter_days().take_while(|d| *d < next_month) {
        let status = stay_engine::day_status(day, reservations, start, today);
        out.push_str(&format!("{:>3}{}", day.day(), status_mark(status)));
        column += 1;
        if column == 7 {
            out.push('\n');
            column = 0;
        }
    }
    if column != 0 {
        out.push('\n');
    }

    out.push_str("· available  x booked  - past  ~ spans a booking\n");
    out
}

fn check_range(range: &ProposedRange, reservations: &[Reservation], today: NaiveDate) -> Result<()> {
    if stay_engine::is_range_bookable(range, reservations, today) {
        println!("bookable ({} nights)", range.nights());
        return Ok(());
    }

    if range.from < today {
        anyhow::bail!("Check-in {} is before today ({})", range.from, today);
    }

    let conflicts = stay_engine::find_conflicts(range, reservations);
    for c in &conflicts {
        println!(
            "conflict: {} {}..{} ({}, {} day(s) overlap)",
            c.reservation.id,
            c.reservation.start_date,
            c.reservation.end_date,
            c.reservation.status,
            c.overlap_days
        );
    }
    anyhow::bail!(
        "{}..{} is not bookable: {} conflicting reservation(s)",
        range.from,
        range.to,
        conflicts.len()
    )
}

fn list_bookings(reservations: &[Reservation], filter: &BookingFilter, today: NaiveDate) {
    let rows = ledger::filter_reservations(reservations, filter, today);
    for r in &rows {
        let total = ledger::stay_total(r)
            .map(|t| format!("{:.2}", t))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {}..{}  {} night(s)  {}  {} <{}>  total {}",
            r.id,
            r.resource_id,
            r.start_date,
            r.end_date,
            ledger::nights(r),
            r.status,
            r.guest.name,
            r.guest.email,
            total
        );
    }
    println!("{} booking(s)", rows.len());
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
