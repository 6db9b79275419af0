use clap::{Args, Parser, Subcommand};

use crate::config::TimesSource;

#[derive(Parser, Debug)]
#[command(name = "minbar", version, author, about = "Prayer-times board with Persian and Hijri dates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the configuration (location, method, times source)
    Setup(SetupArgs),
    /// Show today's date in Gregorian, Persian and Hijri
    Today {
        #[arg(long)]
        json: bool,
    },
    /// Convert a Gregorian date (YYYY-MM-DD, default today) to Persian
    Persian {
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show a day's prayer times
    Times {
        /// Date as YYYY-MM-DD (default today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show the next prayer and the time left until it
    Next {
        /// Pretend the time is this ("3:00 PM" or "15:00")
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Manage the calculated prayer-times cache
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// Overwrite an existing configuration
    #[arg(long)]
    pub reset: bool,
    /// Location label shown on the board
    #[arg(long)]
    pub location: Option<String>,
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,
    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,
    /// Calculation method (e.g. Tehran, MuslimWorldLeague, Karachi)
    #[arg(long)]
    pub method: Option<String>,
    /// Madhab for Asr: Hanafi or Shafi
    #[arg(long)]
    pub madhab: Option<String>,
    /// Minutes from UTC, e.g. 210 for +03:30
    #[arg(long, allow_hyphen_values = true)]
    pub tz_offset: Option<i32>,
    /// Days to shift the Hijri date for local moon sighting
    #[arg(long, allow_hyphen_values = true)]
    pub hijri_offset: Option<i32>,
    /// Where prayer times come from
    #[arg(long, value_enum)]
    pub source: Option<TimesSource>,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Precompute times from today for the next N days
    Warm {
        #[arg(long, default_value = "30")]
        days: u32,
    },
    /// Remove every cached day
    Clear,
}
