use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jalaali_tools")]
#[command(version)]
#[command(about = "Converts dates between the Jalaali and Gregorian calendars", long_about = None)]
pub struct Cli {
    /// JSON settings file
    #[arg(long, global = true, env = "JALAALI_TOOLS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results (and logs) as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Print Jalaali results with Persian digits
    #[arg(long, global = true)]
    pub persian_digits: bool,

    /// Log filter, e.g. `debug` or `jalaali_calendar=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Jalaali day (jYYYY/jMM/jDD) to Gregorian YYYY-MM-DD
    ToGregorian { date: String },

    /// Jalaali period (jYYYY/jMM) to Gregorian YYYY-MM
    ToGregorianMonth { period: String },

    /// Stored YYYY-MM-DD to Jalaali; unreadable input is echoed back
    ToJalaali { date: String },

    /// Stored YYYY-MM to a Jalaali period; unreadable input is echoed back
    ToJalaaliMonth { period: String },

    /// First and last Gregorian day of a Jalaali month
    MonthRange { period: String },

    /// Adds a Gregorian date to every record of a JSON array
    ConvertFile {
        /// JSON array of objects
        file: PathBuf,

        /// Field holding the Jalaali date
        #[arg(short, long, default_value = "date")]
        field: String,

        /// Field the Gregorian date is written to
        #[arg(short, long, default_value = "gregorian")]
        target: String,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
