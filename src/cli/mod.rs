use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

pub mod formatters;

#[derive(Parser)]
#[command(name = "divvy")]
#[command(version, about = "Personal portfolio tracker with a dividend calendar")]
#[command(
    long_about = "Search for equities, register holdings into local storage, and view the dividend payouts they will produce over the next twelve months, grouped by month and totalled per currency."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for instruments by symbol or company name
    Search {
        /// Free-text query
        query: String,
    },

    /// Register a holding
    Add {
        /// Exchange-qualified symbol, e.g. AAPL or 7203.T
        symbol: String,

        /// Purchase price per share
        #[arg(short, long)]
        price: Decimal,

        /// Number of shares
        #[arg(short, long)]
        quantity: u32,

        /// Company name override (defaults to the looked-up display name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List registered holdings
    List,

    /// Remove a holding by id
    Remove {
        /// Holding id as shown by `list`
        id: String,
    },

    /// Show the 12-month dividend calendar
    Calendar {
        /// Project from this date instead of today (YYYY-MM-DD)
        #[arg(long = "as-of")]
        as_of: Option<NaiveDate>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_add_with_flags() {
        let cli = Cli::try_parse_from([
            "divvy", "add", "AAPL", "--price", "189.79", "--quantity", "10",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                symbol,
                price,
                quantity,
                name,
            } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(price.to_string(), "189.79");
                assert_eq!(quantity, 10);
                assert!(name.is_none());
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_cli_parses_calendar_as_of() {
        let cli =
            Cli::try_parse_from(["divvy", "calendar", "--as-of", "2025-12-01"]).unwrap();
        match cli.command {
            Commands::Calendar { as_of } => {
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2025, 12, 1));
            }
            _ => panic!("expected calendar command"),
        }
    }

    #[test]
    fn test_no_color_is_global() {
        let cli = Cli::try_parse_from(["divvy", "list", "--no-color"]).unwrap();
        assert!(cli.no_color);
    }

    #[test]
    fn test_bad_price_rejected() {
        assert!(Cli::try_parse_from([
            "divvy", "add", "AAPL", "--price", "abc", "--quantity", "1",
        ])
        .is_err());
    }
}
