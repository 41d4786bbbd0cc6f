use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::Colorize;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use divvy::cli::{formatters, Cli, Commands};
use divvy::config::Config;
use divvy::dividends::{builtin_schedule, group_by_month, project, totals_by_currency};
use divvy::quotes::QuoteLookup;
use divvy::store::{HoldingsStore, RegistrationDraft, SqliteStore};
use divvy::utils::validate_draft;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    match cli.command {
        Commands::Search { query } => {
            handle_search(&config, &query).await;
            Ok(())
        }

        Commands::Add {
            symbol,
            price,
            quantity,
            name,
        } => {
            let mut store = open_store(&config)?;
            handle_add(&mut store, &config, &symbol, price, quantity, name).await
        }

        Commands::List => {
            let store = open_store(&config)?;
            handle_list(&store)
        }

        Commands::Remove { id } => {
            let mut store = open_store(&config)?;
            handle_remove(&mut store, &id)
        }

        Commands::Calendar { as_of } => {
            let store = open_store(&config)?;
            let now = as_of.unwrap_or_else(|| Local::now().date_naive());
            handle_calendar(&store, now)
        }
    }
}

fn open_store(config: &Config) -> Result<SqliteStore> {
    SqliteStore::open(config.db_path()?)
}

async fn handle_search(config: &Config, query: &str) {
    let lookup = QuoteLookup::with_default_sources(config);
    let results = lookup.search(query).await;
    println!("{}", formatters::render_search_results(&results));
}

/// Register a holding, pre-filling the company name from the lookup chain
/// when the user did not supply one
async fn handle_add(
    store: &mut dyn HoldingsStore,
    config: &Config,
    symbol: &str,
    price: Decimal,
    quantity: u32,
    name: Option<String>,
) -> Result<()> {
    let lookup = QuoteLookup::with_default_sources(config);
    let resolved = lookup.get_by_symbol(symbol).await;

    // Prefer the source's canonical symbol casing when it resolved
    let symbol = resolved
        .as_ref()
        .map(|q| q.symbol.clone())
        .unwrap_or_else(|| symbol.trim().to_uppercase());

    let company_name = name
        .or_else(|| resolved.map(|q| q.display_name))
        .unwrap_or_else(|| symbol.clone());

    let draft = RegistrationDraft {
        symbol,
        company_name,
        price,
        quantity,
    };
    validate_draft(&draft)?;

    let holding = store.register(draft)?;
    println!(
        "{} Registered {} x{} ({})",
        "✓".green().bold(),
        holding.symbol,
        holding.quantity,
        holding.id
    );
    Ok(())
}

fn handle_list(store: &dyn HoldingsStore) -> Result<()> {
    let holdings = store.list()?;
    println!("{}", formatters::render_holdings(&holdings));
    Ok(())
}

fn handle_remove(store: &mut dyn HoldingsStore, id: &str) -> Result<()> {
    store.remove(id)?;
    println!("{} Removed {}", "✓".green().bold(), id);
    Ok(())
}

fn handle_calendar(store: &dyn HoldingsStore, now: NaiveDate) -> Result<()> {
    let holdings = store.list()?;
    let events = project(&holdings, builtin_schedule(), now);

    if events.is_empty() {
        println!("No upcoming dividends in the next 12 months");
        return Ok(());
    }

    let groups = group_by_month(&events);
    let totals = totals_by_currency(&events);
    print!("{}", formatters::render_calendar(&groups, &totals));
    Ok(())
}
