// Holdings store - durable local persistence for registered positions

pub mod models;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

pub use models::{Holding, RegistrationDraft};

/// Fixed storage key the holdings collection lives under
const HOLDINGS_KEY: &str = "holdings";

/// Repository abstraction over the persisted holdings collection.
///
/// The rest of the system only depends on this trait, so the projection
/// and aggregation layers are testable against [`MemoryStore`] without a
/// real database.
pub trait HoldingsStore {
    /// Assign a fresh id and registration timestamp and persist the holding
    fn register(&mut self, draft: RegistrationDraft) -> Result<Holding>;

    /// All holdings in insertion order
    fn list(&self) -> Result<Vec<Holding>>;

    /// Delete by id. Removing a non-existent id is a no-op.
    fn remove(&mut self, id: &str) -> Result<()>;
}

fn new_holding(draft: RegistrationDraft) -> Holding {
    Holding {
        id: Uuid::new_v4().to_string(),
        symbol: draft.symbol,
        company_name: draft.company_name,
        price: draft.price,
        quantity: draft.quantity,
        registered_at: Utc::now(),
    }
}

/// SQLite-backed store. The collection is kept in the canonical persisted
/// shape: one JSON array of holdings under a fixed key in a key-value
/// table, round-tripping through serde on every access.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (and initialize if needed) the store at the given path
    pub fn open(db_path: PathBuf) -> Result<Self> {
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database at {:?}", db_path))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to initialize storage schema")?;

        Ok(Self { conn })
    }

    fn load(&self) -> Result<Vec<Holding>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![HOLDINGS_KEY],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to read holdings collection")?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        // Corrupt persisted JSON degrades to an empty collection rather
        // than making every command fail.
        match serde_json::from_str(&raw) {
            Ok(holdings) => Ok(holdings),
            Err(e) => {
                warn!("Stored holdings are unreadable, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, holdings: &[Holding]) -> Result<()> {
        let raw = serde_json::to_string(holdings).context("Failed to serialize holdings")?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![HOLDINGS_KEY, raw],
            )
            .context("Failed to write holdings collection")?;
        Ok(())
    }
}

impl HoldingsStore for SqliteStore {
    fn register(&mut self, draft: RegistrationDraft) -> Result<Holding> {
        let holding = new_holding(draft);

        let mut holdings = self.load()?;
        holdings.push(holding.clone());
        self.save(&holdings)?;

        info!(
            "Registered {} x{} as {}",
            holding.symbol, holding.quantity, holding.id
        );
        Ok(holding)
    }

    fn list(&self) -> Result<Vec<Holding>> {
        self.load()
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        let mut holdings = self.load()?;
        let before = holdings.len();
        holdings.retain(|h| h.id != id);

        if holdings.len() == before {
            info!("Remove of unknown holding {} ignored", id);
            return Ok(());
        }

        self.save(&holdings)?;
        info!("Removed holding {}", id);
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    holdings: Vec<Holding>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HoldingsStore for MemoryStore {
    fn register(&mut self, draft: RegistrationDraft) -> Result<Holding> {
        let holding = new_holding(draft);
        self.holdings.push(holding.clone());
        Ok(holding)
    }

    fn list(&self) -> Result<Vec<Holding>> {
        Ok(self.holdings.clone())
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        self.holdings.retain(|h| h.id != id);
        Ok(())
    }
}
