use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{InstrumentQuote, SearchSource};

const SEARCH_URL: &str = "https://financialmodelingprep.com/api/v3/search";

/// One row of the Financial Modeling Prep search response (a bare array)
#[derive(Debug, Deserialize)]
struct FmpSearchResult {
    symbol: String,
    name: Option<String>,
    currency: Option<String>,
    #[serde(rename = "exchangeShortName")]
    exchange_short_name: Option<String>,
}

impl FmpSearchResult {
    fn into_quote(self) -> InstrumentQuote {
        let display_name = self.name.unwrap_or_else(|| self.symbol.clone());

        InstrumentQuote {
            symbol: self.symbol,
            display_name,
            last_price: None,
            currency: self.currency,
            exchange: self.exchange_short_name,
        }
    }
}

/// Secondary quote source: Financial Modeling Prep company search
pub struct FmpSearch {
    api_key: String,
}

impl FmpSearch {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SearchSource for FmpSearch {
    fn name(&self) -> &'static str {
        "fmp"
    }

    async fn search(&self, query: &str) -> Result<Vec<InstrumentQuote>> {
        info!("Searching Financial Modeling Prep for '{}'", query);

        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; DivvyBot/1.0)")
            .build()?;

        let response = client
            .get(SEARCH_URL)
            .query(&[
                ("query", query),
                ("limit", "10"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to send request to Financial Modeling Prep")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Financial Modeling Prep returned error status: {}",
                response.status()
            ));
        }

        let results: Vec<FmpSearchResult> = response
            .json()
            .await
            .context("Failed to parse Financial Modeling Prep response")?;

        let quotes: Vec<InstrumentQuote> =
            results.into_iter().map(FmpSearchResult::into_quote).collect();

        debug!("Financial Modeling Prep returned {} instruments", quotes.len());
        Ok(quotes)
    }
}
