use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::{InstrumentQuote, SearchSource};

const SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";

/// Yahoo Finance search response
#[derive(Debug, Deserialize)]
struct YahooSearchResponse {
    #[serde(default)]
    quotes: Vec<YahooSearchQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooSearchQuote {
    symbol: String,
    shortname: Option<String>,
    longname: Option<String>,
    #[serde(rename = "exchDisp")]
    exch_disp: Option<String>,
    #[serde(rename = "typeDisp")]
    type_disp: Option<String>,
    #[serde(rename = "quoteType")]
    quote_type: Option<String>,
    currency: Option<String>,
}

impl YahooSearchQuote {
    /// Only equities and ETFs are registrable; bonds, indices, futures
    /// and the rest are discarded.
    fn is_equity_like(&self) -> bool {
        matches!(self.quote_type.as_deref(), Some("EQUITY") | Some("ETF"))
            || self.type_disp.as_deref() == Some("Equity")
    }

    fn into_quote(self) -> InstrumentQuote {
        let display_name = self
            .shortname
            .or(self.longname)
            .unwrap_or_else(|| self.symbol.clone());

        InstrumentQuote {
            symbol: self.symbol,
            display_name,
            // Search rows carry no market price; the user supplies one
            // at registration time.
            last_price: None,
            currency: self.currency,
            exchange: self.exch_disp,
        }
    }
}

/// Primary quote source: the Yahoo Finance search endpoint
pub struct YahooSearch;

#[async_trait]
impl SearchSource for YahooSearch {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn search(&self, query: &str) -> Result<Vec<InstrumentQuote>> {
        info!("Searching Yahoo Finance for '{}'", query);

        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; DivvyBot/1.0)")
            .build()?;

        let response = client
            .get(SEARCH_URL)
            .query(&[("q", query), ("quotes_count", "10"), ("news_count", "0")])
            .send()
            .await
            .context("Failed to send request to Yahoo Finance")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Yahoo Finance returned error status: {}",
                response.status()
            ));
        }

        let data: YahooSearchResponse = response
            .json()
            .await
            .context("Failed to parse Yahoo Finance response")?;

        let quotes: Vec<InstrumentQuote> = data
            .quotes
            .into_iter()
            .filter(YahooSearchQuote::is_equity_like)
            .map(YahooSearchQuote::into_quote)
            .collect();

        debug!("Yahoo Finance returned {} instruments", quotes.len());
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> YahooSearchResponse {
        serde_json::from_str(json).expect("response should parse")
    }

    #[test]
    fn test_equity_and_etf_rows_are_kept() {
        let response = parse(
            r#"{"quotes": [
                {"symbol": "AAPL", "shortname": "Apple Inc.", "quoteType": "EQUITY", "exchDisp": "NASDAQ", "currency": "USD"},
                {"symbol": "VOO", "shortname": "Vanguard S&P 500 ETF", "quoteType": "ETF"},
                {"symbol": "^GSPC", "shortname": "S&P 500", "quoteType": "INDEX"},
                {"symbol": "7203.T", "shortname": "Toyota Motor Corporation", "typeDisp": "Equity"}
            ]}"#,
        );

        let kept: Vec<_> = response
            .quotes
            .into_iter()
            .filter(YahooSearchQuote::is_equity_like)
            .map(YahooSearchQuote::into_quote)
            .collect();

        let symbols: Vec<&str> = kept.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "VOO", "7203.T"]);
    }

    #[test]
    fn test_missing_fields_stay_unset() {
        let response = parse(r#"{"quotes": [{"symbol": "AAPL", "quoteType": "EQUITY"}]}"#);
        let quote = response
            .quotes
            .into_iter()
            .next()
            .map(YahooSearchQuote::into_quote)
            .unwrap();

        assert_eq!(quote.display_name, "AAPL");
        assert!(quote.last_price.is_none());
        assert!(quote.currency.is_none());
        assert!(quote.exchange.is_none());
    }

    #[test]
    fn test_longname_backfills_display_name() {
        let response =
            parse(r#"{"quotes": [{"symbol": "MSFT", "longname": "Microsoft Corporation", "quoteType": "EQUITY"}]}"#);
        let quote = response
            .quotes
            .into_iter()
            .next()
            .map(YahooSearchQuote::into_quote)
            .unwrap();
        assert_eq!(quote.display_name, "Microsoft Corporation");
    }

    #[test]
    fn test_body_without_quotes_array_parses_as_empty() {
        let response = parse("{}");
        assert!(response.quotes.is_empty());
    }
}
