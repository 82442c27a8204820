//! Stock reference data.
//!
//! Stocks are keyed by their exchange code everywhere in the snapshot, so the
//! structs here carry only the payload fields of the reference files.

use serde::{Deserialize, Serialize};

/// Basic listing information for one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub name: String,
    pub market: String,
}

/// Per-stock market data for the snapshot base date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub market_cap: f64,
    #[serde(default)]
    pub shares: f64,
    #[serde(default)]
    pub per: f64,
    #[serde(default)]
    pub pbr: f64,
}

/// Per-stock financial data for the most recent reported quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialData {
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub operating_profit: f64,
}
