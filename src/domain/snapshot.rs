//! The immutable input snapshot the engine computes over.
//!
//! One snapshot is one fully loaded view of the data directory for a single
//! base date. The engine never mutates it; recomputation always starts from
//! a snapshot and produces a fresh result set.

use crate::domain::price_series::PriceBook;
use crate::domain::stock::{FinancialData, MarketData, Stock};
use crate::domain::theme::Theme;
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stocks: HashMap<String, Stock>,
    pub themes: Vec<Theme>,
    pub prices: PriceBook,
    pub market: HashMap<String, MarketData>,
    pub financial: HashMap<String, FinancialData>,
    pub base_date: NaiveDate,
}

impl Snapshot {
    pub fn stock(&self, code: &str) -> Option<&Stock> {
        self.stocks.get(code)
    }

    /// Display name for a code, falling back to the code itself for stocks
    /// absent from the reference data.
    pub fn stock_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.stocks.get(code).map(|s| s.name.as_str()).unwrap_or(code)
    }

    pub fn theme(&self, id: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn market_cap(&self, code: &str) -> f64 {
        self.market.get(code).map(|m| m.market_cap).unwrap_or(0.0)
    }

    pub fn revenue(&self, code: &str) -> f64 {
        self.financial.get(code).map(|f| f.revenue).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> Snapshot {
        let mut stocks = HashMap::new();
        stocks.insert(
            "005930".to_string(),
            Stock {
                name: "Samsung Electronics".into(),
                market: "KOSPI".into(),
            },
        );
        let mut market = HashMap::new();
        market.insert(
            "005930".to_string(),
            MarketData {
                market_cap: 420.0,
                shares: 5_969.0,
                per: 12.5,
                pbr: 1.2,
            },
        );
        Snapshot {
            stocks,
            themes: vec![Theme {
                id: "T001".into(),
                name: "Semiconductors".into(),
                stocks: vec!["005930".into()],
            }],
            prices: PriceBook::default(),
            market,
            financial: HashMap::new(),
            base_date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        }
    }

    #[test]
    fn stock_name_falls_back_to_code() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.stock_name("005930"), "Samsung Electronics");
        assert_eq!(snapshot.stock_name("999999"), "999999");
    }

    #[test]
    fn theme_lookup_by_id() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.theme("T001").unwrap().name, "Semiconductors");
        assert!(snapshot.theme("T404").is_none());
    }

    #[test]
    fn market_and_financial_lookups_default_to_zero() {
        let snapshot = sample_snapshot();
        assert!((snapshot.market_cap("005930") - 420.0).abs() < f64::EPSILON);
        assert!((snapshot.market_cap("999999") - 0.0).abs() < f64::EPSILON);
        assert!((snapshot.revenue("005930") - 0.0).abs() < f64::EPSILON);
    }
}
