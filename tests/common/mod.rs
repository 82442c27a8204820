#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use themarank::domain::error::ThemarankError;
use themarank::domain::price_series::{PriceBar, PriceBook, PriceSeries};
use themarank::domain::snapshot::Snapshot;
use themarank::domain::stock::Stock;
use themarank::domain::theme::Theme;
use themarank::ports::data_port::DataPort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn base_date() -> NaiveDate {
    date(2025, 2, 28)
}

pub fn make_theme(id: &str, name: &str, codes: &[&str]) -> Theme {
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        stocks: codes.iter().map(|c| c.to_string()).collect(),
    }
}

/// Series whose closes run newest-first over consecutive dates ending at the
/// base date, with a constant traded value.
pub fn series_from_closes(closes: &[f64], value: f64) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: base_date() - chrono::Duration::days(i as i64),
            close,
            value,
        })
        .collect();
    PriceSeries::new(bars)
}

/// Series with 46 records pinned so the 3/6/9-week returns come out at the
/// given percentages (current price 100).
pub fn series_with_returns(r3: f64, r6: f64, r9: f64, value: f64) -> PriceSeries {
    let current = 100.0;
    let mut closes = vec![current; 46];
    closes[15] = current / (1.0 + r3 / 100.0);
    closes[30] = current / (1.0 + r6 / 100.0);
    closes[45] = current / (1.0 + r9 / 100.0);
    series_from_closes(&closes, value)
}

pub fn make_book(entries: Vec<(&str, PriceSeries)>) -> PriceBook {
    let series: HashMap<String, PriceSeries> = entries
        .into_iter()
        .map(|(code, s)| (code.to_string(), s))
        .collect();
    PriceBook::new(series)
}

/// Snapshot over the given themes and price book; stock reference data is
/// synthesized for every constituent code.
pub fn make_snapshot(themes: Vec<Theme>, prices: PriceBook) -> Snapshot {
    let mut stocks = HashMap::new();
    for theme in &themes {
        for code in &theme.stocks {
            stocks.insert(
                code.clone(),
                Stock {
                    name: format!("{code} Co"),
                    market: "KOSPI".to_string(),
                },
            );
        }
    }
    Snapshot {
        stocks,
        themes,
        prices,
        market: HashMap::new(),
        financial: HashMap::new(),
        base_date: base_date(),
    }
}

pub struct MockDataPort {
    snapshot: Option<Snapshot>,
    error: Option<String>,
}

impl MockDataPort {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            snapshot: None,
            error: Some(reason.to_string()),
        }
    }
}

impl DataPort for MockDataPort {
    fn load_snapshot(&self) -> Result<Snapshot, ThemarankError> {
        if let Some(reason) = &self.error {
            return Err(ThemarankError::DataLoad {
                file: "mock".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.snapshot.clone().expect("mock snapshot"))
    }
}
