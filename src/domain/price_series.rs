//! Daily price records and reverse-chronological series access.

use chrono::NaiveDate;
use std::collections::HashMap;

/// One daily record for a stock: closing price and traded value.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
    pub value: f64,
}

/// All available daily records for one stock, newest first.
///
/// Offsets count available records, not calendar days: offset N is the Nth
/// most recent record, whatever gaps (weekends, halts, missing history) lie
/// between. There is no interpolation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by(|a, b| b.date.cmp(&a.date));
        Self { bars }
    }

    /// Close price `days_ago` available records back, or `None` when the
    /// series is shorter than that.
    pub fn close_price(&self, days_ago: usize) -> Option<f64> {
        self.bars.get(days_ago).map(|bar| bar.close)
    }

    /// Records in reverse-chronological order.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|bar| bar.date)
    }

    pub fn oldest_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }
}

/// Price series for every stock that has history, keyed by stock code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBook {
    series: HashMap<String, PriceSeries>,
}

impl PriceBook {
    pub fn new(series: HashMap<String, PriceSeries>) -> Self {
        Self { series }
    }

    pub fn series(&self, code: &str) -> Option<&PriceSeries> {
        self.series.get(code)
    }

    /// Close price for `code` at `days_ago`, `None` when the stock has no
    /// records or the offset runs past its history.
    pub fn close_price(&self, code: &str, days_ago: usize) -> Option<f64> {
        self.series(code)?.close_price(days_ago)
    }

    /// Number of stocks with at least one record.
    pub fn stock_count(&self) -> usize {
        self.series.len()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}
