//! Per-stock return and traded-value calculations.
//!
//! return(w) = ((current - past) / past) * 100, where past sits
//! `w * 5` available records back. `None` when either price is missing or
//! the past price is zero, never NaN or an infinity.

use crate::domain::price_series::PriceBook;

/// Week-to-offset conversion: one week is approximately five trading days.
pub const TRADING_DAYS_PER_WEEK: u32 = 5;

/// Trailing window for average traded value.
pub const AVG_VOLUME_DAYS: usize = 5;

pub fn return_pct(book: &PriceBook, code: &str, weeks: u32) -> Option<f64> {
    let offset = (weeks * TRADING_DAYS_PER_WEEK) as usize;
    let current = book.close_price(code, 0)?;
    let past = book.close_price(code, offset)?;
    if past == 0.0 {
        return None;
    }
    Some((current - past) / past * 100.0)
}

/// Average traded value over the `days` most recent available records.
///
/// Divides by the number of records actually found, so a stock with three
/// days of history averages over three. Returns 0 when there are none.
pub fn avg_traded_value(book: &PriceBook, code: &str, days: usize) -> f64 {
    let Some(series) = book.series(code) else {
        return 0.0;
    };
    let recent = &series.bars()[..days.min(series.len())];
    if recent.is_empty() {
        return 0.0;
    }
    recent.iter().map(|bar| bar.value).sum::<f64>() / recent.len() as f64
}
