//! Theme-level aggregation: top-subset return, spread, leadership.

use crate::domain::price_series::PriceBook;
use crate::domain::returns::{avg_traded_value, return_pct, AVG_VOLUME_DAYS};
use crate::domain::theme::Theme;

/// Valid (non-`None`) returns for a theme's constituents, in constituent
/// order.
fn valid_returns(book: &PriceBook, theme: &Theme, weeks: u32) -> Vec<f64> {
    theme
        .stocks
        .iter()
        .filter_map(|code| return_pct(book, code, weeks))
        .collect()
}

/// Theme return: the average of the top `clamp(floor(n/2), 3, 5)` valid
/// constituent returns, where n is the number of valid returns.
///
/// This is deliberately not a plain mean: the long tail of laggards must not
/// dilute the headline number, so only the best-performing core counts. With
/// fewer than 3 valid returns the clamp asks for more values than exist and
/// the average quietly runs over however many there are. 0 when none exist.
pub fn theme_return(book: &PriceBook, theme: &Theme, weeks: u32) -> f64 {
    let mut returns = valid_returns(book, theme, weeks);
    if returns.is_empty() {
        return 0.0;
    }
    returns.sort_by(|a, b| b.total_cmp(a));

    let top_count = (returns.len() / 2).clamp(3, 5).min(returns.len());
    let top = &returns[..top_count];
    top.iter().sum::<f64>() / top.len() as f64
}

/// Spread: the percentage of valid-return constituents at or above
/// `threshold`, rounded to an integer. 0 when no constituent has a valid
/// return.
pub fn spread(book: &PriceBook, theme: &Theme, weeks: u32, threshold: f64) -> u32 {
    let returns = valid_returns(book, theme, weeks);
    if returns.is_empty() {
        return 0;
    }
    let above = returns.iter().filter(|&&r| r >= threshold).count();
    ((above as f64 / returns.len() as f64) * 100.0).round() as u32
}

/// The constituent with the strictly greatest valid return for the window.
///
/// Strict `>` means ties keep the earliest constituent. `None` when no
/// constituent has a valid return.
pub fn return_leader(book: &PriceBook, theme: &Theme, weeks: u32) -> Option<String> {
    let mut leader: Option<&str> = None;
    let mut max_return = f64::NEG_INFINITY;

    for code in &theme.stocks {
        if let Some(ret) = return_pct(book, code, weeks) {
            if ret > max_return {
                max_return = ret;
                leader = Some(code);
            }
        }
    }
    leader.map(str::to_string)
}

/// The constituent with the strictly greatest trailing average traded value.
///
/// The initial threshold is 0, so a theme where every constituent averages 0
/// has no volume leader.
pub fn volume_leader(book: &PriceBook, theme: &Theme) -> Option<String> {
    let mut leader: Option<&str> = None;
    let mut max_value = 0.0;

    for code in &theme.stocks {
        let avg = avg_traded_value(book, code, AVG_VOLUME_DAYS);
        if avg > max_value {
            max_value = avg;
            leader = Some(code);
        }
    }
    leader.map(str::to_string)
}
