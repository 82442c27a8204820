//! Metrics orchestration: per-theme computation, then cross-theme ranking.

use crate::domain::aggregate::{return_leader, spread, theme_return, volume_leader};
use crate::domain::metrics::{CalculatedTheme, StockMetrics, ThemeMetrics};
use crate::domain::price_series::PriceBook;
use crate::domain::ranking::assign_ranks;
use crate::domain::returns::{avg_traded_value, return_pct, AVG_VOLUME_DAYS};
use crate::domain::snapshot::Snapshot;
use crate::domain::stage::{classify, StageInputs};
use crate::domain::theme::Theme;
use crate::domain::window::Window;
use std::collections::BTreeMap;

/// Compute the full record set for a snapshot.
///
/// Two passes: themes are computed independently first, then ranks are
/// backfilled across the whole set. A rank needs every theme's return, so
/// the ranking pass cannot be folded into the first.
pub fn compute_themes(snapshot: &Snapshot) -> Vec<CalculatedTheme> {
    let mut themes: Vec<CalculatedTheme> = snapshot
        .themes
        .iter()
        .map(|theme| compute_theme(snapshot, theme))
        .collect();

    assign_ranks(&mut themes);
    themes
}

fn compute_theme(snapshot: &Snapshot, theme: &Theme) -> CalculatedTheme {
    let book = &snapshot.prices;

    let return_3w = theme_return(book, theme, Window::W3.weeks());
    let return_6w = theme_return(book, theme, Window::W6.weeks());
    let return_9w = theme_return(book, theme, Window::W9.weeks());

    let spread_3w = spread_for(book, theme, Window::W3);
    let spread_6w = spread_for(book, theme, Window::W6);

    let stage = classify(&StageInputs {
        return_3w,
        return_6w,
        spread_3w,
        spread_6w,
    });

    let stock_metrics: BTreeMap<String, StockMetrics> = theme
        .stocks
        .iter()
        .map(|code| {
            (
                code.clone(),
                StockMetrics {
                    return_3w: return_pct(book, code, Window::W3.weeks()).unwrap_or(0.0),
                    return_6w: return_pct(book, code, Window::W6.weeks()).unwrap_or(0.0),
                    return_9w: return_pct(book, code, Window::W9.weeks()).unwrap_or(0.0),
                    avg_volume_1w: avg_traded_value(book, code, AVG_VOLUME_DAYS),
                },
            )
        })
        .collect();

    CalculatedTheme {
        id: theme.id.clone(),
        name: theme.name.clone(),
        stocks: theme.stocks.clone(),
        metrics: ThemeMetrics {
            return_3w,
            return_6w,
            return_9w,
            spread_3w,
            spread_6w,
            rank_3w: 0,
            rank_6w: 0,
            rank_9w: 0,
            stage,
            leader_3w: return_leader(book, theme, Window::W3.weeks()),
            leader_6w: return_leader(book, theme, Window::W6.weeks()),
            leader_9w: return_leader(book, theme, Window::W9.weeks()),
            leader_volume: volume_leader(book, theme),
        },
        stock_metrics,
    }
}

fn spread_for(book: &PriceBook, theme: &Theme, window: Window) -> u32 {
    match window.spread_threshold() {
        Some(threshold) => spread(book, theme, window.weeks(), threshold),
        None => 0,
    }
}
