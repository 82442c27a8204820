//! Cross-theme ranking.
//!
//! Ranks are ordinal positions, not scores: for each window the themes are
//! stable-sorted by descending return and numbered 1..N. Ties keep the
//! original per-theme iteration order.

use crate::domain::metrics::{CalculatedTheme, ThemeMetrics};
use crate::domain::window::Window;

/// Backfill the per-window rank fields across the full theme set.
///
/// Must run after every theme's returns are computed: a rank only means
/// anything relative to the whole snapshot.
pub fn assign_ranks(themes: &mut [CalculatedTheme]) {
    for window in Window::ALL {
        let mut order: Vec<usize> = (0..themes.len()).collect();
        order.sort_by(|&a, &b| {
            themes[b]
                .metrics
                .window_return(window)
                .total_cmp(&themes[a].metrics.window_return(window))
        });
        for (position, &index) in order.iter().enumerate() {
            themes[index].metrics.set_rank(window, position + 1);
        }
    }
}

/// Direction of a theme's rank relative to the adjacent longer window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTrend {
    Up,
    Down,
    Flat,
}

impl RankTrend {
    pub fn arrow(&self) -> &'static str {
        match self {
            RankTrend::Up => "↑",
            RankTrend::Down => "↓",
            RankTrend::Flat => "",
        }
    }
}

/// Rank trend for `window`: up when the rank improves (numerically
/// decreases) against the next longer window. The 9-week window has no
/// longer neighbor and therefore no trend.
pub fn rank_trend(metrics: &ThemeMetrics, window: Window) -> Option<RankTrend> {
    let longer = window.next_longer()?;
    let current = metrics.rank(window);
    let adjacent = metrics.rank(longer);
    Some(if current < adjacent {
        RankTrend::Up
    } else if current > adjacent {
        RankTrend::Down
    } else {
        RankTrend::Flat
    })
}
