//! Computed metric records: the engine's output shape.
//!
//! These are the materialized, presentation-ready records: the presentation
//! layer sorts by the precomputed rank fields and formats, it never
//! recomputes returns or spreads.

use crate::domain::stage::Stage;
use crate::domain::window::Window;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-stock metrics within a theme.
///
/// Returns default to 0 where no valid return exists; a stock is still
/// excluded from averages, spreads and leadership in that case, the zero is
/// only for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockMetrics {
    pub return_3w: f64,
    pub return_6w: f64,
    pub return_9w: f64,
    pub avg_volume_1w: f64,
}

impl StockMetrics {
    pub fn window_return(&self, window: Window) -> f64 {
        match window {
            Window::W3 => self.return_3w,
            Window::W6 => self.return_6w,
            Window::W9 => self.return_9w,
        }
    }
}

/// Theme-level metrics. Rank fields start at 0 and are backfilled by the
/// ranking pass once every theme's returns are known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeMetrics {
    pub return_3w: f64,
    pub return_6w: f64,
    pub return_9w: f64,
    pub spread_3w: u32,
    pub spread_6w: u32,
    pub rank_3w: usize,
    pub rank_6w: usize,
    pub rank_9w: usize,
    pub stage: Stage,
    pub leader_3w: Option<String>,
    pub leader_6w: Option<String>,
    pub leader_9w: Option<String>,
    pub leader_volume: Option<String>,
}

impl ThemeMetrics {
    pub fn window_return(&self, window: Window) -> f64 {
        match window {
            Window::W3 => self.return_3w,
            Window::W6 => self.return_6w,
            Window::W9 => self.return_9w,
        }
    }

    pub fn rank(&self, window: Window) -> usize {
        match window {
            Window::W3 => self.rank_3w,
            Window::W6 => self.rank_6w,
            Window::W9 => self.rank_9w,
        }
    }

    pub fn set_rank(&mut self, window: Window, rank: usize) {
        match window {
            Window::W3 => self.rank_3w = rank,
            Window::W6 => self.rank_6w = rank,
            Window::W9 => self.rank_9w = rank,
        }
    }

    /// Spread for the window, `None` for the 9-week window.
    pub fn spread(&self, window: Window) -> Option<u32> {
        match window {
            Window::W3 => Some(self.spread_3w),
            Window::W6 => Some(self.spread_6w),
            Window::W9 => None,
        }
    }

    pub fn max_spread(&self) -> u32 {
        self.spread_3w.max(self.spread_6w)
    }

    pub fn leader(&self, window: Window) -> Option<&str> {
        match window {
            Window::W3 => self.leader_3w.as_deref(),
            Window::W6 => self.leader_6w.as_deref(),
            Window::W9 => self.leader_9w.as_deref(),
        }
    }
}

/// One theme's full computed record.
///
/// `stock_metrics` is keyed by stock code; a `BTreeMap` keeps serialization
/// order deterministic across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedTheme {
    pub id: String,
    pub name: String,
    pub stocks: Vec<String>,
    pub metrics: ThemeMetrics,
    pub stock_metrics: BTreeMap<String, StockMetrics>,
}
