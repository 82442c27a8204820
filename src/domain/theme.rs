//! Theme definitions.

use serde::{Deserialize, Serialize};

/// A named basket of constituent stocks.
///
/// Constituent order is preserved as loaded: leadership ties keep the first
/// stock encountered, so the order must be stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub stocks: Vec<String>,
}

impl Theme {
    pub fn stock_count(&self) -> usize {
        self.stocks.len()
    }
}
