//! Lookback windows.
//!
//! Every return, spread and rank is computed per window. Spread is only
//! defined for the 3- and 6-week windows; the 9-week window carries a rank
//! and a return but no spread.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    W3,
    W6,
    W9,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::W3, Window::W6, Window::W9];

    pub fn weeks(self) -> u32 {
        match self {
            Window::W3 => 3,
            Window::W6 => 6,
            Window::W9 => 9,
        }
    }

    /// Minimum return (percent) a constituent must clear to count toward
    /// spread. `None` for the 9-week window, which has no spread.
    pub fn spread_threshold(self) -> Option<f64> {
        match self {
            Window::W3 => Some(10.0),
            Window::W6 => Some(15.0),
            Window::W9 => None,
        }
    }

    /// The adjacent longer window, used for rank-trend comparison.
    pub fn next_longer(self) -> Option<Window> {
        match self {
            Window::W3 => Some(Window::W6),
            Window::W6 => Some(Window::W9),
            Window::W9 => None,
        }
    }

    pub fn parse(s: &str) -> Option<Window> {
        match s {
            "3w" => Some(Window::W3),
            "6w" => Some(Window::W6),
            "9w" => Some(Window::W9),
            _ => None,
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::W3 => write!(f, "3w"),
            Window::W6 => write!(f, "6w"),
            Window::W9 => write!(f, "9w"),
        }
    }
}
