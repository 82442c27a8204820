//! Lifecycle-stage classification.
//!
//! A theme's momentum phase is decided by an ordered rule list over four
//! inputs: 3w/6w returns and 3w/6w spreads. Bucket boundaries overlap, so
//! rule position decides, not magnitude: the first matching rule wins and
//! the list falls through to "notable".

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Overheated,
    Spreading,
    Early,
    Notable,
    Settling,
    Extinct,
}

impl Stage {
    /// Short stage code as shown in rankings ("0".."3" for the numbered
    /// phases, the phase name for the declining ones).
    pub fn code(&self) -> &'static str {
        match self {
            Stage::Overheated => "3",
            Stage::Spreading => "2",
            Stage::Early => "1",
            Stage::Notable => "0",
            Stage::Settling => "settling",
            Stage::Extinct => "extinct",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Overheated => "overheated",
            Stage::Spreading => "spreading",
            Stage::Early => "early",
            Stage::Notable => "notable",
            Stage::Settling => "settling",
            Stage::Extinct => "extinct",
        }
    }

    /// Declining phases: past the momentum cycle rather than inside it.
    pub fn is_declining(&self) -> bool {
        matches!(self, Stage::Settling | Stage::Extinct)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classifier inputs, as produced by the theme aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageInputs {
    pub return_3w: f64,
    pub return_6w: f64,
    pub spread_3w: u32,
    pub spread_6w: u32,
}

impl StageInputs {
    fn max_spread(&self) -> u32 {
        self.spread_3w.max(self.spread_6w)
    }
}

type StageRule = fn(&StageInputs) -> Option<Stage>;

/// Priority-ordered rules; evaluation stops at the first `Some`.
const RULES: &[StageRule] = &[
    // 1. Half the theme (or more) already cleared a threshold.
    |m| (m.max_spread() >= 50).then_some(Stage::Overheated),
    // 2. A meaningful minority cleared it.
    |m| (m.max_spread() >= 20).then_some(Stage::Spreading),
    // 3. Strong headline return without breadth.
    |m| (m.return_3w >= 10.0 || m.return_6w >= 15.0).then_some(Stage::Early),
    // 4. Mild headline return.
    |m| (m.return_3w >= 5.0 || m.return_6w >= 8.0).then_some(Stage::Notable),
    // 5. Short-term decline with no breadth left: extinct if the 6-week
    //    return is negative too, otherwise settling.
    |m| {
        if m.return_3w < 0.0 && m.spread_3w < 10 {
            Some(if m.return_6w < 0.0 {
                Stage::Extinct
            } else {
                Stage::Settling
            })
        } else {
            None
        }
    },
];

pub fn classify(inputs: &StageInputs) -> Stage {
    RULES
        .iter()
        .find_map(|rule| rule(inputs))
        .unwrap_or(Stage::Notable)
}
