// Search constants and opportunity cost presets

use crate::models::{Cost, Seconds};
use serde::{Deserialize, Serialize};

/// Seconds spent moving between two markets of the same area
pub const IN_AREA_TRAVEL_SECONDS: Seconds = 30;

/// Seconds spent per hop between neighbouring areas
pub const JUMP_SECONDS: Seconds = 60;

/// How much an hour at the keyboard is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweatLevel {
    Chill,
    #[default]
    Normal,
    Sweaty,
}

impl SweatLevel {
    /// Opportunity cost of one second of travel
    pub fn cost_per_second(self) -> Cost {
        match self {
            SweatLevel::Chill => 900.0,
            SweatLevel::Normal => 1630.0,
            SweatLevel::Sweaty => 4160.0,
        }
    }
}

/// Parameters shared by the market graph builder and the tour search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub in_area_seconds: Seconds,
    pub jump_seconds: Seconds,
    pub cost_per_second: Cost,
}

impl SearchConfig {
    pub fn with_sweat_level(sweat_level: SweatLevel) -> Self {
        Self {
            cost_per_second: sweat_level.cost_per_second(),
            ..Self::default()
        }
    }

    pub fn with_cost_per_second(mut self, cost_per_second: Cost) -> Self {
        self.cost_per_second = cost_per_second;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            in_area_seconds: IN_AREA_TRAVEL_SECONDS,
            jump_seconds: JUMP_SECONDS,
            cost_per_second: SweatLevel::default().cost_per_second(),
        }
    }
}
