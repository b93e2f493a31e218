//! Domain type definitions for delivery data and bowler summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bowling delivery, one row of the input table.
///
/// The `date`, `match_id` and `innings` fields are opaque grouping values;
/// they are never interpreted beyond equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Match date, as recorded in the source table.
    #[serde(rename = "Date")]
    pub date: String,
    /// Match identifier.
    #[serde(rename = "Match")]
    pub match_id: String,
    /// Innings number within the match.
    #[serde(rename = "Innings")]
    pub innings: String,
    /// Name of the bowler.
    #[serde(rename = "Bowler")]
    pub bowler: String,
    /// Bowler type code, e.g. `RF`, `LM`, `RLB`.
    #[serde(rename = "Bowler Type")]
    pub bowler_type: String,
    /// Vertical position of the ball past the batter.
    #[serde(rename = "PastZ")]
    pub past_z: f64,
    /// Horizontal pitching position, a proxy for delivery length.
    #[serde(rename = "PitchX")]
    pub pitch_x: f64,
    /// Lateral position of the ball past the batter.
    #[serde(rename = "PastY")]
    pub past_y: f64,
    /// Lateral pitching position.
    #[serde(rename = "PitchY")]
    pub pitch_y: f64,
}

/// Grouping key identifying one innings: every delivery sharing this key is
/// baselined against the same per-innings averages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InningsKey {
    /// Match date.
    pub date: String,
    /// Match identifier.
    pub match_id: String,
    /// Innings number.
    pub innings: String,
}

impl InningsKey {
    /// Builds the grouping key for a delivery.
    #[must_use]
    pub fn of(delivery: &Delivery) -> Self {
        Self {
            date: delivery.date.clone(),
            match_id: delivery.match_id.clone(),
            innings: delivery.innings.clone(),
        }
    }
}

impl fmt::Display for InningsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/innings {}", self.date, self.match_id, self.innings)
    }
}

/// Per-bowler result row: mean deviations from the per-innings baselines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerSummary {
    /// Name of the bowler.
    pub bowler: String,
    /// Mean of the bowler's movement deviations, the chart's x axis.
    pub mean_movement: f64,
    /// Mean of the bowler's bounce-per-length deviations, the chart's y axis.
    pub mean_bpl: f64,
}
