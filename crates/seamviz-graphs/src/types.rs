//! Chart configuration and styling types.

use serde::{Deserialize, Serialize};

/// Configuration for the quadrant scatter chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart title.
    pub title: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Background color as a `#RRGGBB` hex string; white when absent.
    pub background_color: Option<String>,
    /// Data point color as a `#RRGGBB` hex string.
    pub point_color: Option<String>,
    /// Reference line color as a `#RRGGBB` hex string; drawn dashed at
    /// half opacity so it stays visually distinct from the data points.
    pub reference_line_color: Option<String>,
    /// Font size for the title.
    pub title_font_size: u32,
    /// Font size for bowler name labels next to the points.
    pub label_font_size: u32,
    /// Font size for the four quadrant corner annotations.
    pub annotation_font_size: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Mean Movement vs Mean Bounce Per Length".to_string(),
            width: 1920,
            height: 1080,
            x_label: "Mean Movement".to_string(),
            y_label: "Mean Bounce Per Length".to_string(),
            background_color: Some("#FFFFFF".to_string()),
            point_color: Some("#1F77B4".to_string()),
            reference_line_color: Some("#FF0000".to_string()),
            title_font_size: 36,
            label_font_size: 18,
            annotation_font_size: 24,
        }
    }
}
