//! Quadrant scatter chart construction and rendering with plotters.

use crate::ChartConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use seamviz_common::{BowlerSummary, Result, SeamError};
use std::path::Path;
use tracing::info;

/// Number of drawn dashes making up each reference line.
const REFERENCE_LINE_DASHES: usize = 60;

/// Trait for rendering a bowler summary as a chart.
///
/// The pipeline only depends on this trait, so orchestration can be tested
/// without touching a drawing backend.
pub trait ChartRenderer {
    /// Renders the chart to an image file at `path`.
    fn render_to_file(
        &self,
        config: &ChartConfig,
        summaries: &[BowlerSummary],
        path: &Path,
    ) -> Result<()>;

    /// Renders the chart to an in-memory PNG byte buffer.
    fn render_to_bytes(&self, config: &ChartConfig, summaries: &[BowlerSummary])
        -> Result<Vec<u8>>;
}

/// Bounding box of the summary points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DataBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

/// Horizontal anchoring of a corner annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HAnchor {
    Left,
    Right,
}

/// Vertical anchoring of a corner annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VAnchor {
    Top,
    Bottom,
}

/// A fixed quadrant annotation anchored at a data bounding box corner.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CornerLabel {
    text: &'static str,
    at: (f64, f64),
    h_anchor: HAnchor,
    v_anchor: VAnchor,
}

fn data_bounds(summaries: &[BowlerSummary]) -> Result<DataBounds> {
    if summaries.is_empty() {
        return Err(SeamError::EmptyResult(
            "no bowler summaries to plot".to_string(),
        ));
    }

    let mut bounds = DataBounds {
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    for summary in summaries {
        bounds.x_min = bounds.x_min.min(summary.mean_movement);
        bounds.x_max = bounds.x_max.max(summary.mean_movement);
        bounds.y_min = bounds.y_min.min(summary.mean_bpl);
        bounds.y_max = bounds.y_max.max(summary.mean_bpl);
    }
    Ok(bounds)
}

/// Axis range for one dimension: always contains zero so both reference
/// lines stay visible, with 5% padding (a fixed fallback for a degenerate
/// span).
fn axis_range(min: f64, max: f64) -> std::ops::Range<f64> {
    let lo = min.min(0.0);
    let hi = max.max(0.0);
    let span = hi - lo;
    let padding = if span > 0.0 { span * 0.05 } else { 0.5 };
    (lo - padding)..(hi + padding)
}

/// Splits the segment `from`–`to` into `dashes` drawn pieces separated by
/// equal gaps.
fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    dashes: usize,
) -> Vec<((f64, f64), (f64, f64))> {
    let dashes = dashes.max(1);
    #[allow(clippy::cast_precision_loss)]
    let slots = (2 * dashes - 1) as f64;
    let lerp = |t: f64| {
        (
            from.0 + (to.0 - from.0) * t,
            from.1 + (to.1 - from.1) * t,
        )
    };

    (0..dashes)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let start = (2 * i) as f64 / slots;
            #[allow(clippy::cast_precision_loss)]
            let end = (2 * i + 1) as f64 / slots;
            (lerp(start), lerp(end))
        })
        .collect()
}

/// The four static quadrant annotations, anchored at the corners of the
/// data bounding box. The texts describe quadrants relative to the zero
/// lines, which only coincides with these corners when the data spans both
/// signs on both axes.
fn corner_labels(bounds: DataBounds) -> [CornerLabel; 4] {
    [
        CornerLabel {
            text: "Good Bounce, Bad Movement",
            at: (bounds.x_min, bounds.y_max),
            h_anchor: HAnchor::Left,
            v_anchor: VAnchor::Top,
        },
        CornerLabel {
            text: "Good Bounce, Good Movement",
            at: (bounds.x_max, bounds.y_max),
            h_anchor: HAnchor::Right,
            v_anchor: VAnchor::Top,
        },
        CornerLabel {
            text: "Bad Bounce, Bad Movement",
            at: (bounds.x_min, bounds.y_min),
            h_anchor: HAnchor::Left,
            v_anchor: VAnchor::Bottom,
        },
        CornerLabel {
            text: "Bad Bounce, Good Movement",
            at: (bounds.x_max, bounds.y_min),
            h_anchor: HAnchor::Right,
            v_anchor: VAnchor::Bottom,
        },
    ]
}

fn render_err<E: std::error::Error>(error: E) -> SeamError {
    SeamError::Render(error.to_string())
}

/// Renderer drawing the quadrant scatter chart with plotters.
pub struct QuadrantScatterRenderer;

impl QuadrantScatterRenderer {
    /// Creates a new renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses a `#RRGGBB` color string, falling back to black.
    fn parse_color(color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        RGBColor(0, 0, 0)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &ChartConfig,
        summaries: &[BowlerSummary],
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let bounds = data_bounds(summaries)?;

        let background = config
            .background_color
            .as_deref()
            .map_or(RGBColor(255, 255, 255), Self::parse_color);
        root.fill(&background).map_err(render_err)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&config.title, ("sans-serif", config.title_font_size))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(
                axis_range(bounds.x_min, bounds.x_max),
                axis_range(bounds.y_min, bounds.y_max),
            )
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        // Dashed half-opacity reference lines through zero, each spanning
        // exactly the observed extent of the opposite axis.
        let line_color = config
            .reference_line_color
            .as_deref()
            .map_or(RGBColor(255, 0, 0), Self::parse_color);
        let line_style = ShapeStyle {
            color: line_color.mix(0.5),
            filled: false,
            stroke_width: 2,
        };
        let vertical = dash_segments((0.0, bounds.y_min), (0.0, bounds.y_max), REFERENCE_LINE_DASHES);
        let horizontal =
            dash_segments((bounds.x_min, 0.0), (bounds.x_max, 0.0), REFERENCE_LINE_DASHES);
        chart
            .draw_series(
                vertical
                    .into_iter()
                    .chain(horizontal)
                    .map(|(a, b)| PathElement::new(vec![a, b], line_style)),
            )
            .map_err(render_err)?;

        // One marker per bowler, named next to the point.
        let point_color = config
            .point_color
            .as_deref()
            .map_or(RGBColor(31, 119, 180), Self::parse_color);
        let label_style = ("sans-serif", config.label_font_size)
            .into_font()
            .color(&BLACK);
        chart
            .draw_series(summaries.iter().map(|summary| {
                EmptyElement::at((summary.mean_movement, summary.mean_bpl))
                    + Circle::new((0, 0), 5, point_color.filled())
                    + Text::new(summary.bowler.clone(), (8, -8), label_style.clone())
            }))
            .map_err(render_err)?;

        // Static quadrant annotations at the bounding box corners.
        for label in corner_labels(bounds) {
            let anchor = Pos::new(
                match label.h_anchor {
                    HAnchor::Left => HPos::Left,
                    HAnchor::Right => HPos::Right,
                },
                match label.v_anchor {
                    VAnchor::Top => VPos::Top,
                    VAnchor::Bottom => VPos::Bottom,
                },
            );
            let style = ("sans-serif", config.annotation_font_size)
                .into_font()
                .color(&BLACK)
                .pos(anchor);
            chart
                .draw_series(std::iter::once(Text::new(
                    label.text.to_string(),
                    label.at,
                    style,
                )))
                .map_err(render_err)?;
        }

        Ok(())
    }
}

impl ChartRenderer for QuadrantScatterRenderer {
    fn render_to_file(
        &self,
        config: &ChartConfig,
        summaries: &[BowlerSummary],
        path: &Path,
    ) -> Result<()> {
        let root =
            BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        self.draw(&root, config, summaries)?;
        root.present().map_err(render_err)?;

        info!(
            path = %path.display(),
            bowlers = summaries.len(),
            "rendered quadrant chart"
        );
        Ok(())
    }

    fn render_to_bytes(
        &self,
        config: &ChartConfig,
        summaries: &[BowlerSummary],
    ) -> Result<Vec<u8>> {
        let mut buffer =
            vec![0_u8; config.width as usize * config.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (config.width, config.height))
                .into_drawing_area();
            self.draw(&root, config, summaries)?;
            root.present().map_err(render_err)?;
        }

        let image = image::RgbImage::from_raw(config.width, config.height, buffer)
            .ok_or_else(|| SeamError::Render("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageOutputFormat::Png,
            )
            .map_err(|e| SeamError::Render(e.to_string()))?;
        Ok(bytes)
    }
}

impl Default for QuadrantScatterRenderer {
    fn default() -> Self {
        Self::new()
    }
}
