//! Load → aggregate → render orchestration.

use seamviz_common::{BowlerSummary, Result};
use seamviz_data::DeliveryLoader;
use seamviz_graphs::{AggregationConfig, ChartConfig, ChartRenderer, DeviationAggregator};
use std::path::PathBuf;
use tracing::info;

/// Everything one invocation needs: where to read, where to write, and the
/// aggregation and chart configuration.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Path of the delivery CSV file.
    pub input: PathBuf,
    /// Path the chart PNG is written to.
    pub output: PathBuf,
    /// Aggregation configuration.
    pub aggregation: AggregationConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
}

/// Runs the whole pipeline once. Each run is independent and recomputes
/// everything from the input file; on any error no chart is written.
///
/// Returns the bowler summary that was plotted.
///
/// # Errors
///
/// Propagates loader, aggregation and rendering errors unchanged; see
/// [`seamviz_common::SeamError`].
pub fn run<R: ChartRenderer>(
    options: &PipelineOptions,
    renderer: &R,
) -> Result<Vec<BowlerSummary>> {
    info!(input = %options.input.display(), "loading deliveries");
    let deliveries = DeliveryLoader::new(&options.input).load()?;

    info!(rows = deliveries.len(), "aggregating bowler deviations");
    let aggregator = DeviationAggregator::new(options.aggregation.clone());
    let summaries = aggregator.aggregate(&deliveries)?;

    info!(
        bowlers = summaries.len(),
        output = %options.output.display(),
        "rendering quadrant chart"
    );
    renderer.render_to_file(&options.chart, &summaries, &options.output)?;

    Ok(summaries)
}
