//! Main entry point for the seamviz CLI.

use clap::Parser;
use seamviz_cli::{self as cli, PipelineOptions};
use seamviz_graphs::{
    AggregationConfig, ChartConfig, QuadrantScatterRenderer, UndefinedPolicy,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bowling movement and bounce-per-length deviation analysis.
#[derive(Parser)]
#[command(name = "seamviz", version, about)]
struct Cli {
    /// Input delivery CSV file
    #[arg(long)]
    input: PathBuf,

    /// Output chart PNG file
    #[arg(long)]
    output: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Comma-separated bowler type codes to exclude from the analysis
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Fail instead of dropping deliveries with an undefined
    /// bounce-per-length (PitchX of zero)
    #[arg(long)]
    fail_on_undefined: bool,
}

impl Cli {
    fn into_options(self) -> PipelineOptions {
        let mut aggregation = AggregationConfig::default();
        if let Some(exclude) = self.exclude {
            aggregation.excluded_bowler_types = exclude;
        }
        if self.fail_on_undefined {
            aggregation.undefined_policy = UndefinedPolicy::Fail;
        }

        let mut chart = ChartConfig {
            width: self.width,
            height: self.height,
            ..ChartConfig::default()
        };
        if let Some(title) = self.title {
            chart.title = title;
        }

        PipelineOptions {
            input: self.input,
            output: self.output,
            aggregation,
            chart,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seamviz=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = Cli::parse().into_options();
    info!("starting seamviz pipeline");

    match cli::run(&options, &QuadrantScatterRenderer::new()) {
        Ok(summaries) => {
            info!(
                bowlers = summaries.len(),
                output = %options.output.display(),
                "chart written"
            );
            Ok(())
        }
        Err(e) => {
            error!("pipeline failed: {e}");
            Err(e.into())
        }
    }
}
