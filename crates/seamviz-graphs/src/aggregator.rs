//! Aggregation pipeline turning raw deliveries into per-bowler mean
//! deviations from per-innings baselines.

use seamviz_common::{BowlerSummary, Delivery, InningsKey, Result, SeamError};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Spin variants excluded from movement/bounce analysis by default.
pub const DEFAULT_EXCLUDED_BOWLER_TYPES: [&str; 3] = ["RLB", "ROB", "LOB"];

/// Policy for deliveries whose bounce-per-length is undefined, i.e. a
/// `PitchX` of zero or an otherwise non-finite ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedPolicy {
    /// Drop the delivery, excluding it from every downstream mean.
    #[default]
    Exclude,
    /// Terminate the whole pipeline with a data error.
    Fail,
}

/// Configuration for the deviation aggregation pipeline.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Bowler type codes removed before any metric or baseline is computed.
    pub excluded_bowler_types: Vec<String>,
    /// Handling of undefined bounce-per-length values.
    pub undefined_policy: UndefinedPolicy,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            excluded_bowler_types: DEFAULT_EXCLUDED_BOWLER_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            undefined_policy: UndefinedPolicy::default(),
        }
    }
}

/// A delivery reduced to its grouping key and derived metrics.
#[derive(Debug, Clone)]
struct MetricRow {
    bowler: String,
    key: InningsKey,
    movement: f64,
    bounce_per_length: f64,
}

/// Running sums for one innings group or one bowler.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    movement_sum: f64,
    bpl_sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, movement: f64, bounce_per_length: f64) {
        self.movement_sum += movement;
        self.bpl_sum += bounce_per_length;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn means(self) -> (f64, f64) {
        let n = self.count as f64;
        (self.movement_sum / n, self.bpl_sum / n)
    }
}

/// Aggregator producing per-bowler mean deviations.
#[derive(Debug, Clone, Default)]
pub struct DeviationAggregator {
    config: AggregationConfig,
}

impl DeviationAggregator {
    /// Creates an aggregator with the given configuration.
    #[must_use]
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Runs the full aggregation: filter, per-delivery metrics, per-innings
    /// baselines, deviations, then per-bowler means.
    ///
    /// The result holds exactly one row per distinct bowler in the filtered
    /// input, ordered by first appearance.
    ///
    /// # Errors
    ///
    /// [`SeamError::EmptyResult`] when filtering leaves no rows, and
    /// [`SeamError::Data`] for an undefined bounce-per-length under
    /// [`UndefinedPolicy::Fail`].
    pub fn aggregate(&self, deliveries: &[Delivery]) -> Result<Vec<BowlerSummary>> {
        let rows = self.metric_rows(deliveries)?;
        if rows.is_empty() {
            return Err(SeamError::EmptyResult(
                "no deliveries left after filtering".to_string(),
            ));
        }

        // One group-by pass over innings keys; the means are broadcast back
        // onto each row instead of re-filtering the table per delivery.
        let mut groups: HashMap<InningsKey, Accumulator> = HashMap::new();
        for row in &rows {
            groups
                .entry(row.key.clone())
                .or_default()
                .push(row.movement, row.bounce_per_length);
        }

        // Per-bowler reduction of the deviations, in first-appearance order.
        let mut order: Vec<String> = Vec::new();
        let mut by_bowler: HashMap<String, Accumulator> = HashMap::new();
        for row in &rows {
            let (avg_movement, avg_bpl) = groups[&row.key].means();
            let entry = by_bowler.entry(row.bowler.clone()).or_insert_with(|| {
                order.push(row.bowler.clone());
                Accumulator::default()
            });
            entry.push(
                row.movement - avg_movement,
                row.bounce_per_length - avg_bpl,
            );
        }

        let summaries = order
            .into_iter()
            .map(|bowler| {
                let (mean_movement, mean_bpl) = by_bowler[&bowler].means();
                BowlerSummary {
                    bowler,
                    mean_movement,
                    mean_bpl,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            deliveries = rows.len(),
            innings = groups.len(),
            bowlers = summaries.len(),
            "aggregated bowler deviations"
        );
        Ok(summaries)
    }

    /// Filters out excluded bowler types and computes per-delivery metrics.
    /// Rows with an undefined bounce-per-length are handled per the
    /// configured policy before any grouping happens.
    fn metric_rows(&self, deliveries: &[Delivery]) -> Result<Vec<MetricRow>> {
        let mut rows = Vec::with_capacity(deliveries.len());

        for delivery in deliveries {
            if self
                .config
                .excluded_bowler_types
                .iter()
                .any(|t| t == &delivery.bowler_type)
            {
                continue;
            }

            let bounce_per_length = delivery.past_z / delivery.pitch_x;
            if !bounce_per_length.is_finite() {
                match self.config.undefined_policy {
                    UndefinedPolicy::Exclude => {
                        warn!(
                            bowler = %delivery.bowler,
                            pitch_x = delivery.pitch_x,
                            "undefined bounce-per-length, delivery excluded"
                        );
                        continue;
                    }
                    UndefinedPolicy::Fail => {
                        return Err(SeamError::Data(format!(
                            "undefined bounce-per-length for {} (PastZ = {}, PitchX = {})",
                            delivery.bowler, delivery.past_z, delivery.pitch_x
                        )));
                    }
                }
            }

            rows.push(MetricRow {
                bowler: delivery.bowler.clone(),
                key: InningsKey::of(delivery),
                movement: (delivery.past_y - delivery.pitch_y).abs(),
                bounce_per_length,
            });
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(
        innings: &str,
        bowler: &str,
        bowler_type: &str,
        past_z: f64,
        pitch_x: f64,
        past_y: f64,
        pitch_y: f64,
    ) -> Delivery {
        Delivery {
            date: "2023-06-01".to_string(),
            match_id: "M1".to_string(),
            innings: innings.to_string(),
            bowler: bowler.to_string(),
            bowler_type: bowler_type.to_string(),
            past_z,
            pitch_x,
            past_y,
            pitch_y,
        }
    }

    /// Builds a delivery with the desired movement and bounce-per-length
    /// directly: movement = |past_y - pitch_y|, bpl = past_z / pitch_x.
    fn delivery_with_metrics(
        innings: &str,
        bowler: &str,
        movement: f64,
        bpl: f64,
    ) -> Delivery {
        delivery(innings, bowler, "RF", bpl, 1.0, movement, 0.0)
    }

    fn aggregator() -> DeviationAggregator {
        DeviationAggregator::new(AggregationConfig::default())
    }

    #[test]
    fn test_shared_baseline_and_per_bowler_means() {
        // One innings context: A bowls twice (movement 1.0 / 3.0, bpl
        // 0.5 / 0.7), B once (movement 2.0, bpl 0.6). Group means are 2.0
        // and 0.6, so every deviation cancels to a mean of zero.
        let deliveries = vec![
            delivery_with_metrics("1", "A", 1.0, 0.5),
            delivery_with_metrics("1", "A", 3.0, 0.7),
            delivery_with_metrics("1", "B", 2.0, 0.6),
        ];

        let summaries = aggregator().aggregate(&deliveries).unwrap();
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].bowler, "A");
        assert!(summaries[0].mean_movement.abs() < 1e-12);
        assert!(summaries[0].mean_bpl.abs() < 1e-12);

        assert_eq!(summaries[1].bowler, "B");
        assert!(summaries[1].mean_movement.abs() < 1e-12);
        assert!(summaries[1].mean_bpl.abs() < 1e-12);
    }

    #[test]
    fn test_baselines_are_per_innings() {
        // Two innings with different group means. In innings 1 the mean
        // movement is 2.0, in innings 2 it is 6.0; A's deviations are
        // -1.0 and -2.0, so A's mean movement deviation is -1.5.
        let deliveries = vec![
            delivery_with_metrics("1", "A", 1.0, 0.5),
            delivery_with_metrics("1", "B", 3.0, 0.5),
            delivery_with_metrics("2", "A", 4.0, 0.5),
            delivery_with_metrics("2", "B", 8.0, 0.5),
        ];

        let summaries = aggregator().aggregate(&deliveries).unwrap();
        let a = &summaries[0];
        assert_eq!(a.bowler, "A");
        assert!((a.mean_movement - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_excluded_types_dropped_before_grouping() {
        // With the RLB delivery present the innings mean movement would be
        // 2.0; once it is filtered out the baseline comes from the two
        // remaining deliveries only (mean 1.5), so A's deviation is -0.5.
        let deliveries = vec![
            delivery_with_metrics("1", "A", 1.0, 0.5),
            delivery_with_metrics("1", "B", 2.0, 0.5),
            delivery("1", "Spinner", "RLB", 0.5, 1.0, 3.0, 0.0),
        ];

        let summaries = aggregator().aggregate(&deliveries).unwrap();
        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.bowler != "Spinner"));
        assert!((summaries[0].mean_movement - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_first_appearance_order() {
        let deliveries = vec![
            delivery_with_metrics("1", "C", 1.0, 0.5),
            delivery_with_metrics("1", "A", 2.0, 0.5),
            delivery_with_metrics("1", "C", 3.0, 0.5),
            delivery_with_metrics("1", "B", 4.0, 0.5),
        ];

        let summaries = aggregator().aggregate(&deliveries).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.bowler.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn test_singleton_group_has_zero_deviation() {
        let deliveries = vec![delivery_with_metrics("1", "A", 2.5, 0.8)];

        let summaries = aggregator().aggregate(&deliveries).unwrap();
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].mean_movement.abs() < 1e-12);
        assert!(summaries[0].mean_bpl.abs() < 1e-12);
    }

    #[test]
    fn test_all_rows_filtered_is_empty_result() {
        let deliveries = vec![
            delivery("1", "Spinner", "RLB", 0.5, 1.0, 1.0, 0.0),
            delivery("1", "Other Spinner", "LOB", 0.5, 1.0, 1.0, 0.0),
        ];

        let err = aggregator().aggregate(&deliveries).unwrap_err();
        assert!(matches!(err, SeamError::EmptyResult(_)));
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let err = aggregator().aggregate(&[]).unwrap_err();
        assert!(matches!(err, SeamError::EmptyResult(_)));
    }

    #[test]
    fn test_zero_pitch_x_excluded_by_default() {
        // The zero-length delivery disappears entirely, so it does not
        // drag the innings baseline either.
        let deliveries = vec![
            delivery_with_metrics("1", "A", 1.0, 0.5),
            delivery_with_metrics("1", "B", 3.0, 0.5),
            delivery("1", "A", "RF", 1.0, 0.0, 9.0, 0.0),
        ];

        let summaries = aggregator().aggregate(&deliveries).unwrap();
        assert_eq!(summaries.len(), 2);
        // Baseline from the two surviving rows: mean movement 2.0.
        assert!((summaries[0].mean_movement - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_pitch_x_fails_under_fail_policy() {
        let config = AggregationConfig {
            undefined_policy: UndefinedPolicy::Fail,
            ..AggregationConfig::default()
        };
        let deliveries = vec![delivery("1", "A", "RF", 1.0, 0.0, 9.0, 0.0)];

        let err = DeviationAggregator::new(config)
            .aggregate(&deliveries)
            .unwrap_err();
        assert!(matches!(err, SeamError::Data(_)));
    }

    #[test]
    fn test_excluded_set_is_configurable() {
        let config = AggregationConfig {
            excluded_bowler_types: vec!["RF".to_string()],
            ..AggregationConfig::default()
        };
        let deliveries = vec![
            delivery("1", "Quick", "RF", 0.5, 1.0, 1.0, 0.0),
            delivery("1", "Spinner", "RLB", 0.5, 1.0, 1.0, 0.0),
        ];

        let summaries = DeviationAggregator::new(config)
            .aggregate(&deliveries)
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].bowler, "Spinner");
    }

    #[test]
    fn test_idempotence() {
        let deliveries = vec![
            delivery_with_metrics("1", "A", 1.0, 0.5),
            delivery_with_metrics("1", "B", 3.0, 0.9),
            delivery_with_metrics("2", "A", 2.0, 0.4),
        ];

        let agg = aggregator();
        let first = agg.aggregate(&deliveries).unwrap();
        let second = agg.aggregate(&deliveries).unwrap();
        assert_eq!(first, second);
    }
}
