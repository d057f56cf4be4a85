//! Chart recommendation rules.
//!
//! Each rule is a predicate over the column inventory plus a generator for
//! the recommendation it produces. Rules live in a fixed-order table, so the
//! output order is a pure function of the inventory and adding a chart type
//! means adding a table entry.

use std::collections::HashSet;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::types::{
    ChartType, Column, ColumnKind, Dataset, RecommendationSet, VisualizationRecommendation,
};

/// Column names bucketed by kind, the input alphabet for the rule table.
#[derive(Debug, Default)]
struct ColumnInventory {
    numeric: Vec<String>,
    categorical: Vec<String>,
    temporal: Vec<String>,
    /// Categorical columns whose sampled distinct-value count stays within
    /// the pie-chart limit.
    low_cardinality_categorical: Vec<String>,
}

impl ColumnInventory {
    fn build(dataset: &Dataset, columns: &[Column], config: &AnalysisConfig) -> Self {
        let mut inventory = Self::default();
        for column in columns {
            match column.kind {
                ColumnKind::Numeric => inventory.numeric.push(column.name.clone()),
                ColumnKind::Temporal => inventory.temporal.push(column.name.clone()),
                ColumnKind::Categorical => {
                    inventory.categorical.push(column.name.clone());
                    let distinct = estimate_cardinality(dataset, &column.name, config);
                    if distinct > 0 && distinct <= config.pie_cardinality_limit {
                        inventory
                            .low_cardinality_categorical
                            .push(column.name.clone());
                    }
                }
            }
        }
        inventory
    }
}

/// Distinct non-missing values in a bounded row prefix.
fn estimate_cardinality(dataset: &Dataset, column: &str, config: &AnalysisConfig) -> usize {
    let mut distinct: HashSet<String> = HashSet::new();
    for row in dataset.rows.iter().take(config.cardinality_sample_rows) {
        if let Some(cell) = row.get(column) {
            if !cell.is_missing() {
                distinct.insert(cell.canonical());
            }
        }
    }
    distinct.len()
}

struct RecommendationRule {
    applies: fn(&ColumnInventory) -> bool,
    generate: fn(&ColumnInventory) -> VisualizationRecommendation,
}

fn recommendation(
    chart_type: ChartType,
    title: &str,
    description: &str,
    columns: Vec<String>,
    priority: u8,
) -> VisualizationRecommendation {
    VisualizationRecommendation {
        chart_type,
        title: title.to_string(),
        description: description.to_string(),
        columns,
        priority,
    }
}

static RULES: &[RecommendationRule] = &[
    RecommendationRule {
        applies: |inv| !inv.temporal.is_empty() && !inv.numeric.is_empty(),
        generate: |inv| {
            recommendation(
                ChartType::Line,
                "Time Series Trend",
                "Track numeric values over time",
                vec![inv.temporal[0].clone(), inv.numeric[0].clone()],
                10,
            )
        },
    },
    RecommendationRule {
        applies: |inv| !inv.temporal.is_empty() && !inv.numeric.is_empty(),
        generate: |inv| {
            recommendation(
                ChartType::Area,
                "Cumulative Trend",
                "Visualize cumulative changes over time",
                vec![inv.temporal[0].clone(), inv.numeric[0].clone()],
                9,
            )
        },
    },
    RecommendationRule {
        applies: |inv| !inv.numeric.is_empty(),
        generate: |inv| {
            recommendation(
                ChartType::Distribution,
                "Value Distribution",
                "Analyze distribution of numeric values",
                vec![inv.numeric[0].clone()],
                8,
            )
        },
    },
    RecommendationRule {
        applies: |inv| inv.numeric.len() >= 2,
        generate: |inv| {
            recommendation(
                ChartType::Scatter,
                "Correlation Analysis",
                "Find relationships between numeric columns",
                inv.numeric[..2].to_vec(),
                7,
            )
        },
    },
    RecommendationRule {
        applies: |inv| !inv.categorical.is_empty() && !inv.numeric.is_empty(),
        generate: |inv| {
            recommendation(
                ChartType::Bar,
                "Category Comparison",
                "Compare values across categories",
                vec![inv.categorical[0].clone(), inv.numeric[0].clone()],
                6,
            )
        },
    },
    RecommendationRule {
        applies: |inv| inv.numeric.len() >= 2,
        generate: |inv| {
            recommendation(
                ChartType::Comparison,
                "Multi-Metric Comparison",
                "Compare multiple numeric metrics",
                inv.numeric[..inv.numeric.len().min(3)].to_vec(),
                5,
            )
        },
    },
    RecommendationRule {
        applies: |inv| inv.numeric.len() >= 2,
        generate: |inv| {
            recommendation(
                ChartType::Radar,
                "Multi-Dimensional View",
                "Radar chart for comprehensive analysis",
                inv.numeric[..inv.numeric.len().min(3)].to_vec(),
                4,
            )
        },
    },
    RecommendationRule {
        applies: |inv| !inv.low_cardinality_categorical.is_empty() && !inv.numeric.is_empty(),
        generate: |inv| {
            recommendation(
                ChartType::Pie,
                "Composition Breakdown",
                "Show proportional distribution",
                vec![
                    inv.low_cardinality_categorical[0].clone(),
                    inv.numeric[0].clone(),
                ],
                3,
            )
        },
    },
];

/// Evaluates the rule table and ranks the hits.
pub struct ChartRecommender;

impl ChartRecommender {
    /// Produce ranked chart recommendations for the dataset.
    ///
    /// The first `top_n` recommendations by priority land in the primary
    /// list, the rest in the secondary list. Matching the fixed table order,
    /// equal priorities keep their relative position.
    pub fn recommend(
        dataset: &Dataset,
        columns: &[Column],
        top_n: usize,
        config: &AnalysisConfig,
    ) -> RecommendationSet {
        if dataset.is_empty() {
            return RecommendationSet::default();
        }

        let inventory = ColumnInventory::build(dataset, columns, config);
        let mut hits: Vec<VisualizationRecommendation> = RULES
            .iter()
            .filter(|rule| (rule.applies)(&inventory))
            .map(|rule| (rule.generate)(&inventory))
            .collect();

        hits.sort_by(|a, b| b.priority.cmp(&a.priority));

        debug!(candidates = hits.len(), top_n, "ranked chart recommendations");

        let rest = hits.split_off(hits.len().min(top_n));
        RecommendationSet { top: hits, rest }
    }
}
