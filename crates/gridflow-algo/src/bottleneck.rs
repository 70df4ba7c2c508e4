//! Line loading analysis.
//!
//! Utilization is `flow / capacity * 100`. Lines without capacity have no
//! utilization and never show up as bottlenecks.

use gridflow_core::{GridError, GridResult, Line, LineKey, Network};
use serde::Serialize;

/// Utilization (percent) at or above which a line is reported by default
pub const DEFAULT_THRESHOLD_PCT: f64 = 90.0;

/// Start of the elevated loading band (percent)
pub const ELEVATED_THRESHOLD_PCT: f64 = 70.0;

/// A line loaded at or above the requested threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub line: LineKey,
    pub capacity_mw: f64,
    pub flow_mw: f64,
    pub utilization_pct: f64,
}

impl Bottleneck {
    pub fn band(&self) -> LoadingBand {
        LoadingBand::classify(Some(self.utilization_pct))
    }
}

impl std::fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {:.1}/{:.1} MW ({:.1}%)",
            self.line, self.flow_mw, self.capacity_mw, self.utilization_pct
        )
    }
}

/// Coarse loading classification of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingBand {
    /// Zero capacity
    Unrated,
    Normal,
    Elevated,
    Congested,
}

impl LoadingBand {
    pub fn classify(utilization_pct: Option<f64>) -> Self {
        match utilization_pct {
            None => LoadingBand::Unrated,
            Some(u) if u >= DEFAULT_THRESHOLD_PCT => LoadingBand::Congested,
            Some(u) if u >= ELEVATED_THRESHOLD_PCT => LoadingBand::Elevated,
            Some(_) => LoadingBand::Normal,
        }
    }

    pub fn for_line(line: &Line) -> Self {
        Self::classify(line_utilization(line))
    }

    /// Drawing colour used by the renderers
    pub fn color(&self) -> &'static str {
        match self {
            LoadingBand::Unrated => "gray",
            LoadingBand::Normal => "green",
            LoadingBand::Elevated => "orange",
            LoadingBand::Congested => "red",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadingBand::Unrated => "unrated",
            LoadingBand::Normal => "normal",
            LoadingBand::Elevated => "elevated",
            LoadingBand::Congested => "congested",
        }
    }
}

impl std::fmt::Display for LoadingBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Utilization of a line in percent, `None` for zero capacity
pub fn line_utilization(line: &Line) -> Option<f64> {
    line.flow.percent_of(line.capacity)
}

/// Lines whose utilization is at least `threshold_pct`, most loaded first.
///
/// Ties are ordered by line identity. The threshold must lie in `[0, 100]`.
pub fn find_bottlenecks(network: &Network, threshold_pct: f64) -> GridResult<Vec<Bottleneck>> {
    if !(0.0..=100.0).contains(&threshold_pct) {
        return Err(GridError::InvalidAttribute(format!(
            "bottleneck threshold must be within [0, 100] percent, got {threshold_pct}"
        )));
    }

    let mut found: Vec<Bottleneck> = network
        .lines()
        .into_iter()
        .filter_map(|line| {
            let utilization = line_utilization(line)?;
            (utilization >= threshold_pct).then(|| Bottleneck {
                line: line.key(),
                capacity_mw: line.capacity.value(),
                flow_mw: line.flow.value(),
                utilization_pct: utilization,
            })
        })
        .collect();

    found.sort_by(|a, b| {
        b.utilization_pct
            .total_cmp(&a.utilization_pct)
            .then_with(|| a.line.cmp(&b.line))
    });
    Ok(found)
}
