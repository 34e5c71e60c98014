//! Cross-replication estimates
//!
//! Each replication is one independent observation of every reported metric.
//! The summary gives the sample mean, the sample standard deviation and a
//! normal-approximation confidence interval across replications.

use crate::report::ReplicationReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence level used for the report summary.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Point and interval estimate of one metric across replications
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub observations: usize,
    pub mean: f64,
    /// Sample standard deviation, 0.0 with fewer than two observations.
    pub std_dev: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl Estimate {
    /// Builds an estimate from independent observations.
    ///
    /// Returns `None` for an empty slice. With a single observation the
    /// interval collapses to the point.
    pub fn from_samples(samples: &[f64], confidence: f64) -> Option<Self> {
        let mean = mean(samples)?;
        let std_dev = sample_variance(samples).map_or(0.0, f64::sqrt);
        let half_width = z_for_confidence(confidence) * std_dev / (samples.len() as f64).sqrt();
        Some(Self {
            observations: samples.len(),
            mean,
            std_dev,
            ci_low: mean - half_width,
            ci_high: mean + half_width,
        })
    }
}

/// Estimates for every metric reported by a batch of replications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationSummary {
    pub replications: usize,
    pub confidence: f64,
    pub metrics: Vec<(String, Estimate)>,
}

impl ReplicationSummary {
    /// Summarises the reports at the given confidence level.
    ///
    /// Metric order follows [`ReplicationReport::metrics`] of the first report.
    pub fn from_reports(reports: &[ReplicationReport], confidence: f64) -> Self {
        let rows: Vec<Vec<(&'static str, f64)>> =
            reports.iter().map(ReplicationReport::metrics).collect();
        let mut metrics = Vec::new();
        if let Some(first) = rows.first() {
            for (index, (name, _)) in first.iter().enumerate() {
                let samples: Vec<f64> = rows
                    .iter()
                    .filter_map(|row| row.get(index).map(|(_, value)| *value))
                    .collect();
                if let Some(estimate) = Estimate::from_samples(&samples, confidence) {
                    metrics.push((name.to_string(), estimate));
                }
            }
        }
        Self {
            replications: reports.len(),
            confidence,
            metrics,
        }
    }

    /// Looks up the estimate for a metric by name.
    pub fn get(&self, name: &str) -> Option<&Estimate> {
        self.metrics
            .iter()
            .find(|(metric, _)| metric == name)
            .map(|(_, estimate)| estimate)
    }
}

impl fmt::Display for ReplicationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Summary over {} replications ({:.0}% confidence)",
            self.replications,
            self.confidence * 100.0
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<26}{:>10}{:>10}{:>22}",
            "metric", "mean", "std dev", "interval"
        )?;
        for (name, estimate) in &self.metrics {
            writeln!(
                f,
                "{:<26}{:10.3}{:10.3}    [{:8.3}, {:8.3}]",
                name, estimate.mean, estimate.std_dev, estimate.ci_low, estimate.ci_high
            )?;
        }
        Ok(())
    }
}

pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

pub fn sample_variance(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs)?;
    let mut acc = 0.0;
    for &x in xs {
        let d = x - m;
        acc += d * d;
    }
    Some(acc / (xs.len() as f64 - 1.0))
}

/// z-value for a symmetric confidence interval under a normal approximation.
///
/// For example, `confidence = 0.95` returns ~1.96.
///
/// # Panics
/// Panics if `confidence` is not in `(0, 1)`.
pub fn z_for_confidence(confidence: f64) -> f64 {
    assert!(
        confidence > 0.0 && confidence < 1.0,
        "confidence must be in (0, 1)"
    );
    inv_norm_cdf(0.5 + confidence / 2.0)
}

/// Inverse CDF (quantile) of the standard normal distribution.
///
/// Uses the Peter J. Acklam rational approximation.
fn inv_norm_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e+01,
        2.209_460_984_245_205e+02,
        -2.759_285_104_469_687e+02,
        1.383_577_518_672_690e+02,
        -3.066_479_806_614_716e+01,
        2.506_628_277_459_239e+00,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e+01,
        1.615_858_368_580_409e+02,
        -1.556_989_798_598_866e+02,
        6.680_131_188_771_972e+01,
        -1.328_068_155_288_572e+01,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-03,
        -3.223_964_580_411_365e-01,
        -2.400_758_277_161_838e+00,
        -2.549_732_539_343_734e+00,
        4.374_664_141_464_968e+00,
        2.938_163_982_698_783e+00,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-03,
        3.224_671_290_700_398e-01,
        2.445_134_137_142_996e+00,
        3.754_408_661_907_416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let tail = |q: f64| {
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p > P_HIGH {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    }
}
