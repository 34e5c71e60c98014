//! Simulation parameters and how they are loaded
//!
//! Parameters come from either a JSON document holding a full
//! [`TandemConfig`], or the classic parameter file: four whitespace-separated
//! numbers giving the mean interarrival time, the two mean service times and
//! the run length, all in minutes. Anything the classic file does not carry
//! keeps its default.

use crate::error::TandemError;
use des_components::{validate_finite, validate_non_negative, validate_positive, ValidationResult};
use des_metrics::ReportHeading;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Largest number of customers a waiting line may hold.
pub const DEFAULT_QUEUE_LIMIT: usize = 100;
/// Independent replications per run.
pub const DEFAULT_REPLICATIONS: usize = 10;
pub const DEFAULT_SEED: u64 = 12345;

/// Parameters of one simulation run
///
/// # Example
///
/// ```
/// use des_tandem::TandemConfig;
///
/// let config = TandemConfig::new(1.0, 0.5, 0.5, 1000.0)
///     .with_transit_bound(2.0)
///     .with_replications(5);
/// assert!(config.validate().is_ok());
/// assert!(config.has_transit_link());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TandemConfig {
    pub mean_interarrival: f64,
    pub mean_service_stage1: f64,
    pub mean_service_stage2: f64,
    /// Simulated minutes per replication.
    pub run_length: f64,
    #[serde(default = "default_queue_limit")]
    pub queue_limit: usize,
    /// Upper bound of the uniform travel time between the stages; `None`
    /// when stage 1 feeds stage 2 directly.
    #[serde(default)]
    pub transit_bound: Option<f64>,
    #[serde(default = "default_replications")]
    pub replications: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_queue_limit() -> usize {
    DEFAULT_QUEUE_LIMIT
}

fn default_replications() -> usize {
    DEFAULT_REPLICATIONS
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for TandemConfig {
    fn default() -> Self {
        Self::new(1.0, 0.5, 0.5, 1000.0)
    }
}

impl TandemConfig {
    /// Create a configuration without a transit link and default limits
    pub fn new(
        mean_interarrival: f64,
        mean_service_stage1: f64,
        mean_service_stage2: f64,
        run_length: f64,
    ) -> Self {
        Self {
            mean_interarrival,
            mean_service_stage1,
            mean_service_stage2,
            run_length,
            queue_limit: DEFAULT_QUEUE_LIMIT,
            transit_bound: None,
            replications: DEFAULT_REPLICATIONS,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_queue_limit(mut self, queue_limit: usize) -> Self {
        self.queue_limit = queue_limit;
        self
    }

    /// Model travel time between the stages, uniform on `[0, bound)`
    pub fn with_transit_bound(mut self, bound: f64) -> Self {
        self.transit_bound = Some(bound);
        self
    }

    pub fn without_transit(mut self) -> Self {
        self.transit_bound = None;
        self
    }

    pub fn with_replications(mut self, replications: usize) -> Self {
        self.replications = replications;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_run_length(mut self, run_length: f64) -> Self {
        self.run_length = run_length;
        self
    }

    pub fn has_transit_link(&self) -> bool {
        self.transit_bound.is_some()
    }

    /// Mean service time of each stage, stage 1 first
    pub fn mean_service(&self) -> [f64; 2] {
        [self.mean_service_stage1, self.mean_service_stage2]
    }

    /// Checks everything a single engine needs
    ///
    /// Means and the transit bound must be positive and finite, the queue
    /// limit at least 1. A run length of zero is accepted here so a
    /// degenerate replication can still be built and inspected.
    pub fn validate_parameters(&self) -> ValidationResult<()> {
        for (field, value) in [
            ("mean_interarrival", self.mean_interarrival),
            ("mean_service_stage1", self.mean_service_stage1),
            ("mean_service_stage2", self.mean_service_stage2),
        ] {
            validate_finite(field, value)?;
            validate_positive(field, value)?;
        }
        validate_finite("run_length", self.run_length)?;
        validate_non_negative("run_length", self.run_length)?;
        validate_positive("queue_limit", self.queue_limit)?;
        if let Some(bound) = self.transit_bound {
            validate_finite("transit_bound", bound)?;
            validate_positive("transit_bound", bound)?;
        }
        Ok(())
    }

    /// Checks a configuration before any replication runs
    ///
    /// On top of [`TandemConfig::validate_parameters`], the run length must
    /// be positive and at least one replication requested.
    pub fn validate(&self) -> ValidationResult<()> {
        self.validate_parameters()?;
        validate_positive("run_length", self.run_length)?;
        validate_positive("replications", self.replications)?;
        Ok(())
    }

    /// Input parameters as printed above the report
    pub fn heading(&self) -> ReportHeading {
        ReportHeading {
            mean_interarrival: self.mean_interarrival,
            mean_service: self.mean_service(),
            run_length: self.run_length,
            transit_bound: self.transit_bound,
        }
    }

    /// Load a configuration file
    ///
    /// Files with a `.json` extension are read as JSON; anything else uses
    /// the classic four-number format. The result is not validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TandemError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TandemError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&text).map_err(|source| TandemError::ConfigJson {
                path: path.to_path_buf(),
                source,
            })
        } else {
            text.parse().map_err(|source| TandemError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Problems with a classic parameter file
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseConfigError {
    #[error("missing value for {0}")]
    Missing(&'static str),

    #[error("invalid number '{value}' for {field}")]
    InvalidNumber { field: &'static str, value: String },
}

impl FromStr for TandemConfig {
    type Err = ParseConfigError;

    /// Parse the classic format: interarrival, service 1, service 2 and run
    /// length. Tokens after the fourth are ignored.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = text.split_whitespace();
        let mut next = |field: &'static str| -> Result<f64, ParseConfigError> {
            let token = tokens.next().ok_or(ParseConfigError::Missing(field))?;
            token
                .parse::<f64>()
                .map_err(|_| ParseConfigError::InvalidNumber {
                    field,
                    value: token.to_string(),
                })
        };

        let mean_interarrival = next("mean_interarrival")?;
        let mean_service_stage1 = next("mean_service_stage1")?;
        let mean_service_stage2 = next("mean_service_stage2")?;
        let run_length = next("run_length")?;
        Ok(Self::new(
            mean_interarrival,
            mean_service_stage1,
            mean_service_stage2,
            run_length,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use des_components::ValidationError;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_defaults() {
        let config = TandemConfig::default();
        assert_eq!(config.queue_limit, 100);
        assert_eq!(config.replications, 10);
        assert_eq!(config.seed, 12345);
        assert!(!config.has_transit_link());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_classic_format() {
        let config: TandemConfig = "1.0 0.7\n0.9   1000\n".parse().unwrap();
        assert_eq!(config.mean_interarrival, 1.0);
        assert_eq!(config.mean_service(), [0.7, 0.9]);
        assert_eq!(config.run_length, 1000.0);
        assert_eq!(config.queue_limit, DEFAULT_QUEUE_LIMIT);
    }

    #[test]
    fn test_parse_classic_errors() {
        assert_eq!(
            "1.0 0.5 0.5".parse::<TandemConfig>().unwrap_err(),
            ParseConfigError::Missing("run_length")
        );
        assert_eq!(
            "1.0 fast 0.5 10".parse::<TandemConfig>().unwrap_err(),
            ParseConfigError::InvalidNumber {
                field: "mean_service_stage1",
                value: "fast".to_string()
            }
        );
    }

    #[test]
    fn test_validation_rejects_bad_parameters() {
        let bad = [
            TandemConfig::new(0.0, 0.5, 0.5, 10.0),
            TandemConfig::new(1.0, -0.5, 0.5, 10.0),
            TandemConfig::new(1.0, 0.5, f64::NAN, 10.0),
            TandemConfig::new(f64::INFINITY, 0.5, 0.5, 10.0),
            TandemConfig::new(1.0, 0.5, 0.5, -1.0),
            TandemConfig::default().with_queue_limit(0),
            TandemConfig::default().with_transit_bound(0.0),
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
            assert!(config.validate_parameters().is_err());
        }
    }

    #[test]
    fn test_zero_run_length_only_passes_parameter_check() {
        let config = TandemConfig::new(1.0, 0.5, 0.5, 0.0);
        assert!(config.validate_parameters().is_ok());
        assert_eq!(
            config.validate().unwrap_err(),
            ValidationError::ConstraintViolation {
                field: "run_length".to_string(),
                constraint: "positive".to_string()
            }
        );

        assert!(TandemConfig::default()
            .with_replications(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_load_classic_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0 0.5 0.6 480.0").unwrap();

        let config = TandemConfig::load(file.path()).unwrap();
        assert_eq!(config, TandemConfig::new(1.0, 0.5, 0.6, 480.0));
    }

    #[test]
    fn test_load_json_file_with_defaults() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"mean_interarrival": 1.0, "mean_service_stage1": 0.5,
                "mean_service_stage2": 0.5, "run_length": 100.0,
                "transit_bound": 2.0, "seed": 7}}"#
        )
        .unwrap();

        let config = TandemConfig::load(file.path()).unwrap();
        assert_eq!(config.transit_bound, Some(2.0));
        assert_eq!(config.seed, 7);
        assert_eq!(config.replications, DEFAULT_REPLICATIONS);
        assert_eq!(config.queue_limit, DEFAULT_QUEUE_LIMIT);
    }

    #[test]
    fn test_load_errors() {
        let missing = TandemConfig::load("/nonexistent/tandem.in").unwrap_err();
        assert!(matches!(missing, TandemError::ConfigRead { .. }));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0 0.5").unwrap();
        let short = TandemConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            short,
            TandemError::ConfigParse {
                source: ParseConfigError::Missing("mean_service_stage2"),
                ..
            }
        ));

        let mut json = Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, "{{ not json").unwrap();
        assert!(matches!(
            TandemConfig::load(json.path()).unwrap_err(),
            TandemError::ConfigJson { .. }
        ));
    }

    #[test]
    fn test_heading() {
        let heading = TandemConfig::new(1.0, 0.5, 0.7, 60.0)
            .with_transit_bound(2.0)
            .heading();
        assert_eq!(heading.mean_service, [0.5, 0.7]);
        assert_eq!(heading.transit_bound, Some(2.0));
        assert_eq!(heading.run_length, 60.0);
    }
}
