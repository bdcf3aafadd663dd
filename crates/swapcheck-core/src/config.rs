use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Tuning knobs for the checker.
///
/// The defaults are tuned to bias against false positives. Unknown keys
/// are rejected when deserializing, so a typoed knob fails loudly
/// instead of silently running with defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfiguration {
    /// Path to the statistics model database. When unset, or when the
    /// file cannot be opened as a model, the statistics-based checker is
    /// disabled and only cover-based checking runs.
    pub model_path: Option<PathBuf>,
    /// Upper bound on how well arguments may match their declared
    /// positions before the cover-based checker loses interest in the
    /// pair.
    pub existing_morpheme_match_max: f32,
    /// Lower bound on how compelling the proposed swap must look to the
    /// cover-based checker.
    pub swapped_morpheme_match_min: f32,
    /// Positional-confidence ratio both candidate morphemes must exceed
    /// in the statistics-based checker.
    pub stats_swapped_morpheme_threshold: f32,
    /// Model fitness both candidate morphemes must exceed at their
    /// proposed positions.
    pub stats_swapped_fitness_threshold: f32,
}

impl Default for CheckerConfiguration {
    fn default() -> Self {
        Self {
            model_path: None,
            existing_morpheme_match_max: 0.5,
            swapped_morpheme_match_min: 0.75,
            stats_swapped_morpheme_threshold: 0.75,
            stats_swapped_fitness_threshold: 0.75,
        }
    }
}

impl CheckerConfiguration {
    /// Checks every knob against its documented range. Match and fitness
    /// thresholds compare against scores in [0, 1]; the morpheme
    /// confidence threshold compares against a ratio and only needs to
    /// be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        in_unit_interval(
            "existing_morpheme_match_max",
            self.existing_morpheme_match_max,
        )?;
        in_unit_interval("swapped_morpheme_match_min", self.swapped_morpheme_match_min)?;
        non_negative(
            "stats_swapped_morpheme_threshold",
            self.stats_swapped_morpheme_threshold,
        )?;
        in_unit_interval(
            "stats_swapped_fitness_threshold",
            self.stats_swapped_fitness_threshold,
        )?;
        Ok(())
    }
}

fn in_unit_interval(knob: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidConfiguration {
            knob,
            value,
            expected: "a value in [0, 1]",
        })
    }
}

fn non_negative(knob: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidConfiguration {
            knob,
            value,
            expected: "a finite value >= 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CheckerConfiguration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.existing_morpheme_match_max, 0.5);
        assert_eq!(config.swapped_morpheme_match_min, 0.75);
        assert_eq!(config.stats_swapped_morpheme_threshold, 0.75);
        assert_eq!(config.stats_swapped_fitness_threshold, 0.75);
        assert!(config.model_path.is_none());
    }

    #[test]
    fn match_thresholds_must_be_in_unit_interval() {
        let config = CheckerConfiguration {
            existing_morpheme_match_max: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CheckerConfiguration {
            swapped_morpheme_match_min: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CheckerConfiguration {
            stats_swapped_fitness_threshold: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn confidence_threshold_may_exceed_one() {
        let mut config = CheckerConfiguration {
            stats_swapped_morpheme_threshold: 2.5,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.stats_swapped_morpheme_threshold = f32::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializing_fills_defaults() {
        let config: CheckerConfiguration =
            serde_json::from_str(r#"{"existing_morpheme_match_max": 0.4}"#).unwrap();
        assert_eq!(config.existing_morpheme_match_max, 0.4);
        assert_eq!(config.swapped_morpheme_match_min, 0.75);
    }

    #[test]
    fn unknown_knobs_are_rejected() {
        let result =
            serde_json::from_str::<CheckerConfiguration>(r#"{"existing_morpheme_max": 0.4}"#);
        assert!(result.is_err());
    }
}
