//! Data-driven game balance
//!
//! The six pour tunables. Hosts can override any subset from JSON
//! (LocalStorage on web, a file named by `LAW_ON_TAP_TUNING` natively).
//! Values are validated on load so an unreachable perfect band or an
//! overflow that can never trigger is rejected up front.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::PourOutcome;

/// Rejected tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("pour_rate must be positive, got {0}")]
    NonPositivePourRate(f32),
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("perfect band is empty: perfect_min {min} >= perfect_max {max}")]
    EmptyPerfectBand { min: f32, max: f32 },
    #[error("overflow_threshold {overflow} must be above perfect_max {perfect_max}")]
    OverflowBelowBand { overflow: f32, perfect_max: f32 },
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pour balance parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fill gained per second of pouring (percent/s)
    pub pour_rate: f32,
    /// Lowest fill that counts as perfect (inclusive)
    pub perfect_min: f32,
    /// Upper end of the perfect band (exclusive)
    pub perfect_max: f32,
    /// Fill at which the glass spills
    pub overflow_threshold: f32,
    /// Lockout after a spill
    pub spill_penalty_ms: f32,
    /// Releases at or below this fill are ignored
    pub minimum_dump_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            pour_rate: 40.0,
            perfect_min: 80.0,
            perfect_max: 96.0,
            overflow_threshold: 100.0,
            spill_penalty_ms: 2000.0,
            minimum_dump_threshold: 10.0,
        }
    }
}

impl Tuning {
    /// Check that every state of the pour is reachable
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("pour_rate", self.pour_rate),
            ("perfect_min", self.perfect_min),
            ("perfect_max", self.perfect_max),
            ("overflow_threshold", self.overflow_threshold),
            ("spill_penalty_ms", self.spill_penalty_ms),
            ("minimum_dump_threshold", self.minimum_dump_threshold),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field, value });
            }
        }

        if self.pour_rate <= 0.0 {
            return Err(TuningError::NonPositivePourRate(self.pour_rate));
        }
        if self.spill_penalty_ms < 0.0 {
            return Err(TuningError::Negative {
                field: "spill_penalty_ms",
                value: self.spill_penalty_ms,
            });
        }
        if self.minimum_dump_threshold < 0.0 {
            return Err(TuningError::Negative {
                field: "minimum_dump_threshold",
                value: self.minimum_dump_threshold,
            });
        }
        if self.perfect_min >= self.perfect_max {
            return Err(TuningError::EmptyPerfectBand {
                min: self.perfect_min,
                max: self.perfect_max,
            });
        }
        if self.overflow_threshold <= self.perfect_max {
            return Err(TuningError::OverflowBelowBand {
                overflow: self.overflow_threshold,
                perfect_max: self.perfect_max,
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Classify the fill level of a finished pour
    pub fn classify(&self, fill_level: f32) -> PourOutcome {
        if fill_level >= self.perfect_min && fill_level < self.perfect_max {
            PourOutcome::Perfect
        } else if fill_level > self.minimum_dump_threshold {
            PourOutcome::BadPour
        } else {
            PourOutcome::Negligible
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "law_on_tap_tuning";

    /// Environment variable naming a JSON tuning file (native only)
    pub const ENV_VAR: &'static str = "LAW_ON_TAP_TUNING";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning overrides from the file named by `LAW_ON_TAP_TUNING`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(e) => {
                log::error!("Failed to read tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides: {:?}", tuning);
                tuning
            }
            Err(e) => {
                log::error!("Rejected tuning overrides ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.pour_rate, 40.0);
        assert_eq!(tuning.perfect_min, 80.0);
        assert_eq!(tuning.perfect_max, 96.0);
        assert_eq!(tuning.overflow_threshold, 100.0);
        assert_eq!(tuning.spill_penalty_ms, 2000.0);
        assert_eq!(tuning.minimum_dump_threshold, 10.0);
    }

    #[test]
    fn test_classify_band_edges() {
        let tuning = Tuning::default();
        assert_eq!(tuning.classify(80.0), PourOutcome::Perfect);
        assert_eq!(tuning.classify(95.99), PourOutcome::Perfect);
        assert_eq!(tuning.classify(96.0), PourOutcome::BadPour);
        assert_eq!(tuning.classify(79.999), PourOutcome::BadPour);
        assert_eq!(tuning.classify(10.5), PourOutcome::BadPour);
        assert_eq!(tuning.classify(10.0), PourOutcome::Negligible);
        assert_eq!(tuning.classify(0.0), PourOutcome::Negligible);
    }

    #[test]
    fn test_rejects_empty_perfect_band() {
        let tuning = Tuning {
            perfect_min: 96.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyPerfectBand { .. })
        ));
    }

    #[test]
    fn test_rejects_overflow_inside_band() {
        let tuning = Tuning {
            overflow_threshold: 96.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OverflowBelowBand { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_rates() {
        let zero_rate = Tuning {
            pour_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero_rate.validate(),
            Err(TuningError::NonPositivePourRate(_))
        ));

        let nan_rate = Tuning {
            pour_rate: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_rate.validate(),
            Err(TuningError::NotFinite { field: "pour_rate", .. })
        ));

        let negative_penalty = Tuning {
            spill_penalty_ms: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            negative_penalty.validate(),
            Err(TuningError::Negative { field: "spill_penalty_ms", .. })
        ));
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "pour_rate": 25.0, "spill_penalty_ms": 500 }"#)
            .expect("valid override");
        assert_eq!(tuning.pour_rate, 25.0);
        assert_eq!(tuning.spill_penalty_ms, 500.0);
        // Untouched fields keep their defaults
        assert_eq!(tuning.perfect_min, 80.0);
        assert_eq!(tuning.perfect_max, 96.0);
    }

    #[test]
    fn test_json_override_is_validated() {
        let result = Tuning::from_json(r#"{ "perfect_min": 99.0 }"#);
        assert!(matches!(result, Err(TuningError::EmptyPerfectBand { .. })));

        let result = Tuning::from_json("not json");
        assert!(matches!(result, Err(TuningError::Parse(_))));
    }
}
