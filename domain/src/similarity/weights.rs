//! Signal weights for the similarity score

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative weight of each similarity signal
///
/// Each weight lies in [0, 1] and the three sum to 1, which keeps the
/// combined score inside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    /// Rules-text TF-IDF cosine
    pub text_weight: f64,
    /// Type-line token overlap
    pub type_weight: f64,
    /// Color identity overlap
    pub color_weight: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            text_weight: 0.6,
            type_weight: 0.25,
            color_weight: 0.15,
        }
    }
}

impl SimilarityWeights {
    pub fn new(text_weight: f64, type_weight: f64, color_weight: f64) -> Self {
        Self {
            text_weight,
            type_weight,
            color_weight,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("text_weight", self.text_weight),
            ("type_weight", self.type_weight),
            ("color_weight", self.color_weight),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DomainError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let sum = self.text_weight + self.type_weight + self.color_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::InvalidConfig(format!(
                "similarity weights must sum to 1, got {}",
                sum
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimilarityWeights::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_weight() {
        let err = SimilarityWeights::new(1.2, -0.1, -0.1).validate().unwrap_err();
        assert!(err.to_string().contains("text_weight"));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        assert!(SimilarityWeights::new(0.5, 0.2, 0.2).validate().is_err());
        assert!(SimilarityWeights::new(1.0, 0.0, 0.0).validate().is_ok());
        assert!(SimilarityWeights::new(0.1, 0.2, 0.7).validate().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(SimilarityWeights::new(f64::NAN, 0.5, 0.5).validate().is_err());
    }
}
