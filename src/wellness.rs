//! Weighted wellness score aggregation
//!
//! Combines per-category adherence percentages into one overall score. The
//! per-category weights live in a single named configuration rather than
//! being scattered as inline constants.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::Category;

/// Score assumed for categories the user does not track.
///
/// Untracked-but-optional habits get a neutral midpoint instead of 0 so an
/// unused feature never drags the overall score down.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Tolerance when checking that weights sum to 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-category weights for the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    pub medication: f64,
    pub water: f64,
    pub workout: f64,
    pub sleep: f64,
    pub food: f64,
    pub mood: f64,
    pub biometrics: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            medication: 0.25,
            water: 0.15,
            workout: 0.15,
            sleep: 0.20,
            food: 0.15,
            mood: 0.10,
            biometrics: 0.05,
        }
    }
}

impl WeightConfig {
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Medication => self.medication,
            Category::Water => self.water,
            Category::Workout => self.workout,
            Category::Sleep => self.sleep,
            Category::Food => self.food,
            Category::Mood => self.mood,
            Category::Biometrics => self.biometrics,
        }
    }

    /// Weights must be non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut sum = 0.0;
        for category in Category::ALL {
            let weight = self.weight(category);
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::InvalidWeights(format!(
                    "weight for {} is {}",
                    category.as_str(),
                    weight
                )));
            }
            sum += weight;
        }
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidWeights(format!(
                "weights sum to {} instead of 1.0",
                sum
            )));
        }
        Ok(())
    }
}

/// Aggregated wellness score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessScore {
    /// Weighted overall score, 0-100
    pub overall: f64,
    /// Lowest-scoring tracked category, the "balance" signal
    pub worst_component: Category,
}

impl WellnessScore {
    /// Integer score for display
    pub fn display_score(&self) -> u32 {
        self.overall.round() as u32
    }
}

/// Combine per-category component scores into one weighted overall score.
///
/// Categories missing from `component_scores` contribute [`NEUTRAL_SCORE`].
/// The worst component is chosen among the categories actually present;
/// with an empty map every category is tied at neutral and the first in
/// declaration order is reported.
pub fn wellness_score(
    component_scores: &HashMap<Category, f64>,
    weights: &WeightConfig,
) -> Result<WellnessScore, EngineError> {
    weights.validate()?;

    for (&category, &score) in component_scores {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(EngineError::ScoreOutOfRange {
                category: category.as_str(),
                value: score,
            });
        }
    }

    let mut overall = 0.0;
    for category in Category::ALL {
        let score = component_scores
            .get(&category)
            .copied()
            .unwrap_or(NEUTRAL_SCORE);
        overall += weights.weight(category) * score;
    }

    let mut worst_component = Category::ALL[0];
    let mut worst_score = f64::INFINITY;
    for category in Category::ALL {
        if let Some(&score) = component_scores.get(&category) {
            if score < worst_score {
                worst_score = score;
                worst_component = category;
            }
        }
    }

    Ok(WellnessScore {
        overall,
        worst_component,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn all_at(score: f64) -> HashMap<Category, f64> {
        Category::ALL.iter().map(|&c| (c, score)).collect()
    }

    #[test]
    fn test_default_weights_are_valid() {
        WeightConfig::default().validate().unwrap();
    }

    #[test]
    fn test_weights_not_summing_to_one_are_rejected() {
        let weights = WeightConfig {
            medication: 0.5,
            ..WeightConfig::default()
        };
        let err = wellness_score(&HashMap::new(), &weights).unwrap_err();
        assert!(matches!(err, EngineError::InvalidWeights(_)));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let weights = WeightConfig {
            medication: -0.25,
            water: 0.65,
            ..WeightConfig::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_all_components_at_100() {
        let score = wellness_score(&all_at(100.0), &WeightConfig::default()).unwrap();
        assert!((score.overall - 100.0).abs() < 1e-9);
        assert_eq!(score.display_score(), 100);
    }

    #[test]
    fn test_all_components_at_0() {
        let score = wellness_score(&all_at(0.0), &WeightConfig::default()).unwrap();
        assert!(score.overall.abs() < 1e-9);
        assert_eq!(score.display_score(), 0);
    }

    #[test]
    fn test_missing_categories_default_to_neutral() {
        let score = wellness_score(&HashMap::new(), &WeightConfig::default()).unwrap();
        assert!((score.overall - NEUTRAL_SCORE).abs() < 1e-9);
    }

    #[test]
    fn test_worst_component_is_minimum_tracked() {
        let mut scores = HashMap::new();
        scores.insert(Category::Medication, 90.0);
        scores.insert(Category::Sleep, 30.0);
        scores.insert(Category::Water, 60.0);
        let score = wellness_score(&scores, &WeightConfig::default()).unwrap();
        assert_eq!(score.worst_component, Category::Sleep);
    }

    #[test]
    fn test_untracked_category_cannot_be_worst() {
        // Mood at 40 is tracked; biometrics is untracked (neutral 50) and
        // must not be reported even though other tracked scores are higher.
        let mut scores = HashMap::new();
        scores.insert(Category::Medication, 95.0);
        scores.insert(Category::Mood, 40.0);
        let score = wellness_score(&scores, &WeightConfig::default()).unwrap();
        assert_eq!(score.worst_component, Category::Mood);
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let mut scores = HashMap::new();
        scores.insert(Category::Water, 140.0);
        let err = wellness_score(&scores, &WeightConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ScoreOutOfRange {
                category: "water",
                ..
            }
        ));
    }

    #[test]
    fn test_display_rounding() {
        let mut scores = all_at(0.0);
        scores.insert(Category::Medication, 100.0);
        scores.insert(Category::Sleep, 100.0);
        // medication 0.25 + sleep 0.20 => 45.0
        let score = wellness_score(&scores, &WeightConfig::default()).unwrap();
        assert_eq!(score.display_score(), 45);
    }
}
