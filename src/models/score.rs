use serde::{Deserialize, Serialize};

/// Aggregate [0,1] measure of how completely and positively a product's
/// question set was answered, plus per-dimension breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransparencyScores {
    pub transparency: f64,
    pub health: f64,
    pub environmental: f64,
    pub social: f64,
}

impl TransparencyScores {
    /// Accumulator start for the model-backed scoring pass.
    pub const ZERO: TransparencyScores = TransparencyScores {
        transparency: 0.0,
        health: 0.0,
        environmental: 0.0,
        social: 0.0,
    };

    /// Baseline for the heuristic fallback pass.
    pub fn neutral() -> Self {
        TransparencyScores {
            transparency: 0.5,
            health: 0.5,
            environmental: 0.5,
            social: 0.5,
        }
    }

    pub fn in_bounds(&self) -> bool {
        [self.transparency, self.health, self.environmental, self.social]
            .iter()
            .all(|s| (0.0..=1.0).contains(s))
    }
}
