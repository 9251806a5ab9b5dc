use serde::{Deserialize, Serialize};

/// Points awarded for removing matched tokens.
///
/// The first step of a cascade scores `removed × points_per_token`. Every
/// later step in the same cascade (a chain link) is multiplied by
/// `chain_multiplier` once; the multiplier does not compound with chain length.
///
/// # Examples
///
/// ```
/// use gemfall_game::ScoreRules;
///
/// let rules = ScoreRules::default();
/// assert_eq!(rules.step_points(3, false), 30);
/// assert_eq!(rules.step_points(4, true), 80);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRules {
    /// Points for each removed token.
    pub points_per_token: u64,
    /// Factor applied to every step after the first.
    pub chain_multiplier: u64,
}

impl ScoreRules {
    /// Points per token in the reference rules.
    pub const DEFAULT_POINTS_PER_TOKEN: u64 = 10;
    /// Chain factor in the reference rules.
    pub const DEFAULT_CHAIN_MULTIPLIER: u64 = 2;

    /// Creates scoring rules.
    #[must_use]
    pub const fn new(points_per_token: u64, chain_multiplier: u64) -> Self {
        Self {
            points_per_token,
            chain_multiplier,
        }
    }

    /// Returns the points for one cascade step that removed `removed` tokens.
    #[must_use]
    pub fn step_points(&self, removed: usize, chain_link: bool) -> u64 {
        let removed = u64::try_from(removed).unwrap_or(u64::MAX);
        let base = removed.saturating_mul(self.points_per_token);
        if chain_link {
            base.saturating_mul(self.chain_multiplier)
        } else {
            base
        }
    }
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_POINTS_PER_TOKEN,
            Self::DEFAULT_CHAIN_MULTIPLIER,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_multiplier_is_flat() {
        let rules = ScoreRules::default();
        assert_eq!(rules.step_points(3, false), 30);
        assert_eq!(rules.step_points(3, true), 60);
        assert_eq!(rules.step_points(5, true), 100);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ScoreRules::new(7, 3);
        assert_eq!(rules.step_points(4, false), 28);
        assert_eq!(rules.step_points(4, true), 84);
    }

    #[test]
    fn test_saturates() {
        let rules = ScoreRules::new(u64::MAX, 2);
        assert_eq!(rules.step_points(3, true), u64::MAX);
    }
}
