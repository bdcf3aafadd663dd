use std::collections::BTreeSet;

use serde::Serialize;

/// The checking strategy that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckerKind {
    ParameterNameBased,
    UsageStatisticsBased,
}

/// Evidence for a reported swap.
///
/// The headline [`score`](ScoreCard::score) is the checker's confidence
/// in a true positive; tools can map it into their native ranges.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind")]
pub enum ScoreCard {
    /// Produced by the cover-based checker from parameter-name evidence.
    ParameterNameBased {
        /// The worst of the two swapped-over-settled match ratios.
        score: f32,
        /// Whether the statistics-based checker also examined the pair.
        was_stats_checker_run: bool,
    },
    /// Produced by the statistics-based checker from the usage model.
    UsageStatisticsBased {
        /// Fitness of the first argument's morpheme at the second
        /// argument's position.
        fit1: f32,
        /// Fitness of the second argument's morpheme at the first
        /// argument's position.
        fit2: f32,
        /// Positional confidence for the first argument's morpheme.
        psi1: f32,
        /// Positional confidence for the second argument's morpheme.
        psi2: f32,
    },
}

impl ScoreCard {
    pub fn kind(&self) -> CheckerKind {
        match self {
            ScoreCard::ParameterNameBased { .. } => CheckerKind::ParameterNameBased,
            ScoreCard::UsageStatisticsBased { .. } => CheckerKind::UsageStatisticsBased,
        }
    }

    /// The headline confidence for this card.
    pub fn score(&self) -> f32 {
        match self {
            ScoreCard::ParameterNameBased { score, .. } => *score,
            ScoreCard::UsageStatisticsBased { fit1, fit2, .. } => fit1.max(*fit2),
        }
    }
}

/// A detected swapped-argument error at one call site.
#[derive(Debug, Clone, Serialize)]
pub struct SwapResult {
    /// One-based index of the first swapped argument; always less than
    /// `arg2`.
    pub arg1: usize,
    /// One-based index of the second swapped argument.
    pub arg2: usize,
    /// The morphemes of argument `arg1` that characterize the swap.
    pub morphemes1: BTreeSet<String>,
    /// The morphemes of argument `arg2` that characterize the swap.
    pub morphemes2: BTreeSet<String>,
    pub score: ScoreCard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_name_card_reports_its_score() {
        let card = ScoreCard::ParameterNameBased {
            score: 42.5,
            was_stats_checker_run: false,
        };
        assert_eq!(card.kind(), CheckerKind::ParameterNameBased);
        assert_eq!(card.score(), 42.5);
    }

    #[test]
    fn statistics_card_headline_is_best_fitness() {
        let card = ScoreCard::UsageStatisticsBased {
            fit1: 0.8,
            fit2: 0.95,
            psi1: 1.0,
            psi2: 1.0,
        };
        assert_eq!(card.kind(), CheckerKind::UsageStatisticsBased);
        assert_eq!(card.score(), 0.95);
    }
}
