//! Statistics-based swap detection: the usage model is the evidence.

use std::collections::BTreeSet;

use tracing::debug;
use weightsdb::WeightsDb;

use super::Checker;
use crate::morphemes::MorphemeSet;
use crate::report::{ScoreCard, SwapResult};
use crate::site::CallSite;

impl Checker {
    /// Decides whether the argument pair looks transposed relative to
    /// the callee's observed usage. Parameter names play no role here.
    pub(super) fn check_for_statistics_based_swap(
        &self,
        args: (&MorphemeSet, &MorphemeSet),
        site: &CallSite,
        stats: &WeightsDb,
    ) -> Option<SwapResult> {
        let (arg1, arg2) = args;
        let unique1 = arg1.difference(arg2);
        let unique2 = arg2.difference(arg1);
        let func = site.callee.fully_qualified_name.as_str();

        for morph1 in &unique1.morphemes {
            for morph2 in &unique2.morphemes {
                // How much more common is each morpheme at the other
                // argument's position than at its own? Low confidence on
                // either side means this pair of morphemes is not a
                // commonly swapped one.
                let psi1 = self.morpheme_confidence_at_position(
                    stats,
                    func,
                    morph1,
                    unique2.position,
                    unique1.position,
                );
                let psi2 = self.morpheme_confidence_at_position(
                    stats,
                    func,
                    morph2,
                    unique1.position,
                    unique2.position,
                );
                if psi1 <= self.opts.stats_swapped_morpheme_threshold
                    || psi2 <= self.opts.stats_swapped_morpheme_threshold
                {
                    continue;
                }

                // Only a single-morpheme transposition against an
                // otherwise shared context counts: with the candidates
                // removed, both sides must agree exactly.
                let residual1: BTreeSet<&String> = unique1
                    .morphemes
                    .iter()
                    .filter(|m| *m != morph1)
                    .collect();
                let residual2: BTreeSet<&String> = unique2
                    .morphemes
                    .iter()
                    .filter(|m| *m != morph2)
                    .collect();
                if residual1 != residual2 {
                    continue;
                }

                // Each morpheme must also genuinely suit the position it
                // would move to.
                let fit1 = self.fitness(stats, func, morph1, arg2.position);
                let fit2 = self.fitness(stats, func, morph2, arg1.position);
                if fit1 > self.opts.stats_swapped_fitness_threshold
                    && fit2 > self.opts.stats_swapped_fitness_threshold
                {
                    return Some(SwapResult {
                        arg1: arg1.position + 1,
                        arg2: arg2.position + 1,
                        morphemes1: unique1.morphemes.clone(),
                        morphemes2: unique2.morphemes.clone(),
                        score: ScoreCard::UsageStatisticsBased {
                            fit1,
                            fit2,
                            psi1,
                            psi2,
                        },
                    });
                }
            }
        }

        None
    }

    /// The ratio of how common `morpheme` is at `pos` versus at
    /// `compared_to_pos` for `func`. No evidence at either position is
    /// 0.0; evidence only at `pos` counts as full-strength 1.0.
    fn morpheme_confidence_at_position(
        &self,
        stats: &WeightsDb,
        func: &str,
        morpheme: &str,
        pos: usize,
        compared_to_pos: usize,
    ) -> f32 {
        let at_pos = self.weight_or_zero(stats, func, pos, morpheme);
        let at_compared = self.weight_or_zero(stats, func, compared_to_pos, morpheme);
        if at_compared == 0.0 {
            if at_pos != 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            at_pos / at_compared
        }
    }

    /// How well `morpheme` would suit `pos` given the distribution the
    /// model observed there: a similarity-weighted sum over the rows,
    /// 0.0 when the position has none.
    fn fitness(&self, stats: &WeightsDb, func: &str, morpheme: &str, pos: usize) -> f32 {
        let rows = match stats.morphemes_and_weights_at(func, pos) {
            Ok(Some(rows)) => rows,
            Ok(None) => return 0.0,
            Err(e) => {
                debug!(func, pos, error = %e, "weights query failed");
                return 0.0;
            }
        };
        rows.iter()
            .map(|(candidate, weight)| similarity(morpheme, candidate) * weight)
            .sum()
    }

    fn weight_or_zero(&self, stats: &WeightsDb, func: &str, pos: usize, morpheme: &str) -> f32 {
        match stats.weight_at(func, pos, morpheme) {
            Ok(weight) => weight,
            Err(e) => {
                debug!(func, pos, morpheme, error = %e, "weights query failed");
                0.0
            }
        }
    }
}

/// Exact-match similarity between two morphemes.
///
/// The fitness sum is written against this seam so that a graded
/// abbreviation- or synonym-aware similarity in [0, 1] can slot in with
/// no other changes.
fn similarity(morph1: &str, morph2: &str) -> f32 {
    if morph1 == morph2 {
        1.0
    } else {
        0.0
    }
}
