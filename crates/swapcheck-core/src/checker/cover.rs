//! Cover-based swap detection: parameter names are the evidence.

use super::Checker;
use crate::morphemes::{self, Bias, MorphemeSet};
use crate::report::{ScoreCard, SwapResult};
use crate::site::CallSite;

impl Checker {
    /// Decides whether the argument pair looks transposed relative to
    /// its parameter pair. All four sets are non-empty on entry.
    pub(super) fn check_for_cover_based_swap(
        &self,
        params: (&MorphemeSet, &MorphemeSet),
        args: (&MorphemeSet, &MorphemeSet),
        site: &CallSite,
    ) -> Option<SwapResult> {
        let (param1, param2) = params;
        let (arg1, arg2) = args;

        // The check only reasons about full covers, so each argument must
        // carry exactly as many morphemes as its parameter.
        if param1.morphemes.len() != param2.morphemes.len()
            || arg1.morphemes.len() != arg2.morphemes.len()
            || param1.morphemes.len() != arg1.morphemes.len()
        {
            return None;
        }

        // Strip the shared morphemes; what remains is what distinguishes
        // the two positions from each other.
        let unique_param1 =
            morphemes::non_low_entropy_difference(&param1.morphemes, &param2.morphemes);
        let unique_param2 =
            morphemes::non_low_entropy_difference(&param2.morphemes, &param1.morphemes);
        let unique_arg1 = morphemes::non_low_entropy_difference(&arg1.morphemes, &arg2.morphemes);
        let unique_arg2 = morphemes::non_low_entropy_difference(&arg2.morphemes, &arg1.morphemes);
        if unique_param1.is_empty()
            || unique_param2.is_empty()
            || unique_arg1.is_empty()
            || unique_arg2.is_empty()
        {
            return None;
        }

        // If the arguments look at all at home where they are, bail out.
        let mm_a1_p1 = morphemes::morphemes_match(&unique_arg1, &unique_param1, Bias::Optimistic);
        if mm_a1_p1 > self.opts.existing_morpheme_match_max {
            return None;
        }
        let mm_a2_p2 = morphemes::morphemes_match(&unique_arg2, &unique_param2, Bias::Optimistic);
        if mm_a2_p2 > self.opts.existing_morpheme_match_max {
            return None;
        }

        // If they look at all wrong after the proposed swap, bail out too.
        let mm_a1_p2 = morphemes::morphemes_match(&unique_arg1, &unique_param2, Bias::Pessimistic);
        if mm_a1_p2 < self.opts.swapped_morpheme_match_min {
            return None;
        }
        let mm_a2_p1 = morphemes::morphemes_match(&unique_arg2, &unique_param1, Bias::Pessimistic);
        if mm_a2_p1 < self.opts.swapped_morpheme_match_min {
            return None;
        }

        // Counterpart identifiers that differ only in a numeric suffix
        // (`horses1`/`horses2`) describe deliberate ordering, not a swap.
        let param_name1 = site.param_name(param1.position)?;
        let param_name2 = site.param_name(param2.position)?;
        if differ_only_by_numeric_suffix(param_name1, param_name2) {
            return None;
        }
        let arg_name1 = site.last_arg_name(arg1.position)?;
        let arg_name2 = site.last_arg_name(arg2.position)?;
        if differ_only_by_numeric_suffix(arg_name1, arg_name2) {
            return None;
        }

        let psi_i = mm_a1_p2 / (mm_a2_p2 + 0.01);
        let psi_j = mm_a2_p1 / (mm_a1_p1 + 0.01);

        Some(SwapResult {
            arg1: arg1.position + 1,
            arg2: arg2.position + 1,
            morphemes1: unique_arg1,
            morphemes2: unique_arg2,
            score: ScoreCard::ParameterNameBased {
                score: psi_i.min(psi_j),
                was_stats_checker_run: false,
            },
        })
    }
}

/// True when both identifiers end in an ASCII digit and differ only in
/// that trailing digit.
fn differ_only_by_numeric_suffix(one: &str, two: &str) -> bool {
    let (Some(suffix1), Some(suffix2)) = (one.chars().last(), two.chars().last()) else {
        return false;
    };
    suffix1.is_ascii_digit()
        && suffix2.is_ascii_digit()
        && one[..one.len() - 1] == two[..two.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::differ_only_by_numeric_suffix;

    #[test]
    fn numeric_suffix_pairs_are_detected() {
        assert!(differ_only_by_numeric_suffix("horses1", "horses2"));
        assert!(differ_only_by_numeric_suffix("horses3", "horses3"));
    }

    #[test]
    fn differing_prefixes_are_not_suffix_pairs() {
        assert!(!differ_only_by_numeric_suffix("horses1", "goats2"));
    }

    #[test]
    fn both_sides_must_end_in_a_digit() {
        assert!(!differ_only_by_numeric_suffix("horses1", "horses"));
        assert!(!differ_only_by_numeric_suffix("horses", "horses2"));
        assert!(!differ_only_by_numeric_suffix("horses", "horses"));
    }

    #[test]
    fn empty_names_are_not_suffix_pairs() {
        assert!(!differ_only_by_numeric_suffix("", "1"));
        assert!(!differ_only_by_numeric_suffix("", ""));
    }
}
