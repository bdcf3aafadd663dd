//! Morpheme sets and the match arithmetic shared by both checkers.

use std::collections::BTreeSet;

/// A set of lowercased morphemes tagged with the zero-based call-site
/// position (parameter or argument index) it was derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphemeSet {
    pub morphemes: BTreeSet<String>,
    pub position: usize,
}

impl MorphemeSet {
    pub fn new(morphemes: BTreeSet<String>, position: usize) -> Self {
        Self {
            morphemes,
            position,
        }
    }

    /// The morphemes of `self` not present in `other`. The result keeps
    /// `self`'s position: it describes what distinguishes this side.
    pub fn difference(&self, other: &MorphemeSet) -> MorphemeSet {
        MorphemeSet {
            morphemes: non_low_entropy_difference(&self.morphemes, &other.morphemes),
            position: self.position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.morphemes.is_empty()
    }
}

/// Aggregation bias for [`morphemes_match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Keep the best per-morpheme score.
    Optimistic,
    /// Keep the worst per-morpheme score.
    Pessimistic,
}

/// 1.0 when `morpheme` has a synonym in `potential_synonyms`, else 0.0.
///
/// Synonymy is currently literal membership; abbreviation and thesaurus
/// handling can slot in here without changing any caller.
pub fn any_are_synonyms(morpheme: &str, potential_synonyms: &BTreeSet<String>) -> f32 {
    if potential_synonyms.contains(morpheme) {
        1.0
    } else {
        0.0
    }
}

/// Scores how well the morphemes of `arg` account for the morphemes of
/// `param`: each parameter morpheme is scored by [`any_are_synonyms`]
/// against the argument set, and the per-morpheme scores are folded
/// with max (optimistic) or min (pessimistic). Both sets must be
/// non-empty.
pub fn morphemes_match(arg: &BTreeSet<String>, param: &BTreeSet<String>, bias: Bias) -> f32 {
    debug_assert!(
        !arg.is_empty() && !param.is_empty(),
        "morpheme matching requires non-empty sets"
    );
    let scores = param.iter().map(|p| any_are_synonyms(p, arg));
    match bias {
        Bias::Optimistic => scores.fold(0.0, f32::max),
        Bias::Pessimistic => scores.fold(1.0, f32::min),
    }
}

/// The set difference `lhs \ rhs`.
///
/// The name reserves a future filter that also drops low-entropy
/// morphemes from the result; today it is a plain difference.
pub fn non_low_entropy_difference(
    lhs: &BTreeSet<String>,
    rhs: &BTreeSet<String>,
) -> BTreeSet<String> {
    lhs.difference(rhs).cloned().collect()
}

/// Removes low-quality morphemes (obvious index names like `i` or `j`,
/// for instance) from `set`. Returns true when the set is empty
/// afterwards, in which case the caller drops the pair under
/// examination.
///
/// The current policy keeps everything; the hook exists so policy can
/// tighten without an API change.
pub fn remove_low_quality_morphemes(set: &mut BTreeSet<String>) -> bool {
    set.is_empty()
}
