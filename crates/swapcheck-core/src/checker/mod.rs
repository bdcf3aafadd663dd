//! The checker: pair enumeration and strategy dispatch.

mod cover;
mod stats;

use tracing::warn;
use weightsdb::WeightsDb;

use crate::config::CheckerConfiguration;
use crate::error::Result;
use crate::morphemes::{self, MorphemeSet};
use crate::report::SwapResult;
use crate::site::CallSite;
use crate::split::split_identifier;

/// Which detection strategies to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckMode {
    /// Parameter-name-driven checking only.
    Cover,
    /// Statistics-model-driven checking only.
    Stats,
    /// Cover-based first, statistics-based when it finds nothing.
    #[default]
    All,
}

impl CheckMode {
    fn runs_cover(self) -> bool {
        matches!(self, CheckMode::Cover | CheckMode::All)
    }

    fn runs_stats(self) -> bool {
        matches!(self, CheckMode::Stats | CheckMode::All)
    }
}

/// The swapped-argument checker.
///
/// Construction validates the configuration and, when a model path is
/// configured, opens the statistics store read-only for the checker's
/// lifetime. The checker holds no per-site state; [`Checker::check_site`]
/// may be called any number of times and never mutates its input.
pub struct Checker {
    pub(crate) opts: CheckerConfiguration,
    stats: Option<WeightsDb>,
}

impl Checker {
    pub fn new(opts: CheckerConfiguration) -> Result<Self> {
        opts.validate()?;
        let stats = match &opts.model_path {
            Some(path) => match WeightsDb::open(path) {
                Ok(db) => Some(db),
                Err(e) => {
                    // A model we cannot read is indistinguishable from no
                    // model: cover-based checking still runs.
                    warn!(path = %path.display(), error = %e, "statistics model unavailable");
                    None
                }
            },
            None => None,
        };
        Ok(Self { opts, stats })
    }

    /// Whether a statistics model is loaded.
    pub fn has_statistics(&self) -> bool {
        self.stats.is_some()
    }

    pub fn options(&self) -> &CheckerConfiguration {
        &self.opts
    }

    /// Checks every unordered pair of arguments at `site` for a swap.
    ///
    /// Results come back in pair-enumeration order (`(1,2), (1,3), …`),
    /// at most one per pair; the cover-based checker takes precedence
    /// over the statistics-based checker when both would fire. Repeated
    /// calls with identical inputs produce identical output.
    pub fn check_site(&self, site: &CallSite, mode: CheckMode) -> Vec<SwapResult> {
        let args = &site.positional_arg_names;
        if args.len() < 2 {
            return Vec::new();
        }

        let mut results = Vec::new();
        for i in 0..args.len() {
            for j in i + 1..args.len() {
                if let Some(result) = self.check_pair(site, mode, i, j) {
                    results.push(result);
                }
            }
        }
        results
    }

    fn check_pair(&self, site: &CallSite, mode: CheckMode, i: usize, j: usize) -> Option<SwapResult> {
        // An argument may lack a corresponding named parameter: variadic
        // tails (`void foo(int i, ...)`) and unnamed parameters
        // (`void foo(int, int j)`) both occur. Cover-based checking needs
        // both names; statistics-based checking needs neither.
        let param1 = site.param_name(i).filter(|name| !name.is_empty());
        let param2 = site.param_name(j).filter(|name| !name.is_empty());

        let mut arg1_morphemes = collect_argument_morphemes(site, i);
        let mut arg2_morphemes = collect_argument_morphemes(site, j);
        // An argument whose expression produced no usable morphemes
        // disqualifies the pair.
        if morphemes::remove_low_quality_morphemes(&mut arg1_morphemes.morphemes)
            || morphemes::remove_low_quality_morphemes(&mut arg2_morphemes.morphemes)
        {
            return None;
        }

        if let (Some(param1), Some(param2)) = (param1, param2) {
            let mut param1_morphemes = MorphemeSet::new(split_identifier(param1), i);
            let mut param2_morphemes = MorphemeSet::new(split_identifier(param2), j);
            // Same filter for parameters; a parameter with no usable
            // morphemes (`void foo(int i, int j)`) disqualifies the pair.
            if morphemes::remove_low_quality_morphemes(&mut param1_morphemes.morphemes)
                || morphemes::remove_low_quality_morphemes(&mut param2_morphemes.morphemes)
            {
                return None;
            }

            if mode.runs_cover() {
                if let Some(result) = self.check_for_cover_based_swap(
                    (&param1_morphemes, &param2_morphemes),
                    (&arg1_morphemes, &arg2_morphemes),
                    site,
                ) {
                    return Some(result);
                }
            }
        }

        if mode.runs_stats() {
            if let Some(stats) = &self.stats {
                return self.check_for_statistics_based_swap(
                    (&arg1_morphemes, &arg2_morphemes),
                    site,
                    stats,
                );
            }
        }

        None
    }
}

/// Splits every identifier of the argument at `pos` into one combined
/// set: `foo(bar.baz(), 0)` may contribute `{bar, baz}` for its first
/// argument.
fn collect_argument_morphemes(site: &CallSite, pos: usize) -> MorphemeSet {
    let mut set = MorphemeSet::new(Default::default(), pos);
    for name in &site.positional_arg_names[pos] {
        set.morphemes.extend(split_identifier(name));
    }
    set
}
