//! Swapped-argument detection at call sites.
//!
//! Given a description of a single call site — callee name, formal
//! parameter names, and the identifier names appearing in each argument
//! expression — the [`Checker`] reports pairs of arguments whose order
//! looks inconsistent with the parameter names (cover-based checking) or
//! with statistically observed usage of the callee (statistics-based
//! checking, driven by a read-only [`weightsdb`] model).
//!
//! ```
//! use swapcheck_core::{CallSite, CalleeDescriptor, CheckMode, Checker, CheckerConfiguration};
//!
//! let checker = Checker::new(CheckerConfiguration::default()).unwrap();
//! let site = CallSite {
//!     callee: CalleeDescriptor {
//!         fully_qualified_name: "pen".into(),
//!         param_names: Some(vec!["cats".into(), "dogs".into()]),
//!         ..Default::default()
//!     },
//!     positional_arg_names: vec![vec!["dogs".into()], vec!["cats".into()]],
//! };
//! let results = checker.check_site(&site, CheckMode::All);
//! assert_eq!(results.len(), 1);
//! assert_eq!((results[0].arg1, results[0].arg2), (1, 2));
//! ```
//!
//! The engine never parses source text and never mutates its inputs; a
//! front-end reduces each argument expression to identifier names ahead
//! of time. Sites the engine cannot judge produce no results rather
//! than errors.

pub mod checker;
pub mod config;
pub mod error;
pub mod morphemes;
pub mod report;
pub mod site;
pub mod split;

pub use checker::{CheckMode, Checker};
pub use config::CheckerConfiguration;
pub use error::{CoreError, Result};
pub use report::{CheckerKind, ScoreCard, SwapResult};
pub use site::{CallSite, CalleeDescriptor};
pub use split::split_identifier;
