//! JSON Lines call-site frontend.
//!
//! Reads one call-site record per line and produces the engine's
//! [`CallSite`] values:
//!
//! ```json
//! {"function": "memcpy", "params": ["dst", "src", "n"],
//!  "args": ["dst_buf", "src_buf", "sizeof(buf)"]}
//! ```
//!
//! Each argument is either a single expression string — reduced to an
//! identifier by [`expr_names`] — or a pre-exploded array of identifier
//! names that is used verbatim. `params`, `variadic`, and `member` are
//! optional.

pub mod expr_names;

use std::io::BufRead;

use serde::Deserialize;
use swapcheck_core::{CallSite, CalleeDescriptor};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    /// A line was not a valid call-site record.
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrontendError>;

/// One argument in a record: an expression to be named, or names the
/// producer already extracted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawArgument {
    Expression(String),
    Names(Vec<String>),
}

/// The on-the-wire shape of a call-site record.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCallSite {
    #[serde(default)]
    function: String,
    #[serde(default)]
    params: Option<Vec<String>>,
    #[serde(default)]
    variadic: Option<bool>,
    #[serde(default)]
    member: Option<bool>,
    args: Vec<RawArgument>,
}

impl From<RawCallSite> for CallSite {
    fn from(raw: RawCallSite) -> Self {
        let positional_arg_names = raw
            .args
            .into_iter()
            .map(|arg| match arg {
                RawArgument::Names(names) => names,
                RawArgument::Expression(expr) => {
                    expr_names::expr_name(&expr).into_iter().collect()
                }
            })
            .collect();
        CallSite {
            callee: CalleeDescriptor {
                fully_qualified_name: raw.function,
                param_names: raw.params,
                is_variadic: raw.variadic,
                is_member: raw.member,
            },
            positional_arg_names,
        }
    }
}

/// Parses a single call-site record.
pub fn parse_call_site(json: &str) -> serde_json::Result<CallSite> {
    Ok(serde_json::from_str::<RawCallSite>(json)?.into())
}

/// Reads call sites from JSON Lines input. Blank lines are skipped; a
/// malformed line fails the whole read, naming the line number.
pub fn read_call_sites<R: BufRead>(reader: R) -> Result<Vec<CallSite>> {
    let mut sites = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let site = parse_call_site(&line).map_err(|source| FrontendError::Malformed {
            line: idx + 1,
            source,
        })?;
        sites.push(site);
    }
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_record() {
        let site = parse_call_site(
            r#"{"function": "memcpy", "params": ["dst", "src", "n"],
                "variadic": false, "member": false,
                "args": ["dst_buf", "src_buf", "sizeof(buf)"]}"#,
        )
        .unwrap();

        assert_eq!(site.callee.fully_qualified_name, "memcpy");
        assert_eq!(
            site.callee.param_names,
            Some(vec!["dst".into(), "src".into(), "n".into()])
        );
        assert_eq!(site.callee.is_variadic, Some(false));
        assert_eq!(site.callee.is_member, Some(false));
        assert_eq!(
            site.positional_arg_names,
            vec![
                vec!["dst_buf".to_string()],
                vec!["src_buf".to_string()],
                vec!["sizeof".to_string()],
            ]
        );
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let site = parse_call_site(r#"{"args": ["a", "b"]}"#).unwrap();
        assert_eq!(site.callee.fully_qualified_name, "");
        assert_eq!(site.callee.param_names, None);
        assert_eq!(site.callee.is_variadic, None);
        assert_eq!(site.callee.is_member, None);
    }

    #[test]
    fn exploded_arguments_are_used_verbatim() {
        let site = parse_call_site(r#"{"args": [["bar", "baz"], "quux"]}"#).unwrap();
        assert_eq!(
            site.positional_arg_names,
            vec![
                vec!["bar".to_string(), "baz".to_string()],
                vec!["quux".to_string()],
            ]
        );
    }

    #[test]
    fn unnameable_expressions_become_empty_argument_entries() {
        let site = parse_call_site(r#"{"args": ["a + b", "count"]}"#).unwrap();
        assert_eq!(
            site.positional_arg_names,
            vec![Vec::<String>::new(), vec!["count".to_string()]]
        );
    }

    #[test]
    fn unknown_record_fields_are_rejected() {
        assert!(parse_call_site(r#"{"args": [], "callee": "oops"}"#).is_err());
    }

    #[test]
    fn reads_json_lines_and_skips_blanks() {
        let input = "\
{\"function\": \"f\", \"args\": [\"a\", \"b\"]}\n\
\n\
{\"function\": \"g\", \"args\": [[\"x\"], [\"y\"]]}\n";
        let sites = read_call_sites(input.as_bytes()).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].callee.fully_qualified_name, "f");
        assert_eq!(sites[1].callee.fully_qualified_name, "g");
    }

    #[test]
    fn malformed_lines_name_their_line_number() {
        let input = "{\"function\": \"f\", \"args\": [\"a\"]}\nnot json\n";
        let err = read_call_sites(input.as_bytes()).unwrap_err();
        match err {
            FrontendError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected a malformed-line error, got {other:?}"),
        }
    }
}
