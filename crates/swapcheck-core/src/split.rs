use std::collections::BTreeSet;

/// Splits an identifier into its set of lowercased morphemes.
///
/// `_` is a hard word boundary and a lowercase→uppercase transition is a
/// soft one, so `foo_barBaz` yields `{foo, bar, baz}`. Consecutive,
/// leading, and trailing underscores emit nothing. Runs are
/// ASCII-lowercased before insertion, collapsing duplicates that differ
/// only in case; non-ASCII characters pass through unchanged.
pub fn split_identifier(identifier: &str) -> BTreeSet<String> {
    let mut morphemes = BTreeSet::new();
    let mut run = String::new();
    let mut prev_was_lower = false;

    for c in identifier.chars() {
        if c == '_' {
            if !run.is_empty() {
                morphemes.insert(std::mem::take(&mut run));
            }
        } else if c.is_ascii_uppercase() && prev_was_lower {
            // The run cannot be empty here: the previous character was
            // lowercase and is part of it.
            morphemes.insert(std::mem::take(&mut run));
            run.push(c.to_ascii_lowercase());
        } else {
            run.push(c.to_ascii_lowercase());
        }
        prev_was_lower = c.is_ascii_lowercase();
    }
    if !run.is_empty() {
        morphemes.insert(run);
    }

    morphemes
}
