use serde::{Deserialize, Serialize};

/// A description of the function being called.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalleeDescriptor {
    /// The fully qualified name of the callee. May be empty when the
    /// front-end could not resolve it; statistics lookups then simply
    /// find no rows.
    pub fully_qualified_name: String,
    /// The names of the callee's formal parameters, when known.
    /// Individual entries may be empty (unnamed parameters).
    pub param_names: Option<Vec<String>>,
    /// Whether the callee is variadic. Advisory only.
    pub is_variadic: Option<bool>,
    /// Whether the callee is a non-static member function. Advisory only.
    pub is_member: Option<bool>,
}

/// A single call site to check for swapped-argument errors.
///
/// Each positional argument is represented by the identifier names the
/// front-end extracted from its expression: `foo(bar.baz(), 0)` might
/// arrive as `[["baz"], ["LIT:0"]]`. An argument whose expression could
/// not be named contributes an empty list and is never reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallSite {
    pub callee: CalleeDescriptor,
    pub positional_arg_names: Vec<Vec<String>>,
}

impl CallSite {
    /// The parameter name at zero-based `pos`, if the callee declares one.
    pub(crate) fn param_name(&self, pos: usize) -> Option<&str> {
        self.callee
            .param_names
            .as_ref()?
            .get(pos)
            .map(String::as_str)
    }

    /// The last identifier of the argument at zero-based `pos`, if any.
    pub(crate) fn last_arg_name(&self, pos: usize) -> Option<&str> {
        self.positional_arg_names
            .get(pos)?
            .last()
            .map(String::as_str)
    }
}
