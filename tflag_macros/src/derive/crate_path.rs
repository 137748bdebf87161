//! Where generated code finds the `tflag` runtime.
//!
//! Every item the derive emits is spelled `<path>::Item`. The path is
//! `tflag` unless the struct carries `#[tflag(crate = "...")]`, which is
//! needed when the runtime is only reachable under another name, e.g.
//! through a re-export or a renamed dependency.

use syn::{Path, parse_quote};

/// The runtime path: the struct's override, or `tflag`.
pub(crate) fn runtime_path(override_path: Option<&Path>) -> Path {
    override_path
        .cloned()
        .unwrap_or_else(|| parse_quote!(tflag))
}
