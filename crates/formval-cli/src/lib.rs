//! # formval-cli — Command-Line Interface
//!
//! ## Subcommands
//!
//! - `check` — validate a view snapshot against a form schema and report
//!   the annotated element states
//! - `install` — copy the built library into a host application and
//!   register its resource root in the host manifest
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `formval-core` and `formval-schema`.
//! - Exit codes: 0 success, 1 validation failure, 2 operational error.

use std::path::{Path, PathBuf};

pub mod check;
pub mod install;

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_base() {
        assert_eq!(
            resolve_path(Path::new("schema.json"), Path::new("/work")),
            PathBuf::from("/work/schema.json")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        assert_eq!(
            resolve_path(Path::new("/etc/schema.json"), Path::new("/work")),
            PathBuf::from("/etc/schema.json")
        );
    }
}
