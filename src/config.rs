//! Markdownlint config file discovery.
//!
//! When a tool call does not supply an explicit config path, we walk from the
//! target file's directory up to the filesystem root looking for one of the
//! config filenames markdownlint recognizes. The nearest directory with a
//! match wins; within a directory, candidates are tried in declaration order.

use std::path::{Path, PathBuf};

/// Config filenames recognized by markdownlint, in priority order.
pub const CONFIG_FILENAMES: &[&str] = &[
    ".markdownlint.json",
    ".markdownlint.jsonc",
    ".markdownlintrc",
];

/// Find a markdownlint config file applicable to `file_path`.
///
/// Searches the file's own directory first, then each ancestor up to the
/// root. Returns `None` when no ancestor contains a recognized config file —
/// absence is a normal result, not an error. Only existence checks are
/// performed; the config contents are left to the linter itself.
pub fn find_config(file_path: &Path) -> Option<PathBuf> {
    let start = if file_path.is_dir() {
        file_path
    } else {
        file_path.parent()?
    };

    for dir in start.ancestors() {
        for name in CONFIG_FILENAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    None
}
