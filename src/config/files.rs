//! Config file location across search directories.
//!
//! Directories are searched in registration order; within a directory, candidate
//! file names are tried in order. The first existing file wins.

use super::format::{ConfigFormat, FormatPreference, KNOWN_FORMATS};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Candidate file names for a logical config name.
///
/// A name already carrying a known extension is used as is. Otherwise one name is
/// synthesised for the preferred format, or for every known format under `Auto`.
pub fn candidate_file_names(config_name: &str, preference: FormatPreference) -> Vec<String> {
    let has_known_extension = Path::new(config_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ConfigFormat::from_known_extension)
        .is_some();

    if has_known_extension {
        return vec![config_name.to_string()];
    }

    match preference {
        FormatPreference::Explicit(format) => {
            vec![format!("{}.{}", config_name, format.extension())]
        }
        FormatPreference::Auto => KNOWN_FORMATS
            .iter()
            .map(|format| format!("{}.{}", config_name, format.extension()))
            .collect(),
    }
}

/// Find the file for a logical config name.
///
/// Returns `None` when no candidate exists in any directory; that is not an error.
pub fn find_config(
    config_name: &str,
    config_dirs: &[PathBuf],
    preference: FormatPreference,
) -> Option<PathBuf> {
    let file_names = candidate_file_names(config_name, preference);

    for config_dir in config_dirs {
        for file_name in &file_names {
            let path = config_dir.join(file_name);
            if path.is_file() {
                debug!(config = config_name, path = %path.display(), "Located config file");
                return Some(path);
            }
        }
    }

    debug!(
        config = config_name,
        candidates = ?file_names,
        "No config file found in search directories"
    );
    None
}
