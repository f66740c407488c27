//! Environment-scoped configuration resolution.
//!
//! A logical config name is resolved in four steps:
//! 1. **Locate** - `<dir>/<name>.<ext>` across the search directories, in order
//! 2. **Parse** - YAML or JSON into a generic tree (`serde_json::Value`)
//! 3. **Scope** - the `all` section merged with the active environment's section
//! 4. **Override** - registered (target, search) rules promote a nested section
//!    over the whole tree
//!
//! Parsed files are memoized by absolute path ([`ConfigLoader`]); resolved
//! accessors are memoized by logical name ([`ConfigRepository`]).
//!
//! ## Merge Strategy
//! - Records: deep merge key by key, later layer wins
//! - Lists (sequences, or mappings keyed only by integers): replaced wholesale
//!
//! ## Environment Variables
//! - `ENVCONF_DIRS` - Search directories (default: `./config`, then the user config dir)
//! - `ENVCONF_ENV` - Active environment (default: `all`)
//! - `ENVCONF_FORMAT` - Preferred format: `auto`, `yaml` or `json`
//! - `ENVCONF_OVERRIDES` - Override rules: `target=search,target2=search2`

mod dig;
mod environment;
mod files;
mod format;
mod loader;
mod merge;
mod overrides;
mod repository;
mod types;

pub use dig::{dig, dig_or};
pub use environment::{COMMON_ENVIRONMENT, extract_environment};
pub use files::{candidate_file_names, find_config};
pub use format::{ConfigFormat, FormatPreference, KNOWN_FORMATS};
pub use loader::ConfigLoader;
pub use merge::{consists_of_numeric_keys, deep_merge, is_container};
pub use overrides::{OverrideRule, OverrideRules, apply_overrides};
pub use repository::ConfigRepository;
pub use types::*;
