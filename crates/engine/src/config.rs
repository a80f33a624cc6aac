//! Host configuration from environment variables
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `BLOCKFALL_DATA_DIR` | `.` | directory for `best-score.json` and `settings.json` |
//! | `BLOCKFALL_LOG_PATH` | unset | JSONL event log; unset or blank disables it |
//! | `BLOCKFALL_SEED` | unset | fixed seed for a reproducible piece sequence |

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            log_path: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = non_empty("BLOCKFALL_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_path = non_empty("BLOCKFALL_LOG_PATH").map(PathBuf::from);
        let seed = non_empty("BLOCKFALL_SEED").and_then(|s| s.parse().ok());

        Self {
            data_dir,
            log_path,
            seed,
        }
    }
}
