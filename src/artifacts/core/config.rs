//! Environment-driven settings
//!
//! | variable             | effect                                              |
//! |----------------------|-----------------------------------------------------|
//! | `GITLET_COMMIT_DATE` | fixed timestamp for new commits (RFC 2822 or        |
//! |                      | `%Y-%m-%d %H:%M:%S %z`), local clock otherwise      |
//! | `GITLET_DIR`         | repository root, current directory otherwise        |
//! | `GITLET_LOG`         | tracing filter for diagnostics (read by the binary) |

use anyhow::Context;
use chrono::{DateTime, FixedOffset, SubsecRound};
use std::path::PathBuf;

pub const COMMIT_DATE_VAR: &str = "GITLET_COMMIT_DATE";
pub const REPOSITORY_DIR_VAR: &str = "GITLET_DIR";
pub const LOG_FILTER_VAR: &str = "GITLET_LOG";

const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    commit_date: Option<DateTime<FixedOffset>>,
    repository_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(
        commit_date: Option<DateTime<FixedOffset>>,
        repository_dir: Option<PathBuf>,
    ) -> Self {
        Config {
            commit_date,
            repository_dir,
        }
    }

    pub fn load_from_env() -> anyhow::Result<Self> {
        let commit_date = match std::env::var(COMMIT_DATE_VAR) {
            Ok(raw) => Some(
                Self::parse_commit_date(&raw)
                    .with_context(|| format!("{COMMIT_DATE_VAR} is not a valid date: {raw}"))?,
            ),
            Err(_) => None,
        };
        let repository_dir = std::env::var_os(REPOSITORY_DIR_VAR).map(PathBuf::from);

        Ok(Config {
            commit_date,
            repository_dir,
        })
    }

    pub fn parse_commit_date(raw: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_str(raw, COMMIT_DATE_FORMAT))
            .context("expected RFC 2822 or YYYY-MM-DD HH:MM:SS +ZZZZ")
    }

    /// Timestamp to stamp on the next commit
    pub fn commit_timestamp(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset().trunc_subsecs(0))
    }

    pub fn repository_dir(&self) -> Option<&PathBuf> {
        self.repository_dir.as_ref()
    }
}
