//! Optional YAML configuration for the CLI.
//!
//! ```yaml
//! database: /opt/cea/thermo.inp
//! eval_mode: extrapolate
//! parse:
//!   markers:
//!     condensed_start: first_condensed_phase
//! ```

use crate::error::CliResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use td_inp::ParseOptions;
use td_poly::EvalMode;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Database used when neither `--db` nor `THERMO_INP` is given.
    pub database: Option<PathBuf>,
    pub parse: ParseOptions,
    pub eval_mode: EvalMode,
}

impl CliConfig {
    pub fn from_yaml(text: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load_yaml(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
