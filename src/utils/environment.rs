use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable that relocates the history directory
pub const DATA_DIR_ENV: &str = "QUESTION_HISTORY_DIR";

const DATA_DIR_NAME: &str = "question-history";

/// Resolve the history directory: explicit override, then `QUESTION_HISTORY_DIR`,
/// then `<platform data dir>/question-history`.
pub fn get_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }

    if let Some(dir) = env::var_os(DATA_DIR_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }

    let data_dir = dirs::data_dir().context("could not determine the platform data directory")?;
    Ok(data_dir.join(DATA_DIR_NAME))
}
