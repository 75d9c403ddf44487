use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

pub const DATA_DIR_NAME: &str = ".ticketpace";
pub const TICKETS_FILE_NAME: &str = "tickets.json";
pub const PROFILE_FILE_NAME: &str = "profile.json";

/// Resolves the data directory (`base_dir` or `~/.ticketpace`) and makes
/// sure it exists.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(DATA_DIR_NAME)
        }
    };
    fs::create_dir_all(&path)
        .with_context(|| format!("Could not create data directory {}", path.display()))?;
    Ok(path)
}
