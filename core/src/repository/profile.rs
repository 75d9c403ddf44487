use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{data_dir, PROFILE_FILE_NAME};
use crate::model::goal::GoalProfile;
use crate::repository::traits::GoalProfileRepository;

#[derive(Clone)]
pub struct FileGoalProfileRepository {
    file_path: PathBuf,
}

impl FileGoalProfileRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let file_path = data_dir(base_dir)?.join(PROFILE_FILE_NAME);
        Ok(Self { file_path })
    }
}

impl GoalProfileRepository for FileGoalProfileRepository {
    fn get(&self) -> Result<GoalProfile> {
        if !self.file_path.exists() {
            debug!("no saved profile, using defaults");
            return Ok(GoalProfile::default());
        }
        let content = fs::read_to_string(&self.file_path)?;
        let profile: GoalProfile = serde_json::from_str(&content)
            .with_context(|| format!("Could not parse {}", self.file_path.display()))?;
        profile
            .validate()
            .with_context(|| format!("Invalid profile in {}", self.file_path.display()))?;
        Ok(profile)
    }

    fn set(&self, profile: &GoalProfile) -> Result<()> {
        let content = serde_json::to_string_pretty(profile)?;
        fs::write(&self.file_path, content)?;
        debug!(path = %self.file_path.display(), "saved profile");
        Ok(())
    }
}
