// srf-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::Result;

// Fallback when SRF_MODEL_DIR is not set or empty. Relative to the
// caller's working directory, matching where the training configs expect
// the recognizer weights.
const DEFAULT_MODEL_DIR: &str = "pretrained";

#[derive(Debug, Clone)]
pub struct Config {
    pub model_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading srf configuration");

        let model_dir_str = env::var("SRF_MODEL_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                debug!(
                    "SRF_MODEL_DIR environment variable not set or empty, falling back to default: {}",
                    DEFAULT_MODEL_DIR
                );
                DEFAULT_MODEL_DIR.to_string()
            });

        let model_dir = PathBuf::from(&model_dir_str);
        debug!("Effective model directory: {}", model_dir.display());

        Ok(Self { model_dir })
    }

    pub fn with_model_dir(model_dir: PathBuf) -> Self {
        Self { model_dir }
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    pub fn artifact_path(&self, artifact_name: &str) -> PathBuf {
        self.model_dir.join(artifact_name)
    }
}

pub fn load_config() -> Result<Config> {
    Config::load()
}
