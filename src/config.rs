use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Environment Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Skip audio synthesis in the engine.
    pub mute_audio: bool,
    /// Throttle stepping to the console's 60 Hz frame rate.
    pub real_time: bool,
    /// Episode frame limit. Stored and reported only; stepping ignores it.
    pub max_num_frames: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            mute_audio: true,
            real_time: false,
            max_num_frames: 0,
        }
    }
}

impl EnvConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open config: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EnvConfig = serde_json::from_str(r#"{ "real_time": true }"#).unwrap();
        assert_eq!(
            config,
            EnvConfig {
                real_time: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("nes-rl-env-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "mute_audio": false, "max_num_frames": 18000 }"#).unwrap();
        let config = EnvConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!config.mute_audio);
        assert_eq!(config.max_num_frames, 18_000);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EnvConfig::from_json_file("/nonexistent/env.json").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/env.json"));
    }
}
