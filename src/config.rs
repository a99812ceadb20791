use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One project to mine: where its code and tickets live, and how its
/// release tags are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub tracker_key: String,
    pub tracker_url: String,
    pub git_url: String,
    /// Regex with a `name` capture group selecting the canonical version
    pub tag_pattern: String,
}

/// Complete run configuration: the list of projects to analyze.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_projects")]
    pub projects: Vec<ProjectConfig>,
}

/// Returns the built-in project list (the two Apache projects the tool
/// was originally calibrated on).
fn default_projects() -> Vec<ProjectConfig> {
    vec![
        ProjectConfig {
            name: "bookkeeper".to_string(),
            tracker_key: "BOOKKEEPER".to_string(),
            tracker_url: "https://issues.apache.org".to_string(),
            git_url: "https://github.com/apache/bookkeeper".to_string(),
            tag_pattern: r"^(refs\/tags\/)(.*)(?<name>\d+\.\d+\.\d+)$".to_string(),
        },
        ProjectConfig {
            name: "openjpa".to_string(),
            tracker_key: "OPENJPA".to_string(),
            tracker_url: "https://issues.apache.org".to_string(),
            git_url: "https://github.com/apache/openjpa".to_string(),
            tag_pattern: r"^(refs\/tags\/)(?<name>\d+\.\d+\.\d+)$".to_string(),
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            projects: default_projects(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `repo-miner.toml` in current directory
/// 3. `.repo-miner.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./repo-miner.toml").exists() {
        fs::read_to_string("./repo-miner.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".repo-miner.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
