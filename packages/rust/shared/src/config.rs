//! Project configuration for quizdocs.
//!
//! Config lives at `<project root>/quizdocs.toml`. Every section is optional;
//! missing values fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{QuizDocsError, Result};
use crate::locale::Locales;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "quizdocs.toml";

// ---------------------------------------------------------------------------
// Config structs (matching quizdocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory and file naming.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Published locales.
    #[serde(default)]
    pub locales: Locales,

    /// Link targets used in badges.
    #[serde(default)]
    pub links: LinksConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory (relative to the root) holding one folder per quiz.
    #[serde(default = "default_questions_dir")]
    pub questions_dir: String,

    /// Base name of the index and per-quiz documents, without extension.
    #[serde(default = "default_index_name")]
    pub index_name: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            questions_dir: default_questions_dir(),
            index_name: default_index_name(),
        }
    }
}

fn default_questions_dir() -> String {
    "questions".into()
}
fn default_index_name() -> String {
    "README".into()
}

/// `[links]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Short-link site serving play/solutions/answer redirects.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Source repository, used for absolute README links.
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    /// Branch used in absolute README links.
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            repo_url: default_repo_url(),
            branch: default_branch(),
        }
    }
}

fn default_site_url() -> String {
    "https://tsch.js.org".into()
}
fn default_repo_url() -> String {
    "https://github.com/type-challenges/type-challenges".into()
}
fn default_branch() -> String {
    "main".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a project root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the project config. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| QuizDocsError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        QuizDocsError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Write a default config file into `root`. Refuses to overwrite.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(QuizDocsError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| QuizDocsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| QuizDocsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check cross-field constraints serde cannot express.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let locales = &config.locales;
    if locales.supported.is_empty() {
        return Err(QuizDocsError::config("locales.supported must not be empty"));
    }
    if !locales.is_supported(&locales.default) {
        return Err(QuizDocsError::config(format!(
            "default locale '{}' is not listed in locales.supported",
            locales.default
        )));
    }

    for (field, value) in [
        ("links.site_url", &config.links.site_url),
        ("links.repo_url", &config.links.repo_url),
    ] {
        Url::parse(value)
            .map_err(|e| QuizDocsError::config(format!("{field} '{value}' is not a URL: {e}")))?;
    }

    if config.paths.questions_dir.trim().is_empty() {
        return Err(QuizDocsError::config("paths.questions_dir must not be empty"));
    }

    Ok(())
}
