//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/decitree/decitree.toml`
//! 3. Local config: `<dir>/.decitree.toml` (`-C <dir>`, default cwd)
//! 4. Environment variables: `DECITREE_*` prefix, `__` for nested keys

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::{QuestionId, ResultPayload};

/// Default pause between answering and advancing, in milliseconds.
pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 300;

/// Prompt text shown for each question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuestionPrompts {
    pub q1: String,
    pub q2: String,
    pub q3: String,
}

impl Default for QuestionPrompts {
    fn default() -> Self {
        Self {
            q1: "Question 1".into(),
            q2: "Question 2".into(),
            q3: "Question 3".into(),
        }
    }
}

impl QuestionPrompts {
    pub fn prompt(&self, question: QuestionId) -> &str {
        match question {
            QuestionId::Q1 => &self.q1,
            QuestionId::Q2 => &self.q2,
            QuestionId::Q3 => &self.q3,
        }
    }

    fn merge(&self, overlay: &RawQuestionPrompts) -> Self {
        Self {
            q1: overlay.q1.clone().unwrap_or_else(|| self.q1.clone()),
            q2: overlay.q2.clone().unwrap_or_else(|| self.q2.clone()),
            q3: overlay.q3.clone().unwrap_or_else(|| self.q3.clone()),
        }
    }
}

/// Raw prompts for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawQuestionPrompts {
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub transition_delay_ms: Option<u64>,
    pub show_progress: Option<bool>,
    pub show_breadcrumbs: Option<bool>,
    pub link_base: Option<String>,
    #[serde(default)]
    pub questions: RawQuestionPrompts,
}

/// Unified configuration for decitree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Pause between recording an answer and advancing (default: 300)
    pub transition_delay_ms: u64,
    /// Show the "Step N of 3" progress line
    pub show_progress: bool,
    /// Show the Q1 › Q2 › Q3 breadcrumb trail
    pub show_breadcrumbs: bool,
    /// Prefix for result links (e.g. "https://example.org/services/")
    pub link_base: String,
    /// Question prompt texts
    pub questions: QuestionPrompts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            show_progress: true,
            show_breadcrumbs: true,
            link_base: String::new(),
            questions: QuestionPrompts::default(),
        }
    }
}

/// Get the XDG config directory for decitree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "decitree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("decitree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".decitree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    /// Full link for a result, with `link_base` prepended.
    pub fn result_link(&self, payload: &ResultPayload) -> String {
        format!("{}{}", self.link_base, payload.link)
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            transition_delay_ms: overlay
                .transition_delay_ms
                .unwrap_or(self.transition_delay_ms),
            show_progress: overlay.show_progress.unwrap_or(self.show_progress),
            show_breadcrumbs: overlay.show_breadcrumbs.unwrap_or(self.show_breadcrumbs),
            link_base: overlay
                .link_base
                .clone()
                .unwrap_or_else(|| self.link_base.clone()),
            questions: self.questions.merge(&overlay.questions),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.decitree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply DECITREE_* environment variables as explicit overrides.
    ///
    /// Nested keys use a double underscore: `DECITREE_QUESTIONS__Q1`.
    /// A variable that is set but does not parse is a config error, same as
    /// a malformed value in a TOML layer.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("DECITREE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Some(val) = env_value(config.get_int("transition_delay_ms"))? {
            settings.transition_delay_ms =
                u64::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("transition_delay_ms must not be negative: {val}"),
                })?;
        }
        if let Some(val) = env_value(config.get_bool("show_progress"))? {
            settings.show_progress = val;
        }
        if let Some(val) = env_value(config.get_bool("show_breadcrumbs"))? {
            settings.show_breadcrumbs = val;
        }
        if let Some(val) = env_value(config.get_string("link_base"))? {
            settings.link_base = val;
        }
        if let Some(val) = env_value(config.get_string("questions.q1"))? {
            settings.questions.q1 = val;
        }
        if let Some(val) = env_value(config.get_string("questions.q2"))? {
            settings.questions.q2 = val;
        }
        if let Some(val) = env_value(config.get_string("questions.q3"))? {
            settings.questions.q3 = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# decitree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/decitree/decitree.toml
#   Local:  <dir>/.decitree.toml   (dir = -C <dir>, default cwd)
#   Env:    DECITREE_* environment variables (DECITREE_QUESTIONS__Q1=...)

# Pause between answering and advancing, in milliseconds (0 disables)
# transition_delay_ms = 300

# Show "Step N of 3" above each question
# show_progress = true

# Show the Q1 › Q2 › Q3 breadcrumb trail
# show_breadcrumbs = true

# Prefix prepended to result links
# link_base = "https://example.org/services/"

[questions]
# q1 = "Question 1"
# q2 = "Question 2"
# q3 = "Question 3"
"#
        .to_string()
    }
}

/// Unset keys are `None`; values that fail to convert are errors.
fn env_value<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compute_result_payload, Outcome};

    #[test]
    fn given_defaults_when_created_then_delay_is_300ms() {
        let settings = Settings::default();
        assert_eq!(settings.transition_delay(), Duration::from_millis(300));
        assert!(settings.show_progress);
        assert!(settings.show_breadcrumbs);
        assert!(settings.link_base.is_empty());
    }

    #[test]
    fn given_overlay_with_some_fields_when_merging_then_only_those_replaced() {
        let base = Settings::default();
        let overlay = RawSettings {
            transition_delay_ms: Some(0),
            show_progress: None,
            show_breadcrumbs: Some(false),
            link_base: None,
            questions: RawQuestionPrompts {
                q2: Some("Is there existing material to review?".into()),
                ..Default::default()
            },
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.transition_delay_ms, 0);
        assert!(merged.show_progress);
        assert!(!merged.show_breadcrumbs);
        assert_eq!(merged.questions.q1, "Question 1");
        assert_eq!(
            merged.questions.prompt(QuestionId::Q2),
            "Is there existing material to review?"
        );
    }

    #[test]
    fn given_link_base_when_building_result_link_then_prefixed() {
        let settings = Settings {
            link_base: "https://example.org/".into(),
            ..Default::default()
        };
        let payload = compute_result_payload(Outcome::EvidenceReview);
        assert_eq!(
            settings.result_link(&payload),
            "https://example.org/evidence-review.html"
        );
    }

    #[test]
    fn given_template_when_parsed_then_everything_is_commented_out() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.transition_delay_ms.is_none());
        assert!(raw.link_base.is_none());
        assert!(raw.questions.q1.is_none());
    }

    #[test]
    fn given_settings_when_serialized_then_roundtrips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
