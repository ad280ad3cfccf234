// src/config/mod.rs - Portal configuration

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ResultExt};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "HOPEWELL";

/// Delay between mounting the form and revealing the welcome toast
pub const DEFAULT_TOAST_DELAY_MS: u64 = 2500;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error for '{}': {}", self.key, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn parse(&self, content: &str) -> Result<PortalConfig> {
        match self {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse JSON config: {}", e))),
            ConfigFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse YAML config: {}", e))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| Error::config(format!("Failed to parse TOML config: {}", e))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub portal: PortalSettings,
    pub toast: ToastConfig,
    pub social: Vec<SocialLink>,
    pub logging: LoggingConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            portal: PortalSettings::default(),
            toast: ToastConfig::default(),
            social: SocialLink::defaults(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Branding shown around the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    pub hospital_name: String,
    pub logo_path: String,
    pub background_image_url: String,
    pub contact_email: String,
    pub privacy_policy_url: String,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            hospital_name: "Hopewell Hospital".to_string(),
            logo_path: "/static/logo.png".to_string(),
            background_image_url: "https://images.pexels.com/photos/4006979/pexels-photo-4006979.jpeg?auto=compress&cs=tinysrgb&w=1200".to_string(),
            contact_email: "hopewell@hospital.com".to_string(),
            privacy_policy_url: "/policy.pdf".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub delay_ms: u64,
}

impl ToastConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_TOAST_DELAY_MS,
        }
    }
}

/// Footer link to one of the hospital's social profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub color: String,
    pub icon: String,
    /// The end of this icon's entrance animation also reveals the toast
    #[serde(default)]
    pub reveals_toast: bool,
}

impl SocialLink {
    fn new(name: &str, url: &str, color: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            reveals_toast: false,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("Facebook", "https://facebook.com", "#3b5998", "fab fa-facebook-f"),
            Self::new("Twitter", "https://twitter.com", "#1DA1F2", "fab fa-twitter"),
            Self {
                reveals_toast: true,
                ..Self::new("Instagram", "https://instagram.com", "#C13584", "fab fa-instagram")
            },
            Self::new("LinkedIn", "https://linkedin.com", "#0077B5", "fab fa-linkedin-in"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub console: ConsoleLogConfig,
    pub file: Option<FileLogConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            console: ConsoleLogConfig::default(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleLogConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl Default for ConsoleLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLogConfig {
    pub path: PathBuf,
}

impl Default for FileLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./logs/portal.log"),
        }
    }
}

impl PortalConfig {
    /// Loads a config file, then applies `HOPEWELL_*` environment overrides
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_extension(path)
            .ok_or_else(|| Error::config("Unsupported configuration file format"))?;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config = format.parse(&content)?;
        config.apply_env_overrides(std::env::vars());
        tracing::debug!(path = %path.display(), "Loaded portal configuration");
        Ok(config)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load<P: AsRef<Path>>(_path: P) -> Result<Self> {
        Err(Error::config("File loading not supported in web platform"))
    }

    /// Defaults plus environment overrides, for runs without a config file
    pub fn from_env() -> Self {
        let mut config = Self::default();
        #[cfg(not(target_arch = "wasm32"))]
        config.apply_env_overrides(std::env::vars());
        config
    }

    /// Applies recognised `HOPEWELL_*` variables; unknown or unparsable ones are skipped
    pub fn apply_env_overrides<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            let Some(name) = key
                .strip_prefix(ENV_PREFIX)
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };

            match name {
                "LOG_LEVEL" => self.logging.level = value.to_lowercase(),
                "HOSPITAL_NAME" => self.portal.hospital_name = value,
                "TOAST_DELAY_MS" => match value.parse::<u64>() {
                    Ok(delay_ms) => self.toast.delay_ms = delay_ms,
                    Err(e) => {
                        tracing::warn!(%key, %value, error = %e, "Ignoring invalid toast delay override")
                    }
                },
                _ => {}
            }
        }
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.portal.hospital_name.trim().is_empty() {
            errors.push(ValidationError {
                key: "portal.hospital_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.toast.delay_ms == 0 {
            errors.push(ValidationError {
                key: "toast.delay_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                key: "logging.level".to_string(),
                message: format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        for (index, link) in self.social.iter().enumerate() {
            if link.url.trim().is_empty() {
                errors.push(ValidationError {
                    key: format!("social[{}].url", index),
                    message: format!("link '{}' has no URL", link.name),
                });
            }
        }

        errors
    }

    /// Like [`PortalConfig::validate`], but folded into a single error
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }

        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Err(Error::config_key(
            errors[0].key.clone(),
            messages,
            format!("{} configuration error(s)", errors.len()),
        ))
    }
}
