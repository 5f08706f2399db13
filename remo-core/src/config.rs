use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading a config file.
    Io(String),
    /// The file content is not valid YAML for [`AppConfig`].
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config read error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration.
///
/// Passed explicitly into the route registrar, middleware constructors, and
/// documentation assembly — there is no process-global configuration object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub docs: DocsConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Where and how the aggregated API documentation is served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Mount point of the documentation routes.
    pub path: String,
    /// The header fields of the generated documentation document.
    pub options: DocsOptions,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            path: "/docs".to_string(),
            options: DocsOptions::default(),
        }
    }
}

/// The static header of the documentation document, merged verbatim into
/// the aggregated output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocsOptions {
    pub swagger: String,
    pub info: DocsInfo,
    pub host: String,
    pub schemes: Vec<String>,
    pub base_path: String,
    pub produces: Vec<String>,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            swagger: "2.0".to_string(),
            info: DocsInfo::default(),
            host: String::new(),
            schemes: vec!["http".to_string()],
            base_path: "/".to_string(),
            produces: vec!["application/json".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsInfo {
    pub title: String,
    pub description: String,
    pub version: String,
    pub contact: DocsContact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<DocsLicense>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsContact {
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsLicense {
    pub name: String,
    pub url: String,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthConfig {
    /// JWT signing secret.
    pub secret: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// Mount the built-in basic-auth router.
    pub enable_basic_auth: bool,
    /// Roles granted to newly created accounts.
    pub default_roles: Vec<String>,
    pub messages: AuthMessages,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expires_in: 3600,
            enable_basic_auth: false,
            default_roles: vec!["user".to_string()],
            messages: AuthMessages::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthMessages {
    pub errors: AuthErrorMessages,
}

/// Caller-facing error messages, overridable per deployment (localization).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthErrorMessages {
    pub empty_username: String,
    pub empty_password: String,
    pub username_already_in_use: String,
    pub username_not_registered: String,
    pub invalid_password: String,
    pub unauthorized: String,
    pub invalid_token: String,
    pub no_permission: String,
}

impl Default for AuthErrorMessages {
    fn default() -> Self {
        Self {
            empty_username: "Username cannot be blank".to_string(),
            empty_password: "Password cannot be blank".to_string(),
            username_already_in_use: "The specified username is already in use".to_string(),
            username_not_registered: "This username is not registered".to_string(),
            invalid_password: "This password is not correct".to_string(),
            unauthorized: "Unauthorized".to_string(),
            invalid_token: "Invalid token".to_string(),
            no_permission: "No permission".to_string(),
        }
    }
}
