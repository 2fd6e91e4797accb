//! Configuration system for tefoli.
//!
//! Describes which theory extension a controller loads, the tunables it is
//! configured with before registration, and the defaults of a host
//! application. Configuration can be loaded from TOML or YAML.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use tefoli_config::{ApplicationConfig, PropagateMode};
//!
//! let config = ApplicationConfig::from_toml_str(r#"
//!     program_name = "clingo-dl"
//!
//!     [theory]
//!     name = "clingodl"
//!     library = "clingo-dl"
//!
//!     [theory.propagate]
//!     mode = "partial+"
//!     degree = 2
//! "#).unwrap();
//!
//! let propagate = config.theory.propagate.unwrap();
//! assert_eq!(propagate.mode, PropagateMode::PartialPlus);
//! assert_eq!(propagate.value(), "partial+,2");
//! assert_eq!(config.default_parts, vec!["base".to_string()]);
//! ```
//!
//! The default theory configuration propagates fully:
//!
//! ```
//! use tefoli_config::TheoryConfig;
//!
//! let config = TheoryConfig::default();
//! assert_eq!(
//!     config.tunables(),
//!     vec![("propagate".to_string(), "full,1".to_string())]
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration of a host application.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ApplicationConfig {
    /// Program name reported to the host.
    #[serde(default = "default_program_name")]
    pub program_name: String,

    /// Program version reported to the host.
    #[serde(default = "default_version")]
    pub version: String,

    /// Theory loaded by the application.
    ///
    /// Tunables are normally supplied on the command line, so none are set
    /// by default.
    #[serde(default = "TheoryConfig::unconfigured")]
    pub theory: TheoryConfig,

    /// Parts grounded when the host does not drive grounding itself.
    #[serde(default = "default_parts")]
    pub default_parts: Vec<String>,
}

fn default_program_name() -> String {
    "tefoli".to_string()
}

fn default_version() -> String {
    "0.0.1".to_string()
}

fn default_parts() -> Vec<String> {
    vec!["base".to_string()]
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            program_name: default_program_name(),
            version: default_version(),
            theory: TheoryConfig::unconfigured(),
            default_parts: default_parts(),
        }
    }
}

impl ApplicationConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the program name.
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    /// Sets the theory configuration.
    pub fn with_theory(mut self, theory: TheoryConfig) -> Self {
        self.theory = theory;
        self
    }

    /// Adds a part to ground by default.
    pub fn with_default_part(mut self, part: impl Into<String>) -> Self {
        self.default_parts.push(part.into());
        self
    }

    /// Checks the configuration for values no theory can accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program_name.is_empty() {
            return Err(ConfigError::Invalid("program_name must not be empty".into()));
        }
        self.theory.validate()
    }
}

/// Which theory to load and how to configure it before registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TheoryConfig {
    /// Name of the theory inside its library.
    #[serde(default = "default_theory_name")]
    pub name: String,

    /// Library providing the theory.
    #[serde(default = "default_library")]
    pub library: String,

    /// Propagation tunable; not passed to the theory when absent.
    #[serde(default)]
    pub propagate: Option<PropagateConfig>,

    /// Further tunables, passed verbatim.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

fn default_theory_name() -> String {
    "clingodl".to_string()
}

fn default_library() -> String {
    "clingo-dl".to_string()
}

impl Default for TheoryConfig {
    /// The difference logic theory with full propagation of degree 1.
    fn default() -> Self {
        Self {
            propagate: Some(PropagateConfig::default()),
            ..Self::unconfigured()
        }
    }
}

impl TheoryConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The difference logic theory without any tunables.
    pub fn unconfigured() -> Self {
        Self {
            name: default_theory_name(),
            library: default_library(),
            propagate: None,
            options: BTreeMap::new(),
        }
    }

    /// Sets the propagation tunable.
    pub fn with_propagate(mut self, mode: PropagateMode, degree: u32) -> Self {
        self.propagate = Some(PropagateConfig { mode, degree });
        self
    }

    /// Adds a verbatim tunable.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the `(key, value)` pairs to configure, propagation first.
    pub fn tunables(&self) -> Vec<(String, String)> {
        let mut tunables = Vec::with_capacity(self.options.len() + 1);
        if let Some(propagate) = &self.propagate {
            tunables.push(("propagate".to_string(), propagate.value()));
        }
        tunables.extend(
            self.options
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        tunables
    }

    /// Checks the configuration for values no theory can accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid("theory name must not be empty".into()));
        }
        if self.options.contains_key("propagate") && self.propagate.is_some() {
            return Err(ConfigError::Invalid(
                "propagate is set both as a tunable and in options".into(),
            ));
        }
        Ok(())
    }
}

/// Propagation tunable of the difference logic theory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PropagateConfig {
    /// Propagation strength.
    #[serde(default)]
    pub mode: PropagateMode,

    /// Propagation degree.
    #[serde(default = "default_degree")]
    pub degree: u32,
}

fn default_degree() -> u32 {
    1
}

impl Default for PropagateConfig {
    fn default() -> Self {
        Self {
            mode: PropagateMode::Full,
            degree: default_degree(),
        }
    }
}

impl PropagateConfig {
    /// Renders the tunable value, e.g. `full,1`.
    pub fn value(&self) -> String {
        format!("{},{}", self.mode, self.degree)
    }
}

/// Propagation strength.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagateMode {
    /// No propagation; only check full assignments.
    No,

    /// Check inverse constraints only.
    Inverse,

    /// Propagate along cheap paths.
    Partial,

    /// Partial propagation with additional checks.
    #[serde(rename = "partial+")]
    PartialPlus,

    /// Propagate starting at the zero node.
    Zero,

    /// Full propagation.
    #[default]
    Full,
}

impl PropagateMode {
    /// Returns the name the theory expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropagateMode::No => "no",
            PropagateMode::Inverse => "inverse",
            PropagateMode::Partial => "partial",
            PropagateMode::PartialPlus => "partial+",
            PropagateMode::Zero => "zero",
            PropagateMode::Full => "full",
        }
    }
}

impl fmt::Display for PropagateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
