//! Project configuration for spring-scaffold.
//! This module defines the configuration produced by the wizard, the supported
//! build tools, Java versions and databases, and loading of answers files
//! (JSON or YAML) used for non-interactive runs.

use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

pub const DEFAULT_PACKAGE: &str = "com.example";
pub const DEFAULT_SPRING_BOOT_VERSION: &str = "3.4.1";
pub const DEFAULT_DESCRIPTION: &str = "Demo project for Spring Boot";

/// Feature tokens understood by the generator, paired with a short description
/// shown by the wizard.
pub const FEATURES: [(&str, &str); 7] = [
    ("web", "Spring Web (REST controllers, embedded Tomcat)"),
    ("security", "Spring Security"),
    ("actuator", "Spring Boot Actuator"),
    ("validation", "Bean Validation"),
    ("lombok", "Lombok"),
    ("docker", "Docker Compose file for local services"),
    ("modulith", "Spring Modulith modular skeleton"),
];

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid project name pattern"));

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("valid package pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    #[default]
    Maven,
    Gradle,
}

impl BuildTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildTool::Maven => "maven",
            BuildTool::Gradle => "gradle",
        }
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum JavaVersion {
    #[serde(rename = "17")]
    #[value(name = "17")]
    Java17,
    #[default]
    #[serde(rename = "21")]
    #[value(name = "21")]
    Java21,
}

impl JavaVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            JavaVersion::Java17 => "17",
            JavaVersion::Java21 => "21",
        }
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database choice.
///
/// Kept as an open token rather than a closed enum: validation happens before
/// the generator, which maps tokens it does not know to empty dependency snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database(String);

impl Database {
    pub const POSTGRESQL: &'static str = "postgresql";
    pub const MYSQL: &'static str = "mysql";
    pub const MONGODB: &'static str = "mongodb";
    pub const H2: &'static str = "h2";
    pub const NONE: &'static str = "none";

    /// Known database tokens, in the order the wizard lists them.
    pub const KNOWN: [&'static str; 5] =
        [Self::NONE, Self::POSTGRESQL, Self::MYSQL, Self::MONGODB, Self::H2];

    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(Self::NONE)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Database {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let db = Database::new(s.trim().to_lowercase());
        if db.is_known() {
            Ok(db)
        } else {
            Err(Error::ValidationError(format!(
                "unsupported database '{}' (expected one of: {})",
                s,
                Self::KNOWN.join(", ")
            )))
        }
    }
}

/// Configuration collected by the wizard and consumed by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub project_name: String,
    pub package_name: String,
    pub build_tool: BuildTool,
    pub java_version: JavaVersion,
    pub database: Database,
    pub features: Vec<String>,
    pub description: String,
    pub spring_boot_version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            package_name: DEFAULT_PACKAGE.to_string(),
            build_tool: BuildTool::default(),
            java_version: JavaVersion::default(),
            database: Database::default(),
            features: Vec::new(),
            description: DEFAULT_DESCRIPTION.to_string(),
            spring_boot_version: DEFAULT_SPRING_BOOT_VERSION.to_string(),
        }
    }
}

impl ProjectConfig {
    pub fn has_feature(&self, token: &str) -> bool {
        self.features.iter().any(|f| f == token)
    }

    /// Checks the values the wizard is responsible for.
    ///
    /// # Errors
    /// * `Error::ValidationError` for an invalid project name, package or database
    pub fn validate(&self) -> Result<()> {
        validate_project_name(&self.project_name)?;
        validate_package_name(&self.package_name)?;
        if !self.database.is_known() {
            return Err(Error::ValidationError(format!(
                "unsupported database '{}'",
                self.database
            )));
        }
        Ok(())
    }
}

pub fn validate_project_name(name: &str) -> Result<()> {
    if PROJECT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::ValidationError(format!(
            "project name '{}' must start with a lowercase letter and contain only \
             lowercase letters, digits and '-'",
            name
        )))
    }
}

pub fn validate_package_name(package: &str) -> Result<()> {
    if PACKAGE_NAME.is_match(package) {
        Ok(())
    } else {
        Err(Error::ValidationError(format!(
            "package '{}' is not a valid dotted Java package name",
            package
        )))
    }
}

/// Splits a comma separated feature list, dropping blanks and duplicates.
pub fn parse_features(raw: &str) -> Vec<String> {
    let mut features: Vec<String> = Vec::new();
    for token in raw.split(',').map(|t| t.trim().to_lowercase()) {
        if !token.is_empty() && !features.contains(&token) {
            features.push(token);
        }
    }
    features
}

/// Parses answers given as JSON or YAML.
///
/// Missing fields fall back to their defaults; an empty input yields the defaults.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
pub fn parse_answers(content: &str) -> Result<ProjectConfig> {
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(json_err) => {
            debug!("Answers are not JSON ({}), trying YAML", json_err);
            serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid answers format: {}", e)))
        }
    }
}

/// Loads an answers file from disk.
pub fn load_answers<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
    let path = path.as_ref();
    debug!("Loading answers from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
    parse_answers(&content)
}
