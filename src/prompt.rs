//! User interaction for spring-scaffold.
//! Provides the `Prompter` abstraction over the terminal and the wizard that
//! fills in whatever part of the project configuration was not supplied on
//! the command line or in an answers file.

use crate::config::{
    validate_package_name, validate_project_name, BuildTool, Database, JavaVersion,
    ProjectConfig, FEATURES,
};
use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::path::Path;

/// Trait for asking the user questions.
pub trait Prompter {
    /// Free text answer, validated by `validate` before it is accepted.
    fn text(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: fn(&str) -> Result<()>,
    ) -> Result<String>;

    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Indices of the chosen items.
    fn multiselect(&self, prompt: &str, items: &[&str], defaults: &[bool]) -> Result<Vec<usize>>;

    /// Yes/no answer.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompter backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::PromptError(e.to_string())
}

impl Prompter for DialoguerPrompter {
    fn text(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: fn(&str) -> Result<()>,
    ) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).validate_with(
            move |value: &String| -> std::result::Result<(), String> {
                validate(value).map_err(|e| e.to_string())
            },
        );
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(prompt_error)
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn multiselect(&self, prompt: &str, items: &[&str], defaults: &[bool]) -> Result<Vec<usize>> {
        MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }
}

fn accept_any(_: &str) -> Result<()> {
    Ok(())
}

/// Answers already known before the wizard runs. `None` means "ask".
#[derive(Debug, Clone, Default)]
pub struct KnownAnswers {
    pub project_name: Option<String>,
    pub package_name: Option<String>,
    pub build_tool: Option<BuildTool>,
    pub java_version: Option<JavaVersion>,
    pub database: Option<Database>,
    pub features: Option<Vec<String>>,
    pub description: Option<String>,
}

/// Fills `base` with answers from `known` and asks `prompter` for the rest.
///
/// With `ask == false` nothing is asked and unanswered values keep the
/// defaults from `base`; the project name is then required.
///
/// # Errors
/// * `Error::ValidationError` when running non-interactively without a project name
/// * `Error::PromptError` if the terminal interaction fails
pub fn ask_config(
    prompter: &dyn Prompter,
    mut base: ProjectConfig,
    known: KnownAnswers,
    ask: bool,
) -> Result<ProjectConfig> {
    base.project_name = match known.project_name {
        Some(name) => name,
        None if !base.project_name.is_empty() => base.project_name,
        None if ask => prompter.text("Project name", Some("demo"), validate_project_name)?,
        None => {
            return Err(Error::ValidationError(
                "a project name is required when prompts are skipped".to_string(),
            ))
        }
    };

    base.package_name = match known.package_name {
        Some(package) => package,
        None if ask => {
            prompter.text("Package name", Some(&base.package_name), validate_package_name)?
        }
        None => base.package_name,
    };

    base.build_tool = match known.build_tool {
        Some(tool) => tool,
        None if ask => {
            let items = [BuildTool::Maven.as_str(), BuildTool::Gradle.as_str()];
            let default = usize::from(base.build_tool == BuildTool::Gradle);
            match prompter.select("Build tool", &items, default)? {
                1 => BuildTool::Gradle,
                _ => BuildTool::Maven,
            }
        }
        None => base.build_tool,
    };

    base.java_version = match known.java_version {
        Some(version) => version,
        None if ask => {
            let items = [JavaVersion::Java21.as_str(), JavaVersion::Java17.as_str()];
            let default = usize::from(base.java_version == JavaVersion::Java17);
            match prompter.select("Java version", &items, default)? {
                1 => JavaVersion::Java17,
                _ => JavaVersion::Java21,
            }
        }
        None => base.java_version,
    };

    base.database = match known.database {
        Some(database) => database,
        None if ask => {
            let default =
                Database::KNOWN.iter().position(|d| *d == base.database.as_str()).unwrap_or(0);
            let index = prompter.select("Database", &Database::KNOWN, default)?;
            Database::new(Database::KNOWN.get(index).copied().unwrap_or(Database::NONE))
        }
        None => base.database,
    };

    base.features = match known.features {
        Some(features) => features,
        None if ask => {
            let items: Vec<&str> = FEATURES.iter().map(|(_, label)| *label).collect();
            let defaults: Vec<bool> =
                FEATURES.iter().map(|(token, _)| base.has_feature(token)).collect();
            prompter
                .multiselect("Features (space to toggle)", &items, &defaults)?
                .into_iter()
                .filter_map(|i| FEATURES.get(i).map(|(token, _)| token.to_string()))
                .collect()
        }
        None => base.features,
    };

    base.description = match known.description {
        Some(description) => description,
        None if ask => prompter.text("Description", Some(&base.description), accept_any)?,
        None => base.description,
    };

    Ok(base)
}

/// Decides whether generation may write into `root`.
///
/// Returns `true` when `force` is set. When `root` already exists the user is
/// asked (if prompts are enabled) whether to write into it anyway; otherwise
/// the existing directory is left alone and `false` is returned.
pub fn confirm_overwrite(
    prompter: &dyn Prompter,
    root: &Path,
    force: bool,
    ask: bool,
) -> Result<bool> {
    if force {
        return Ok(true);
    }
    if !root.exists() || !ask {
        return Ok(false);
    }
    prompter.confirm(
        &format!(
            "Directory '{}' already exists. Write into it anyway?",
            root.display()
        ),
        false,
    )
}
