use spring_scaffold::config::{BuildTool, Database, JavaVersion, ProjectConfig};
use spring_scaffold::error::{Error, Result};
use spring_scaffold::prompt::{ask_config, confirm_overwrite, KnownAnswers, Prompter};
use std::cell::RefCell;
use std::collections::VecDeque;
use tempfile::TempDir;

/// Prompter replaying scripted answers and recording the questions asked.
#[derive(Default)]
struct ScriptedPrompter {
    texts: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<usize>>,
    multi: RefCell<VecDeque<Vec<usize>>>,
    confirms: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn text(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: fn(&str) -> Result<()>,
    ) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        let answer = self
            .texts
            .borrow_mut()
            .pop_front()
            .or_else(|| default.map(str::to_string))
            .unwrap_or_default();
        validate(&answer)?;
        Ok(answer)
    }

    fn select(&self, prompt: &str, _items: &[&str], default: usize) -> Result<usize> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.selections.borrow_mut().pop_front().unwrap_or(default))
    }

    fn multiselect(&self, prompt: &str, _items: &[&str], _defaults: &[bool]) -> Result<Vec<usize>> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.multi.borrow_mut().pop_front().unwrap_or_default())
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.confirms.borrow_mut().pop_front().unwrap_or(default))
    }
}

#[test]
fn test_wizard_asks_everything() {
    let prompter = ScriptedPrompter::default();
    prompter.texts.borrow_mut().extend(["inventory".to_string(), "org.acme".to_string()]);
    // gradle, java 17, mongodb
    prompter.selections.borrow_mut().extend([1, 1, 3]);
    // web, docker
    prompter.multi.borrow_mut().push_back(vec![0, 5]);

    let config =
        ask_config(&prompter, ProjectConfig::default(), KnownAnswers::default(), true).unwrap();

    assert_eq!(config.project_name, "inventory");
    assert_eq!(config.package_name, "org.acme");
    assert_eq!(config.build_tool, BuildTool::Gradle);
    assert_eq!(config.java_version, JavaVersion::Java17);
    assert_eq!(config.database.as_str(), "mongodb");
    assert_eq!(config.features, vec!["web", "docker"]);
    assert_eq!(config.description, "Demo project for Spring Boot");
    assert_eq!(prompter.asked().len(), 7);
}

#[test]
fn test_wizard_skips_known_answers() {
    let prompter = ScriptedPrompter::default();
    let known = KnownAnswers {
        project_name: Some("demo".to_string()),
        build_tool: Some(BuildTool::Maven),
        database: Some(Database::new("h2")),
        features: Some(vec![]),
        ..Default::default()
    };

    let config = ask_config(&prompter, ProjectConfig::default(), known, true).unwrap();

    assert_eq!(config.project_name, "demo");
    assert_eq!(config.database.as_str(), "h2");
    assert_eq!(prompter.asked(), vec!["Package name", "Java version", "Description"]);
}

#[test]
fn test_non_interactive_uses_defaults() {
    let prompter = ScriptedPrompter::default();
    let known = KnownAnswers {
        project_name: Some("demo".to_string()),
        ..Default::default()
    };

    let config = ask_config(&prompter, ProjectConfig::default(), known, false).unwrap();

    assert_eq!(config.package_name, "com.example");
    assert!(config.database.is_none());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_non_interactive_requires_project_name() {
    let prompter = ScriptedPrompter::default();
    let result = ask_config(&prompter, ProjectConfig::default(), KnownAnswers::default(), false);
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[test]
fn test_preloaded_project_name_is_kept() {
    let prompter = ScriptedPrompter::default();
    let base = ProjectConfig {
        project_name: "from-answers".to_string(),
        ..Default::default()
    };

    let config = ask_config(&prompter, base, KnownAnswers::default(), false).unwrap();
    assert_eq!(config.project_name, "from-answers");
}

#[test]
fn test_wizard_rejects_invalid_project_name() {
    let prompter = ScriptedPrompter::default();
    prompter.texts.borrow_mut().push_back("Bad Name".to_string());

    let result = ask_config(&prompter, ProjectConfig::default(), KnownAnswers::default(), true);
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[test]
fn test_overwrite_forced_without_asking() {
    let temp_dir = TempDir::new().unwrap();
    let prompter = ScriptedPrompter::default();

    assert!(confirm_overwrite(&prompter, temp_dir.path(), true, true).unwrap());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_overwrite_not_asked_for_new_directory() {
    let temp_dir = TempDir::new().unwrap();
    let prompter = ScriptedPrompter::default();
    let root = temp_dir.path().join("fresh");

    assert!(!confirm_overwrite(&prompter, &root, false, true).unwrap());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_overwrite_not_asked_when_non_interactive() {
    let temp_dir = TempDir::new().unwrap();
    let prompter = ScriptedPrompter::default();
    prompter.confirms.borrow_mut().push_back(true);

    assert!(!confirm_overwrite(&prompter, temp_dir.path(), false, false).unwrap());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_overwrite_asks_for_existing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let prompter = ScriptedPrompter::default();
    prompter.confirms.borrow_mut().extend([true, false]);

    assert!(confirm_overwrite(&prompter, temp_dir.path(), false, true).unwrap());
    assert!(!confirm_overwrite(&prompter, temp_dir.path(), false, true).unwrap());

    let asked = prompter.asked();
    assert_eq!(asked.len(), 2);
    assert!(asked[0].contains("already exists"));
}
