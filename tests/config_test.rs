use spring_scaffold::config::{
    load_answers, parse_answers, BuildTool, Database, JavaVersion, ProjectConfig,
};
use spring_scaffold::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_empty_answers_yield_defaults() {
    let config = parse_answers("").unwrap();
    assert_eq!(config, ProjectConfig::default());
    assert_eq!(config.package_name, "com.example");
    assert_eq!(config.build_tool, BuildTool::Maven);
    assert_eq!(config.java_version, JavaVersion::Java21);
    assert!(config.database.is_none());
}

#[test]
fn test_json_answers() {
    let content = r#"{
        "project_name": "orders",
        "build_tool": "gradle",
        "java_version": "17",
        "database": "mongodb",
        "features": ["web", "modulith"]
    }"#;
    let config = parse_answers(content).unwrap();

    assert_eq!(config.project_name, "orders");
    assert_eq!(config.build_tool, BuildTool::Gradle);
    assert_eq!(config.java_version, JavaVersion::Java17);
    assert_eq!(config.database.as_str(), "mongodb");
    assert!(config.has_feature("modulith"));
    assert_eq!(config.package_name, "com.example");
}

#[test]
fn test_yaml_answers() {
    let content = "project_name: billing\npackage_name: org.acme.billing\ndatabase: postgresql\n";
    let config = parse_answers(content).unwrap();

    assert_eq!(config.project_name, "billing");
    assert_eq!(config.package_name, "org.acme.billing");
    assert_eq!(config.database, Database::new("postgresql"));
}

#[test]
fn test_invalid_answers() {
    let result = parse_answers("build_tool: [not, a, tool]");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_load_answers_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("answers.yml");
    fs::write(&path, "project_name: from-file\n").unwrap();

    assert_eq!(load_answers(&path).unwrap().project_name, "from-file");

    let missing = load_answers(temp_dir.path().join("missing.yml"));
    assert!(matches!(missing, Err(Error::PathNotFound { .. })));
}

#[test]
fn test_validate() {
    let mut config = ProjectConfig {
        project_name: "demo".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    config.package_name = "Com.Example".to_string();
    assert!(matches!(config.validate(), Err(Error::ValidationError(_))));

    config.package_name = "com.example".to_string();
    config.database = Database::new("oracle");
    assert!(matches!(config.validate(), Err(Error::ValidationError(_))));
}

#[test]
fn test_unknown_feature_tokens_are_kept() {
    let config = parse_answers(r#"{"features": ["web", "kafka"]}"#).unwrap();
    assert!(config.has_feature("kafka"));
    assert!(config.validate().is_err()); // no project name
}
