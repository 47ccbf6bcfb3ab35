//! Command-line interface implementation for spring-scaffold.
//! Provides argument parsing and help text formatting using clap.

use crate::config::{parse_features, BuildTool, Database, JavaVersion};
use crate::prompt::KnownAnswers;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for spring-scaffold.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "spring-scaffold: interactive Spring Boot project scaffolding tool",
    long_about = None
)]
pub struct Args {
    /// Name of the project; also the name of the generated directory
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Base Java package (e.g. com.example)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Build tool of the generated project
    #[arg(short, long, value_enum)]
    pub build_tool: Option<BuildTool>,

    /// Java version of the generated project
    #[arg(short, long, value_enum)]
    pub java_version: Option<JavaVersion>,

    /// Database: none, postgresql, mysql, mongodb or h2
    #[arg(short, long)]
    pub database: Option<Database>,

    /// Comma separated feature tokens (web,security,actuator,validation,lombok,docker,modulith)
    #[arg(long, value_name = "FEATURES")]
    pub features: Option<String>,

    /// Short project description
    #[arg(long)]
    pub description: Option<String>,

    /// Spring Boot version written to the build file
    #[arg(long, value_name = "VERSION")]
    pub spring_boot_version: Option<String>,

    /// Directory in which the project directory is created
    #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Use templates from this directory instead of the built-in ones
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Read answers from a JSON or YAML file
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdin")]
    pub answers: Option<PathBuf>,

    /// Read answers (JSON or YAML) from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Do not prompt; use defaults for anything not provided
    #[arg(short, long)]
    pub yes: bool,

    /// Force overwrite of an existing project directory
    #[arg(short, long)]
    pub force: bool,

    /// Fail when a template references a key the generator does not provide
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Answers given on the command line; these override answers files and prompts.
    pub fn known_answers(&self) -> KnownAnswers {
        KnownAnswers {
            project_name: self.project_name.clone(),
            package_name: self.package.clone(),
            build_tool: self.build_tool,
            java_version: self.java_version,
            database: self.database.clone(),
            features: self.features.as_deref().map(parse_features),
            description: self.description.clone(),
        }
    }

    /// Whether the wizard should ask for missing values.
    pub fn interactive(&self) -> bool {
        !self.yes && !self.stdin && self.answers.is_none()
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
