//! Project generation.
//!
//! Derives the render context from a [`ProjectConfig`], picks the template set
//! for the chosen build tool, and renders every artifact of the project into a
//! fresh directory tree. Artifacts are written strictly in sequence; a failure
//! aborts the run and leaves whatever was already written on disk.
use crate::config::{BuildTool, Database, ProjectConfig};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::templates::{TemplateSet, TemplateStore};
use cruet::Inflector;
use indexmap::IndexMap;
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Packages created under the application package when the modulith feature is on.
pub const MODULES: [&str; 3] = ["core", "shared", "web"];

/// Feature token enabling the modular skeleton.
pub const MODULITH_FEATURE: &str = "modulith";

/// Feature token enabling the compose file.
pub const DOCKER_FEATURE: &str = "docker";

const POSTGRESQL_MAVEN: &str = "\t\t<dependency>
\t\t\t<groupId>org.springframework.boot</groupId>
\t\t\t<artifactId>spring-boot-starter-data-jpa</artifactId>
\t\t</dependency>
\t\t<dependency>
\t\t\t<groupId>org.postgresql</groupId>
\t\t\t<artifactId>postgresql</artifactId>
\t\t\t<scope>runtime</scope>
\t\t</dependency>
";

const MYSQL_MAVEN: &str = "\t\t<dependency>
\t\t\t<groupId>org.springframework.boot</groupId>
\t\t\t<artifactId>spring-boot-starter-data-jpa</artifactId>
\t\t</dependency>
\t\t<dependency>
\t\t\t<groupId>com.mysql</groupId>
\t\t\t<artifactId>mysql-connector-j</artifactId>
\t\t\t<scope>runtime</scope>
\t\t</dependency>
";

const MONGODB_MAVEN: &str = "\t\t<dependency>
\t\t\t<groupId>org.springframework.boot</groupId>
\t\t\t<artifactId>spring-boot-starter-data-mongodb</artifactId>
\t\t</dependency>
";

const H2_MAVEN: &str = "\t\t<dependency>
\t\t\t<groupId>org.springframework.boot</groupId>
\t\t\t<artifactId>spring-boot-starter-data-jpa</artifactId>
\t\t</dependency>
\t\t<dependency>
\t\t\t<groupId>com.h2database</groupId>
\t\t\t<artifactId>h2</artifactId>
\t\t\t<scope>runtime</scope>
\t\t</dependency>
";

const POSTGRESQL_GRADLE: &str = concat!(
    "\timplementation 'org.springframework.boot:spring-boot-starter-data-jpa'\n",
    "\truntimeOnly 'org.postgresql:postgresql'\n",
);

const MYSQL_GRADLE: &str = concat!(
    "\timplementation 'org.springframework.boot:spring-boot-starter-data-jpa'\n",
    "\truntimeOnly 'com.mysql:mysql-connector-j'\n",
);

const MONGODB_GRADLE: &str =
    "\timplementation 'org.springframework.boot:spring-boot-starter-data-mongodb'\n";

const H2_GRADLE: &str = concat!(
    "\timplementation 'org.springframework.boot:spring-boot-starter-data-jpa'\n",
    "\truntimeOnly 'com.h2database:h2'\n",
);

const MODULITH_JPA_MAVEN: &str = "\t\t<dependency>
\t\t\t<groupId>org.springframework.modulith</groupId>
\t\t\t<artifactId>spring-modulith-starter-jpa</artifactId>
\t\t</dependency>
";

const MODULITH_MONGODB_MAVEN: &str = "\t\t<dependency>
\t\t\t<groupId>org.springframework.modulith</groupId>
\t\t\t<artifactId>spring-modulith-starter-mongodb</artifactId>
\t\t</dependency>
";

const MODULITH_JPA_GRADLE: &str =
    "\timplementation 'org.springframework.modulith:spring-modulith-starter-jpa'\n";

const MODULITH_MONGODB_GRADLE: &str =
    "\timplementation 'org.springframework.modulith:spring-modulith-starter-mongodb'\n";

/// Storage family of a database, used to pick the modulith event-publication starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseFamily {
    Relational,
    Document,
}

impl DatabaseFamily {
    pub fn of(database: &str) -> Option<Self> {
        match database {
            Database::POSTGRESQL | Database::MYSQL | Database::H2 => Some(Self::Relational),
            Database::MONGODB => Some(Self::Document),
            _ => None,
        }
    }
}

/// Dependency declarations needed by `database` in the build file of `build_tool`.
///
/// Unknown tokens and `none` yield an empty snippet.
pub fn database_dependency(database: &str, build_tool: BuildTool) -> &'static str {
    match (database, build_tool) {
        (Database::POSTGRESQL, BuildTool::Maven) => POSTGRESQL_MAVEN,
        (Database::MYSQL, BuildTool::Maven) => MYSQL_MAVEN,
        (Database::MONGODB, BuildTool::Maven) => MONGODB_MAVEN,
        (Database::H2, BuildTool::Maven) => H2_MAVEN,
        (Database::POSTGRESQL, BuildTool::Gradle) => POSTGRESQL_GRADLE,
        (Database::MYSQL, BuildTool::Gradle) => MYSQL_GRADLE,
        (Database::MONGODB, BuildTool::Gradle) => MONGODB_GRADLE,
        (Database::H2, BuildTool::Gradle) => H2_GRADLE,
        _ => "",
    }
}

/// Modulith starter matching the database family, only when the modulith
/// feature is enabled.
pub fn modulith_data_dependency(
    modulith: bool,
    database: &str,
    build_tool: BuildTool,
) -> &'static str {
    if !modulith {
        return "";
    }
    match (DatabaseFamily::of(database), build_tool) {
        (Some(DatabaseFamily::Relational), BuildTool::Maven) => MODULITH_JPA_MAVEN,
        (Some(DatabaseFamily::Document), BuildTool::Maven) => MODULITH_MONGODB_MAVEN,
        (Some(DatabaseFamily::Relational), BuildTool::Gradle) => MODULITH_JPA_GRADLE,
        (Some(DatabaseFamily::Document), BuildTool::Gradle) => MODULITH_MONGODB_GRADLE,
        (None, _) => "",
    }
}

/// `my-demo-app` -> `MyDemoApp`.
pub fn application_name(project_name: &str) -> String {
    project_name.to_pascal_case()
}

/// `com.example.demo` -> `com/example/demo`.
pub fn package_path(package_name: &str) -> String {
    package_name.replace('.', "/")
}

fn datasource_url(database: &str, database_name: &str) -> String {
    match database {
        Database::POSTGRESQL => format!("jdbc:postgresql://localhost:5432/{}", database_name),
        Database::MYSQL => format!("jdbc:mysql://localhost:3306/{}", database_name),
        Database::H2 => format!("jdbc:h2:mem:{}", database_name),
        Database::MONGODB => format!("mongodb://localhost:27017/{}", database_name),
        _ => String::new(),
    }
}

/// Every key templates may reference. All of them are supplied on every render.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    pub project_name: String,
    pub package_name: String,
    pub app_name: String,
    pub package_path: String,
    pub build_tool: String,
    pub java_version: String,
    pub spring_boot_version: String,
    pub database: String,
    pub description: String,
    pub features: Vec<String>,
    pub modules: Vec<String>,

    pub has_web: bool,
    pub has_security: bool,
    pub has_actuator: bool,
    pub has_validation: bool,
    pub has_lombok: bool,
    pub has_docker: bool,
    pub has_modulith: bool,
    pub has_features: bool,

    pub is_maven: bool,
    pub is_gradle: bool,

    pub has_database: bool,
    pub has_jdbc: bool,
    pub is_postgresql: bool,
    pub is_mysql: bool,
    pub is_mongodb: bool,
    pub is_h2: bool,
    pub has_compose_service: bool,
    pub database_name: String,
    pub database_username: String,
    pub database_password: String,
    pub datasource_url: String,

    pub database_dependency: String,
    pub modulith_data_dependency: String,

    /// Ad hoc values for custom templates; structured fields win on conflicts.
    #[serde(skip)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl RenderContext {
    /// Converts into the engine's context, adding `extra` keys that do not
    /// shadow a structured field.
    pub fn to_context(&self) -> Result<Context> {
        let mut context = Context::from_serialize(self)?;
        for (key, value) in &self.extra {
            context.insert_missing(key.clone(), value.clone());
        }
        Ok(context)
    }
}

/// Derives the render context from the wizard's configuration.
pub fn derive_context(config: &ProjectConfig) -> RenderContext {
    let db = config.database.as_str();
    let build_tool = config.build_tool;
    let has_modulith = config.has_feature(MODULITH_FEATURE);
    let family = DatabaseFamily::of(db);
    let is_h2 = db == Database::H2;
    let database_name = config.project_name.replace('-', "_");

    RenderContext {
        project_name: config.project_name.clone(),
        package_name: config.package_name.clone(),
        app_name: application_name(&config.project_name),
        package_path: package_path(&config.package_name),
        build_tool: build_tool.to_string(),
        java_version: config.java_version.to_string(),
        spring_boot_version: config.spring_boot_version.clone(),
        database: db.to_string(),
        description: config.description.clone(),
        features: config.features.clone(),
        modules: if has_modulith {
            MODULES.iter().map(|m| m.to_string()).collect()
        } else {
            Vec::new()
        },

        has_web: config.has_feature("web"),
        has_security: config.has_feature("security"),
        has_actuator: config.has_feature("actuator"),
        has_validation: config.has_feature("validation"),
        has_lombok: config.has_feature("lombok"),
        has_docker: config.has_feature(DOCKER_FEATURE),
        has_modulith,
        has_features: !config.features.is_empty(),

        is_maven: build_tool == BuildTool::Maven,
        is_gradle: build_tool == BuildTool::Gradle,

        has_database: family.is_some(),
        has_jdbc: family == Some(DatabaseFamily::Relational),
        is_postgresql: db == Database::POSTGRESQL,
        is_mysql: db == Database::MYSQL,
        is_mongodb: db == Database::MONGODB,
        is_h2,
        has_compose_service: family.is_some() && !is_h2,
        datasource_url: datasource_url(db, &database_name),
        database_username: match family {
            Some(_) if is_h2 => "sa".to_string(),
            Some(_) => "app".to_string(),
            None => String::new(),
        },
        database_password: if family.is_some() && !is_h2 {
            "secret".to_string()
        } else {
            String::new()
        },
        database_name,

        database_dependency: database_dependency(db, build_tool).to_string(),
        modulith_data_dependency: modulith_data_dependency(has_modulith, db, build_tool)
            .to_string(),

        extra: IndexMap::new(),
    }
}

/// One file produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Template name, looked up in the selected set and then in `common`
    pub template: &'static str,
    /// Destination relative to the project root
    pub target: PathBuf,
    /// Extra key/value pairs added to the context for this artifact only
    pub locals: Vec<(&'static str, String)>,
}

impl Artifact {
    fn new<P: Into<PathBuf>>(template: &'static str, target: P) -> Self {
        Self {
            template,
            target: target.into(),
            locals: Vec::new(),
        }
    }
}

/// Lists the artifacts for a configuration, in the order they are written.
pub fn plan_artifacts(context: &RenderContext) -> Vec<Artifact> {
    let main_dir = Path::new("src/main/java").join(&context.package_path);
    let test_dir = Path::new("src/test/java").join(&context.package_path);

    let mut artifacts = Vec::new();
    if context.is_gradle {
        artifacts.push(Artifact::new("build.gradle", "build.gradle"));
        artifacts.push(Artifact::new("settings.gradle", "settings.gradle"));
    } else {
        artifacts.push(Artifact::new("pom.xml", "pom.xml"));
    }
    artifacts.push(Artifact::new(
        "Application.java",
        main_dir.join(format!("{}Application.java", context.app_name)),
    ));
    artifacts.push(Artifact::new("application.yml", "src/main/resources/application.yml"));
    artifacts.push(Artifact::new(
        "ApplicationTests.java",
        test_dir.join(format!("{}ApplicationTests.java", context.app_name)),
    ));
    if context.has_docker {
        artifacts.push(Artifact::new("compose.yaml", "compose.yaml"));
    }
    if context.has_modulith {
        for module in &context.modules {
            let target = main_dir.join(module).join("package-info.java");
            let mut artifact = Artifact::new("package-info.java", target);
            artifact.locals.push(("moduleName", module.clone()));
            artifacts.push(artifact);
        }
    }
    artifacts.push(Artifact::new("README.md", "README.md"));
    artifacts.push(Artifact::new("gitignore", ".gitignore"));
    artifacts
}

/// Options controlling where and how a project is written.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Parent directory of the project root
    pub output_dir: PathBuf,
    /// Reuse an existing project root instead of failing
    pub force: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            force: false,
        }
    }
}

/// Result of a generation run, presented to the user by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub root: PathBuf,
    pub template_set: String,
    pub files: Vec<PathBuf>,
}

/// Ensures the project root is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExists` if `root` exists and `force` is false
/// * `Error::NotADirectory` if `root` exists as something other than a directory
pub fn ensure_output_root<P: AsRef<Path>>(root: P, force: bool) -> Result<PathBuf> {
    let root = root.as_ref();
    if root.exists() {
        if !force {
            return Err(Error::OutputDirectoryExists {
                path: root.display().to_string(),
            });
        }
        if !root.is_dir() {
            return Err(Error::NotADirectory {
                path: root.display().to_string(),
            });
        }
    }
    Ok(root.to_path_buf())
}

fn create_dir_all(path: &Path) -> Result<()> {
    debug!("Creating directory: {}", path.display());
    fs::create_dir_all(path).map_err(|e| Error::from_io(e, path))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, content).map_err(|e| Error::from_io(e, path))
}

/// Renders every artifact of `config` below `options.output_dir/<project name>`.
///
/// # Errors
/// * `Error::OutputDirectoryExists` if the project root exists and `force` is off
/// * `Error::NotADirectory` if the project root exists but is not a directory
/// * Template errors from the renderer (strict mode) or the store (missing template)
/// * Path-specific I/O errors; files written before the failure are kept
pub fn generate(
    config: &ProjectConfig,
    templates: &dyn TemplateStore,
    renderer: &dyn TemplateRenderer,
    options: &GenerateOptions,
) -> Result<GenerationReport> {
    let root = ensure_output_root(options.output_dir.join(&config.project_name), options.force)?;
    let render_context = derive_context(config);
    let set = TemplateSet::for_build_tool(config.build_tool);
    let context = render_context.to_context()?;

    info!("Generating '{}' with the {} template set", config.project_name, set);
    create_dir_all(&root)?;

    let mut files = Vec::new();
    for artifact in plan_artifacts(&render_context) {
        let source = templates.read(set, artifact.template)?;
        let content = if artifact.locals.is_empty() {
            renderer.render(&source, &context)?
        } else {
            let mut local = context.clone();
            for (key, value) in &artifact.locals {
                local.insert(*key, value.clone());
            }
            renderer.render(&source, &local)?
        };
        let target = root.join(&artifact.target);
        write_file(&target, &content)?;
        files.push(target);
    }

    info!("Wrote {} files to {}", files.len(), root.display());
    Ok(GenerationReport {
        root,
        template_set: set.to_string(),
        files,
    })
}
