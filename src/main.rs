//! spring-scaffold's entry point.
//! Parses arguments, collects the project configuration, runs the generator
//! and reports the result. Errors from every module end up here.

use std::io::Read;

use spring_scaffold::{
    cli::{get_args, Args},
    config::{load_answers, parse_answers, ProjectConfig},
    error::{default_error_handler, Error, Result},
    generator::{generate, GenerateOptions},
    prompt::{ask_config, confirm_overwrite, DialoguerPrompter},
    renderer::MarkupRenderer,
    templates::{BuiltinTemplates, DirectoryTemplates, TemplateStore},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Answers loaded before the wizard runs: answers file, stdin, or defaults.
fn preloaded_config(args: &Args) -> Result<ProjectConfig> {
    if let Some(path) = &args.answers {
        return load_answers(path);
    }
    if args.stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map_err(Error::IoError)?;
        return parse_answers(&buffer);
    }
    Ok(ProjectConfig::default())
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads preloaded answers (answers file or stdin)
/// 2. Applies command-line answers and prompts for the rest
/// 3. Validates the configuration
/// 4. Generates the project from the selected template source
/// 5. Prints follow-up instructions
fn run(args: Args) -> Result<()> {
    let prompt = DialoguerPrompter::new();
    let renderer = if args.strict {
        MarkupRenderer::strict()
    } else {
        MarkupRenderer::new()
    };

    let mut base = preloaded_config(&args)?;
    if let Some(version) = &args.spring_boot_version {
        base.spring_boot_version = version.clone();
    }
    let config = ask_config(&prompt, base, args.known_answers(), args.interactive())?;
    config.validate()?;
    log::debug!("Project configuration: {:?}", config);

    let templates: Box<dyn TemplateStore> = match &args.templates {
        Some(dir) => Box::new(DirectoryTemplates::open(dir)?),
        None => Box::new(BuiltinTemplates::new()),
    };

    let root = args.output_dir.join(&config.project_name);
    let force = confirm_overwrite(&prompt, &root, args.force, args.interactive())?;
    let options = GenerateOptions {
        output_dir: args.output_dir,
        force,
    };
    let report = generate(&config, &*templates, &renderer, &options)?;

    for file in &report.files {
        println!("Created: '{}'", file.display());
    }
    println!(
        "Project '{}' generated successfully in {} ({} build).",
        config.project_name,
        report.root.display(),
        report.template_set
    );
    println!();
    println!("Next steps:");
    println!("  cd {}", report.root.display());
    match report.template_set.as_str() {
        "gradle" => println!("  gradle wrapper && ./gradlew bootRun"),
        _ => println!("  mvn wrapper:wrapper && ./mvnw spring-boot:run"),
    }
    Ok(())
}
