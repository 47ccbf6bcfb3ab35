//! spring-scaffold generates Spring Boot project skeletons.
//! It collects a project configuration, derives a render context from it and
//! renders a build-tool specific template set into a new directory tree.

/// Command-line interface module
pub mod cli;

/// Project configuration, supported build tools, Java versions and databases
pub mod config;

/// Render context consumed by the template engine
pub mod context;

/// Error types and handling
pub mod error;

/// Context derivation and project generation
pub mod generator;

/// Interactive wizard and the prompt abstraction it uses
pub mod prompt;

/// Template engine for the `{{...}}` markup
pub mod renderer;

/// Built-in and on-disk template sets
pub mod templates;
