//! Error handling for spring-scaffold.
//! Defines the crate-wide error type and the result alias used by every module.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while collecting a configuration or generating a project.
#[derive(Error, Debug)]
pub enum Error {
    /// Any file system failure without a more specific mapping
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Destination path already exists
    #[error("'{path}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExists { path: String },

    /// A path the generator tried to create already exists
    #[error("'{path}' already exists.")]
    AlreadyExists { path: String },

    /// An existing path that must be a directory is something else
    #[error("'{path}' exists and is not a directory.")]
    NotADirectory { path: String },

    /// File system refused access to a path
    #[error("Permission denied: '{path}'.")]
    PermissionDenied { path: String },

    /// A path (template file, answers file, parent directory) was not found
    #[error("Path not found: '{path}'.")]
    PathNotFound { path: String },

    /// A template referenced a key absent from the context (strict mode only)
    #[error("Missing template key: '{key}'.")]
    MissingKey { key: String },

    /// Answers file could not be parsed or has an invalid shape
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A configuration value failed validation
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Interactive prompt failed (closed terminal, interrupted input)
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

impl Error {
    /// Maps an `io::Error` raised while touching `path` to a path-specific variant.
    ///
    /// `AlreadyExists`, `PermissionDenied` and `NotFound` get their own variants,
    /// everything else is kept as `Error::IoError`.
    pub fn from_io<P: AsRef<Path>>(err: io::Error, path: P) -> Self {
        let path = path.as_ref().display().to_string();
        match err.kind() {
            io::ErrorKind::AlreadyExists => Error::AlreadyExists { path },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { path },
            io::ErrorKind::NotFound => Error::PathNotFound { path },
            _ => Error::IoError(err),
        }
    }
}

/// Convenience type alias for Results with `Error` as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// This is the only place where errors are caught; every other module propagates.
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
