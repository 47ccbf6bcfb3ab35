//! Template sets and where they are loaded from.
//! Templates are looked up in the directory of the selected set first and in
//! the shared `common` directory second, both for the set embedded in the
//! binary and for a template directory on disk.
use crate::config::BuildTool;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding templates shared by every set.
pub const COMMON_DIR: &str = "common";

/// Suffix of template files; stripped when a template is looked up by name.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Collection of template files associated with one build tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSet {
    Maven,
    Gradle,
}

impl TemplateSet {
    pub fn for_build_tool(build_tool: BuildTool) -> Self {
        match build_tool {
            BuildTool::Maven => TemplateSet::Maven,
            BuildTool::Gradle => TemplateSet::Gradle,
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateSet::Maven => "maven",
            TemplateSet::Gradle => "gradle",
        }
    }
}

impl fmt::Display for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Trait for sources of template text.
pub trait TemplateStore {
    /// Returns the source of template `name` (without the `.tmpl` suffix) for `set`.
    ///
    /// # Errors
    /// * `Error::PathNotFound` if neither the set nor `common` provides it
    fn read(&self, set: TemplateSet, name: &str) -> Result<String>;
}

macro_rules! builtin {
    ($dir:literal, $name:literal) => {
        (
            concat!($dir, "/", $name),
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/templates/",
                $dir,
                "/",
                $name,
                ".tmpl"
            )),
        )
    };
}

const BUILTIN: [(&str, &str); 10] = [
    builtin!("maven", "pom.xml"),
    builtin!("gradle", "build.gradle"),
    builtin!("gradle", "settings.gradle"),
    builtin!("common", "Application.java"),
    builtin!("common", "ApplicationTests.java"),
    builtin!("common", "application.yml"),
    builtin!("common", "compose.yaml"),
    builtin!("common", "package-info.java"),
    builtin!("common", "README.md"),
    builtin!("common", "gitignore"),
];

/// Templates compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }

    fn find(key: &str) -> Option<&'static str> {
        BUILTIN.iter().find(|(k, _)| *k == key).map(|(_, source)| *source)
    }
}

impl TemplateStore for BuiltinTemplates {
    fn read(&self, set: TemplateSet, name: &str) -> Result<String> {
        Self::find(&format!("{}/{}", set.dir_name(), name))
            .or_else(|| Self::find(&format!("{}/{}", COMMON_DIR, name)))
            .map(str::to_string)
            .ok_or_else(|| Error::PathNotFound {
                path: format!("<builtin>/{}/{}{}", set.dir_name(), name, TEMPLATE_SUFFIX),
            })
    }
}

/// Templates read from a directory laid out as `<root>/<set>/` plus `<root>/common/`.
///
/// Every template file is read once when the store is opened.
#[derive(Debug)]
pub struct DirectoryTemplates {
    root: PathBuf,
    sources: IndexMap<String, String>,
}

impl DirectoryTemplates {
    /// Opens a template directory and reads all `.tmpl` files below it.
    ///
    /// # Errors
    /// * `Error::PathNotFound` if `root` is not a directory
    /// * Path-specific I/O errors if a template cannot be read
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::PathNotFound {
                path: root.display().to_string(),
            });
        }

        let mut sources = IndexMap::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                match e.into_io_error() {
                    Some(io_err) => Error::from_io(io_err, &path),
                    None => Error::PathNotFound {
                        path: path.display().to_string(),
                    },
                }
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(key) = template_key(&root, path) else {
                continue;
            };
            debug!("Loading template '{}' from {}", key, path.display());
            let source = fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
            sources.insert(key, source);
        }

        Ok(Self { root, sources })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the loaded templates, as `<set>/<name>`.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

impl TemplateStore for DirectoryTemplates {
    fn read(&self, set: TemplateSet, name: &str) -> Result<String> {
        let own = format!("{}/{}", set.dir_name(), name);
        let common = format!("{}/{}", COMMON_DIR, name);
        self.sources
            .get(&own)
            .or_else(|| self.sources.get(&common))
            .cloned()
            .ok_or_else(|| {
                let missing = self
                    .root
                    .join(set.dir_name())
                    .join(format!("{}{}", name, TEMPLATE_SUFFIX));
                Error::PathNotFound {
                    path: missing.display().to_string(),
                }
            })
    }
}

/// Lookup key (`<dir>/<name>`) for a template file, with the `.tmpl` suffix removed.
fn template_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let relative = relative.to_str()?.replace('\\', "/");
    relative.strip_suffix(TEMPLATE_SUFFIX).map(str::to_string)
}
