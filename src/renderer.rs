//! Template rendering for spring-scaffold.
//!
//! Templates use a small markup with three kinds of markers:
//!
//! * `{{key}}` interpolates a context value
//! * `{{#if key}}...{{/if}}` and `{{#if !key}}...{{/if}}` keep or drop a block
//! * `{{#each key}}...{{/each}}` repeats a block once per sequence element,
//!   substituting `{{item}}`
//!
//! Rendering is three independent rewrite passes over the whole string, in a
//! fixed order: conditionals, then iteration, then interpolation. Blocks do not
//! nest: the first closing marker ends a block, so nested blocks of the same
//! kind produce undefined output.
use crate::context::{is_truthy, to_display, Context};
use crate::error::{Error, Result};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#if\s+(!?)(\w+)\}\}(.*?)\{\{/if\}\}")
        .expect("valid conditional pattern")
});

static ITERATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{#each\s+(\w+)\}\}(.*?)\{\{/each\}\}")
        .expect("valid iteration pattern")
});

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid variable pattern"));

/// Marker replaced by the current element inside an `each` block.
pub const ITEM_MARKER: &str = "{{item}}";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template source
    /// * `context` - Values referenced by the template
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render(&self, template: &str, context: &Context) -> Result<String>;
}

/// Regex-driven renderer for the `{{...}}` markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupRenderer {
    strict: bool,
}

impl MarkupRenderer {
    /// Creates a permissive renderer: unknown keys render as falsy or empty.
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Creates a renderer that fails with `Error::MissingKey` when a marker
    /// names a key absent from the context. Keys present with a null value
    /// are not considered missing.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn lookup<'c>(&self, context: &'c Context, key: &str) -> Result<Option<&'c Value>> {
        match context.get(key) {
            Some(value) => Ok(Some(value)),
            None if self.strict => {
                log::debug!("Strict mode: '{}' is not in the context", key);
                Err(Error::MissingKey {
                    key: key.to_string(),
                })
            }
            None => Ok(None),
        }
    }

    fn resolve_conditionals(&self, template: &str, context: &Context) -> Result<String> {
        replace_all(&CONDITIONAL, template, |caps| {
            let negate = &caps[1] == "!";
            let value = self.lookup(context, &caps[2])?;
            let truthy = value.map(is_truthy).unwrap_or(false);
            Ok(if truthy != negate {
                caps[3].to_string()
            } else {
                String::new()
            })
        })
    }

    fn expand_iterations(&self, template: &str, context: &Context) -> Result<String> {
        replace_all(&ITERATION, template, |caps| {
            let body = &caps[2];
            let expanded: String = match self.lookup(context, &caps[1])? {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| body.replace(ITEM_MARKER, &to_display(item)))
                    .collect(),
                _ => String::new(),
            };
            Ok(expanded)
        })
    }

    fn interpolate(&self, template: &str, context: &Context) -> Result<String> {
        replace_all(&VARIABLE, template, |caps| {
            Ok(self.lookup(context, &caps[1])?.map(to_display).unwrap_or_default())
        })
    }
}

impl TemplateRenderer for MarkupRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<String> {
        let resolved = self.resolve_conditionals(template, context)?;
        let expanded = self.expand_iterations(&resolved, context)?;
        self.interpolate(&expanded, context)
    }
}

/// Like `Regex::replace_all`, but the replacement may fail.
fn replace_all<F>(re: &Regex, haystack: &str, mut replacement: F) -> Result<String>
where
    F: FnMut(&Captures) -> Result<String>,
{
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for caps in re.captures_iter(haystack) {
        let whole = caps.get(0).expect("group 0 is always present");
        out.push_str(&haystack[last..whole.start()]);
        out.push_str(&replacement(&caps)?);
        last = whole.end();
    }
    out.push_str(&haystack[last..]);
    Ok(out)
}
