//! Layout/content rendering with Handlebars.
//!
//! A message is rendered from two files: a layout that carries the common
//! structure and a content file that fills the layout's `{{> content}}`
//! insertion point.
//!
//! ```text
//! templates/
//!   base.hbs       <html><body>{{> content}}</body></html>
//!   welcome.hbs    <p>Hello, {{Name}}!</p>
//! ```

use handlebars::Handlebars;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{MailError, Result};

/// Layout used when a message does not name its own.
pub const DEFAULT_LAYOUT: &str = "templates/base.hbs";

/// Partial name the layout references to pull in the content template.
pub const CONTENT_PARTIAL: &str = "content";

const LAYOUT_TEMPLATE: &str = "layout";

/// Template engine trait for rendering email bodies.
pub trait TemplateEngine: Send + Sync {
    /// Render the layout of `templates` with its content slot filled.
    fn render(&self, templates: &TemplatePair, context: &serde_json::Value) -> Result<String>;
}

/// A layout and the content that fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePair {
    pub layout: PathBuf,
    pub content: PathBuf,
}

impl TemplatePair {
    pub fn new(layout: impl Into<PathBuf>, content: impl Into<PathBuf>) -> Self {
        Self {
            layout: layout.into(),
            content: content.into(),
        }
    }

    /// Pair `content` with [`DEFAULT_LAYOUT`].
    pub fn with_default_layout(content: impl Into<PathBuf>) -> Self {
        Self::new(DEFAULT_LAYOUT, content)
    }
}

/// Handlebars-based template engine for emails.
///
/// Strict mode is always on: a template that references a key missing from
/// the context fails to render instead of producing an empty string.
#[derive(Clone)]
pub struct HandlebarsEngine {
    handlebars: Handlebars<'static>,
    root: Option<PathBuf>,
}

impl HandlebarsEngine {
    /// Create a new Handlebars engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        Self {
            handlebars,
            root: None,
        }
    }

    /// Resolve relative template paths against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Register helpers.
    pub fn register_helper<H: handlebars::HelperDef + Send + Sync + 'static>(
        mut self,
        name: &str,
        helper: H,
    ) -> Self {
        self.handlebars.register_helper(name, Box::new(helper));
        self
    }

    /// Render a layout and content given as source text.
    pub fn render_str(
        &self,
        layout: &str,
        content: &str,
        context: &serde_json::Value,
    ) -> Result<String> {
        self.compose(("<layout>", layout), ("<content>", content), context)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn read(&self, path: &Path) -> Result<(String, String)> {
        let path = self.resolve(path);
        let name = path.display().to_string();
        let source =
            std::fs::read_to_string(&path).map_err(|e| MailError::template_load(&name, e))?;
        Ok((name, source))
    }

    // Each render gets its own registry so concurrent sends never see each
    // other's content partial.
    fn compose(
        &self,
        (layout_name, layout): (&str, &str),
        (content_name, content): (&str, &str),
        context: &serde_json::Value,
    ) -> Result<String> {
        let mut registry = self.handlebars.clone();

        registry
            .register_partial(CONTENT_PARTIAL, content)
            .map_err(|e| MailError::template_load(content_name, e))?;
        registry
            .register_template_string(LAYOUT_TEMPLATE, layout)
            .map_err(|e| MailError::template_load(layout_name, e))?;

        let html = registry.render(LAYOUT_TEMPLATE, context)?;
        debug!(layout = layout_name, content = content_name, "Rendered email template");
        Ok(html)
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn render(&self, templates: &TemplatePair, context: &serde_json::Value) -> Result<String> {
        let (layout_name, layout) = self.read(&templates.layout)?;
        let (content_name, content) = self.read(&templates.content)?;

        self.compose(
            (&layout_name, &layout),
            (&content_name, &content),
            context,
        )
    }
}
