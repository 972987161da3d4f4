//! Server-side page rendering.
//!
//! Templates are embedded and rendered with minijinja; auto-escaping is on
//! for the `.html` template name. Markdown-to-HTML conversion lives behind
//! [`MarkdownRenderer`] - the board stores and serves the raw source, and
//! a converter can be slotted in without touching the core.

use crate::board::PageResult;
use minijinja::value::Value;
use minijinja::{Environment, context};

static INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Produces the template value for a message body.
///
/// Implementations returning [`Value::from_safe_string`] inject HTML as-is
/// (the converter is responsible for sanitization); plain string values are
/// auto-escaped by the template engine.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> Value;
}

/// Fallback renderer: presents the raw Markdown source, auto-escaped.
pub struct PlainSource;

impl MarkdownRenderer for PlainSource {
    fn render(&self, source: &str) -> Value {
        Value::from(source)
    }
}

/// Renders board pages to HTML.
pub struct PageRenderer {
    env: Environment<'static>,
    markdown: Box<dyn MarkdownRenderer>,
}

impl PageRenderer {
    /// Build the template environment with the given Markdown renderer.
    pub fn new(markdown: Box<dyn MarkdownRenderer>) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env, markdown })
    }

    /// Render the board listing page.
    pub fn index(&self, page: &PageResult) -> Result<String, minijinja::Error> {
        let messages: Vec<Value> = page
            .messages
            .iter()
            .map(|m| {
                context! {
                    id => m.id,
                    body => self.markdown.render(&m.content),
                    created_at => m.created_at,
                }
            })
            .collect();

        let template = self.env.get_template("index.html")?;
        template.render(context! {
            messages => messages,
            current_page => page.current_page,
            total_pages => page.total_pages,
            total_count => page.total_count,
            search => page.search,
        })
    }
}
