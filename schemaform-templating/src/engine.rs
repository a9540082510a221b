//! Template engine seam and its Liquid implementation
//!
//! The renderer only knows the two traits here: an engine compiles a
//! template source once, and the compiled template renders a JSON context
//! any number of times.

use serde_json::Value;

use crate::error::{Result, TemplatingError};

/// A template compiled once and rendered per field
pub trait CompiledTemplate: Send + Sync {
    /// Render against a JSON object context
    fn render(&self, context: &Value) -> Result<String>;
}

/// Turns template sources into [`CompiledTemplate`]s
pub trait TemplateEngine {
    /// Compile `source`; `name` is only used in error messages
    fn compile(&self, name: &str, source: &str) -> Result<Box<dyn CompiledTemplate>>;
}

/// Template engine with Liquid configuration
pub struct LiquidEngine {
    parser: liquid::Parser,
}

impl LiquidEngine {
    /// Create an engine with the Liquid standard library of tags and filters
    pub fn new() -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| TemplatingError::Parse {
                name: "<parser>".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Create an engine with a custom parser
    pub fn with_parser(parser: liquid::Parser) -> Self {
        Self { parser }
    }

    /// Get a reference to the underlying parser
    pub fn parser(&self) -> &liquid::Parser {
        &self.parser
    }
}

impl TemplateEngine for LiquidEngine {
    fn compile(&self, name: &str, source: &str) -> Result<Box<dyn CompiledTemplate>> {
        let template = self
            .parser
            .parse(source)
            .map_err(|e| TemplatingError::Parse {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(Box::new(LiquidTemplate { template }))
    }
}

struct LiquidTemplate {
    template: liquid::Template,
}

impl CompiledTemplate for LiquidTemplate {
    fn render(&self, context: &Value) -> Result<String> {
        let globals =
            liquid::to_object(context).map_err(|e| TemplatingError::Context(e.to_string()))?;
        self.template
            .render(&globals)
            .map_err(|e| TemplatingError::Render {
                field: field_name(context),
                message: e.to_string(),
            })
    }
}

fn field_name(context: &Value) -> String {
    context
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string()
}
