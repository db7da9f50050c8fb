use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const FILL: &str = "fill";
pub const FILL_OPACITY: &str = "fill-opacity";
pub const OPACITY: &str = "opacity";
pub const STROKE: &str = "stroke";
pub const STROKE_OPACITY: &str = "stroke-opacity";
pub const STROKE_WIDTH: &str = "stroke-width";

/// Named style definition: ordered `property: value` statements.
///
/// Two classes define the same style when name and statements are equal;
/// statement order is kept for output but ignored for equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleClass {
    name: String,
    statements: IndexMap<String, String>,
}

impl StyleClass {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            statements: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.statements.insert(property.to_owned(), value.into());
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn statement(&self, property: &str) -> Option<&str> {
        self.statements.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn statements(&self) -> &IndexMap<String, String> {
        &self.statements
    }

    /// `property:value;` pairs in insertion order.
    #[must_use]
    pub fn inline_statements(&self) -> String {
        self.statements
            .iter()
            .map(|(property, value)| format!("{property}:{value};"))
            .collect()
    }

    /// CSS rule for an SVG `<style>` block.
    #[must_use]
    pub fn to_css_rule(&self) -> String {
        format!(".{} {{{}}}", self.name, self.inline_statements())
    }
}
