mod escape;
mod xml;

pub use self::{escape::EscapeTable, xml::render};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Indentation unit and how many of it make up one nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Indentation {
    Spaces(usize),
    Tabs(usize),
}

impl Default for Indentation {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

impl Indentation {
    /// Prefix for the given nesting level
    pub fn prefix(self, level: usize) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(level * n),
            Self::Tabs(n) => "\t".repeat(level * n),
        }
    }
}

/// Substitution tables for element text and attribute values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Escaping {
    pub elements: EscapeTable,
    pub attributes: EscapeTable,
}

/// Configuration options for rendering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatConfig {
    /// Put child elements on their own indented lines, except inside
    /// mixed text content
    pub pretty_print: bool,
    /// Sort child elements and attributes by key at every level
    pub sort_keys: bool,
    pub indentation: Indentation,
    pub escaping: Escaping,
}

impl FormatConfig {
    #[must_use]
    pub fn pretty_print(mut self, enabled: bool) -> Self {
        self.pretty_print = enabled;
        self
    }

    #[must_use]
    pub fn sort_keys(mut self, enabled: bool) -> Self {
        self.sort_keys = enabled;
        self
    }

    #[must_use]
    pub fn indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = indentation;
        self
    }

    #[must_use]
    pub fn escaping(mut self, escaping: Escaping) -> Self {
        self.escaping = escaping;
        self
    }
}
