//! One-call encoding of a box tree to XML text

use tracing::{debug, instrument};

use crate::boxes::XmlBox;
use crate::builder::build;
use crate::element::{Attribute, Element};
use crate::formatter::{render, FormatConfig};

/// A conventional XML declaration; never added unless passed to
/// [`Encoder::header`]
pub const DEFAULT_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Which string scalars are written as CDATA sections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CdataStrategy {
    #[default]
    Never,
    Always,
    /// Only values stored under one of these element keys
    Keys(Vec<String>),
}

impl CdataStrategy {
    pub fn applies_to(&self, key: &str) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Keys(keys) => keys.iter().any(|k| k == key),
        }
    }
}

/// Builds and renders box trees with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    format: FormatConfig,
    header: Option<String>,
    cdata: CdataStrategy,
    root_attributes: Vec<Attribute>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn cdata(mut self, cdata: CdataStrategy) -> Self {
        self.cdata = cdata;
        self
    }

    /// Adds an attribute to the root element, ahead of the box's own
    #[must_use]
    pub fn root_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.root_attributes.push(Attribute::new(key, value));
        self
    }

    pub fn format_config(&self) -> &FormatConfig {
        &self.format
    }

    /// Builds the element tree for `value` under `key`
    pub fn build(&self, key: &str, value: &XmlBox) -> Element {
        build(
            key,
            value,
            |k| self.cdata.applies_to(k),
            self.root_attributes.clone(),
        )
    }

    /// Builds and renders `value` under `key`
    #[instrument(level = "debug", skip(self, value))]
    pub fn encode(&self, key: &str, value: &XmlBox) -> String {
        let element = self.build(key, value);
        debug!(
            children = element.children().len(),
            "element tree built"
        );
        render(&element, self.header.as_deref(), &self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::{KeyedBox, SimpleBox};

    #[test]
    fn test_cdata_strategy() {
        assert!(!CdataStrategy::Never.applies_to("a"));
        assert!(CdataStrategy::Always.applies_to("a"));
        let keys = CdataStrategy::Keys(vec!["body".to_string()]);
        assert!(keys.applies_to("body"));
        assert!(!keys.applies_to("title"));
    }

    #[test]
    fn test_encode_with_header_and_root_attribute() {
        let value = KeyedBox::new().with("body", SimpleBox::from("<hi>"));
        let out = Encoder::new()
            .header(DEFAULT_HEADER)
            .root_attribute("version", "2")
            .cdata(CdataStrategy::Keys(vec!["body".to_string()]))
            .encode("note", &value.into());
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<note version=\"2\"><body><![CDATA[<hi>]]></body></note>"
        );
    }

    #[test]
    fn test_encode_defaults() {
        let out = Encoder::new().encode("n", &SimpleBox::Int(3).into());
        assert_eq!(out, "<n>3</n>");
    }
}
