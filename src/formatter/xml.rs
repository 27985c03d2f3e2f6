use super::FormatConfig;
use crate::element::{Attribute, Element};

/// Renders `element` to XML text.
///
/// `header` is written verbatim ahead of the body when present and
/// non-empty.
pub fn render(element: &Element, header: Option<&str>, config: &FormatConfig) -> String {
    let mut renderer = XmlRenderer {
        config,
        output: String::new(),
    };
    if let Some(header) = header.filter(|h| !h.is_empty()) {
        renderer.output.push_str(header);
    }
    renderer.node(element, 0, true);
    renderer.output
}

struct XmlRenderer<'a> {
    config: &'a FormatConfig,
    output: String,
}

impl XmlRenderer<'_> {
    fn node(&mut self, element: &Element, level: usize, indented: bool) {
        match element.text_value() {
            Some(text) => self.leaf(element, text),
            None => self.element(element, level, indented),
        }
    }

    fn leaf(&mut self, element: &Element, text: &str) {
        if element.is_cdata_node() {
            self.output.push_str("<![CDATA[");
            self.output.push_str(text);
            self.output.push_str("]]>");
        } else {
            let escaped = self.config.escaping.elements.apply(text);
            self.output.push_str(&escaped);
        }
    }

    /// `indented` is false when the parent holds mixed text content
    fn element(&mut self, element: &Element, level: usize, indented: bool) {
        let pretty = self.config.pretty_print;
        if pretty && indented {
            self.output
                .push_str(&self.config.indentation.prefix(level));
        }

        let tagged = !element.key().is_empty() && !element.is_cdata_node();
        if tagged {
            self.output.push('<');
            self.output.push_str(element.key());
            self.attributes(element);
        }

        if element.children().is_empty() {
            if tagged {
                self.output.push_str(" />");
            }
            return;
        }

        let pretty_children = pretty && !element.contains_text_nodes();
        if tagged {
            self.output.push('>');
            if pretty_children {
                self.output.push('\n');
            }
        }

        for child in self.ordered(element.children()) {
            match child.text_value() {
                Some(text) => self.leaf(child, text),
                None => {
                    self.element(child, level + 1, pretty_children);
                    if pretty_children {
                        self.output.push('\n');
                    }
                }
            }
        }

        if pretty_children {
            self.output
                .push_str(&self.config.indentation.prefix(level));
        }
        if tagged {
            self.output.push_str("</");
            self.output.push_str(element.key());
            self.output.push('>');
        }
    }

    /// Own attributes followed by those of attributed text children
    fn attributes(&mut self, element: &Element) {
        let hoisted = element
            .children()
            .iter()
            .filter(|child| child.is_text_node())
            .flat_map(Element::attributes);
        let mut attributes: Vec<&Attribute> = element.attributes().iter().chain(hoisted).collect();
        if self.config.sort_keys {
            attributes.sort_by(|a, b| a.key.cmp(&b.key));
        }

        for attribute in attributes {
            let value = self.config.escaping.attributes.apply(&attribute.value);
            self.output.push(' ');
            self.output.push_str(&attribute.key);
            self.output.push_str("=\"");
            self.output.push_str(&value);
            self.output.push('"');
        }
    }

    fn ordered<'e>(&self, children: &'e [Element]) -> Vec<&'e Element> {
        let mut ordered: Vec<&Element> = children.iter().collect();
        if self.config.sort_keys {
            ordered.sort_by(|a, b| a.key().cmp(b.key()));
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::Indentation;

    fn leaf_element(key: &str, text: &str) -> Element {
        Element::with_children(key, vec![Element::text(text)], Vec::new())
    }

    #[test]
    fn test_self_closing() {
        let out = render(&Element::new("empty"), None, &FormatConfig::default());
        assert_eq!(out, "<empty />");
    }

    #[test]
    fn test_empty_key_renders_nothing() {
        let out = render(&Element::new(""), None, &FormatConfig::default());
        assert_eq!(out, "");
    }

    #[test]
    fn test_header_prepended() {
        let out = render(
            &Element::new("a"),
            Some("<?xml version=\"1.0\"?>\n"),
            &FormatConfig::default(),
        );
        assert_eq!(out, "<?xml version=\"1.0\"?>\n<a />");
        let out = render(&Element::new("a"), Some(""), &FormatConfig::default());
        assert_eq!(out, "<a />");
    }

    #[test]
    fn test_pretty_print_nested() {
        let root = Element::with_children(
            "root",
            vec![Element::with_children(
                "child",
                vec![leaf_element("leaf", "x")],
                Vec::new(),
            )],
            Vec::new(),
        );
        let config = FormatConfig::default()
            .pretty_print(true)
            .indentation(Indentation::Spaces(2));
        assert_eq!(
            render(&root, None, &config),
            "<root>\n  <child>\n    <leaf>x</leaf>\n  </child>\n</root>"
        );
    }

    #[test]
    fn test_pretty_print_tabs() {
        let root = Element::with_children("root", vec![Element::new("a")], Vec::new());
        let config = FormatConfig::default()
            .pretty_print(true)
            .indentation(Indentation::Tabs(1));
        assert_eq!(render(&root, None, &config), "<root>\n\t<a />\n</root>");
    }

    #[test]
    fn test_mixed_content_is_not_indented() {
        let mut root = Element::new("p");
        root.append_text("one ");
        root.append(leaf_element("b", "two"));
        root.append_text(" three");
        let config = FormatConfig::default().pretty_print(true);
        assert_eq!(render(&root, None, &config), "<p>one <b>two</b> three</p>");
    }

    #[test]
    fn test_cdata_is_verbatim() {
        let root = Element::with_children("d", vec![Element::cdata("<&>")], Vec::new());
        assert_eq!(
            render(&root, None, &FormatConfig::default()),
            "<d><![CDATA[<&>]]></d>"
        );
    }

    #[test]
    fn test_sorting_children_and_attributes() {
        let root = Element::with_children(
            "r",
            vec![Element::new("b"), Element::new("a")],
            vec![Attribute::new("z", "1"), Attribute::new("y", "2")],
        );
        let config = FormatConfig::default().sort_keys(true);
        assert_eq!(
            render(&root, None, &config),
            r#"<r y="2" z="1"><a /><b /></r>"#
        );
        assert_eq!(
            render(&root, None, &FormatConfig::default()),
            r#"<r z="1" y="2"><b /><a /></r>"#
        );
    }

    #[test]
    fn test_attribute_hoisting() {
        let text_child = Element::with_children(
            "",
            vec![Element::text("hello")],
            vec![Attribute::new("lang", "en")],
        );
        let root = Element::with_children("root", vec![text_child], vec![Attribute::new("id", "1")]);
        assert_eq!(
            render(&root, None, &FormatConfig::default()),
            r#"<root id="1" lang="en">hello</root>"#
        );
    }

    #[test]
    fn test_duplicate_attributes_kept() {
        let root = Element::with_children(
            "r",
            Vec::new(),
            vec![Attribute::new("a", "1"), Attribute::new("a", "2")],
        );
        assert_eq!(
            render(&root, None, &FormatConfig::default()),
            r#"<r a="1" a="2" />"#
        );
    }

    #[test]
    fn test_attribute_values_escaped() {
        let root = Element::with_children("r", Vec::new(), vec![Attribute::new("q", "\"<&>\"")]);
        assert_eq!(
            render(&root, None, &FormatConfig::default()),
            r#"<r q="&quot;&lt;&amp;&gt;&quot;" />"#
        );
    }
}
