//! Box tree to element tree.
//!
//! The shape rules:
//! - a scalar becomes `<key>text</key>`, a CDATA section when the key is
//!   marked for CDATA and the scalar is a raw string, or `<key />` when it
//!   has no string form;
//! - a choice becomes `<key><arm>..</arm></key>`;
//! - a list of choices becomes `<key><arm1>..</arm1><arm2>..</arm2></key>`;
//! - any other list becomes `<key><key>..</key><key>..</key></key>`;
//! - inside a keyed box a list member is flattened into repeated siblings
//!   named after the member key, with no wrapper element.

use tracing::{debug, trace};

use crate::boxes::{ChoiceBox, KeyedBox, Member, SharedBox, SimpleBox, UnkeyedBox, XmlBox};
use crate::element::{Attribute, Element};

/// Builds the element named `key` for `value`.
///
/// `cdata_for` decides, per element key, whether raw string scalars are
/// written as CDATA. `attributes` are placed on the returned element ahead
/// of any attributes carried by `value` itself.
pub fn build<F>(key: &str, value: &XmlBox, cdata_for: F, attributes: Vec<Attribute>) -> Element
where
    F: Fn(&str) -> bool,
{
    Builder {
        cdata_for: &cdata_for,
    }
    .build(key, value, attributes)
}

struct Builder<'a> {
    cdata_for: &'a dyn Fn(&str) -> bool,
}

impl Builder<'_> {
    fn build(&self, key: &str, value: &XmlBox, attributes: Vec<Attribute>) -> Element {
        match value {
            XmlBox::Simple(simple) => self.simple(key, simple, attributes),
            XmlBox::Keyed(keyed) => self.keyed(key, keyed, attributes),
            XmlBox::Unkeyed(unkeyed) => self.unkeyed(key, unkeyed, attributes),
            XmlBox::Choice(choice) => self.choice(key, choice, attributes),
            XmlBox::Shared(SharedBox::Keyed(keyed)) => self.keyed(key, keyed, attributes),
            XmlBox::Shared(SharedBox::Unkeyed(unkeyed)) => self.unkeyed(key, unkeyed, attributes),
            XmlBox::Shared(SharedBox::Choice(choice)) => self.choice(key, choice, attributes),
        }
    }

    fn simple(&self, key: &str, value: &SimpleBox, attributes: Vec<Attribute>) -> Element {
        if let Some(raw) = value.as_raw_str() {
            if (self.cdata_for)(key) {
                trace!(key, "writing string as cdata");
                return Element::with_children(key, vec![Element::cdata(raw)], attributes);
            }
        }
        match value.xml_string() {
            Some(text) => Element::with_children(key, vec![Element::text(text)], attributes),
            None => Element::with_children(key, Vec::new(), attributes),
        }
    }

    fn choice(&self, key: &str, choice: &ChoiceBox, attributes: Vec<Attribute>) -> Element {
        let arm = self.build(&choice.key, &choice.element, Vec::new());
        Element::with_children(key, vec![arm], attributes)
    }

    fn unkeyed(&self, key: &str, unkeyed: &UnkeyedBox, attributes: Vec<Attribute>) -> Element {
        let children: Vec<Element> = match unkeyed.as_choices() {
            Some(choices) => choices
                .into_iter()
                .map(|choice| self.build(&choice.key, &choice.element, Vec::new()))
                .collect(),
            None => self.repeated(key, unkeyed).collect(),
        };
        Element::with_children(key, children, attributes)
    }

    fn keyed(&self, key: &str, keyed: &KeyedBox, mut attributes: Vec<Attribute>) -> Element {
        let mut children = Vec::with_capacity(keyed.len());
        for (sub_key, member) in keyed.elements() {
            match member {
                Member::Unkeyed(unkeyed) => children.extend(self.repeated(sub_key, unkeyed)),
                Member::SharedUnkeyed(unkeyed) => children.extend(self.repeated(sub_key, unkeyed)),
                Member::Keyed(nested) => children.push(self.keyed(sub_key, nested, Vec::new())),
                Member::SharedKeyed(nested) => {
                    children.push(self.keyed(sub_key, nested, Vec::new()));
                }
                Member::Simple(simple) => children.push(self.simple(sub_key, simple, Vec::new())),
            }
        }

        attributes.reserve(keyed.attributes().len());
        for (attr_key, attr_value) in keyed.attributes() {
            match attr_value.xml_string() {
                Some(value) => attributes.push(Attribute::new(attr_key.clone(), value)),
                None => debug!(key, attribute = %attr_key, "dropping attribute without a string value"),
            }
        }

        Element::with_children(key, children, attributes)
    }

    /// One element per item, every one named `key`
    fn repeated<'a>(
        &'a self,
        key: &'a str,
        unkeyed: &'a UnkeyedBox,
    ) -> impl Iterator<Item = Element> + 'a {
        unkeyed
            .iter()
            .map(move |item| self.build(key, item, Vec::new()))
    }
}
