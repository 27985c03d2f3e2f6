//! Element tree to box tree, the composition direction

use super::{Element, TEXT_KEY};
use crate::boxes::{KeyedBox, Member, SimpleBox, UnkeyedBox, XmlBox};
use crate::storage::KeyedStorage;

impl Element {
    /// Converts this tree back into a box tree.
    ///
    /// Children sharing a key are grouped under their first occurrence and
    /// become a single unkeyed member; CDATA content is merged as plain text.
    pub fn to_box(&self) -> XmlBox {
        if let Some(text) = &self.text {
            return XmlBox::Simple(SimpleBox::String(text.clone()));
        }
        if self.attributes.is_empty() {
            match self.children.as_slice() {
                [] => return XmlBox::Simple(SimpleBox::Null),
                [only] if only.is_leaf() => {
                    return XmlBox::Simple(SimpleBox::String(
                        only.text.clone().unwrap_or_default(),
                    ))
                }
                _ => {}
            }
        }
        XmlBox::Keyed(self.to_keyed_box())
    }

    fn to_keyed_box(&self) -> KeyedBox {
        let mut storage = KeyedStorage::with_capacity(self.children.len());
        for child in &self.children {
            let key = if child.is_cdata_node() {
                TEXT_KEY
            } else {
                child.key.as_str()
            };
            storage.merge(key.to_string(), child.to_member());
        }

        let mut keyed = KeyedBox::new();
        for (key, mut values) in storage {
            let member = if values.len() == 1 {
                values.pop().unwrap_or(Member::Simple(SimpleBox::Null))
            } else {
                Member::Unkeyed(values.into_iter().map(XmlBox::from).collect::<UnkeyedBox>())
            };
            keyed.push(key, member);
        }
        for attribute in &self.attributes {
            keyed.push_attribute(attribute.key.clone(), attribute.value.clone());
        }
        keyed
    }

    fn to_member(&self) -> Member {
        match self.to_box() {
            XmlBox::Keyed(keyed) => Member::Keyed(keyed),
            XmlBox::Simple(simple) => Member::Simple(simple),
            // to_box only ever yields simple or keyed boxes
            other => Member::try_from(other).unwrap_or(Member::Simple(SimpleBox::Null)),
        }
    }
}
