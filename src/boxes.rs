//! Box model: the dynamically-shaped value tree a data-binding layer
//! hands to the builder.

use std::sync::Arc;

use crate::error::{Error, ErrorKind, Result};

/// A box tree node
#[derive(Debug, Clone, PartialEq)]
pub enum XmlBox {
    /// Scalar value
    Simple(SimpleBox),
    /// Ordered (key, value) entries plus attributes; keys may repeat
    Keyed(KeyedBox),
    /// Ordered list of values
    Unkeyed(UnkeyedBox),
    /// One selected arm of a tagged union
    Choice(ChoiceBox),
    /// A container owned jointly with the binding layer
    Shared(SharedBox),
}

impl XmlBox {
    /// Returns true if this box is a choice arm, shared or not
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            Self::Choice(_) | Self::Shared(SharedBox::Choice(_))
        )
    }

    /// Returns the scalar if this is a simple box, None otherwise
    pub fn as_simple(&self) -> Option<&SimpleBox> {
        match self {
            Self::Simple(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the keyed box, looking through a shared wrapper
    pub fn as_keyed(&self) -> Option<&KeyedBox> {
        match self {
            Self::Keyed(k) => Some(k),
            Self::Shared(SharedBox::Keyed(k)) => Some(k),
            _ => None,
        }
    }

    /// Returns the unkeyed box, looking through a shared wrapper
    pub fn as_unkeyed(&self) -> Option<&UnkeyedBox> {
        match self {
            Self::Unkeyed(u) => Some(u),
            Self::Shared(SharedBox::Unkeyed(u)) => Some(u),
            _ => None,
        }
    }

    /// Returns the choice box, looking through a shared wrapper
    pub fn as_choice(&self) -> Option<&ChoiceBox> {
        match self {
            Self::Choice(c) => Some(c),
            Self::Shared(SharedBox::Choice(c)) => Some(c),
            _ => None,
        }
    }
}

impl From<SimpleBox> for XmlBox {
    fn from(value: SimpleBox) -> Self {
        Self::Simple(value)
    }
}

impl From<KeyedBox> for XmlBox {
    fn from(value: KeyedBox) -> Self {
        Self::Keyed(value)
    }
}

impl From<UnkeyedBox> for XmlBox {
    fn from(value: UnkeyedBox) -> Self {
        Self::Unkeyed(value)
    }
}

impl From<ChoiceBox> for XmlBox {
    fn from(value: ChoiceBox) -> Self {
        Self::Choice(value)
    }
}

impl From<SharedBox> for XmlBox {
    fn from(value: SharedBox) -> Self {
        Self::Shared(value)
    }
}

impl From<Member> for XmlBox {
    fn from(value: Member) -> Self {
        match value {
            Member::Simple(s) => Self::Simple(s),
            Member::Keyed(k) => Self::Keyed(k),
            Member::Unkeyed(u) => Self::Unkeyed(u),
            Member::SharedKeyed(k) => Self::Shared(SharedBox::Keyed(k)),
            Member::SharedUnkeyed(u) => Self::Shared(SharedBox::Unkeyed(u)),
        }
    }
}

/// Scalar value with an optional canonical string form
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SimpleBox {
    /// No renderable value
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Decimal kept in its textual form to avoid precision loss
    Decimal(String),
    /// Raw string, the only scalar eligible for CDATA
    String(String),
}

impl SimpleBox {
    /// Returns true if this value has no string representation
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the raw string if this is a string scalar, None otherwise
    pub fn as_raw_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical XML text for this value
    pub fn xml_string(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(n) => Some(n.to_string()),
            Self::UInt(n) => Some(n.to_string()),
            Self::Float(n) => Some(format_float(*n)),
            Self::Decimal(d) => Some(d.clone()),
            Self::String(s) => Some(s.clone()),
        }
    }
}

// XML Schema spellings for the non-finite doubles
fn format_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "INF".to_string()
        } else {
            "-INF".to_string()
        }
    } else {
        n.to_string()
    }
}

impl From<bool> for SimpleBox {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for SimpleBox {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for SimpleBox {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for SimpleBox {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for SimpleBox {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for SimpleBox {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for SimpleBox {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for SimpleBox {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl<T: Into<Self>> From<Option<T>> for SimpleBox {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A value that may sit under a key of a [`KeyedBox`].
///
/// Choice arms are not members: a tagged union nested in a keyed container
/// has no agreed XML shape, so it cannot be stored there at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Simple(SimpleBox),
    Keyed(KeyedBox),
    Unkeyed(UnkeyedBox),
    SharedKeyed(Arc<KeyedBox>),
    SharedUnkeyed(Arc<UnkeyedBox>),
}

impl TryFrom<XmlBox> for Member {
    type Error = XmlBox;

    /// Hands the box back unchanged when it is a choice arm
    fn try_from(value: XmlBox) -> std::result::Result<Self, Self::Error> {
        match value {
            XmlBox::Simple(s) => Ok(Self::Simple(s)),
            XmlBox::Keyed(k) => Ok(Self::Keyed(k)),
            XmlBox::Unkeyed(u) => Ok(Self::Unkeyed(u)),
            XmlBox::Shared(SharedBox::Keyed(k)) => Ok(Self::SharedKeyed(k)),
            XmlBox::Shared(SharedBox::Unkeyed(u)) => Ok(Self::SharedUnkeyed(u)),
            other @ (XmlBox::Choice(_) | XmlBox::Shared(SharedBox::Choice(_))) => Err(other),
        }
    }
}

impl From<SimpleBox> for Member {
    fn from(value: SimpleBox) -> Self {
        Self::Simple(value)
    }
}

impl From<KeyedBox> for Member {
    fn from(value: KeyedBox) -> Self {
        Self::Keyed(value)
    }
}

impl From<UnkeyedBox> for Member {
    fn from(value: UnkeyedBox) -> Self {
        Self::Unkeyed(value)
    }
}

impl From<Arc<KeyedBox>> for Member {
    fn from(value: Arc<KeyedBox>) -> Self {
        Self::SharedKeyed(value)
    }
}

impl From<Arc<UnkeyedBox>> for Member {
    fn from(value: Arc<UnkeyedBox>) -> Self {
        Self::SharedUnkeyed(value)
    }
}

/// Keyed container: ordered entries (keys may repeat) and attributes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyedBox {
    elements: Vec<(String, Member)>,
    attributes: Vec<(String, SimpleBox)>,
}

impl KeyedBox {
    /// Creates a new empty keyed box
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry; an existing key is repeated, not replaced
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Member>) {
        self.elements.push((key.into(), value.into()));
    }

    /// Appends an arbitrary box, rejecting choice arms
    pub fn try_push(&mut self, key: impl Into<String>, value: XmlBox) -> Result<()> {
        let key = key.into();
        match Member::try_from(value) {
            Ok(member) => {
                self.elements.push((key, member));
                Ok(())
            }
            Err(_) => Err(Error::new(ErrorKind::UnsupportedMember { key })),
        }
    }

    /// Chaining form of [`push`](Self::push)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Member>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends an attribute; duplicates are kept
    pub fn push_attribute(&mut self, key: impl Into<String>, value: impl Into<SimpleBox>) {
        self.attributes.push((key.into(), value.into()));
    }

    /// Chaining form of [`push_attribute`](Self::push_attribute)
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<SimpleBox>) -> Self {
        self.push_attribute(key, value);
        self
    }

    pub fn elements(&self) -> &[(String, Member)] {
        &self.elements
    }

    pub fn attributes(&self) -> &[(String, SimpleBox)] {
        &self.attributes
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Member> {
        self.elements
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns the number of entries, counting repeated keys
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Ordered list of boxes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnkeyedBox(Vec<XmlBox>);

impl UnkeyedBox {
    /// Creates a new empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, value: impl Into<XmlBox>) {
        self.0.push(value.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, XmlBox> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the arms if every item is a choice, None otherwise
    pub fn as_choices(&self) -> Option<Vec<&ChoiceBox>> {
        self.0.iter().map(XmlBox::as_choice).collect()
    }
}

impl From<Vec<XmlBox>> for UnkeyedBox {
    fn from(values: Vec<XmlBox>) -> Self {
        Self(values)
    }
}

impl<T: Into<XmlBox>> FromIterator<T> for UnkeyedBox {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a UnkeyedBox {
    type Item = &'a XmlBox;
    type IntoIter = std::slice::Iter<'a, XmlBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The selected arm of a tagged union, keyed by the arm's own name
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceBox {
    pub key: String,
    pub element: Box<XmlBox>,
}

impl ChoiceBox {
    pub fn new(key: impl Into<String>, element: impl Into<XmlBox>) -> Self {
        Self {
            key: key.into(),
            element: Box::new(element.into()),
        }
    }
}

/// Shared ownership of a container; carries no structural meaning
#[derive(Debug, Clone, PartialEq)]
pub enum SharedBox {
    Keyed(Arc<KeyedBox>),
    Unkeyed(Arc<UnkeyedBox>),
    Choice(Arc<ChoiceBox>),
}
