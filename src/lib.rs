//! xmlbox: canonical XML from dynamically-shaped box values
//!
//! This crate provides functionality to:
//! - Turn a box tree (scalars, keyed and unkeyed containers, choice arms)
//!   into a canonical element tree
//! - Render an element tree to XML text with pretty-printing, key sorting
//!   and configurable escaping
//! - Convert an element tree back into a box tree
//!
//! # Examples
//! ```
//! use xmlbox::{build, render, FormatConfig, KeyedBox, SimpleBox, UnkeyedBox};
//!
//! let items: UnkeyedBox = [SimpleBox::from("a"), SimpleBox::from("b")]
//!     .into_iter()
//!     .collect();
//! let value = KeyedBox::new().with("items", items);
//!
//! let element = build("root", &value.into(), |_| false, Vec::new());
//! let xml = render(&element, None, &FormatConfig::default());
//! assert_eq!(xml, "<root><items>a</items><items>b</items></root>");
//! ```

#![forbid(unsafe_code)]

pub mod boxes;
pub mod builder;
pub mod element;
pub mod encoder;
pub mod error;
pub mod formatter;
#[cfg(feature = "json")]
pub mod json;
pub mod storage;

// Re-exports
pub use boxes::{ChoiceBox, KeyedBox, Member, SharedBox, SimpleBox, UnkeyedBox, XmlBox};
pub use builder::build;
pub use element::{Attribute, Document, Element, CDATA_KEY, TEXT_KEY};
pub use encoder::{CdataStrategy, Encoder, DEFAULT_HEADER};
pub use error::{Error, ErrorKind, Result};
pub use formatter::{render, EscapeTable, Escaping, FormatConfig, Indentation};
pub use storage::KeyedStorage;

/// Encodes `value` under `key` with default options
pub fn to_string(key: &str, value: &XmlBox) -> String {
    Encoder::new().encode(key, value)
}
