//! JSON documents as box trees.
//!
//! Objects become keyed boxes, arrays unkeyed boxes and everything else a
//! scalar. Two object keys are treated specially: `"@attributes"` holds an
//! object of scalar attribute values, and `"#text"` holds the element's
//! own text value.

use serde_json::{Map, Number, Value};

use crate::boxes::{KeyedBox, Member, SimpleBox, UnkeyedBox, XmlBox};
use crate::element::{CDATA_KEY, TEXT_KEY};
use crate::error::{Error, ErrorKind, Result};

pub const ATTRIBUTES_KEY: &str = "@attributes";
pub const TEXT_VALUE_KEY: &str = "#text";

/// Converts a JSON value into a box tree
pub fn to_box(value: &Value) -> Result<XmlBox> {
    Ok(match value {
        Value::Object(map) => XmlBox::Keyed(keyed(map)?),
        Value::Array(items) => XmlBox::Unkeyed(unkeyed(items)?),
        scalar => XmlBox::Simple(simple(scalar).unwrap_or_default()),
    })
}

/// Parses JSON text into a box tree
pub fn from_str(input: &str) -> Result<XmlBox> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| Error::with_message(ErrorKind::InvalidJson, e.to_string()))?;
    to_box(&value)
}

fn keyed(map: &Map<String, Value>) -> Result<KeyedBox> {
    let mut keyed = KeyedBox::new();
    for (key, value) in map {
        match key.as_str() {
            ATTRIBUTES_KEY => attributes(&mut keyed, value)?,
            TEXT_VALUE_KEY => keyed.push(TEXT_KEY, member(value).map_err(|e| e.within(key))?),
            TEXT_KEY | CDATA_KEY => {
                return Err(Error::new(ErrorKind::ReservedKey { key: key.clone() }));
            }
            _ => keyed.push(key.clone(), member(value).map_err(|e| e.within(key))?),
        }
    }
    Ok(keyed)
}

fn attributes(keyed: &mut KeyedBox, value: &Value) -> Result<()> {
    let Value::Object(map) = value else {
        return Err(Error::new(ErrorKind::InvalidAttribute {
            key: ATTRIBUTES_KEY.to_string(),
        }));
    };
    for (key, value) in map {
        let scalar = simple(value).ok_or_else(|| {
            Error::new(ErrorKind::InvalidAttribute { key: key.clone() }).within(ATTRIBUTES_KEY)
        })?;
        keyed.push_attribute(key.clone(), scalar);
    }
    Ok(())
}

fn unkeyed(items: &[Value]) -> Result<UnkeyedBox> {
    items.iter().map(to_box).collect::<Result<Vec<_>>>().map(UnkeyedBox::from)
}

fn member(value: &Value) -> Result<Member> {
    Ok(match value {
        Value::Object(map) => Member::Keyed(keyed(map)?),
        Value::Array(items) => Member::Unkeyed(unkeyed(items)?),
        scalar => Member::Simple(simple(scalar).unwrap_or_default()),
    })
}

/// None for arrays and objects
fn simple(value: &Value) -> Option<SimpleBox> {
    match value {
        Value::Null => Some(SimpleBox::Null),
        Value::Bool(b) => Some(SimpleBox::Bool(*b)),
        Value::Number(n) => Some(number(n)),
        Value::String(s) => Some(SimpleBox::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn number(n: &Number) -> SimpleBox {
    if let Some(i) = n.as_i64() {
        SimpleBox::Int(i)
    } else if let Some(u) = n.as_u64() {
        SimpleBox::UInt(u)
    } else {
        n.as_f64()
            .map_or_else(|| SimpleBox::Decimal(n.to_string()), SimpleBox::Float)
    }
}
