use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered `(literal, replacement)` substitutions.
///
/// Rules run in sequence over the whole string, so a rule that introduces
/// `&` must come after the `&` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EscapeTable(Vec<(String, String)>);

impl Default for EscapeTable {
    fn default() -> Self {
        Self::new([
            ("&", "&amp;"),
            ("<", "&lt;"),
            (">", "&gt;"),
            ("'", "&apos;"),
            ("\"", "&quot;"),
        ])
    }
}

impl EscapeTable {
    pub fn new<I, K, V>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            rules
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// A table that leaves every string untouched
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn rules(&self) -> &[(String, String)] {
        &self.0
    }

    /// Applies every rule in order; borrows when nothing matches
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut output = Cow::Borrowed(input);
        for (literal, replacement) in &self.0 {
            if literal.is_empty() || !output.contains(literal.as_str()) {
                continue;
            }
            output = Cow::Owned(output.replace(literal.as_str(), replacement));
        }
        output
    }
}
