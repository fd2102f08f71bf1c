//! Polymorphic references to schema elements.

use std::fmt;

use uuid::Uuid;

use crate::error::{ResolveError, ResolveResult};
use crate::ident::identifier::ResolvedIdentifier;

/// Whatever a caller had on hand to name a schema element.
///
/// `Text` is the untyped form: it is classified at resolution time as an
/// integer, a braced GUID or an alias, in that order. `Alias` and `Guid`
/// skip classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A numeric id, trusted verbatim.
    NumericId(i32),
    /// The integer value of a generated enum member.
    EnumValue(i32),
    /// A 64-bit id; must fit in 32 bits.
    LongId(i64),
    /// Unclassified text.
    Text(String),
    /// A semantic alias.
    Alias(String),
    /// A GUID in any textual form the `uuid` crate accepts.
    Guid(String),
    /// An identifier carrying its own resolution state.
    PreResolved(Box<ResolvedIdentifier>),
}

/// How a `Text` reference was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextForm {
    Integer(i32),
    Guid(String),
    Alias(String),
}

impl Reference {
    /// A numeric id reference.
    pub fn id(id: i32) -> Self {
        Self::NumericId(id)
    }

    /// An alias reference.
    pub fn alias(alias: impl Into<String>) -> Self {
        Self::Alias(alias.into())
    }

    /// A GUID reference.
    pub fn guid(guid: impl Into<String>) -> Self {
        Self::Guid(guid.into())
    }
}

impl From<i32> for Reference {
    fn from(id: i32) -> Self {
        Self::NumericId(id)
    }
}

impl From<i64> for Reference {
    fn from(id: i64) -> Self {
        Self::LongId(id)
    }
}

impl From<&str> for Reference {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Reference {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Uuid> for Reference {
    fn from(guid: Uuid) -> Self {
        Self::Guid(format_guid(&guid))
    }
}

impl From<ResolvedIdentifier> for Reference {
    fn from(identifier: ResolvedIdentifier) -> Self {
        Self::PreResolved(Box::new(identifier))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericId(id) | Self::EnumValue(id) => write!(f, "{id}"),
            Self::LongId(id) => write!(f, "{id}"),
            Self::Text(text) | Self::Alias(text) | Self::Guid(text) => f.write_str(text),
            Self::PreResolved(identifier) => write!(f, "{identifier}"),
        }
    }
}

/// Classify untyped text: integer first, then braced GUID, then alias.
pub fn classify_text(text: &str) -> ResolveResult<TextForm> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::argument("reference text is empty"));
    }

    if let Ok(id) = trimmed.parse::<i32>() {
        return Ok(TextForm::Integer(id));
    }

    if let Some(guid) = canonical_braced_guid(trimmed) {
        return Ok(TextForm::Guid(guid));
    }

    Ok(TextForm::Alias(text.to_string()))
}

/// Canonical form of `text` if it is a GUID in braced `{8-4-4-4-12}` form.
///
/// Braces are required; bare or hyphen-less GUIDs are not GUIDs here.
pub fn canonical_braced_guid(text: &str) -> Option<String> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    if inner.len() != 36 {
        return None;
    }
    Uuid::try_parse(inner).ok().map(|guid| format_guid(&guid))
}

/// Normalise a GUID in any accepted form to upper-case braced form.
pub fn normalize_guid(text: &str) -> ResolveResult<String> {
    Uuid::try_parse(text.trim())
        .map(|guid| format_guid(&guid))
        .map_err(|_| ResolveError::argument(format!("'{text}' is not a valid GUID")))
}

fn format_guid(guid: &Uuid) -> String {
    format!("{{{}}}", guid.hyphenated()).to_ascii_uppercase()
}
