//! Request Types - Level 1 Foundation Types
//!
//! Pure data structures describing data-subject request forms. Everything
//! that builds, fills or signs a request form depends on this crate; this
//! crate depends on nothing else in the workspace.
//!
//! ## Contents
//!
//! - Field descriptors (label, kind, optionality, value)
//! - Structured address values
//! - Request kinds and the legal article governing each
//!
//! ## Rules
//!
//! 1. **NO BUSINESS LOGIC** - constructors, accessors and parsing only
//! 2. **NO WORKSPACE DEPENDENCIES**
//! 3. **SERIALIZABLE** - field descriptors keep the `{desc, type, optional, value}`
//!    shape used for stored identity data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// FIELD KINDS
// ============================================================================

/// Semantic type tag of a form field. Determines how a consumer renders and
/// validates the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Full name of the data subject
    Name,
    /// Date of birth
    Birthdate,
    /// Postal address (structured value)
    Address,
    /// Single-line free text (e-mail, customer number, ...)
    Input,
    /// Multi-line free text
    Textarea,
}

impl FieldKind {
    pub fn all() -> &'static [FieldKind] {
        &[
            FieldKind::Name,
            FieldKind::Birthdate,
            FieldKind::Address,
            FieldKind::Input,
            FieldKind::Textarea,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Birthdate => "birthdate",
            FieldKind::Address => "address",
            FieldKind::Input => "input",
            FieldKind::Textarea => "textarea",
        }
    }

    /// Composite kinds carry a structured value instead of a plain string
    pub fn is_composite(&self) -> bool {
        matches!(self, FieldKind::Address)
    }

    /// Free-text kinds are told apart by their label rather than their kind
    pub fn is_free_text(&self) -> bool {
        matches!(self, FieldKind::Input | FieldKind::Textarea)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field kind: {0}")]
pub struct UnknownFieldKind(pub String);

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownFieldKind(s.to_string()))
    }
}

// ============================================================================
// FIELD VALUES
// ============================================================================

/// Structured postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Marks the principal address of the data subject
    #[serde(default)]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// An empty address marked as the principal one
    pub fn primary() -> Self {
        Self {
            primary: true,
            ..Default::default()
        }
    }

    /// True when no address line carries any text
    pub fn is_blank(&self) -> bool {
        [&self.street_1, &self.street_2, &self.place, &self.country]
            .iter()
            .all(|line| line.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

/// Current value of a field. Shape depends on the field kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Address(Address),
}

impl FieldValue {
    pub fn empty_text() -> Self {
        FieldValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Address(a) => a.is_blank(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Address(_) => None,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            FieldValue::Address(a) => Some(a),
            FieldValue::Text(_) => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::empty_text()
    }
}

// ============================================================================
// FIELD DESCRIPTORS
// ============================================================================

/// One entry in a field template. A template is an ordered `Vec` of these;
/// order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Localized display label
    #[serde(rename = "desc")]
    pub description: String,
    /// Semantic kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether the form may be submitted with this field empty
    #[serde(default)]
    pub optional: bool,
    /// Current value
    #[serde(default)]
    pub value: FieldValue,
}

impl FieldDescriptor {
    /// Create a field holding an empty string value
    pub fn text(description: impl Into<String>, kind: FieldKind, optional: bool) -> Self {
        Self {
            description: description.into(),
            kind,
            optional,
            value: FieldValue::empty_text(),
        }
    }

    /// Create an address field with an empty address
    pub fn address(description: impl Into<String>, optional: bool, primary: bool) -> Self {
        Self {
            description: description.into(),
            kind: FieldKind::Address,
            optional,
            value: FieldValue::Address(Address {
                primary,
                ..Default::default()
            }),
        }
    }

    /// Replace the value, keeping label, kind and optionality
    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.value = value;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// True for address fields whose value is marked primary
    pub fn is_primary_address(&self) -> bool {
        self.value.as_address().map_or(false, |a| a.primary)
    }
}

// ============================================================================
// REQUEST KINDS
// ============================================================================

/// Request kind name → governing GDPR article number
pub const REQUEST_ARTICLES: &[(&str, u8)] =
    &[("access", 15), ("erasure", 17), ("rectification", 16)];

/// Look up the article for a request kind name
pub fn request_article(name: &str) -> Option<u8> {
    REQUEST_ARTICLES
        .iter()
        .find(|(kind, _)| *kind == name)
        .map(|(_, article)| *article)
}

/// Kind of data-subject request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Access,
    Erasure,
    Rectification,
}

impl RequestType {
    pub fn all() -> &'static [RequestType] {
        &[
            RequestType::Access,
            RequestType::Erasure,
            RequestType::Rectification,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Access => "access",
            RequestType::Erasure => "erasure",
            RequestType::Rectification => "rectification",
        }
    }

    /// GDPR article governing this request kind
    pub fn article(&self) -> u8 {
        match self {
            RequestType::Access => 15,
            RequestType::Erasure => 17,
            RequestType::Rectification => 16,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown request type: {0}")]
pub struct UnknownRequestType(pub String);

impl FromStr for RequestType {
    type Err = UnknownRequestType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "access" => Ok(RequestType::Access),
            "erasure" => Ok(RequestType::Erasure),
            "rectification" => Ok(RequestType::Rectification),
            _ => Err(UnknownRequestType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_articles_exact() {
        assert_eq!(REQUEST_ARTICLES.len(), 3);
        assert_eq!(request_article("access"), Some(15));
        assert_eq!(request_article("erasure"), Some(17));
        assert_eq!(request_article("rectification"), Some(16));
        assert_eq!(request_article("custom"), None);
    }

    #[test]
    fn test_request_type_matches_article_table() {
        for rt in RequestType::all() {
            assert_eq!(request_article(rt.as_str()), Some(rt.article()));
            assert_eq!(rt.as_str().parse::<RequestType>().unwrap(), *rt);
        }
        assert!("objection".parse::<RequestType>().is_err());
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let field = FieldDescriptor::address("Address", true, true);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({"desc": "Address", "type": "address", "optional": true, "value": {"primary": true}})
        );

        let name = FieldDescriptor::text("Name", FieldKind::Name, false);
        assert_eq!(
            serde_json::to_value(&name).unwrap(),
            json!({"desc": "Name", "type": "name", "optional": false, "value": ""})
        );
    }

    #[test]
    fn test_descriptor_parses_stored_shape() {
        let field: FieldDescriptor = serde_json::from_value(json!({
            "desc": "Address",
            "type": "address",
            "value": {"primary": true, "street_1": "Main St 1", "place": "Berlin"}
        }))
        .unwrap();
        assert_eq!(field.kind, FieldKind::Address);
        assert!(!field.optional);
        assert!(field.is_primary_address());
        assert!(!field.is_empty());
    }

    #[test]
    fn test_empty_values() {
        assert!(FieldValue::Text("  ".into()).is_empty());
        assert!(FieldValue::Address(Address::primary()).is_empty());
        assert!(!FieldValue::Text("Jane".into()).is_empty());
    }

    #[test]
    fn test_field_kind_parse() {
        assert_eq!("textarea".parse::<FieldKind>().unwrap(), FieldKind::Textarea);
        assert!("email".parse::<FieldKind>().is_err());
        assert!(FieldKind::Address.is_composite());
        assert!(FieldKind::Input.is_free_text());
    }
}
