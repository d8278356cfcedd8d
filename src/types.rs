//! Core data types for variant selection
//!
//! Attributes and variants are immutable once loaded. Option values are
//! plain string tokens; the catalog decides which ones exist.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// One selectable dimension of the product (e.g. "Color").
///
/// Attributes are identified by their position; the name is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attribute {
    pub name: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Catalog identifier of a purchasable variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub u64);

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One purchasable combination: one option value per attribute, in attribute order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub options: Vec<String>,
}

impl Variant {
    pub fn new<I, S>(id: impl Into<VariantId>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Option value at an attribute position
    #[inline]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// Purchasability status of the current selection, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    /// Some attributes are still unset and further choices are possible
    #[strum(serialize = "Select all options")]
    Incomplete,
    /// The decided prefix matches no catalog entry; nothing further can be chosen
    #[strum(serialize = "No further selection possible")]
    DeadEnd,
    /// Every attribute is set but no catalog entry matches
    #[strum(serialize = "Unavailable")]
    Unavailable,
    /// Every attribute is set and resolves to exactly one variant
    #[strum(serialize = "Available")]
    Available,
}

impl SelectionStatus {
    /// Returns true if the selection can be purchased as-is
    #[inline]
    pub const fn is_purchasable(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Output format for the command-line driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_attribute_serializes_as_plain_string() {
        let attr = Attribute::new("Color");
        assert_eq!(serde_json::to_string(&attr).unwrap(), "\"Color\"");
        let parsed: Attribute = serde_json::from_str("\"Size\"").unwrap();
        assert_eq!(parsed.name, "Size");
    }

    #[test]
    fn test_variant_json_shape() {
        let variant: Variant =
            serde_json::from_str(r#"{"id": 7, "options": ["Red", "S"]}"#).unwrap();
        assert_eq!(variant.id, VariantId(7));
        assert_eq!(variant.option(0), Some("Red"));
        assert_eq!(variant.option(1), Some("S"));
        assert_eq!(variant.option(2), None);
    }

    #[test]
    fn test_only_available_is_purchasable() {
        for status in SelectionStatus::iter() {
            assert_eq!(status.is_purchasable(), status == SelectionStatus::Available);
        }
    }

    #[test]
    fn test_status_display_text() {
        assert_eq!(SelectionStatus::Available.to_string(), "Available");
        assert_eq!(
            SelectionStatus::DeadEnd.to_string(),
            "No further selection possible"
        );
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
