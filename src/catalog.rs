//! Catalog file handling for loading and saving variant catalogs.
//!
//! A catalog is the ordered attribute list plus every purchasable variant:
//!
//! ```json
//! {
//!   "attributes": ["Color", "Size"],
//!   "variants": [
//!     { "id": 1, "options": ["Red", "S"] },
//!     { "id": 2, "options": ["Blue", "M"] }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::SelectionError;
use crate::filter::SelectionFilter;
use crate::types::{Attribute, Variant};

/// Attribute list and variant catalog as loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub attributes: Vec<Attribute>,
    pub variants: Vec<Variant>,
}

impl Catalog {
    pub fn new(attributes: Vec<Attribute>, variants: Vec<Variant>) -> Self {
        Self {
            attributes,
            variants,
        }
    }

    /// Parse a catalog from a JSON string (structure only, see `validate`)
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse catalog JSON")
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog = Self::from_json_str(&content)
            .with_context(|| format!("Invalid catalog file {:?}", path.as_ref()))?;

        tracing::info!(
            path = ?path.as_ref(),
            attributes = catalog.attributes.len(),
            variants = catalog.variants.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Save the catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write catalog to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Check that the catalog can back a selection filter.
    ///
    /// # Errors
    ///
    /// `MalformedCatalog` if any variant's option count differs from the
    /// attribute count, or if two variants share the same option sequence.
    /// Nothing else about the catalog is checked.
    pub fn validate(&self) -> Result<(), SelectionError> {
        let expected = self.attributes.len();

        if let Some(bad) = self.variants.iter().find(|v| v.options.len() != expected) {
            return Err(SelectionError::malformed(format!(
                "variant {} has {} options, expected {}",
                bad.id,
                bad.options.len(),
                expected
            )));
        }

        let mut seen: HashMap<&[String], &Variant> = HashMap::with_capacity(self.variants.len());
        for variant in &self.variants {
            if let Some(first) = seen.insert(variant.options.as_slice(), variant) {
                return Err(SelectionError::malformed(format!(
                    "variants {} and {} share the options {:?}",
                    first.id, variant.id, variant.options
                )));
            }
        }

        Ok(())
    }

    /// Build a selection filter over this catalog
    pub fn into_filter(self) -> Result<SelectionFilter, SelectionError> {
        SelectionFilter::new(self.attributes, self.variants)
    }
}
