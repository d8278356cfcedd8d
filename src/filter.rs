//! Selection Filter
//!
//! The authoritative source of truth for which option values are still
//! selectable. It owns the attribute list, the variant catalog and the
//! current partial selection.
//!
//! # Design Principles
//!
//! - **Progressive enablement**: attribute `i` can only be set once attributes
//!   `0..i` are all decided
//! - **Contiguous prefix**: changing attribute `i` always unsets every later
//!   attribute, even when the value did not change
//! - **Conjunctive filtering**: available values at `i` come from the variants
//!   matching *every* decided attribute before `i`
//! - **Pure**: no rendering, no notification; callers re-query after each change
//!
//! # Example
//!
//! ```
//! use variant_picker::{Attribute, SelectionFilter, Variant, VariantId};
//!
//! let mut filter = SelectionFilter::new(
//!     vec![Attribute::new("Color"), Attribute::new("Size")],
//!     vec![Variant::new(1, ["Red", "S"]), Variant::new(2, ["Blue", "M"])],
//! )
//! .unwrap();
//!
//! // Size cannot be chosen before Color
//! assert!(filter.select(1, "S").is_err());
//!
//! filter.select(0, "Red").unwrap();
//! assert_eq!(filter.available_values(1).unwrap(), vec!["S"]);
//!
//! filter.select(1, "S").unwrap();
//! assert_eq!(filter.resolve().map(|v| v.id), Some(VariantId(1)));
//! ```

use std::collections::HashSet;

use crate::error::{Result, SelectionError};
use crate::selection::Selection;
use crate::types::{Attribute, Variant};

/// Progressive variant selection over a fixed catalog
#[derive(Debug, Clone)]
pub struct SelectionFilter {
    attributes: Vec<Attribute>,
    variants: Vec<Variant>,
    selection: Selection,
}

impl SelectionFilter {
    /// Create a filter with an all-unset selection.
    ///
    /// # Errors
    ///
    /// `MalformedCatalog` if a variant's option count differs from the number
    /// of attributes, or if two variants have identical options.
    pub fn new(attributes: Vec<Attribute>, variants: Vec<Variant>) -> Result<Self> {
        let catalog = crate::catalog::Catalog::new(attributes, variants);
        catalog.validate()?;

        tracing::debug!(
            attributes = catalog.attributes.len(),
            variants = catalog.variants.len(),
            "Selection filter initialized"
        );

        let selection = Selection::new(catalog.attributes.len());
        Ok(Self {
            attributes: catalog.attributes,
            variants: catalog.variants,
            selection,
        })
    }

    /// Number of attributes
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns true if attribute `index` may be set right now
    pub fn is_enabled(&self, index: usize) -> bool {
        index < self.len() && (index == 0 || self.selection.is_set(index - 1))
    }

    /// Set or clear attribute `index`, then unset every later attribute.
    ///
    /// `None` clears the slot. Reselecting the current value is not a no-op:
    /// later slots are still cleared.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `index` is not a valid attribute position
    /// - `AttributeNotYetEnabled` if the previous attribute is unset
    /// - `InvalidValueForContext` if `value` is not in `available_values(index)`
    pub fn set_value(&mut self, index: usize, value: Option<&str>) -> Result<()> {
        self.check_index(index)?;

        if !self.is_enabled(index) {
            return Err(SelectionError::AttributeNotYetEnabled { index });
        }

        if let Some(value) = value {
            if !self.candidates(index).any(|v| v.option(index) == Some(value)) {
                return Err(SelectionError::InvalidValueForContext {
                    index,
                    value: value.to_string(),
                });
            }
        }

        self.selection.assign(index, value.map(str::to_string));
        tracing::debug!(
            index,
            value = value.unwrap_or("<unset>"),
            decided = self.selection.decided_len(),
            "Selection updated"
        );
        Ok(())
    }

    /// Choose `value` for attribute `index`
    pub fn select(&mut self, index: usize, value: &str) -> Result<()> {
        self.set_value(index, Some(value))
    }

    /// Unset attribute `index` and everything after it
    pub fn clear(&mut self, index: usize) -> Result<()> {
        self.set_value(index, None)
    }

    /// Unset every attribute
    pub fn reset(&mut self) {
        self.selection.clear_all();
    }

    /// Distinct values still selectable at `index`, in first-seen catalog order.
    ///
    /// Only decided attributes before `index` constrain the result. An empty
    /// vector means the decided prefix is a dead end.
    pub fn available_values(&self, index: usize) -> Result<Vec<&str>> {
        self.check_index(index)?;

        let mut seen: HashSet<&str> = HashSet::new();
        let values = self
            .candidates(index)
            .filter_map(|variant| variant.option(index))
            .filter(|value| seen.insert(*value))
            .collect();
        Ok(values)
    }

    /// Variants consistent with every decided attribute
    pub fn matching_variants(&self) -> impl Iterator<Item = &Variant> + '_ {
        self.candidates(self.len())
    }

    /// The variant matching the selection on every attribute.
    ///
    /// `None` while any attribute is unset, or when the complete selection
    /// matches no catalog entry. Neither case is an error.
    pub fn resolve(&self) -> Option<&Variant> {
        if !self.selection.is_complete() {
            return None;
        }
        self.variants.iter().find(|variant| {
            variant
                .options
                .iter()
                .zip(self.selection.iter())
                .all(|(option, chosen)| chosen == Some(option.as_str()))
        })
    }

    /// Variants matching every decided slot before `index`
    fn candidates(&self, index: usize) -> impl Iterator<Item = &Variant> + '_ {
        let selection = &self.selection;
        self.variants.iter().filter(move |variant| {
            (0..index).all(|j| match selection.get(j) {
                Some(chosen) => variant.option(j) == Some(chosen),
                None => true,
            })
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VariantId;

    /// Helper: the two-variant catalog used throughout
    fn shirt_filter() -> SelectionFilter {
        SelectionFilter::new(
            vec![Attribute::new("Color"), Attribute::new("Size")],
            vec![Variant::new(1, ["Red", "S"]), Variant::new(2, ["Blue", "M"])],
        )
        .unwrap()
    }

    /// Helper: three attributes with overlapping values
    fn apparel_filter() -> SelectionFilter {
        SelectionFilter::new(
            vec![
                Attribute::new("Size"),
                Attribute::new("Color"),
                Attribute::new("Material"),
            ],
            vec![
                Variant::new(10, ["M", "Red", "Cotton"]),
                Variant::new(11, ["S", "Red", "Wool"]),
                Variant::new(12, ["M", "Blue", "Cotton"]),
                Variant::new(13, ["S", "Blue", "Cotton"]),
                Variant::new(14, ["M", "Red", "Linen"]),
                Variant::new(15, ["L", "Green", "Wool"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = SelectionFilter::new(
            vec![Attribute::new("Color"), Attribute::new("Size")],
            vec![Variant::new(1, ["Red"])],
        );
        assert!(matches!(
            result,
            Err(SelectionError::MalformedCatalog { .. })
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_sequences() {
        let result = SelectionFilter::new(
            vec![Attribute::new("Color")],
            vec![Variant::new(1, ["Red"]), Variant::new(2, ["Red"])],
        );
        assert!(matches!(
            result,
            Err(SelectionError::MalformedCatalog { .. })
        ));
    }

    #[test]
    fn test_initial_selection_is_unset() {
        let filter = apparel_filter();
        assert_eq!(filter.selection().decided_len(), 0);
        assert!(filter.resolve().is_none());
    }

    #[test]
    fn test_first_position_values_in_catalog_order() {
        let filter = apparel_filter();
        assert_eq!(filter.available_values(0).unwrap(), vec!["M", "S", "L"]);
    }

    #[test]
    fn test_repeated_values_are_listed_once() {
        let filter = SelectionFilter::new(
            vec![Attribute::new("Color"), Attribute::new("Size")],
            vec![
                Variant::new(1, ["Blue", "S"]),
                Variant::new(2, ["Red", "S"]),
                Variant::new(3, ["Blue", "M"]),
                Variant::new(4, ["Red", "M"]),
                Variant::new(5, ["Blue", "L"]),
            ],
        )
        .unwrap();
        assert_eq!(filter.available_values(0).unwrap(), vec!["Blue", "Red"]);
    }

    #[test]
    fn test_available_values_are_filtered_conjunctively() {
        let mut filter = apparel_filter();
        filter.select(0, "M").unwrap();
        assert_eq!(filter.available_values(1).unwrap(), vec!["Red", "Blue"]);

        filter.select(1, "Red").unwrap();
        // Both M and Red must hold: Cotton (10) and Linen (14), not Wool (11)
        assert_eq!(filter.available_values(2).unwrap(), vec!["Cotton", "Linen"]);
    }

    #[test]
    fn test_unset_positions_impose_no_constraint() {
        let filter = apparel_filter();
        assert_eq!(
            filter.available_values(2).unwrap(),
            vec!["Cotton", "Wool", "Linen"]
        );
    }

    #[test]
    fn test_dead_end_scenario() {
        let mut filter = shirt_filter();
        filter.select(0, "Red").unwrap();
        assert_eq!(filter.available_values(1).unwrap(), vec!["S"]);
    }

    #[test]
    fn test_set_before_enabled_is_rejected() {
        let mut filter = shirt_filter();
        assert_eq!(
            filter.select(1, "S"),
            Err(SelectionError::AttributeNotYetEnabled { index: 1 })
        );
        assert_eq!(
            filter.clear(1),
            Err(SelectionError::AttributeNotYetEnabled { index: 1 })
        );
        assert_eq!(filter.selection().decided_len(), 0);
    }

    #[test]
    fn test_value_outside_context_is_rejected() {
        let mut filter = shirt_filter();
        filter.select(0, "Red").unwrap();

        // "M" exists in the catalog but not alongside "Red"
        assert_eq!(
            filter.select(1, "M"),
            Err(SelectionError::InvalidValueForContext {
                index: 1,
                value: "M".to_string()
            })
        );
        assert_eq!(filter.selection().get(1), None);
        assert_eq!(filter.selection().get(0), Some("Red"));
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let mut filter = shirt_filter();
        assert!(matches!(
            filter.select(0, "Purple"),
            Err(SelectionError::InvalidValueForContext { index: 0, .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut filter = shirt_filter();
        assert_eq!(
            filter.select(2, "S"),
            Err(SelectionError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(filter.available_values(5).is_err());
        assert!(!filter.is_enabled(2));
    }

    #[test]
    fn test_full_resolution_scenario() {
        let mut filter = shirt_filter();
        filter.select(0, "Red").unwrap();
        filter.select(1, "S").unwrap();
        assert_eq!(filter.resolve().map(|v| v.id), Some(VariantId(1)));

        filter.select(0, "Blue").unwrap();
        assert_eq!(filter.selection().get(1), None);
        assert!(filter.resolve().is_none());

        filter.select(1, "M").unwrap();
        assert_eq!(filter.resolve().map(|v| v.id), Some(VariantId(2)));
    }

    #[test]
    fn test_reselect_clears_later_slots() {
        let mut filter = apparel_filter();
        filter.select(0, "M").unwrap();
        filter.select(1, "Red").unwrap();
        filter.select(2, "Linen").unwrap();
        assert_eq!(filter.resolve().map(|v| v.id), Some(VariantId(14)));

        filter.select(1, "Red").unwrap();
        assert_eq!(filter.selection().get(1), Some("Red"));
        assert_eq!(filter.selection().get(2), None);
        assert!(filter.resolve().is_none());
    }

    #[test]
    fn test_clear_truncates_selection() {
        let mut filter = apparel_filter();
        filter.select(0, "S").unwrap();
        filter.select(1, "Blue").unwrap();
        filter.clear(0).unwrap();

        assert_eq!(filter.selection().decided_len(), 0);
        assert!(filter.is_enabled(0));
        assert!(!filter.is_enabled(1));
    }

    #[test]
    fn test_enablement_follows_prefix() {
        let mut filter = apparel_filter();
        assert!(filter.is_enabled(0));
        assert!(!filter.is_enabled(1));

        filter.select(0, "L").unwrap();
        assert!(filter.is_enabled(1));
        assert!(!filter.is_enabled(2));
    }

    #[test]
    fn test_matching_variants_follow_prefix() {
        let mut filter = apparel_filter();
        assert_eq!(filter.matching_variants().count(), 6);

        filter.select(0, "S").unwrap();
        let ids: Vec<u64> = filter.matching_variants().map(|v| v.id.0).collect();
        assert_eq!(ids, vec![11, 13]);
    }

    #[test]
    fn test_reset() {
        let mut filter = shirt_filter();
        filter.select(0, "Blue").unwrap();
        filter.select(1, "M").unwrap();
        filter.reset();
        assert_eq!(filter.selection().decided_len(), 0);
        assert!(filter.resolve().is_none());
    }

    #[test]
    fn test_empty_catalog_is_a_dead_end() {
        let filter =
            SelectionFilter::new(vec![Attribute::new("Color")], Vec::new()).unwrap();
        assert!(filter.available_values(0).unwrap().is_empty());
        assert!(filter.resolve().is_none());
    }
}
