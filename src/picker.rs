//! Picker adapter
//!
//! Thin layer between a `SelectionFilter` and whatever renders it. After each
//! change it re-queries the filter, keeps the resolution notifier in sync, and
//! exposes the result as a render-ready `PickerView`.

use serde::Serialize;

use crate::error::Result;
use crate::filter::SelectionFilter;
use crate::signal::{ListenerId, ResolutionEvent, ResolutionListener, ResolutionNotifier};
use crate::types::{SelectionStatus, Variant, VariantId};

/// Render state of one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeView {
    pub name: String,
    pub enabled: bool,
    /// Selectable values; empty while the attribute is disabled
    pub options: Vec<String>,
    pub selected: Option<String>,
}

/// Render state of the whole picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerView {
    pub attributes: Vec<AttributeView>,
    pub status: SelectionStatus,
    pub resolved: Option<VariantId>,
}

impl PickerView {
    /// Status line shown beneath the choices
    pub fn status_text(&self) -> String {
        match self.resolved {
            Some(id) => format!("{} (variant {})", self.status, id),
            None => self.status.to_string(),
        }
    }
}

/// Drives a selection filter and publishes resolution changes
#[derive(Debug)]
pub struct VariantPicker {
    filter: SelectionFilter,
    notifier: ResolutionNotifier,
}

impl VariantPicker {
    pub fn new(filter: SelectionFilter) -> Self {
        let mut notifier = ResolutionNotifier::new();
        // A catalog can resolve before any choice is made (zero attributes)
        notifier.sync(filter.resolve());
        Self { filter, notifier }
    }

    pub fn filter(&self) -> &SelectionFilter {
        &self.filter
    }

    /// Register a listener; it is told about the current resolution at once
    pub fn subscribe(&mut self, listener: impl ResolutionListener + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }

    /// Choose `value` for attribute `index`.
    ///
    /// Returns the resolution event published by this change, if any.
    pub fn choose(&mut self, index: usize, value: &str) -> Result<Option<ResolutionEvent>> {
        self.apply(index, Some(value))
    }

    /// Choose `values` for attributes `0, 1, 2, …` in order.
    ///
    /// Stops at the first rejected value; earlier choices stay applied.
    pub fn choose_in_order<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, value) in values.into_iter().enumerate() {
            self.choose(index, value.as_ref())?;
        }
        Ok(())
    }

    /// Unset attribute `index` and every later attribute
    pub fn clear(&mut self, index: usize) -> Result<Option<ResolutionEvent>> {
        self.apply(index, None)
    }

    /// Unset every attribute
    pub fn reset(&mut self) -> Option<ResolutionEvent> {
        self.filter.reset();
        self.notifier.sync(None)
    }

    pub fn resolved(&self) -> Option<&Variant> {
        self.filter.resolve()
    }

    fn apply(&mut self, index: usize, value: Option<&str>) -> Result<Option<ResolutionEvent>> {
        if let Err(err) = self.filter.set_value(index, value) {
            tracing::warn!(index, ?value, "Selection rejected: {}", err);
            return Err(err);
        }
        Ok(self.notifier.sync(self.filter.resolve()))
    }

    /// Snapshot of every attribute's render state
    pub fn view(&self) -> PickerView {
        let selection = self.filter.selection();

        let attributes: Vec<AttributeView> = self
            .filter
            .attributes()
            .iter()
            .enumerate()
            .map(|(index, attribute)| {
                let enabled = self.filter.is_enabled(index);
                let options = if enabled {
                    self.filter
                        .available_values(index)
                        .unwrap_or_default()
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                } else {
                    Vec::new()
                };
                AttributeView {
                    name: attribute.name.clone(),
                    enabled,
                    options,
                    selected: selection.get(index).map(str::to_string),
                }
            })
            .collect();

        let resolved = self.filter.resolve().map(|variant| variant.id);
        let status = if resolved.is_some() {
            SelectionStatus::Available
        } else if selection.is_complete() {
            SelectionStatus::Unavailable
        } else if self.filter.matching_variants().next().is_none() {
            SelectionStatus::DeadEnd
        } else {
            SelectionStatus::Incomplete
        };

        PickerView {
            attributes,
            status,
            resolved,
        }
    }
}
