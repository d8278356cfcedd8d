//! Partial attribute selection
//!
//! A `Selection` holds one slot per attribute. Decided slots always form a
//! contiguous prefix: once slot `i` is unset, every slot after it is unset
//! too. `assign` is the only mutator and it restores that shape on every call.

use serde::Serialize;

/// Ordered slots, one per attribute; `None` means unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    slots: Vec<Option<String>>,
}

impl Selection {
    /// Create an all-unset selection for `len` attributes
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Number of slots (the attribute count)
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Value chosen at `index`, if any
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    #[inline]
    pub fn is_set(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of decided slots at the front
    pub fn decided_len(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_some()).count()
    }

    /// Returns true if every slot holds a value
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The decided prefix, in attribute order
    pub fn decided(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map_while(|slot| slot.as_deref())
    }

    /// All slots in attribute order
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.slots.iter().map(|slot| slot.as_deref())
    }

    /// Returns true if no unset slot is followed by a set slot
    pub fn is_contiguous(&self) -> bool {
        self.slots.iter().filter(|slot| slot.is_some()).count() == self.decided_len()
    }

    /// Write `value` into `index` and unset every later slot.
    ///
    /// The later slots are cleared even when `value` equals the current one.
    /// Enablement and value checks belong to the caller.
    pub(crate) fn assign(&mut self, index: usize, value: Option<String>) {
        debug_assert!(index < self.slots.len());
        self.slots[index] = value;
        for slot in &mut self.slots[index + 1..] {
            *slot = None;
        }
    }

    /// Unset every slot
    pub(crate) fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}
