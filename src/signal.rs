//! Resolution signalling
//!
//! Collaborators that only care about the outcome (pricing, imagery, an
//! add-to-cart control) subscribe to a `ResolutionNotifier`. The notifier
//! publishes on transitions only:
//!
//! | Previous        | Current         | Published              |
//! |-----------------|-----------------|------------------------|
//! | unresolved      | variant `a`     | `Resolved(a)`          |
//! | variant `a`     | variant `b`     | `Resolved(b)`          |
//! | variant `a`     | variant `a`     | nothing                |
//! | variant `a`     | unresolved      | `Unresolved`           |
//! | unresolved      | unresolved      | nothing                |
//!
//! A listener subscribing while a variant is resolved receives that
//! `Resolved` event right away.

use serde::Serialize;
use std::sync::mpsc::Sender;

use crate::types::{Variant, VariantId};

/// Event broadcast to widgets that react to the resolved variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResolutionEvent {
    /// The selection now resolves to this variant
    Resolved { id: VariantId, options: Vec<String> },
    /// A previously resolved selection is incomplete or unmatched again
    Unresolved,
}

impl ResolutionEvent {
    pub fn resolved(variant: &Variant) -> Self {
        Self::Resolved {
            id: variant.id,
            options: variant.options.clone(),
        }
    }

    /// Variant id carried by a `Resolved` event
    pub fn variant_id(&self) -> Option<VariantId> {
        match self {
            Self::Resolved { id, .. } => Some(*id),
            Self::Unresolved => None,
        }
    }
}

/// Receiver of resolution events
pub trait ResolutionListener {
    fn on_resolution(&mut self, event: &ResolutionEvent);
}

impl<F> ResolutionListener for F
where
    F: FnMut(&ResolutionEvent),
{
    fn on_resolution(&mut self, event: &ResolutionEvent) {
        self(event)
    }
}

impl ResolutionListener for Sender<ResolutionEvent> {
    fn on_resolution(&mut self, event: &ResolutionEvent) {
        // A dropped receiver just means nobody is listening anymore
        if self.send(event.clone()).is_err() {
            tracing::debug!("Resolution receiver dropped, event discarded");
        }
    }
}

/// Handle returned by `subscribe`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Publishes resolution changes to every subscribed listener
#[derive(Default)]
pub struct ResolutionNotifier {
    listeners: Vec<(ListenerId, Box<dyn ResolutionListener>)>,
    next_id: usize,
    /// Last published `Resolved` event; `None` while unresolved
    last: Option<ResolutionEvent>,
}

impl std::fmt::Debug for ResolutionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionNotifier")
            .field("listeners", &self.listeners.len())
            .field("last", &self.current())
            .finish()
    }
}

impl ResolutionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    ///
    /// If a variant is currently resolved, the listener receives that
    /// `Resolved` event immediately so it never starts out of date.
    pub fn subscribe(&mut self, mut listener: impl ResolutionListener + 'static) -> ListenerId {
        if let Some(event) = &self.last {
            listener.on_resolution(event);
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Variant id of the last published resolution, if still resolved
    #[inline]
    pub fn current(&self) -> Option<VariantId> {
        self.last.as_ref().and_then(ResolutionEvent::variant_id)
    }

    /// Compare `resolved` with the last published state and publish on change.
    ///
    /// Returns the event that was published, if any.
    pub fn sync(&mut self, resolved: Option<&Variant>) -> Option<ResolutionEvent> {
        let event = match (self.current(), resolved) {
            (Some(last), Some(variant)) if last == variant.id => return None,
            (_, Some(variant)) => ResolutionEvent::resolved(variant),
            (Some(_), None) => ResolutionEvent::Unresolved,
            (None, None) => return None,
        };

        self.last = event.variant_id().map(|_| event.clone());
        tracing::debug!(?event, listeners = self.listeners.len(), "Publishing resolution");
        for (_, listener) in &mut self.listeners {
            listener.on_resolution(&event);
        }
        Some(event)
    }
}
