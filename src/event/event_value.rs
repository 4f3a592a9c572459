// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The emitted event value.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};

use crate::category::EventCategory;

use super::EmitterId;

/// One emitted occurrence of an event category.
///
/// Callbacks receive events as `Arc<Event>`, so a single value is shared by
/// every subscription it is delivered to, and by every emitter in a proxy
/// chain.
///
/// # Target
///
/// The target is written at most once. [`Emitter::emit`](crate::Emitter::emit)
/// fills it in when it is still unset; once set it never changes, which is
/// how a proxied event keeps pointing at the emitter it originated from.
#[derive(Clone)]
pub struct Event {
    category: EventCategory,
    target: OnceLock<EmitterId>,
    payload: Option<Arc<dyn Any + Send + Sync>>,
    created_at: DateTime<Utc>,
}

impl Event {
    /// Creates an event of the given category with no payload and no target.
    #[must_use]
    pub fn new(category: EventCategory) -> Self {
        Self {
            category,
            target: OnceLock::new(),
            payload: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches an application payload.
    #[must_use]
    pub fn with_payload<T>(mut self, payload: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.payload = Some(Arc::new(payload));
        self
    }

    /// Presets the target emitter.
    ///
    /// Emitting an event whose target is already set leaves it unchanged.
    #[must_use]
    pub fn with_target(self, target: EmitterId) -> Self {
        // Freshly built events have no target yet, so this cannot fail.
        let _ = self.target.set(target);
        self
    }

    /// Returns the category this event belongs to.
    #[must_use]
    pub fn category(&self) -> EventCategory {
        self.category
    }

    /// Returns the emitter that produced this event, once it has been emitted.
    #[must_use]
    pub fn target(&self) -> Option<EmitterId> {
        self.target.get().copied()
    }

    /// Returns the payload if one is attached and it has type `T`.
    #[must_use]
    pub fn payload<T: 'static>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref::<T>()
    }

    /// Returns `true` if a payload is attached.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Returns the time at which the event value was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the target unless one is already present and returns the
    /// effective target.
    pub(crate) fn claim_target(&self, emitter: EmitterId) -> EmitterId {
        *self.target.get_or_init(|| emitter)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("category", &self.category)
            .field("target", &self.target())
            .field("has_payload", &self.has_payload())
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::HierarchyBuilder;

    fn category() -> EventCategory {
        let h = HierarchyBuilder::new("BaseEvent")
            .category("Opened", &[])
            .build()
            .unwrap();
        h.lookup("Opened").unwrap()
    }

    #[test]
    fn new_event_has_no_target() {
        let event = Event::new(category());
        assert!(event.target().is_none());
        assert!(!event.has_payload());
    }

    #[test]
    fn claim_target_sets_only_once() {
        let event = Event::new(category());
        let first = EmitterId::new();
        let second = EmitterId::new();

        assert_eq!(event.claim_target(first), first);
        assert_eq!(event.claim_target(second), first);
        assert_eq!(event.target(), Some(first));
    }

    #[test]
    fn preset_target_wins() {
        let preset = EmitterId::new();
        let event = Event::new(category()).with_target(preset);
        assert_eq!(event.claim_target(EmitterId::new()), preset);
    }

    #[test]
    fn payload_downcasts_by_type() {
        let event = Event::new(category()).with_payload(String::from("hello"));
        assert_eq!(event.payload::<String>().map(String::as_str), Some("hello"));
        assert!(event.payload::<u32>().is_none());
    }

    #[test]
    fn debug_omits_payload_contents() {
        let event = Event::new(category()).with_payload(42_u8);
        let debug = format!("{event:?}");
        assert!(debug.contains("has_payload: true"));
    }
}
