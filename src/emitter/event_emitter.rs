// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The event emitter.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock, Weak};

use tokio::runtime::Handle;

use crate::category::{CategoryHierarchy, EventCategory};
use crate::error::{Error, Result};
use crate::event::{EmitterId, Event};
use crate::subscription::{Callback, Subscription, WeakSubscription};

use super::{EmitterBuilder, Registry};

/// Broadcasts events to subscriptions registered for the event's category or
/// any of its ancestors.
///
/// `Emitter` is a cheap handle; clones share the same registry and identity.
///
/// # Examples
///
/// ```
/// use emitter_lib::Emitter;
/// use emitter_lib::category::HierarchyBuilder;
/// use emitter_lib::event::Event;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> emitter_lib::Result<()> {
/// let hierarchy = HierarchyBuilder::new("BaseEvent")
///     .category("Opened", &[])
///     .category("Closed", &[])
///     .build()?;
/// let emitter = Emitter::new(hierarchy.clone(), tokio::runtime::Handle::current());
///
/// let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
/// emitter.listen(hierarchy.root(), move |event| {
///     let _ = tx.send(event.category());
/// })?;
///
/// emitter.emit(Event::new(hierarchy.lookup("Opened").unwrap()))?;
/// assert_eq!(rx.recv().await, hierarchy.lookup("Opened"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Emitter {
    inner: Arc<EmitterInner>,
}

struct EmitterInner {
    id: EmitterId,
    name: Option<String>,
    hierarchy: Arc<CategoryHierarchy>,
    runtime: Handle,
    registry: Arc<Registry>,
}

impl Emitter {
    /// Creates an emitter over `hierarchy` that schedules callbacks on `runtime`.
    #[must_use]
    pub fn new(hierarchy: Arc<CategoryHierarchy>, runtime: Handle) -> Self {
        Self::builder(hierarchy, runtime).build()
    }

    /// Returns a builder for an emitter.
    #[must_use]
    pub fn builder(hierarchy: Arc<CategoryHierarchy>, runtime: Handle) -> EmitterBuilder {
        EmitterBuilder::new(hierarchy, runtime)
    }

    pub(crate) fn from_parts(
        id: EmitterId,
        name: Option<String>,
        hierarchy: Arc<CategoryHierarchy>,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(EmitterInner {
                id,
                name,
                hierarchy,
                runtime,
                registry: Arc::new(Registry::new()),
            }),
        }
    }

    /// Returns the identity recorded as the target of emitted events.
    #[must_use]
    pub fn id(&self) -> EmitterId {
        self.inner.id
    }

    /// Returns the configured name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Returns the category hierarchy this emitter works with.
    #[must_use]
    pub fn hierarchy(&self) -> &Arc<CategoryHierarchy> {
        &self.inner.hierarchy
    }

    /// Returns the root category of the hierarchy.
    #[must_use]
    pub fn root(&self) -> EventCategory {
        self.inner.hierarchy.root()
    }

    /// Looks up a category of the hierarchy by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<EventCategory> {
        self.inner.hierarchy.lookup(name)
    }

    /// Subscribes a synchronous callback to `category` and its descendants.
    ///
    /// The callback runs in a task spawned on the emitter's runtime, never
    /// inline during [`emit`](Self::emit).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCategory`] if `category` does not belong to
    /// this emitter's hierarchy.
    pub fn listen<F>(&self, category: EventCategory, callback: F) -> Result<Subscription>
    where
        F: Fn(Arc<Event>) + Send + Sync + 'static,
    {
        self.listen_with(category, Callback::immediate(callback))
    }

    /// Subscribes an async callback to `category` and its descendants.
    ///
    /// Each invocation's future is spawned as an independent task; `emit`
    /// does not wait for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCategory`] if `category` does not belong to
    /// this emitter's hierarchy.
    pub fn listen_async<F, Fut>(&self, category: EventCategory, callback: F) -> Result<Subscription>
    where
        F: Fn(Arc<Event>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.listen_with(category, Callback::deferred(callback))
    }

    /// Subscribes an explicit [`Callback`] to `category` and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCategory`] if `category` does not belong to
    /// this emitter's hierarchy.
    pub fn listen_with(&self, category: EventCategory, callback: Callback) -> Result<Subscription> {
        if !self.inner.hierarchy.contains(category) {
            return Err(Error::InvalidCategory(category));
        }

        let subscription = Subscription::new(
            category,
            callback,
            self.inner.runtime.clone(),
            Arc::downgrade(&self.inner.registry),
        );
        self.inner.registry.insert(subscription.clone());

        tracing::debug!(
            emitter = %self.inner.id,
            subscription = %subscription.id(),
            category = self.inner.hierarchy.name(category).unwrap_or_default(),
            "Registered subscription"
        );
        Ok(subscription)
    }

    /// Emits an event.
    ///
    /// Sets the event's target to this emitter unless it is already set,
    /// then schedules every subscription registered under the event's
    /// category or any of its ancestors. Each subscription is scheduled once
    /// even when the hierarchy contains diamonds. Returns as soon as the
    /// callbacks are scheduled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEvent`] if the event's category does not belong
    /// to this emitter's hierarchy.
    pub fn emit<E>(&self, event: E) -> Result<()>
    where
        E: Into<Arc<Event>>,
    {
        let event = event.into();
        let category = event.category();
        let Some(ancestors) = self.inner.hierarchy.ancestors(category) else {
            return Err(Error::InvalidEvent { category });
        };

        let target = event.claim_target(self.inner.id);
        let matching = self.inner.registry.matching(&ancestors);

        tracing::trace!(
            emitter = %self.inner.id,
            target = %target,
            category = self.inner.hierarchy.name(category).unwrap_or_default(),
            matched = matching.len(),
            "Emitting event"
        );

        for subscription in matching.values() {
            subscription.invoke(&event);
        }
        Ok(())
    }

    /// Re-emits every event emitted by `source` through this emitter.
    ///
    /// Registers a root-category subscription on `source`; the returned
    /// subscription stops the proxying when unsubscribed. Re-emitted events
    /// keep the target of the emitter they originated from, so proxies can be
    /// chained.
    ///
    /// Once this emitter is dropped, the next event from `source` removes
    /// the proxy subscription from `source`.
    ///
    /// Proxy relationships must not form a loop: an event would circulate
    /// forever.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyMismatch`] if `source` uses a different
    /// hierarchy.
    pub fn proxy(&self, source: &Emitter) -> Result<Subscription> {
        if self.inner.hierarchy.id() != source.inner.hierarchy.id() {
            return Err(Error::HierarchyMismatch);
        }

        let proxy: Weak<EmitterInner> = Arc::downgrade(&self.inner);
        let link: Arc<OnceLock<WeakSubscription>> = Arc::new(OnceLock::new());
        let own = Arc::clone(&link);
        let subscription = source.listen(source.root(), move |event| {
            let Some(inner) = proxy.upgrade() else {
                if let Some(subscription) = own.get().and_then(WeakSubscription::upgrade) {
                    tracing::debug!(
                        subscription = %subscription.id(),
                        "Proxying emitter dropped, removing link"
                    );
                    subscription.unsubscribe();
                }
                return;
            };
            let emitter = Emitter { inner };
            if let Err(e) = emitter.emit(event) {
                tracing::warn!(emitter = %emitter.id(), error = %e, "Failed to re-emit proxied event");
            }
        })?;
        let _ = link.set(subscription.downgrade());

        tracing::debug!(
            emitter = %self.inner.id,
            source = %source.inner.id,
            subscription = %subscription.id(),
            "Proxying events"
        );
        Ok(subscription)
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.inner.registry.len()
    }

    /// Returns the number of subscriptions registered directly under `category`.
    #[must_use]
    pub fn subscription_count_for(&self, category: EventCategory) -> usize {
        self.inner.registry.len_for(category)
    }

    /// Cancels and removes every subscription.
    pub fn clear(&self) {
        let drained = self.inner.registry.drain();
        for subscription in &drained {
            subscription.cancel_detached();
        }
        tracing::debug!(emitter = %self.inner.id, count = drained.len(), "Cleared subscriptions");
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("subscription_count", &self.subscription_count())
            .finish_non_exhaustive()
    }
}
