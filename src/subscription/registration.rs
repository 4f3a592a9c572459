// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription handle.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::category::EventCategory;
use crate::emitter::Registry;
use crate::error::{Error, Result};
use crate::event::Event;

use super::{Callback, SubscriptionId, SubscriptionScope};

/// A live registration of one callback against one category of one emitter.
///
/// Created by [`Emitter::listen`](crate::Emitter::listen). The handle is
/// cheap to clone; all clones refer to the same registration.
///
/// Unsubscribing is idempotent and only affects future emits: invocations
/// that were already scheduled still run.
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<Inner>,
}

struct Inner {
    id: SubscriptionId,
    category: EventCategory,
    callback: Callback,
    runtime: Handle,
    /// Bucket owner captured at listen time. Weak so that handles kept by
    /// applications do not keep a dropped emitter's registry alive.
    registry: Weak<Registry>,
    cancelled: AtomicBool,
    scoped: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(
        category: EventCategory,
        callback: Callback,
        runtime: Handle,
        registry: Weak<Registry>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: SubscriptionId::next(),
                category,
                callback,
                runtime,
                registry,
                cancelled: AtomicBool::new(false),
                scoped: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the subscription ID.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.inner.id
    }

    /// Returns the category this subscription was registered under.
    #[must_use]
    pub fn category(&self) -> EventCategory {
        self.inner.category
    }

    /// Returns `true` once [`unsubscribe`](Self::unsubscribe) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Schedules the callback with `event` on the emitter's runtime.
    ///
    /// The callback never runs inline. Returns the handle of the spawned
    /// task, or `None` without scheduling if the subscription is already
    /// cancelled. Dropping the handle detaches the task; it still runs to
    /// completion. A panic inside the callback stays inside its task and
    /// surfaces as an error on the handle.
    pub fn invoke(&self, event: &Arc<Event>) -> Option<JoinHandle<()>> {
        if self.is_cancelled() {
            tracing::trace!(subscription = %self.inner.id, "Skipping cancelled subscription");
            return None;
        }

        let event = Arc::clone(event);
        let handle = match &self.inner.callback {
            Callback::Immediate(callback) => {
                let callback = Arc::clone(callback);
                self.inner.runtime.spawn(async move { callback(event) })
            }
            Callback::Deferred(callback) => self.inner.runtime.spawn(callback(event)),
        };
        tracing::trace!(subscription = %self.inner.id, "Scheduled callback");
        Some(handle)
    }

    /// Removes the subscription from its emitter.
    ///
    /// Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        let removed = self
            .inner
            .registry
            .upgrade()
            .is_some_and(|registry| registry.remove(self.inner.category, self.inner.id));
        tracing::debug!(
            subscription = %self.inner.id,
            category = %self.inner.category,
            removed,
            "Unsubscribed"
        );
    }

    /// Enters the subscription's scope.
    ///
    /// The returned guard unsubscribes when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DoubleScopeEntry`] if the scope of this registration
    /// was already entered, through this handle or any clone of it.
    pub fn scope(&self) -> Result<SubscriptionScope> {
        if self.inner.scoped.swap(true, Ordering::AcqRel) {
            return Err(Error::DoubleScopeEntry(self.inner.id));
        }
        Ok(SubscriptionScope::new(self.clone()))
    }

    /// Returns a handle that does not keep the registration alive.
    pub(crate) fn downgrade(&self) -> WeakSubscription {
        WeakSubscription(Arc::downgrade(&self.inner))
    }

    /// Marks the subscription cancelled without touching the registry.
    ///
    /// Used when the registry itself drops its buckets.
    pub(crate) fn cancel_detached(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }
}

/// Non-owning reference to a [`Subscription`].
///
/// Lets a callback refer to its own registration without a reference cycle
/// through the registry.
#[derive(Clone)]
pub(crate) struct WeakSubscription(Weak<Inner>);

impl WeakSubscription {
    pub(crate) fn upgrade(&self) -> Option<Subscription> {
        self.0.upgrade().map(|inner| Subscription { inner })
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Subscription {}

impl Hash for Subscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.inner.id)
            .field("category", &self.inner.category)
            .field("callback", &self.inner.callback)
            .field("cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}
