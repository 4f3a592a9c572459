// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback types and subscription identifiers.
//!
//! - [`SubscriptionId`] - Unique identity of a subscription, used for set
//!   deduplication during dispatch
//! - [`Callback`] - The two callback flavors, chosen at registration time

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::Event;

/// Source of process-unique subscription identities.
static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a subscription.
///
/// IDs are unique across every emitter in the process, so a set of
/// subscriptions keyed by ID never holds the same registration twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Allocates the next subscription ID.
    pub(crate) fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// A boxed, sendable future returned by deferred callbacks.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Type alias for callbacks that run to completion when invoked.
type ImmediateFn = Arc<dyn Fn(Arc<Event>) + Send + Sync>;

/// Type alias for callbacks that produce a future to be driven as a task.
type DeferredFn = Arc<dyn Fn(Arc<Event>) -> BoxFuture + Send + Sync>;

/// A subscription callback.
///
/// Both variants are scheduled on the emitter's runtime and never run inline
/// inside [`Emitter::emit`](crate::Emitter::emit).
///
/// - `Immediate` callbacks are plain functions. They run inside a spawned
///   task on the next scheduler turn. A callback that never returns blocks
///   the worker it runs on.
/// - `Deferred` callbacks return a future, which is spawned as an
///   independent task. Nobody awaits it.
#[derive(Clone)]
pub enum Callback {
    /// A synchronous function of the event.
    Immediate(ImmediateFn),
    /// A function returning a future that handles the event.
    Deferred(DeferredFn),
}

impl Callback {
    /// Wraps a synchronous function.
    #[must_use]
    pub fn immediate<F>(callback: F) -> Self
    where
        F: Fn(Arc<Event>) + Send + Sync + 'static,
    {
        Self::Immediate(Arc::new(callback))
    }

    /// Wraps an async function.
    #[must_use]
    pub fn deferred<F, Fut>(callback: F) -> Self
    where
        F: Fn(Arc<Event>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::Deferred(Arc::new(move |event: Arc<Event>| -> BoxFuture {
            Box::pin(callback(event))
        }))
    }

    /// Returns `true` for the `Deferred` variant.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(_) => f.write_str("Callback::Immediate"),
            Self::Deferred(_) => f.write_str("Callback::Deferred"),
        }
    }
}
