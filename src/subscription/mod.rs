// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscriptions to emitted events.
//!
//! # Overview
//!
//! - [`Subscription`] - Handle to one registered callback; owns its cancellation
//! - [`SubscriptionScope`] - Guard that unsubscribes when dropped
//! - [`Callback`] - Immediate (plain function) or deferred (async) callback
//! - [`SubscriptionId`] - Process-unique identity of a subscription
//! - [`Subscribable`] - Trait for types that embed an [`Emitter`](crate::Emitter)
//!
//! # Delivery
//!
//! Invoking a subscription spawns a task on the emitter's tokio runtime and
//! returns immediately. Unsubscribing prevents later emits from reaching the
//! callback but does not cancel tasks that were already spawned.

mod callback;
mod registration;
mod scope;
mod subscribable;

pub use callback::{BoxFuture, Callback, SubscriptionId};
pub use registration::Subscription;
pub(crate) use registration::WeakSubscription;
pub use scope::SubscriptionScope;
pub use subscribable::Subscribable;
