// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped subscription guard.

use std::ops::Deref;

use super::Subscription;

/// Guard returned by [`Subscription::scope`].
///
/// Dereferences to the subscription. When the guard goes out of scope the
/// subscription is unsubscribed, whether the scope ends normally, through
/// `?`, or by unwinding.
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
/// let hierarchy = HierarchyBuilder::new("BaseEvent").build()?;
/// let emitter = Emitter::new(hierarchy.clone(), tokio::runtime::Handle::current());
///
/// let subscription = emitter.listen(hierarchy.root(), |_event| {})?;
/// {
///     let _scope = subscription.scope()?;
///     emitter.emit(Event::new(hierarchy.root()))?; // delivered
/// }
/// emitter.emit(Event::new(hierarchy.root()))?; // not delivered
/// assert!(subscription.is_cancelled());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[must_use = "dropping the scope immediately unsubscribes"]
pub struct SubscriptionScope {
    subscription: Subscription,
}

impl SubscriptionScope {
    pub(crate) fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }
}

impl Deref for SubscriptionScope {
    type Target = Subscription;

    fn deref(&self) -> &Self::Target {
        &self.subscription
    }
}

impl Drop for SubscriptionScope {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
