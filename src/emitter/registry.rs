// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Category-keyed subscription storage.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use crate::category::EventCategory;
use crate::subscription::{Subscription, SubscriptionId};

/// A set of subscriptions keyed by identity.
type Bucket = HashMap<SubscriptionId, Subscription>;

/// Registry mapping each category to the subscriptions registered under it.
///
/// Every read or mutate sequence holds the lock for its whole duration, so
/// emitters can be shared between runtime worker threads. The lock is never
/// held while a callback is scheduled.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    buckets: RwLock<HashMap<EventCategory, Bucket>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a subscription to the bucket of its category.
    pub(crate) fn insert(&self, subscription: Subscription) {
        self.buckets
            .write()
            .entry(subscription.category())
            .or_default()
            .insert(subscription.id(), subscription);
    }

    /// Removes a subscription from the bucket of `category`.
    ///
    /// Returns `true` if it was present. Empty buckets are dropped.
    pub(crate) fn remove(&self, category: EventCategory, id: SubscriptionId) -> bool {
        let mut buckets = self.buckets.write();
        let Some(bucket) = buckets.get_mut(&category) else {
            return false;
        };
        let removed = bucket.remove(&id).is_some();
        if bucket.is_empty() {
            buckets.remove(&category);
        }
        removed
    }

    /// Collects the subscriptions registered under any of `categories`.
    ///
    /// The accumulator is keyed by subscription identity, so a subscription
    /// reachable through several categories is returned once.
    pub(crate) fn matching(&self, categories: &HashSet<EventCategory>) -> Bucket {
        let buckets = self.buckets.read();
        let mut matched = Bucket::new();
        for category in categories {
            if let Some(bucket) = buckets.get(category) {
                matched.extend(
                    bucket
                        .iter()
                        .map(|(id, subscription)| (*id, subscription.clone())),
                );
            }
        }
        matched
    }

    /// Returns the number of subscriptions across all categories.
    pub(crate) fn len(&self) -> usize {
        self.buckets.read().values().map(HashMap::len).sum()
    }

    /// Returns the number of subscriptions registered directly under `category`.
    pub(crate) fn len_for(&self, category: EventCategory) -> usize {
        self.buckets.read().get(&category).map_or(0, HashMap::len)
    }

    /// Removes every subscription and returns them.
    pub(crate) fn drain(&self) -> Vec<Subscription> {
        let buckets = std::mem::take(&mut *self.buckets.write());
        buckets.into_values().flat_map(HashMap::into_values).collect()
    }
}
