// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event emitters.
//!
//! # Dispatch
//!
//! ```text
//! emit(Event { category: D })
//!          ↓
//!   hierarchy.ancestors(D) = {A, B, C, D}
//!          ↓
//!   registry.matching({A, B, C, D})   // set keyed by SubscriptionId
//!          ↓
//!   subscription.invoke(event)        // one spawned task each
//! ```
//!
//! A subscription registered on `A` is reachable through both `B` and `C`
//! in a diamond, but the identity-keyed accumulator schedules it once.
//!
//! # Proxying
//!
//! ```text
//! grandparent.proxy(&parent); parent.proxy(&child);
//!
//! child.emit(e)  → target = child
//!   → parent re-emits e (target kept)
//!     → grandparent re-emits e (target kept)
//! ```

mod builder;
mod event_emitter;
mod registry;

pub use builder::EmitterBuilder;
pub use event_emitter::Emitter;
pub(crate) use registry::Registry;
