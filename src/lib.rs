// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `emitter_lib` - In-process async event emitters with hierarchical event categories.
//!
//! Objects that own an [`Emitter`] broadcast [`Event`] values; independently
//! registered callbacks are notified asynchronously on a tokio runtime.
//! Listeners on a broad category automatically receive events of every
//! narrower category below it.
//!
//! # Concepts
//!
//! - **Categories**: a DAG declared up front through
//!   [`HierarchyBuilder`](category::HierarchyBuilder). Multiple parents are
//!   allowed; cycles are rejected when the hierarchy is built.
//! - **Events**: one emitted occurrence of a category, carrying an optional
//!   payload and the identity of the emitter that produced it.
//! - **Subscriptions**: one callback registered for one category on one
//!   emitter. Unsubscribing is idempotent and stops future deliveries only.
//! - **Proxies**: an emitter can re-emit everything another emitter emits,
//!   keeping each event's original target.
//!
//! # Delivery model
//!
//! [`Emitter::emit`] computes the matching subscriptions, spawns one task per
//! subscription on the emitter's runtime handle, and returns. It never waits
//! for callbacks. A callback that panics only fails its own task. There is no
//! ordering guarantee between subscriptions, and no timeout: a synchronous
//! callback that never returns blocks the worker thread it runs on.
//!
//! # Quick Start
//!
//! ```
//! use emitter_lib::Emitter;
//! use emitter_lib::category::HierarchyBuilder;
//! use emitter_lib::event::Event;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> emitter_lib::Result<()> {
//!     let hierarchy = HierarchyBuilder::new("BaseEvent")
//!         .category("ConnectionOpened", &[])
//!         .category("ConnectionClosed", &[])
//!         .build()?;
//!     let opened = hierarchy.lookup("ConnectionOpened").unwrap();
//!
//!     let connection = Emitter::new(hierarchy.clone(), tokio::runtime::Handle::current());
//!
//!     // Broad listener: receives every event.
//!     let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!     let subscription = connection.listen(hierarchy.root(), move |event| {
//!         let _ = tx.send(event);
//!     })?;
//!
//!     // Async listener for one category.
//!     connection.listen_async(opened, |event| async move {
//!         println!("opened by {:?}", event.target());
//!     })?;
//!
//!     connection.emit(Event::new(opened))?;
//!     let event = rx.recv().await.unwrap();
//!     assert_eq!(event.target(), Some(connection.id()));
//!
//!     subscription.unsubscribe();
//!     Ok(())
//! }
//! ```

pub mod category;
mod emitter;
pub mod error;
pub mod event;
pub mod subscription;

pub use category::{CategoryHierarchy, EventCategory, HierarchyBuilder, HierarchyDefinition};
pub use emitter::{Emitter, EmitterBuilder};
pub use error::{Error, HierarchyError, Result};
pub use event::{EmitterId, Event};
pub use subscription::{Callback, Subscribable, Subscription, SubscriptionId, SubscriptionScope};
