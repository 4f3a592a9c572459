// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that own an emitter.
//!
//! Application objects (connections, devices, sessions) usually emit events
//! about themselves. Embedding an [`Emitter`] and implementing this trait
//! gives them the full listen/emit/proxy surface.

use std::future::Future;
use std::sync::Arc;

use crate::Emitter;
use crate::category::EventCategory;
use crate::error::Result;
use crate::event::Event;

use super::{Callback, Subscription};

/// Trait for types that emit events through an embedded [`Emitter`].
///
/// # Examples
///
/// ```
/// use emitter_lib::Emitter;
/// use emitter_lib::category::HierarchyBuilder;
/// use emitter_lib::event::Event;
/// use emitter_lib::subscription::Subscribable;
///
/// struct Connection {
///     events: Emitter,
/// }
///
/// impl Subscribable for Connection {
///     fn emitter(&self) -> &Emitter {
///         &self.events
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> emitter_lib::Result<()> {
/// let hierarchy = HierarchyBuilder::new("BaseEvent")
///     .category("Opened", &[])
///     .build()?;
/// let connection = Connection {
///     events: Emitter::new(hierarchy.clone(), tokio::runtime::Handle::current()),
/// };
///
/// let opened = hierarchy.lookup("Opened").unwrap();
/// connection.listen(hierarchy.root(), |event| {
///     println!("connection event: {:?}", event.category());
/// })?;
/// connection.emit(Event::new(opened))?;
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Returns the embedded emitter.
    fn emitter(&self) -> &Emitter;

    /// Subscribes a synchronous callback to `category` and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCategory`](crate::Error::InvalidCategory) if
    /// the category is not part of the emitter's hierarchy.
    fn listen<F>(&self, category: EventCategory, callback: F) -> Result<Subscription>
    where
        F: Fn(Arc<Event>) + Send + Sync + 'static,
    {
        self.emitter()
            .listen_with(category, Callback::immediate(callback))
    }

    /// Subscribes an async callback to `category` and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCategory`](crate::Error::InvalidCategory) if
    /// the category is not part of the emitter's hierarchy.
    fn listen_async<F, Fut>(&self, category: EventCategory, callback: F) -> Result<Subscription>
    where
        F: Fn(Arc<Event>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.emitter()
            .listen_with(category, Callback::deferred(callback))
    }

    /// Emits an event through the embedded emitter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEvent`](crate::Error::InvalidEvent) if the
    /// event's category is not part of the emitter's hierarchy.
    fn emit<E>(&self, event: E) -> Result<()>
    where
        E: Into<Arc<Event>>,
    {
        self.emitter().emit(event)
    }

    /// Re-emits every event emitted by `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HierarchyMismatch`](crate::Error::HierarchyMismatch)
    /// if the two emitters use different hierarchies.
    fn proxy<S>(&self, source: &S) -> Result<Subscription>
    where
        S: Subscribable + ?Sized,
    {
        self.emitter().proxy(source.emitter())
    }
}

impl Subscribable for Emitter {
    fn emitter(&self) -> &Emitter {
        self
    }
}
