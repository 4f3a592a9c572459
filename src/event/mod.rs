// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event values.
//!
//! An [`Event`] is one emitted occurrence: it belongs to exactly one
//! [`EventCategory`](crate::category::EventCategory), optionally carries an
//! application payload, and records the [`EmitterId`] of the emitter that
//! first emitted it.
//!
//! # Examples
//!
//! ```
//! use emitter_lib::category::HierarchyBuilder;
//! use emitter_lib::event::Event;
//!
//! let hierarchy = HierarchyBuilder::new("BaseEvent")
//!     .category("Payload", &[])
//!     .build()?;
//!
//! let event = Event::new(hierarchy.lookup("Payload").unwrap()).with_payload("one");
//! assert_eq!(event.payload::<&'static str>(), Some(&"one"));
//! assert!(event.target().is_none());
//! # Ok::<(), emitter_lib::Error>(())
//! ```

mod emitter_id;
mod event_value;

pub use emitter_id::EmitterId;
pub use event_value::Event;
