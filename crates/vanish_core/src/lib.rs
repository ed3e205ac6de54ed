//! Vanish Core Runtime
//!
//! This crate provides the host-facing primitives the toolbar behavior is
//! built on:
//!
//! - **Scroll Events**: Position and delta reported by a scroll container
//! - **Scroll Streams**: Push-based `subscribe -> Subscription` capability
//! - **Write Scheduling**: Deferred style writes aligned with the host's paint cycle
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use vanish_core::{ScrollEmitter, ScrollEvent, ScrollStream};
//!
//! let emitter = ScrollEmitter::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let seen_clone = seen.clone();
//!
//! let _subscription = emitter.subscribe(Arc::new(move |event: &ScrollEvent| {
//!     seen_clone.lock().unwrap().push(event.delta_y);
//! }));
//!
//! emitter.scroll_to(30.0);
//! emitter.scroll_to(10.0);
//! assert_eq!(*seen.lock().unwrap(), vec![30.0, -20.0]);
//! ```

pub mod events;
pub mod scheduler;
pub mod stream;

pub use events::{ScrollDirection, ScrollEvent};
pub use scheduler::{FrameWriteQueue, ImmediateWriter, WriteJob, WriteScheduler};
pub use stream::{HandlerId, ScrollEmitter, ScrollHandler, ScrollStream, Subscription};
