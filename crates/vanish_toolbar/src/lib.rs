//! Vanish Toolbar
//!
//! A toolbar that collapses when the user scrolls down past a small
//! tolerance and comes back when they scroll up past it or reach the top of
//! the scroll area.
//!
//! - **ScrollVanish**: the controller, attached once per host element
//! - **VanishConfig**: trigger distance, expanded height, transition, target tag
//! - **VisibilityMachine**: the two-state `Visible`/`Hidden` machine
//!
//! The controller only depends on capabilities: a [`vanish_core::ScrollStream`]
//! for input, a [`vanish_core::WriteScheduler`] for deferred writes, and a
//! renderer implementing [`vanish_style::StyleApplier`] and
//! [`vanish_style::ElementQuery`]. It touches exactly five style
//! properties: `transition`, `height`, `min-height`, `opacity`, `padding`.

pub mod config;
pub mod controller;
pub mod error;
pub mod visibility;

pub use config::{Platform, VanishConfig};
pub use controller::ScrollVanish;
pub use error::{Result, VanishError};
pub use visibility::{Visibility, VisibilityMachine};
