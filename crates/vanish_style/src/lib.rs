//! Vanish Styling Surface
//!
//! Everything the toolbar behavior needs to touch a styled element tree
//! without depending on any particular UI framework:
//!
//! - `StyleProperty` / `StylePatch` - the controlled properties and ordered set/remove ops
//! - `StyleApplier` / `ElementQuery` - renderer capabilities the host implements
//! - `StyleTree` - an in-memory element tree implementing both capabilities

pub mod renderer;
pub mod style;
pub mod tree;

pub use renderer::{ElementQuery, StyleApplier};
pub use style::{ParsePropertyError, StyleOp, StylePatch, StyleProperty};
pub use tree::{NodeId, SharedStyleTree, StyleTree};
