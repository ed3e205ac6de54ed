//! Style properties and patches
//!
//! A `StylePatch` is an ordered list of set/remove operations on the small
//! set of properties the toolbar animates. Removing a property drops the
//! inline override so the stylesheet default applies again.
//!
//! # Example
//!
//! ```rust
//! use vanish_style::{StyleOp, StylePatch, StyleProperty};
//!
//! let patch = StylePatch::new()
//!     .set(StyleProperty::Height, "56px")
//!     .remove(StyleProperty::Opacity);
//!
//! assert_eq!(patch.len(), 2);
//! assert_eq!(patch.ops()[1], StyleOp::Remove(StyleProperty::Opacity));
//! ```

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use crate::renderer::StyleApplier;
use crate::tree::NodeId;

/// A style property the toolbar controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Transition,
    Height,
    MinHeight,
    Opacity,
    Padding,
}

impl StyleProperty {
    /// All controlled properties
    pub const ALL: [StyleProperty; 5] = [
        StyleProperty::Transition,
        StyleProperty::Height,
        StyleProperty::MinHeight,
        StyleProperty::Opacity,
        StyleProperty::Padding,
    ];

    /// The CSS property name
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::Transition => "transition",
            StyleProperty::Height => "height",
            StyleProperty::MinHeight => "min-height",
            StyleProperty::Opacity => "opacity",
            StyleProperty::Padding => "padding",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// Error returned when a property name is not one of the controlled properties
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported style property: {0}")]
pub struct ParsePropertyError(pub String);

impl FromStr for StyleProperty {
    type Err = ParsePropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        StyleProperty::ALL
            .into_iter()
            .find(|p| p.css_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParsePropertyError(name.to_string()))
    }
}

/// A single style mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleOp {
    /// Set an inline value
    Set(StyleProperty, String),
    /// Drop the inline value, reverting to the stylesheet default
    Remove(StyleProperty),
}

impl StyleOp {
    /// The property this op touches
    pub fn property(&self) -> StyleProperty {
        match self {
            StyleOp::Set(property, _) | StyleOp::Remove(property) => *property,
        }
    }
}

/// An ordered batch of style mutations for one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    ops: SmallVec<[StyleOp; 4]>,
}

impl StylePatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Presets
    // =========================================================================

    /// Persistent styling applied once at attachment: the transition timing
    /// and the expanded height
    pub fn base(transition: impl Into<String>, height: impl Into<String>) -> Self {
        Self::new()
            .set(StyleProperty::Transition, transition)
            .set(StyleProperty::Height, height)
    }

    /// Fully collapsed and transparent
    pub fn collapsed() -> Self {
        Self::new()
            .set(StyleProperty::MinHeight, "0px")
            .set(StyleProperty::Height, "0px")
            .set(StyleProperty::Opacity, "0")
            .set(StyleProperty::Padding, "0")
    }

    /// Restored to `height`, with the other collapse overrides removed
    pub fn expanded(height: impl Into<String>) -> Self {
        Self::new()
            .set(StyleProperty::Height, height)
            .remove(StyleProperty::Opacity)
            .remove(StyleProperty::MinHeight)
            .remove(StyleProperty::Padding)
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Append a set op
    pub fn set(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.ops.push(StyleOp::Set(property, value.into()));
        self
    }

    /// Append a remove op
    pub fn remove(mut self, property: StyleProperty) -> Self {
        self.ops.push(StyleOp::Remove(property));
        self
    }

    /// Get the ops in application order
    pub fn ops(&self) -> &[StyleOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every op, in order, to `node`
    pub fn apply<A: StyleApplier + ?Sized>(&self, applier: &A, node: NodeId) {
        for op in &self.ops {
            match op {
                StyleOp::Set(property, value) => applier.set_property(node, *property, value),
                StyleOp::Remove(property) => applier.remove_property(node, *property),
            }
        }
    }
}
