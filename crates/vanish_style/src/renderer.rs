//! Renderer capabilities
//!
//! Hosts implement these over whatever styled tree they own (a DOM, a
//! virtual scene graph, ...). The toolbar behavior only ever talks to the
//! tree through them.

use crate::style::StyleProperty;
use crate::tree::NodeId;

/// Writes inline style properties on an element
pub trait StyleApplier: Send + Sync {
    /// Set an inline property value
    fn set_property(&self, node: NodeId, property: StyleProperty, value: &str);

    /// Remove an inline property, reverting to the stylesheet default
    fn remove_property(&self, node: NodeId, property: StyleProperty);
}

/// Looks up elements below an attachment point
pub trait ElementQuery: Send + Sync {
    /// Find the first descendant of `host` (in document order, excluding
    /// `host` itself) whose tag name matches `tag`
    fn find_descendant(&self, host: NodeId, tag: &str) -> Option<NodeId>;
}
