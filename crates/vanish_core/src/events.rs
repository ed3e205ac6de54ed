//! Scroll event data
//!
//! The payload a scroll container pushes on every position change.

/// Vertical direction of a scroll step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    /// Content moved up (offset grew)
    Down,
    /// Content moved down (offset shrank)
    Up,
    /// No vertical movement
    #[default]
    None,
}

/// A scroll position change reported by a scroll container
///
/// Offsets are absolute; deltas are signed and measured since the
/// previously emitted event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollEvent {
    /// Absolute horizontal scroll offset
    pub current_x: f32,
    /// Absolute vertical scroll offset
    pub current_y: f32,
    /// Horizontal change since the previous event
    pub delta_x: f32,
    /// Vertical change since the previous event (positive = scrolling down)
    pub delta_y: f32,
}

impl ScrollEvent {
    /// Create an event with both axes
    pub fn new(current_x: f32, current_y: f32, delta_x: f32, delta_y: f32) -> Self {
        Self {
            current_x,
            current_y,
            delta_x,
            delta_y,
        }
    }

    /// Create a vertical-only event
    pub fn vertical(current_y: f32, delta_y: f32) -> Self {
        Self {
            current_y,
            delta_y,
            ..Default::default()
        }
    }

    /// Whether the container reports an offset of exactly zero
    pub fn is_at_top(&self) -> bool {
        self.current_y == 0.0
    }

    /// Direction of the vertical step
    pub fn direction(&self) -> ScrollDirection {
        if self.delta_y > 0.0 {
            ScrollDirection::Down
        } else if self.delta_y < 0.0 {
            ScrollDirection::Up
        } else {
            ScrollDirection::None
        }
    }
}
