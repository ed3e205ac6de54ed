//! Toolbar visibility state machine
//!
//! Two states, starting `Visible`, with no terminal state:
//!
//! - `Hidden -> Visible` when the container is exactly at the top, whatever
//!   the delta (checked first)
//! - `Visible -> Hidden` when `delta_y > trigger_distance`
//! - `Hidden -> Visible` when `delta_y < -trigger_distance`
//!
//! Every other event is a no-op. Comparisons are strict, so a delta equal
//! to the trigger distance never transitions.

use vanish_core::ScrollEvent;

/// Toolbar visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Hidden)
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Tracks the visibility state and the transitions taken
#[derive(Debug, Clone, Default)]
pub struct VisibilityMachine {
    state: Visibility,
    /// History of state transitions (for debugging)
    history: Vec<(Visibility, Visibility)>,
}

impl VisibilityMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn current_state(&self) -> Visibility {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state.is_hidden()
    }

    /// Get transition history
    pub fn history(&self) -> &[(Visibility, Visibility)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// The state `event` moves `state` to, if any
    pub fn next_state(
        state: Visibility,
        event: &ScrollEvent,
        trigger_distance: f32,
    ) -> Option<Visibility> {
        match state {
            Visibility::Hidden if event.is_at_top() => Some(Visibility::Visible),
            Visibility::Visible if event.delta_y > trigger_distance => Some(Visibility::Hidden),
            Visibility::Hidden if event.delta_y < -trigger_distance => Some(Visibility::Visible),
            _ => None,
        }
    }

    /// Feed a scroll event, returning the new state if it transitioned
    pub fn on_scroll(&mut self, event: &ScrollEvent, trigger_distance: f32) -> Option<Visibility> {
        let next = Self::next_state(self.state, event, trigger_distance)?;
        self.enter(next);
        Some(next)
    }

    /// Move to `target` unconditionally. Returns whether the state changed.
    pub fn force(&mut self, target: Visibility) -> bool {
        if self.state == target {
            return false;
        }
        self.enter(target);
        true
    }

    fn enter(&mut self, to: Visibility) {
        self.history.push((self.state, to));
        self.state = to;
    }
}
