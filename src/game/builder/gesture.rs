//! Gesture Disambiguation
//!
//! Splits pointer sessions into taps (edits) and drags (camera orbit).
//!
//! A session runs from pointer-down to pointer-up. Travel beyond the tap
//! threshold marks it as a drag, and a drag never edits. Picking is passed
//! in as a closure so the tracker stays free of scene state.

use super::mode::InteractionPolicy;
use super::tools::TAP_THRESHOLD_PX;
use crate::input::{PointerDevice, Position};

/// Edit requested by a finished pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Drag, miss or nothing to commit
    NoEdit,
    /// Commit the build preview
    Place,
    /// Remove the brick at this index
    Erase(usize),
}

/// State of one down-to-up pointer session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub start: Position,
    pub has_moved: bool,
    /// Brick picked for erasing
    pub target: Option<usize>,
    pub device: PointerDevice,
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    tap_threshold: f32,
    session: Option<GestureSession>,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(TAP_THRESHOLD_PX)
    }
}

impl GestureTracker {
    pub fn new(tap_threshold: f32) -> Self {
        Self {
            tap_threshold,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session. In erase mode the brick under the pointer becomes
    /// the session target right away.
    pub fn pointer_down<F>(&mut self, position: Position, device: PointerDevice, policy: InteractionPolicy, pick: F)
    where
        F: FnOnce() -> Option<usize>,
    {
        let target = if policy.picks_on_demand() { pick() } else { None };
        self.session = Some(GestureSession {
            start: position,
            has_moved: false,
            target,
            device,
        });
    }

    /// Track pointer travel.
    ///
    /// Returns `Some(hover)` when the hover highlight should change: only in
    /// erase mode with a hovering device. Touch never updates hover so camera
    /// drags do not flicker the highlight.
    pub fn pointer_move<F>(
        &mut self,
        position: Position,
        device: PointerDevice,
        policy: InteractionPolicy,
        pick: F,
    ) -> Option<Option<usize>>
    where
        F: FnOnce() -> Option<usize>,
    {
        if let Some(session) = self.session.as_mut() {
            if session.start.distance(&position) > self.tap_threshold {
                session.has_moved = true;
            }
        }

        if !(policy.picks_on_demand() && device.supports_hover()) {
            return None;
        }

        let hovered = pick();
        if let Some(session) = self.session.as_mut() {
            session.target = hovered;
        }
        Some(hovered)
    }

    /// End the session and decide what, if anything, to edit.
    ///
    /// `preview_ready` is whether a valid, visible build preview exists.
    pub fn pointer_up(&mut self, policy: InteractionPolicy, preview_ready: bool) -> GestureOutcome {
        let Some(session) = self.session.take() else {
            return GestureOutcome::NoEdit;
        };

        if session.has_moved {
            return GestureOutcome::NoEdit;
        }

        if policy.consumes_preview_ray() {
            if preview_ready {
                GestureOutcome::Place
            } else {
                GestureOutcome::NoEdit
            }
        } else if policy.picks_on_demand() {
            session.target.map_or(GestureOutcome::NoEdit, GestureOutcome::Erase)
        } else {
            GestureOutcome::NoEdit
        }
    }

    /// Drop the in-flight session without emitting anything.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
