//! Snap points and settle resolution
//!
//! A released drag resolves to a resting state. A fling (release velocity
//! beyond `min_fling_velocity`) always wins over position; otherwise the
//! nearest snap point wins, ties going to the more open state.

use super::state::PanelState;

/// Positions closer than this are treated as the same snap point
const SNAP_EPSILON: f32 = 0.5;

/// Top-edge offsets of every resting state for the current geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapOffsets {
    pub expanded: f32,
    pub anchored: f32,
    pub collapsed: f32,
    pub hidden: f32,
}

impl SnapOffsets {
    /// Derive offsets from the parent height, content height and peek
    ///
    /// Offsets are ordered `expanded <= anchored <= collapsed <= hidden`.
    /// Short content makes the anchored offset coincide with the expanded one.
    pub fn compute(parent_height: f32, content_height: f32, peek: f32, anchor_ratio: f32) -> Self {
        let hidden = parent_height.max(0.0);
        let collapsed = (hidden - peek).clamp(0.0, hidden);
        let expanded = (hidden - content_height).max(0.0).min(collapsed);
        let anchored = (hidden * anchor_ratio).max(expanded).min(collapsed);
        Self {
            expanded,
            anchored,
            collapsed,
            hidden,
        }
    }

    /// Offset of a resting state; `None` for states in motion
    pub fn top_for(&self, state: PanelState) -> Option<f32> {
        match state {
            PanelState::Expanded => Some(self.expanded),
            PanelState::Anchored => Some(self.anchored),
            PanelState::Collapsed => Some(self.collapsed),
            PanelState::Hidden => Some(self.hidden),
            PanelState::Dragging | PanelState::Settling => None,
        }
    }

    /// On-screen resting states from most to least open
    fn shown(&self) -> [(PanelState, f32); 3] {
        [
            (PanelState::Expanded, self.expanded),
            (PanelState::Anchored, self.anchored),
            (PanelState::Collapsed, self.collapsed),
        ]
    }

    /// Nearest on-screen resting state, used when a drag must be persisted
    pub fn nearest_shown(&self, top: f32) -> PanelState {
        nearest(&self.shown(), top)
    }
}

/// Release parameters of a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlePolicy {
    pub min_fling_velocity: f32,
    pub hide_friction: f32,
    pub hide_threshold: f32,
    pub peek: f32,
    pub hideable: bool,
}

/// Resolve where a released drag comes to rest
///
/// `velocity` is in px/s, positive downward.
pub fn resolve_settle(
    offsets: &SnapOffsets,
    top: f32,
    velocity: f32,
    policy: &SettlePolicy,
) -> PanelState {
    let shown = offsets.shown();

    if velocity <= -policy.min_fling_velocity {
        // Closest resting state strictly above the current position
        return shown
            .iter()
            .rev()
            .find(|(_, offset)| *offset < top - SNAP_EPSILON)
            .map(|(state, _)| *state)
            .unwrap_or(PanelState::Expanded);
    }

    if velocity >= policy.min_fling_velocity {
        let projected = top + velocity * policy.hide_friction;
        if policy.hideable && projected > offsets.collapsed + policy.peek * policy.hide_threshold {
            return PanelState::Hidden;
        }
        // Closest resting state strictly below the current position
        return shown
            .iter()
            .find(|(_, offset)| *offset > top + SNAP_EPSILON)
            .map(|(state, _)| *state)
            .unwrap_or(PanelState::Collapsed);
    }

    if policy.hideable {
        let mut candidates = shown.to_vec();
        candidates.push((PanelState::Hidden, offsets.hidden));
        nearest(&candidates, top)
    } else {
        nearest(&shown, top)
    }
}

/// Candidate with the smallest distance
///
/// Candidates are ordered most open first; distances within `SNAP_EPSILON`
/// of each other count as a tie and keep the earlier candidate.
fn nearest(candidates: &[(PanelState, f32)], top: f32) -> PanelState {
    let mut best = (PanelState::Collapsed, f32::INFINITY);
    for &(state, offset) in candidates {
        let distance = (offset - top).abs();
        if distance < best.1 - SNAP_EPSILON {
            best = (state, distance);
        }
    }
    best.0
}
