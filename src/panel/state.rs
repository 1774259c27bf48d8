//! Panel states and the discrete transition table
//!
//! `next_state` is total: every (state, event) pair either yields an edge or
//! `None`, which callers treat as a no-op.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Presentation state of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelState {
    Hidden,
    Collapsed,
    Anchored,
    Expanded,
    Dragging,
    Settling,
}

impl PanelState {
    pub const ALL: [PanelState; 6] = [
        PanelState::Hidden,
        PanelState::Collapsed,
        PanelState::Anchored,
        PanelState::Expanded,
        PanelState::Dragging,
        PanelState::Settling,
    ];

    /// Resting states the panel can stay in without input
    pub fn is_stable(self) -> bool {
        !matches!(self, PanelState::Dragging | PanelState::Settling)
    }

    /// Stable and on screen
    pub fn is_shown(self) -> bool {
        matches!(
            self,
            PanelState::Collapsed | PanelState::Anchored | PanelState::Expanded
        )
    }

    pub fn is_in_motion(self) -> bool {
        !self.is_stable()
    }

    pub fn as_stable(self) -> Option<StableState> {
        match self {
            PanelState::Collapsed => Some(StableState::Collapsed),
            PanelState::Anchored => Some(StableState::Anchored),
            PanelState::Expanded => Some(StableState::Expanded),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PanelState::Hidden => "HIDDEN",
            PanelState::Collapsed => "COLLAPSED",
            PanelState::Anchored => "ANCHORED",
            PanelState::Expanded => "EXPANDED",
            PanelState::Dragging => "DRAGGING",
            PanelState::Settling => "SETTLING",
        }
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The on-screen resting states; the only ones that are ever persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StableState {
    Collapsed,
    Anchored,
    Expanded,
}

impl From<StableState> for PanelState {
    fn from(state: StableState) -> Self {
        match state {
            StableState::Collapsed => PanelState::Collapsed,
            StableState::Anchored => PanelState::Anchored,
            StableState::Expanded => PanelState::Expanded,
        }
    }
}

/// Discrete events that can change the panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    /// `openFor` with a flag telling whether the payload is the one already shown
    Open { same_payload: bool },
    Tap,
    DragStart,
    DragMove,
    DragEnd,
    Close,
    /// The running animator reached its target
    SettleComplete,
}

impl SheetEvent {
    pub const ALL: [SheetEvent; 8] = [
        SheetEvent::Open { same_payload: true },
        SheetEvent::Open {
            same_payload: false,
        },
        SheetEvent::Tap,
        SheetEvent::DragStart,
        SheetEvent::DragMove,
        SheetEvent::DragEnd,
        SheetEvent::Close,
        SheetEvent::SettleComplete,
    ];
}

/// Edge taken by the state machine for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Enter or stay in `Dragging`
    Drag,
    /// Start (or restart) an animated move; the state becomes `Settling`
    Settle,
    /// Leave `Settling` for the state the animation was heading to
    Land,
}

/// Edge to take for an event, `None` for a no-op
///
/// Settling targets are tracked by the state machine itself; this table only
/// decides which edges exist. Every entry into a resting state other than a
/// drag goes through `Settling`, so no edge skips the animation.
pub fn next_state(state: PanelState, event: SheetEvent) -> Option<Edge> {
    use PanelState::*;

    match (state, event) {
        (Hidden, SheetEvent::Open { .. }) => Some(Edge::Settle),
        (Collapsed | Anchored | Expanded, SheetEvent::Open { same_payload: true }) => None,
        (
            Collapsed | Anchored | Expanded | Dragging | Settling,
            SheetEvent::Open {
                same_payload: false,
            },
        ) => Some(Edge::Settle),
        // Already moving while showing the same payload
        (Dragging | Settling, SheetEvent::Open { same_payload: true }) => None,

        (Collapsed | Anchored | Expanded, SheetEvent::Tap) => Some(Edge::Settle),
        (Collapsed | Anchored | Expanded, SheetEvent::DragStart) => Some(Edge::Drag),
        (Dragging, SheetEvent::DragMove) => Some(Edge::Drag),
        (Dragging, SheetEvent::DragEnd) => Some(Edge::Settle),

        (Collapsed | Anchored | Expanded | Dragging | Settling, SheetEvent::Close) => {
            Some(Edge::Settle)
        }

        (Settling, SheetEvent::SettleComplete) => Some(Edge::Land),

        _ => None,
    }
}
