//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The runtime executes them against the injected ports.

use crate::geometry::Rect;

/// Side effects produced by update functions
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Post one layout tick to the UI queue; the viewport is recomputed there
    ScheduleLayout,
    /// Push the unobscured map rectangle to the map engine
    SetVisibleRect(Rect),
    /// Drop the feature selection on the map
    ClearMapSelection,
    /// Panel top edge moved; forwarded to the slide listener
    NotifySlide { top: f32 },
    /// An animation is running; the host should keep delivering frames
    RequestFrame,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening trivial cases
    pub fn batch(mut cmds: Vec<Cmd>) -> Self {
        cmds.retain(|cmd| *cmd != Cmd::None);
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Collect commands into an update result
    pub fn from_vec(cmds: Vec<Cmd>) -> Option<Cmd> {
        match Cmd::batch(cmds) {
            Cmd::None => None,
            cmd => Some(cmd),
        }
    }

    /// Check if this command asks for another animation frame
    pub fn needs_frame(&self) -> bool {
        match self {
            Cmd::RequestFrame => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_frame()),
            _ => false,
        }
    }

    /// Iterate over leaf commands in order
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }
}
