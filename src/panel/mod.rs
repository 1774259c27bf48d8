//! Panel sheet - the draggable container every place-page variant is shown in
//!
//! ## Architecture
//!
//! - `PanelState`: presentation states, with `next_state` as the transition table
//! - `SnapOffsets` / `resolve_settle`: where each resting state sits and where a
//!   released drag comes to rest
//! - `peek_height`: visible height while collapsed
//! - `Animator`: eased interpolation of the top edge, retargetable mid-flight
//! - `PanelStateMachine`: ties the pieces together for one panel
//!
//! ## Integration
//!
//! Variants in `panels/` each own one `PanelStateMachine`. The gesture
//! interpreter feeds it drags and taps, and the viewport coordinator reads its
//! geometry on every layout tick.

mod animator;
mod peek;
mod sheet;
mod snap;
mod state;

pub use animator::{Animator, Easing};
pub use peek::peek_height;
pub use sheet::PanelStateMachine;
pub use snap::{resolve_settle, SettlePolicy, SnapOffsets};
pub use state::{next_state, Edge, PanelState, SheetEvent, StableState};
