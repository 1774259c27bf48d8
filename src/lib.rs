//! Place page - Elm-style bottom-sheet panel for a map application
//!
//! This crate provides the core types and logic for the place-page panel:
//! a gesture interpreter, a panel state machine, a composite of panel
//! variants, a viewport coordinator and a persistence adapter, wired together
//! with the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod composite;
pub mod config;
pub mod config_paths;
pub mod data;
pub mod geometry;
pub mod gesture;
pub mod messages;
pub mod model;
pub mod panel;
pub mod panels;
pub mod persistence;
pub mod ports;
pub mod runtime;
pub mod scenario;
pub mod tracing;
pub mod update;
pub mod viewport;

// Re-export commonly used types
pub use commands::Cmd;
pub use composite::PanelComposite;
pub use config::PanelConfig;
pub use data::{DataRef, PlacePageData};
pub use messages::Msg;
pub use model::PlacePageModel;
pub use panel::{PanelState, PanelStateMachine};
pub use runtime::PlacePageHost;
