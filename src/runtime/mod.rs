//! Runtime module - host integration
//!
//! This module contains the code that connects the pure update loop to the
//! outside world:
//! - `host` - `PlacePageHost`, the host-shell API, the UI queue and command
//!   execution against the injected ports

pub mod host;

pub use host::PlacePageHost;
