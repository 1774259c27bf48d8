//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging panel
//! transitions, gestures and viewport pushes.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=panel=debug,gesture=trace` - scoped filtering
//! - `RUST_LOG=viewport=debug,persist=debug` - viewport pushes and save/restore
//!
//! # Log Files
//!
//! Logs are written to `~/.config/placepage/logs/placepage.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::PlacePageModel;
use crate::panel::PanelState;
use crate::panels::VariantId;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). `verbose` raises the
/// console default to `debug` when RUST_LOG is unset.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "placepage.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the active panel for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSnapshot {
    pub variant: VariantId,
    pub state: PanelState,
    pub top: f32,
    pub peek: f32,
    pub payload: Option<String>,
}

impl PanelSnapshot {
    pub fn from_model(model: &PlacePageModel) -> Self {
        let active = model.active();
        let sheet = active.sheet();
        Self {
            variant: active.id(),
            state: sheet.state(),
            top: sheet.top(),
            peek: sheet.peek(),
            payload: active.data().map(|data| data.id().to_string()),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &PanelSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.variant != other.variant {
            changes.push(format!("variant: {} → {}", self.variant, other.variant));
        }
        if self.state != other.state {
            changes.push(format!("state: {} → {}", self.state, other.state));
        }
        if self.payload != other.payload {
            changes.push(format!(
                "payload: {} → {}",
                self.payload.as_deref().unwrap_or("-"),
                other.payload.as_deref().unwrap_or("-")
            ));
        }
        if (self.peek - other.peek).abs() > f32::EPSILON {
            changes.push(format!("peek: {} → {}", self.peek, other.peek));
        }
        // Top moves every frame while animating; only report it for jumps
        // between resting states
        if changes.is_empty()
            && self.state.is_stable()
            && other.state.is_stable()
            && (self.top - other.top).abs() > f32::EPSILON
        {
            changes.push(format!("top: {} → {}", self.top, other.top));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(state: PanelState, top: f32) -> PanelSnapshot {
        PanelSnapshot {
            variant: VariantId::PlacePage,
            state,
            top,
            peek: 168.0,
            payload: Some("node/1".to_string()),
        }
    }

    #[test]
    fn test_diff_reports_state_change() {
        let before = snapshot(PanelState::Collapsed, 632.0);
        let after = snapshot(PanelState::Settling, 630.0);
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("state: COLLAPSED → SETTLING")
        );
    }

    #[test]
    fn test_diff_ignores_animation_frames() {
        let before = snapshot(PanelState::Settling, 700.0);
        let after = snapshot(PanelState::Settling, 690.0);
        assert_eq!(before.diff(&after), None);
    }

    #[test]
    fn test_diff_reports_resting_jump() {
        let before = snapshot(PanelState::Collapsed, 632.0);
        let after = snapshot(PanelState::Collapsed, 432.0);
        assert_eq!(before.diff(&after).as_deref(), Some("top: 632 → 432"));
    }
}
