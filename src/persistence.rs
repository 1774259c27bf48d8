//! Save and restore of the active panel across process teardown
//!
//! The blob references the payload by id only. Anything that cannot be
//! decoded, comes from another format version, or points at a payload the
//! data source no longer knows resolves to a hidden panel.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commands::Cmd;
use crate::composite::PanelComposite;
use crate::data::PayloadId;
use crate::panel::StableState;
use crate::panels::VariantId;
use crate::ports::FeatureDataSource;

pub const FORMAT_VERSION: u32 = 1;

/// What survives a restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub variant: VariantId,
    pub payload_id: PayloadId,
    pub state: StableState,
}

impl PersistedState {
    pub fn new(variant: VariantId, payload_id: PayloadId, state: StableState) -> Self {
        Self {
            version: FORMAT_VERSION,
            variant,
            payload_id,
            state,
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize panel state: {}", e))
    }

    /// Decode a blob; `None` for anything unreadable or incompatible
    pub fn from_json(blob: &str) -> Option<Self> {
        let state: Self = match serde_json::from_str(blob) {
            Ok(state) => state,
            Err(e) => {
                warn!(target: "persist", "discarding unreadable panel state: {}", e);
                return None;
            }
        };
        if state.version != FORMAT_VERSION {
            warn!(
                target: "persist",
                "discarding panel state with version {} (expected {})",
                state.version,
                FORMAT_VERSION
            );
            return None;
        }
        Some(state)
    }
}

/// Outcome of a restore attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The panel is back in the saved state
    Restored,
    /// Nothing to restore, or it could not be restored; the panel stays hidden
    Hidden,
}

pub struct PersistenceAdapter;

impl PersistenceAdapter {
    /// Snapshot the active variant; `None` when it is (or is about to be) hidden
    pub fn save(composite: &PanelComposite) -> Option<PersistedState> {
        let active = composite.active();
        let (payload_id, state) = active.on_save()?;
        Some(PersistedState::new(active.id(), payload_id, state))
    }

    /// Re-enter a saved state directly, without any opening animation
    pub fn restore(
        composite: &mut PanelComposite,
        saved: Option<&PersistedState>,
        source: &dyn FeatureDataSource,
        out: &mut Vec<Cmd>,
    ) -> RestoreOutcome {
        let Some(saved) = saved else {
            return RestoreOutcome::Hidden;
        };

        let Some(data) = source.resolve(&saved.payload_id) else {
            debug!(
                target: "persist",
                payload = %saved.payload_id,
                "saved payload no longer resolves, staying hidden"
            );
            composite.close(false, out);
            return RestoreOutcome::Hidden;
        };

        let supported = composite
            .variant(saved.variant)
            .is_some_and(|variant| variant.support(&data));
        if !supported {
            warn!(
                target: "persist",
                "saved variant {} cannot show {} payload {}",
                saved.variant,
                data.kind_name(),
                saved.payload_id
            );
            composite.close(false, out);
            return RestoreOutcome::Hidden;
        }

        debug!(
            target: "persist",
            variant = %saved.variant,
            payload = %saved.payload_id,
            state = ?saved.state,
            "restoring panel"
        );
        composite.restore(saved.variant, data, saved.state, out);
        RestoreOutcome::Restored
    }

    /// Write the blob, or remove a stale file when there is nothing to save
    pub fn save_to_file(saved: Option<&PersistedState>, path: &Path) -> Result<(), String> {
        let Some(saved) = saved else {
            if path.exists() {
                std::fs::remove_file(path).map_err(|e| {
                    format!("Failed to remove panel state at {}: {}", path.display(), e)
                })?;
            }
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create state directory: {}", e))?;
        }
        std::fs::write(path, saved.to_json()?)
            .map_err(|e| format!("Failed to write panel state to {}: {}", path.display(), e))?;
        debug!(target: "persist", "saved panel state to {}", path.display());
        Ok(())
    }

    /// Read the blob; a missing or incompatible file means nothing was saved
    pub fn load_from_file(path: &Path) -> Result<Option<PersistedState>, String> {
        if !path.exists() {
            return Ok(None);
        }
        let blob = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read panel state at {}: {}", path.display(), e))?;
        Ok(PersistedState::from_json(&blob))
    }
}
