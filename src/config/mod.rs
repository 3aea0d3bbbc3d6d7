use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_FULL_REDRAW_THRESHOLD, DEFAULT_MAX_HISTORY_SIZE};
use crate::editor::clipboard::{CopiedEntryKind, CopiedEntryKinds};
use crate::editor::mutations::RefreshPolicy;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_full_redraw_threshold() -> usize {
    DEFAULT_FULL_REDRAW_THRESHOLD
}

fn default_max_history_size() -> usize {
    DEFAULT_MAX_HISTORY_SIZE
}

/// Editor configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfigData {
    /// Element kinds collected when copying a map area
    #[serde(default)]
    pub copied_entry_kinds: CopiedEntryKinds,

    /// Pastes with more entries than this redraw the whole map
    #[serde(default = "default_full_redraw_threshold")]
    pub full_redraw_threshold: usize,

    /// Number of mutations kept for undo
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,
}

impl Default for EditorConfigData {
    fn default() -> Self {
        Self {
            copied_entry_kinds: CopiedEntryKinds::default(),
            full_redraw_threshold: DEFAULT_FULL_REDRAW_THRESHOLD,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct EditorConfig {
    /// The persisted configuration data
    pub data: EditorConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            data: EditorConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

impl EditorConfig {
    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy::new(self.data.full_redraw_threshold)
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to enable or disable one kind of copied element
#[derive(Message)]
pub struct SetCopiedEntryKindRequest {
    pub kind: CopiedEntryKind,
    pub enabled: bool,
}

/// Message to change the full-redraw threshold
#[derive(Message)]
pub struct SetRefreshThresholdRequest {
    pub threshold: usize,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: EditorConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from `config_path`, falling back to defaults
fn load_config_from(config_path: &Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        EditorConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    EditorConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (EditorConfigData::default(), None)
    };

    LoadConfigResult { data, reset_reason }
}

/// Save configuration to disk
fn save_config(config: &EditorConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<EditorConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config_from(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<EditorConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to toggle a copied entry kind
fn set_copied_entry_kind_system(
    mut events: MessageReader<SetCopiedEntryKindRequest>,
    mut config: ResMut<EditorConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if event.enabled && !event.kind.is_implemented() {
            warn!(
                "{} cannot be copied yet; the setting is stored but has no effect",
                event.kind.display_name()
            );
        }
        config.data.copied_entry_kinds.set(event.kind, event.enabled);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update the full-redraw threshold
fn set_refresh_threshold_system(
    mut events: MessageReader<SetRefreshThresholdRequest>,
    mut config: ResMut<EditorConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.full_redraw_threshold = event.threshold;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Full redraw threshold set to {}", event.threshold);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetCopiedEntryKindRequest>()
            .add_message::<SetRefreshThresholdRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                    set_copied_entry_kind_system.run_if(on_message::<SetCopiedEntryKindRequest>),
                    set_refresh_threshold_system.run_if(on_message::<SetRefreshThresholdRequest>),
                ),
            );
    }
}
