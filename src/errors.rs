//! Error Taxonomy
//!
//! Every failure a scenario step can run into is a distinct variant so callers
//! match on the kind instead of the message text.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse grouping of [`BotError`] kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Cooperative cancellation
    Control,
    Wheel,
    /// Map and menu screens (beds, logs)
    Interface,
    Inventory,
    Player,
    Server,
    /// Structures the bot interacts with (generators, dedicated storage, mounts)
    Structure,
}

/// Failures raised by the engine and by the scenario code built on top of it.
///
/// None of these are retried internally; the caller decides whether to rerun
/// the step, pick another item, or abort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    // === Control ===
    #[error("Bot has been terminated")]
    Terminated,

    // === Wheels ===
    #[error("Wheel '{wheel}' could not be activated!")]
    WheelNotAccessible { wheel: String },

    #[error("Unexpected wheel accessed. Expected '{expected}', got '{got}'!")]
    UnexpectedWheel { expected: String, got: String },

    // === Interfaces ===
    #[error("Bed map could not be opened")]
    BedNotAccessible,

    #[error("Bed could not be found on the map")]
    BedNotFound,

    #[error("Logs could not be opened")]
    LogsNotOpened,

    // === Inventories ===
    #[error("Attempted interaction '{action}' with closed inventory!")]
    InventoryNotOpen { action: String },

    #[error("Inventory '{inventory}' could not be opened")]
    InventoryNotAccessible { inventory: String },

    #[error("Inventory '{inventory}' could not be closed")]
    InventoryNotClosable { inventory: String },

    #[error("'Receiving Remote Inventory' did not disappear in '{inventory}'")]
    ReceivingRemoteInventoryTimeout { inventory: String },

    #[error("Expected item {item} was not added!")]
    NoItemsAdded { item: String },

    #[error("No items were deposited")]
    NoItemsDeposited,

    #[error("{structure} is out of gasoline!")]
    NoGasoline { structure: String },

    // === Player ===
    #[error("Player did not spawn")]
    PlayerDidntSpawn,

    #[error("Travel screen could not be detected")]
    PlayerDidntTravel,

    // === Server / structures ===
    #[error("Server could not be found")]
    ServerNotFound,

    #[error("Dedicated storage deposit text could not be detected")]
    DediNotInRange,

    #[error("Dino could not be mounted")]
    DinoNotMounted,
}

impl BotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BotError::Terminated => ErrorCategory::Control,
            BotError::WheelNotAccessible { .. } | BotError::UnexpectedWheel { .. } => {
                ErrorCategory::Wheel
            }
            BotError::BedNotAccessible | BotError::BedNotFound | BotError::LogsNotOpened => {
                ErrorCategory::Interface
            }
            BotError::InventoryNotOpen { .. }
            | BotError::InventoryNotAccessible { .. }
            | BotError::InventoryNotClosable { .. }
            | BotError::ReceivingRemoteInventoryTimeout { .. }
            | BotError::NoItemsAdded { .. }
            | BotError::NoItemsDeposited
            | BotError::NoGasoline { .. } => ErrorCategory::Inventory,
            BotError::PlayerDidntSpawn | BotError::PlayerDidntTravel => ErrorCategory::Player,
            BotError::ServerNotFound => ErrorCategory::Server,
            BotError::DediNotInRange | BotError::DinoNotMounted => ErrorCategory::Structure,
        }
    }

    /// Inventory errors are also interface errors in the original grouping.
    pub fn is_inventory_error(&self) -> bool {
        self.category() == ErrorCategory::Inventory
    }

    pub fn is_interface_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Interface | ErrorCategory::Inventory
        )
    }
}

/// Failures while loading item data or configuration from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Item '{id}' has invalid stack size {stack_size}")]
    InvalidStackSize { id: String, stack_size: u32 },

    #[error("Item id must not be empty ({path:?})")]
    EmptyName { path: PathBuf },

    #[error("Invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}
