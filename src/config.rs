//! Transfer Configuration
//!
//! Layout constants, tolerance windows, timeouts and keybinds. All of them
//! depend on the target UI layout and on how noisy its readouts are, so they
//! live in `config/transfer.toml` rather than in the algorithm.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::LoadError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    pub layout: LayoutConfig,
    pub tolerance: ToleranceConfig,
    pub timing: TimingConfig,
    pub keybinds: Keybinds,
}

// ============================================================================
// Layout
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Slots in one visual row of the inventory grid
    pub slots_per_row: u32,
    /// Above this many rows the stack strategy is never used
    pub max_stack_rows: u32,
    /// Stacks the destination can hold while still being counted reliably
    pub stack_capacity: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slots_per_row: 6,
            max_stack_rows: 7,
            stack_capacity: 42,
        }
    }
}

// ============================================================================
// Tolerance windows
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Upper slack of the stack completion window, in items
    pub stack_overshoot: u32,
    /// Upper slack of the row completion window, in stacks
    pub row_overshoot_stacks: u32,
    /// Extra iterations granted to the row strategy
    pub row_budget_factor: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            stack_overshoot: 3000,
            row_overshoot_stacks: 10,
            row_budget_factor: 1.5,
        }
    }
}

// ============================================================================
// Timing
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub poll_interval_ms: u64,
    pub open_attempts: u32,
    pub open_timeout_ms: u64,
    pub close_timeout_ms: u64,
    pub items_added_timeout_ms: u64,
    pub stack_received_timeout_ms: u64,
    pub remote_inventory_timeout_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            open_attempts: 6,
            open_timeout_ms: 5_000,
            close_timeout_ms: 5_000,
            items_added_timeout_ms: 30_000,
            stack_received_timeout_ms: 10_000,
            remote_inventory_timeout_ms: 10_000,
        }
    }
}

impl TimingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn open_timeout(&self) -> Duration {
        Duration::from_millis(self.open_timeout_ms)
    }

    pub fn close_timeout(&self) -> Duration {
        Duration::from_millis(self.close_timeout_ms)
    }

    pub fn items_added_timeout(&self) -> Duration {
        Duration::from_millis(self.items_added_timeout_ms)
    }

    pub fn stack_received_timeout(&self) -> Duration {
        Duration::from_millis(self.stack_received_timeout_ms)
    }

    pub fn remote_inventory_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_inventory_timeout_ms)
    }
}

// ============================================================================
// Keybinds
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Keybinds {
    pub inventory: String,
    pub transfer: String,
    pub close: String,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            inventory: "i".to_string(),
            transfer: "t".to_string(),
            close: "esc".to_string(),
        }
    }
}

impl TransferConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, LoadError> {
        let config: Self = toml::from_str(content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Reject values the transfer arithmetic cannot work with.
    pub fn validate(&self, path: &Path) -> Result<(), LoadError> {
        let invalid = |reason: String| LoadError::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        };

        if self.layout.slots_per_row == 0 {
            return Err(invalid("layout.slots_per_row must be positive".to_string()));
        }
        let factor = self.tolerance.row_budget_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(invalid(format!(
                "tolerance.row_budget_factor must be a positive number, got {}",
                factor
            )));
        }
        Ok(())
    }

    /// Load from a file, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            warn!("Config file does not exist: {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        info!("Loaded transfer config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_layout() {
        let config = TransferConfig::default();
        assert_eq!(config.layout.slots_per_row, 6);
        assert_eq!(config.layout.max_stack_rows, 7);
        assert_eq!(config.layout.stack_capacity, 42);
        assert_eq!(config.tolerance.stack_overshoot, 3000);
        assert_eq!(config.tolerance.row_overshoot_stacks, 10);
        assert_eq!(config.tolerance.row_budget_factor, 1.5);
        assert_eq!(config.timing.open_attempts, 6);
        assert_eq!(config.timing.open_timeout(), Duration::from_secs(5));
        assert_eq!(config.timing.items_added_timeout(), Duration::from_secs(30));
        assert_eq!(config.keybinds.transfer, "t");
    }

    #[test]
    fn test_partial_override() {
        let content = r#"
[layout]
slots_per_row = 5

[timing]
open_attempts = 3
"#;
        let config = TransferConfig::from_toml_str(content, Path::new("inline.toml")).unwrap();
        assert_eq!(config.layout.slots_per_row, 5);
        assert_eq!(config.layout.stack_capacity, 42);
        assert_eq!(config.timing.open_attempts, 3);
        assert_eq!(config.timing.poll_interval_ms, 100);
        assert_eq!(config.keybinds.inventory, "i");
    }

    #[test]
    fn test_zero_slots_per_row_rejected() {
        let err = TransferConfig::from_toml_str("[layout]\nslots_per_row = 0\n", Path::new("inline.toml"))
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidConfig { .. }));
        assert!(err.to_string().contains("slots_per_row"));
    }

    #[test]
    fn test_bad_row_budget_factor_rejected() {
        for factor in ["0.0", "-1.5", "nan", "inf"] {
            let content = format!("[tolerance]\nrow_budget_factor = {}\n", factor);
            let err = TransferConfig::from_toml_str(&content, Path::new("inline.toml")).unwrap_err();
            assert!(matches!(err, LoadError::InvalidConfig { .. }), "factor {}", factor);
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        TransferConfig::default().validate(Path::new("defaults")).unwrap();
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = TransferConfig::load(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.tolerance.stack_overshoot, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transfer.toml");
        std::fs::write(&path, "[keybinds]\ninventory = \"f\"\n").unwrap();

        let config = TransferConfig::load(&path).unwrap();
        assert_eq!(config.keybinds.inventory, "f");
        assert_eq!(config.keybinds.close, "esc");
    }
}
