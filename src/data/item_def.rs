use serde::Deserialize;

use crate::errors::LoadError;

// ============================================================================
// Raw Item Definition (direct from TOML)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RawItemDefinition {
    /// Name as typed into the in-game search bar
    pub display_name: Option<String>,
    pub stack_size: Option<u32>,
}

fn default_stack_size() -> u32 {
    100
}

// ============================================================================
// Resolved Item
// ============================================================================

/// Storable item as seen by the transfer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Items per slot, always positive
    pub stack_size: u32,
}

impl Item {
    /// Build an item, rejecting a zero stack size.
    pub fn new(name: &str, stack_size: u32) -> Result<Self, LoadError> {
        let id = name.to_lowercase().replace(' ', "_");
        Self::from_raw(
            &id,
            &RawItemDefinition {
                display_name: Some(name.to_string()),
                stack_size: Some(stack_size),
            },
        )
    }

    pub fn from_raw(id: &str, raw: &RawItemDefinition) -> Result<Self, LoadError> {
        let stack_size = raw.stack_size.unwrap_or_else(default_stack_size);
        if stack_size == 0 {
            return Err(LoadError::InvalidStackSize {
                id: id.to_string(),
                stack_size,
            });
        }

        Ok(Self {
            id: id.to_string(),
            name: raw.display_name.clone().unwrap_or_else(|| id.to_string()),
            stack_size,
        })
    }

    /// Quantity held by one full row of this item, saturating at `u32::MAX`
    pub fn row_amount(&self, slots_per_row: u32) -> u32 {
        self.stack_size.saturating_mul(slots_per_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_defaults() {
        let raw = RawItemDefinition {
            display_name: None,
            stack_size: None,
        };
        let item = Item::from_raw("stone", &raw).unwrap();
        assert_eq!(item.name, "stone");
        assert_eq!(item.stack_size, 100);
    }

    #[test]
    fn test_zero_stack_size_rejected() {
        let err = Item::new("Broken", 0).unwrap_err();
        assert!(matches!(err, LoadError::InvalidStackSize { stack_size: 0, .. }));
    }

    #[test]
    fn test_row_amount() {
        let item = Item::new("Metal Ingot", 200).unwrap();
        assert_eq!(item.id, "metal_ingot");
        assert_eq!(item.row_amount(6), 1200);
    }

    #[test]
    fn test_row_amount_saturates() {
        let item = Item::new("Big", 1_000_000_000).unwrap();
        assert_eq!(item.row_amount(6), u32::MAX);
    }
}
