use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::item_def::{Item, RawItemDefinition};
use crate::errors::LoadError;

/// Registry for all item definitions
pub struct ItemRegistry {
    items: HashMap<String, Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Load all item definitions from `<data_dir>/items/*.toml`
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), LoadError> {
        let items_dir = data_dir.join("items");

        if !items_dir.exists() {
            warn!("Items directory does not exist: {:?}", items_dir);
            return Ok(());
        }

        let entries = std::fs::read_dir(&items_dir).map_err(|source| LoadError::Io {
            path: items_dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: items_dir.clone(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "toml") {
                let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;

                // Parse as table of items
                let table: HashMap<String, RawItemDefinition> = toml::from_str(&content)
                    .map_err(|source| LoadError::Parse {
                        path: path.clone(),
                        source,
                    })?;

                for (id, raw) in table {
                    if id.trim().is_empty() {
                        return Err(LoadError::EmptyName { path });
                    }
                    if self.items.contains_key(&id) {
                        warn!("Duplicate item ID '{}' in {:?}, overwriting", id, path);
                    }
                    let item = Item::from_raw(&id, &raw)?;
                    self.items.insert(id, item);
                }
            }
        }

        info!("Loaded {} item definitions", self.items.len());

        Ok(())
    }

    /// Get an item definition by ID
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Look up an item by its in-game name, ignoring case
    pub fn by_name(&self, name: &str) -> Option<&Item> {
        self.items
            .values()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Resolve either an ID or an in-game name
    pub fn resolve(&self, key: &str) -> Option<&Item> {
        self.get(key).or_else(|| self.by_name(key))
    }

    /// Get the number of loaded items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}
