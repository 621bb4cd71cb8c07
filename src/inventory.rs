//! Inventory collaborator contract.
//!
//! Screen capture, template matching, OCR and input injection all live behind
//! this trait. The engine only ever sees counts, slots and readouts.

use crate::data::Item;

/// Screen position of an inventory slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
}

impl Slot {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which notification the OCR readout is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// "Removed" text shown when items leave this inventory
    Removed,
    /// "Added" text shown when items arrive
    Added,
}

/// An on-screen inventory, observed only by polling.
pub trait Inventory {
    /// Name used in error payloads and logs
    fn name(&self) -> &str;

    fn is_open(&self) -> bool;

    /// Type the item's name into the search bar so slot lookups and counts
    /// only consider matching stacks.
    fn search(&mut self, item: &Item);

    /// Number of visible stacks matching `item`
    fn count(&self, item: &Item) -> u32;

    /// First slot holding `item`, if any
    fn find(&self, item: &Item) -> Option<Slot>;

    /// Move the pointer over a slot
    fn hover(&mut self, slot: Slot);

    fn press(&mut self, key: &str);

    /// Whether the "item received" notification is visible
    fn received_item(&self) -> bool;

    /// OCR the amount shown in the transfer notification. `None` when the text
    /// is missing or unreadable.
    fn amount_transferred(&self, item: &Item, direction: TransferDirection) -> Option<u32>;

    /// Whether the "Receiving Remote Inventory" text is still shown
    fn receiving_remote_inventory(&self) -> bool {
        false
    }
}
