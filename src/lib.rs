//! Item transfer engine for a survival game's inventory UI.
//!
//! The game exposes no API, so every transfer is driven through injected input
//! and verified by polling what the screen shows: stack counts in the destination
//! or the OCR'd "removed" readout. All waiting is bounded.

pub mod config;
pub mod data;
pub mod errors;
pub mod inventory;
pub mod sim;
pub mod transfer;
pub mod waiter;

pub use config::TransferConfig;
pub use data::{Item, ItemRegistry};
pub use errors::{BotError, ErrorCategory, LoadError};
pub use inventory::{Inventory, Slot, TransferDirection};
pub use transfer::{Delivery, Strategy, TransferEngine, TransferOutcome, TransferPlan};
pub use waiter::{Clock, EventWaiter, ManualClock, SystemClock};
