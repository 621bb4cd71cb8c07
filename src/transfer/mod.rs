//! Item Transfer Engine
//!
//! Moves a requested quantity of an item out of a source inventory. Two
//! verification strategies exist: counting destination stacks (exact) and
//! reading the "removed" notification row by row (coarse, but works with any
//! destination). Which one runs is decided from the normalized plan and what
//! the destination already holds.

pub mod cycle;
pub mod outcome;
pub mod plan;
mod rows;
mod stacks;
pub mod strategy;

pub use cycle::{CompletionWindow, CyclePhase, TransferCycle};
pub use outcome::{Delivery, TransferOutcome};
pub use plan::TransferPlan;
pub use strategy::{Strategy, needs_destination_probe, select_strategy};

use tracing::{debug, info};

use crate::config::TransferConfig;
use crate::data::Item;
use crate::errors::BotError;
use crate::inventory::Inventory;
use crate::waiter::{Clock, EventWaiter};

pub struct TransferEngine<C: Clock> {
    config: TransferConfig,
    waiter: EventWaiter<C>,
}

impl<C: Clock> TransferEngine<C> {
    pub fn new(config: TransferConfig, clock: C) -> Self {
        let waiter = EventWaiter::new(clock, config.timing.poll_interval());
        Self { config, waiter }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    pub fn waiter(&self) -> &EventWaiter<C> {
        &self.waiter
    }

    pub fn plan(&self, item: &Item, amount: u32) -> TransferPlan {
        TransferPlan::new(amount, item.stack_size, self.config.layout.slots_per_row)
    }

    // ========================================================================
    // Inventory access
    // ========================================================================

    /// Press the inventory keybind until the inventory reports open.
    ///
    /// Each press gets `open_timeout` to take effect; after `open_attempts`
    /// failed presses `InventoryNotAccessible` is raised.
    pub fn open(&self, inventory: &mut dyn Inventory) -> Result<(), BotError> {
        let timing = &self.config.timing;
        let mut attempts = 0;

        while !inventory.is_open() {
            inventory.press(&self.config.keybinds.inventory);
            if self
                .waiter
                .await_event(|| inventory.is_open(), timing.open_timeout())
            {
                debug!(inventory = inventory.name(), attempts = attempts + 1, "inventory opened");
                return Ok(());
            }

            attempts += 1;
            if attempts >= timing.open_attempts {
                return Err(BotError::InventoryNotAccessible {
                    inventory: inventory.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Mirror of [`open`](Self::open) using the close keybind.
    pub fn close(&self, inventory: &mut dyn Inventory) -> Result<(), BotError> {
        let timing = &self.config.timing;
        let mut attempts = 0;

        while inventory.is_open() {
            inventory.press(&self.config.keybinds.close);
            if self
                .waiter
                .await_event(|| !inventory.is_open(), timing.close_timeout())
            {
                return Ok(());
            }

            attempts += 1;
            if attempts >= timing.open_attempts {
                return Err(BotError::InventoryNotClosable {
                    inventory: inventory.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Wait for the "item received" notification.
    pub fn await_items_added(&self, inventory: &dyn Inventory, item: &Item) -> Result<(), BotError> {
        if self.waiter.await_event(
            || inventory.received_item(),
            self.config.timing.items_added_timeout(),
        ) {
            Ok(())
        } else {
            Err(BotError::NoItemsAdded {
                item: item.name.clone(),
            })
        }
    }

    /// Wait for "Receiving Remote Inventory" to disappear after opening a
    /// structure's inventory.
    pub fn await_remote_inventory(&self, inventory: &dyn Inventory) -> Result<(), BotError> {
        if self.waiter.await_event(
            || !inventory.receiving_remote_inventory(),
            self.config.timing.remote_inventory_timeout(),
        ) {
            Ok(())
        } else {
            Err(BotError::ReceivingRemoteInventoryTimeout {
                inventory: inventory.name().to_string(),
            })
        }
    }

    // ========================================================================
    // Transfer
    // ========================================================================

    /// Transfer `amount` of `item` out of `source`, into `target` if given.
    ///
    /// The amount is rounded up to whole stacks. Running out of source stock or
    /// of iterations is not an error; the returned outcome reports what was
    /// measured. Errors only come from closed inventories and from a
    /// destination whose stack count never changes after a press.
    pub fn transfer(
        &self,
        source: &mut dyn Inventory,
        item: &Item,
        amount: u32,
        mut target: Option<&mut dyn Inventory>,
    ) -> Result<TransferOutcome, BotError> {
        let plan = self.plan(item, amount);
        if plan.is_empty() {
            debug!(item = %item.name, "nothing to transfer");
            return Ok(TransferOutcome::noop(plan));
        }

        ensure_open(source, "search")?;
        source.search(item);

        let layout = &self.config.layout;
        // Search the item in the target so its count only covers matching stacks
        let destination_count = match target.as_deref_mut() {
            Some(target) if needs_destination_probe(&plan, layout) => {
                ensure_open(target, "search")?;
                target.search(item);
                Some(target.count(item))
            }
            _ => None,
        };

        let strategy = select_strategy(&plan, destination_count, layout);
        info!(
            item = %item.name,
            amount = plan.rounded_amount,
            stacks = plan.stacks,
            rows = plan.rows,
            existing = ?destination_count,
            strategy = strategy.as_str(),
            "starting transfer"
        );

        let cycle = match (strategy, target) {
            (Strategy::Stacks, Some(target)) => {
                self.transfer_by_stacks(source, item, plan.stacks, target)?
            }
            _ => self.transfer_by_rows(source, item, plan.rows)?,
        };

        let outcome = TransferOutcome::from_cycle(plan, strategy, &cycle);
        debug!(delivery = ?outcome.delivery, transferred = ?outcome.transferred, "transfer done");
        Ok(outcome)
    }
}

fn ensure_open(inventory: &dyn Inventory, action: &str) -> Result<(), BotError> {
    if inventory.is_open() {
        Ok(())
    } else {
        Err(BotError::InventoryNotOpen {
            action: action.to_string(),
        })
    }
}
