//! Simulated Game Inventories
//!
//! A stand-in for the screen: inventories whose counts, open state and
//! transfer notifications are driven by the same key presses the engine sends.
//! Stacks land in the linked destination only after a configurable lag, and
//! the OCR readout can be blind or randomly miss, so the engine's tolerance
//! paths can be exercised without a game running.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::config::Keybinds;
use crate::data::Item;
use crate::inventory::{Inventory, Slot, TransferDirection};
use crate::waiter::Clock;

/// First slot of the inventory grid
const FIRST_SLOT: Slot = Slot { x: 163, y: 278 };

#[derive(Debug, Clone)]
pub struct SimSettings {
    /// Delay between a transfer press and the stack showing up in the destination
    pub transfer_lag: Duration,
    /// Stacks moved by a single press
    pub stacks_per_press: u32,
    /// Number of initial readout samples that come back unreadable
    pub ocr_blind_samples: u32,
    /// Probability that any later sample is unreadable
    pub ocr_miss_rate: f64,
    pub seed: u64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            transfer_lag: Duration::from_millis(250),
            stacks_per_press: 1,
            ocr_blind_samples: 0,
            ocr_miss_rate: 0.0,
            seed: 7,
        }
    }
}

#[derive(Debug)]
struct Stash {
    stacks: HashMap<String, u32>,
    open: bool,
    /// Presses of the inventory key needed to open; `None` never opens
    opens_after: Option<u32>,
    closable: bool,
    key_presses: HashMap<String, u32>,
    searched: Option<String>,
    hovered: Option<Slot>,
    /// Destination for transfer presses
    linked: Option<usize>,
    /// Items removed so far, as shown in the notification
    removed: u32,
    received: bool,
    remote_until: Duration,
}

impl Stash {
    fn new() -> Self {
        Self {
            stacks: HashMap::new(),
            open: false,
            opens_after: Some(1),
            closable: true,
            key_presses: HashMap::new(),
            searched: None,
            hovered: None,
            linked: None,
            removed: 0,
            received: false,
            remote_until: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
struct PendingArrival {
    due: Duration,
    stash: usize,
    item_id: String,
    stacks: u32,
}

#[derive(Debug)]
struct WorldState {
    stashes: Vec<Stash>,
    pending: Vec<PendingArrival>,
    stack_sizes: HashMap<String, u32>,
    ocr_samples: u32,
    settings: SimSettings,
    keybinds: Keybinds,
    rng: StdRng,
}

impl WorldState {
    /// Apply every arrival whose lag has elapsed
    fn settle(&mut self, now: Duration) {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|arrival| arrival.due <= now);
        self.pending = waiting;

        for arrival in due {
            let stash = &mut self.stashes[arrival.stash];
            *stash.stacks.entry(arrival.item_id).or_insert(0) += arrival.stacks;
            stash.received = true;
        }
    }

    fn press(&mut self, index: usize, key: &str, now: Duration) {
        *self.stashes[index]
            .key_presses
            .entry(key.to_string())
            .or_insert(0) += 1;

        if key == self.keybinds.inventory {
            let stash = &mut self.stashes[index];
            let presses = stash.key_presses[key];
            if stash.opens_after.is_some_and(|needed| presses >= needed) {
                stash.open = true;
            }
        } else if key == self.keybinds.close {
            let stash = &mut self.stashes[index];
            if stash.closable {
                stash.open = false;
            }
        } else if key == self.keybinds.transfer {
            self.transfer_hovered(index, now);
        }
    }

    fn transfer_hovered(&mut self, index: usize, now: Duration) {
        let per_press = self.settings.stacks_per_press;
        let stash = &mut self.stashes[index];
        if stash.hovered.is_none() {
            return;
        }
        let Some(item_id) = stash.searched.clone() else {
            return;
        };
        let Some(held) = stash.stacks.get_mut(&item_id) else {
            return;
        };

        let moved = per_press.min(*held);
        if moved == 0 {
            return;
        }
        *held -= moved;
        let stack_size = self.stack_sizes.get(&item_id).copied().unwrap_or(1);
        stash.removed += moved * stack_size;

        if let Some(linked) = stash.linked {
            self.pending.push(PendingArrival {
                due: now + self.settings.transfer_lag,
                stash: linked,
                item_id,
                stacks: moved,
            });
        }
    }

    fn sample_readout(&mut self, index: usize) -> Option<u32> {
        self.ocr_samples += 1;
        if self.ocr_samples <= self.settings.ocr_blind_samples {
            return None;
        }
        let miss_rate = self.settings.ocr_miss_rate.clamp(0.0, 1.0);
        if miss_rate > 0.0 && self.rng.gen_bool(miss_rate) {
            return None;
        }
        let removed = self.stashes[index].removed;
        (removed > 0).then_some(removed)
    }
}

/// Shared simulated game state. Cheap to clone; all handles see the same world.
#[derive(Debug, Clone)]
pub struct SimWorld<C: Clock + Clone> {
    state: Rc<RefCell<WorldState>>,
    clock: C,
}

impl<C: Clock + Clone> SimWorld<C> {
    pub fn new(clock: C, keybinds: Keybinds, settings: SimSettings) -> Self {
        let rng = StdRng::seed_from_u64(settings.seed);
        Self {
            state: Rc::new(RefCell::new(WorldState {
                stashes: Vec::new(),
                pending: Vec::new(),
                stack_sizes: HashMap::new(),
                ocr_samples: 0,
                settings,
                keybinds,
                rng,
            })),
            clock,
        }
    }

    /// Add a closed inventory that opens on the first inventory key press
    pub fn add_inventory(&self, name: &str) -> SimInventory<C> {
        let mut state = self.state.borrow_mut();
        state.stashes.push(Stash::new());
        SimInventory {
            world: self.clone(),
            index: state.stashes.len() - 1,
            name: name.to_string(),
        }
    }

    /// Readout samples taken so far, across all inventories
    pub fn readout_samples(&self) -> u32 {
        self.state.borrow().ocr_samples
    }
}

/// One inventory in a [`SimWorld`].
#[derive(Debug, Clone)]
pub struct SimInventory<C: Clock + Clone> {
    world: SimWorld<C>,
    index: usize,
    name: String,
}

impl<C: Clock + Clone> SimInventory<C> {
    fn with<R>(&self, f: impl FnOnce(&mut WorldState, usize) -> R) -> R {
        let now = self.world.clock.now();
        let mut state = self.world.state.borrow_mut();
        state.settle(now);
        f(&mut state, self.index)
    }

    /// Put `stacks` full stacks of `item` into this inventory
    pub fn stock(&self, item: &Item, stacks: u32) {
        self.with(|state, index| {
            state.stack_sizes.insert(item.id.clone(), item.stack_size);
            *state.stashes[index]
                .stacks
                .entry(item.id.clone())
                .or_insert(0) += stacks;
        });
    }

    /// Stacks of `item` currently held, after applying due arrivals
    pub fn stacks(&self, item: &Item) -> u32 {
        self.with(|state, index| {
            state.stashes[index]
                .stacks
                .get(&item.id)
                .copied()
                .unwrap_or(0)
        })
    }

    /// Route this inventory's transfer presses into `other`
    pub fn link_to(&self, other: &SimInventory<C>) {
        let other_index = other.index;
        self.with(|state, index| state.stashes[index].linked = Some(other_index));
    }

    pub fn set_open(&self, open: bool) {
        self.with(|state, index| state.stashes[index].open = open);
    }

    /// Presses of the inventory key needed before it opens; `None` never opens
    pub fn opens_after(&self, presses: Option<u32>) {
        self.with(|state, index| state.stashes[index].opens_after = presses);
    }

    pub fn set_closable(&self, closable: bool) {
        self.with(|state, index| state.stashes[index].closable = closable);
    }

    /// Show "Receiving Remote Inventory" for `duration` from now
    pub fn receive_remote_for(&self, duration: Duration) {
        let until = self.world.clock.now() + duration;
        self.with(|state, index| state.stashes[index].remote_until = until);
    }

    /// Schedule `stacks` of `item` to arrive after `delay`
    pub fn deliver_after(&self, item: &Item, stacks: u32, delay: Duration) {
        let due = self.world.clock.now() + delay;
        self.with(|state, index| {
            state.stack_sizes.insert(item.id.clone(), item.stack_size);
            state.pending.push(PendingArrival {
                due,
                stash: index,
                item_id: item.id.clone(),
                stacks,
            });
        });
    }

    pub fn presses(&self, key: &str) -> u32 {
        self.with(|state, index| {
            state.stashes[index]
                .key_presses
                .get(key)
                .copied()
                .unwrap_or(0)
        })
    }
}

impl<C: Clock + Clone> Inventory for SimInventory<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.with(|state, index| state.stashes[index].open)
    }

    fn search(&mut self, item: &Item) {
        self.with(|state, index| state.stashes[index].searched = Some(item.id.clone()));
    }

    fn count(&self, item: &Item) -> u32 {
        self.stacks(item)
    }

    fn find(&self, item: &Item) -> Option<Slot> {
        (self.stacks(item) > 0).then_some(FIRST_SLOT)
    }

    fn hover(&mut self, slot: Slot) {
        self.with(|state, index| state.stashes[index].hovered = Some(slot));
    }

    fn press(&mut self, key: &str) {
        let now = self.world.clock.now();
        self.with(|state, index| state.press(index, key, now));
    }

    fn received_item(&self) -> bool {
        self.with(|state, index| state.stashes[index].received)
    }

    fn amount_transferred(&self, _item: &Item, direction: TransferDirection) -> Option<u32> {
        match direction {
            TransferDirection::Removed => self.with(|state, index| state.sample_readout(index)),
            TransferDirection::Added => None,
        }
    }

    fn receiving_remote_inventory(&self) -> bool {
        let now = self.world.clock.now();
        self.with(|state, index| now < state.stashes[index].remote_until)
    }
}
