//! Runs a transfer against simulated inventories.
//!
//! Usage: `inventory-transfer <item> <amount> [--no-target]`
//!
//! Loads `config/transfer.toml` and `data/items/*.toml` from the working
//! directory, then moves the items from a simulated player inventory into a
//! simulated storage box in real time.

use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use inventory_transfer::sim::{SimSettings, SimWorld};
use inventory_transfer::{Inventory, ItemRegistry, SystemClock, TransferConfig, TransferEngine};

/// Stacks the simulated player starts with
const PLAYER_STACKS: u32 = 60;

struct Args {
    item: String,
    amount: u32,
    with_target: bool,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut positional = Vec::new();
    let mut with_target = true;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-target" => with_target = false,
            _ => positional.push(arg),
        }
    }

    let [item, amount] = positional.as_slice() else {
        return Err("usage: inventory-transfer <item> <amount> [--no-target]".into());
    };

    Ok(Args {
        item: item.clone(),
        amount: amount.parse()?,
        with_target,
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let config = TransferConfig::load(Path::new("config/transfer.toml"))?;

    let mut registry = ItemRegistry::new();
    registry.load_from_directory(Path::new("data"))?;
    let item = registry
        .resolve(&args.item)
        .ok_or_else(|| format!("Unknown item '{}'", args.item))?
        .clone();

    let clock = SystemClock::new();
    let world = SimWorld::new(
        clock,
        config.keybinds.clone(),
        SimSettings {
            transfer_lag: Duration::from_millis(150),
            ocr_miss_rate: 0.2,
            ..SimSettings::default()
        },
    );
    let mut player = world.add_inventory("Player");
    let mut storage = world.add_inventory("Storage Box");
    player.link_to(&storage);
    player.stock(&item, PLAYER_STACKS);
    storage.receive_remote_for(Duration::from_millis(400));

    let engine = TransferEngine::new(config, clock);
    engine.open(&mut player)?;
    engine.open(&mut storage)?;
    engine.await_remote_inventory(&storage)?;

    let target: Option<&mut dyn Inventory> = if args.with_target {
        Some(&mut storage)
    } else {
        None
    };
    let outcome = engine.transfer(&mut player, &item, args.amount, target)?;

    info!(
        item = %item.name,
        strategy = outcome.strategy.as_str(),
        delivery = ?outcome.delivery,
        transferred = ?outcome.transferred,
        iterations = outcome.iterations,
        "Transfer finished"
    );
    info!(
        "Player holds {} stacks, storage holds {} stacks",
        player.stacks(&item),
        storage.stacks(&item)
    );

    engine.close(&mut storage)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("inventory_transfer=info")),
        )
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
