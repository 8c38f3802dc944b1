/*!
 * Memory Simulator - Driver
 *
 * Replays a JSON script of operations against a fresh address space, or runs a
 * built-in walkthrough when no script is given:
 *
 *   memsim [script.json]
 *
 * Configuration comes from MEMSIM_TOTAL_MEMORY, MEMSIM_PAGE_SIZE and
 * MEMSIM_STRATEGY.
 */

use anyhow::{Context, Result};
use memsim::core::limits::{DEFAULT_HISTORY_DISPLAY, DEFAULT_MAP_WIDTH};
use memsim::{init_tracing, AddressSpace, MemoryInfo, Operation, SimulatorConfig, Strategy};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let config = SimulatorConfig::from_env().context("Failed to load simulator configuration")?;
    info!(
        total_memory = config.total_memory,
        page_size = config.page_size,
        strategy = %config.strategy,
        "Memory simulator starting"
    );

    let operations = match std::env::args().nth(1) {
        Some(path) => {
            let script = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read operation script {}", path))?;
            serde_json::from_str::<Vec<Operation>>(&script)
                .with_context(|| format!("Failed to parse operation script {}", path))?
        }
        None => walkthrough(),
    };

    let mut space = AddressSpace::from_config(&config)?;

    for operation in operations {
        let name = operation.name();
        let outcome = space.apply(operation);
        println!("{:<17} {}", name, outcome);
    }

    println!("\nMemory map ({} units/row):", DEFAULT_MAP_WIDTH);
    println!("{}", space.render_map(DEFAULT_MAP_WIDTH));

    println!("\nRecent history:");
    for event in space.history().recent(DEFAULT_HISTORY_DISPLAY) {
        println!("  {}", event.description);
    }

    let stats = space.stats();
    println!("\nPressure: {}", stats.memory_pressure());
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Segments under each strategy, a paged process, then a hole-punching free
fn walkthrough() -> Vec<Operation> {
    vec![
        Operation::AllocateSegment { pid: 1, size: 300 },
        Operation::AllocateSegment { pid: 2, size: 120 },
        Operation::AllocateSegment { pid: 3, size: 500 },
        Operation::AllocateSegment { pid: 4, size: 80 },
        Operation::Deallocate { pid: 2 },
        Operation::SetStrategy {
            strategy: Strategy::BestFit,
        },
        Operation::AllocateSegment { pid: 5, size: 100 },
        Operation::SetStrategy {
            strategy: Strategy::WorstFit,
        },
        Operation::AllocateSegment { pid: 6, size: 100 },
        Operation::AllocatePages { pid: 7, size: 150 },
        Operation::AllocateSegment { pid: 6, size: 10 },
        Operation::Deallocate { pid: 42 },
    ]
}
