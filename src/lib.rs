/*!
 * Memory Allocation Simulator Library
 * Segmentation and paging over a simulated address space
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use config::{ConfigError, SimulatorConfig};
pub use memory::{
    AddressSpace, Allocation, Cell, Fragmentation, MemoryError, MemoryInfo, MemoryResult,
    MemoryStats, Operation, Outcome, SharedAddressSpace, Strategy,
};
pub use monitoring::init_tracing;
