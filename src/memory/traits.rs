/*!
 * Memory Traits
 * Read-only views consumed by renderers
 */

use super::types::*;
use crate::core::types::{Pid, Size};

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size) {
        let stats = self.stats();
        (stats.total_memory, stats.used_memory, stats.free_memory)
    }

    /// Get the number of cells owned by a specific process
    fn process_memory(&self, pid: Pid) -> Size;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
