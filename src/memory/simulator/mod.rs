/*!
 * Address Space Simulator
 *
 * In-memory model of a flat address space supporting two allocation schemes:
 *
 * - **Segmentation**: one contiguous range per process, placed by the active
 *   strategy (first-fit, best-fit or worst-fit) over an address-ordered free list.
 * - **Paging**: fixed-size pages taken in address order, not necessarily
 *   contiguous. The final page of the address space may be short.
 *
 * ## Bookkeeping
 *
 * - **Cell array**: one [`Cell`] per address unit, free or owned by a pid
 * - **Free list**: maximal runs of free cells, rebuilt by a linear scan after
 *   deallocation and page allocation
 * - **Process table**: pid to [`Allocation`] record
 * - **History**: append-only event log, never consulted by allocation logic
 *
 * The simulator is a plain single-threaded value. Use
 * [`SharedAddressSpace`](super::SharedAddressSpace) when several callers
 * need to drive the same address space.
 */

mod allocator;
mod free_list;
mod history;
mod operations;
mod stats;

pub use history::{EventDetail, History, HistoryEvent};
pub use operations::{Operation, Outcome};

use super::types::{Allocation, Cell, FreeBlock, MemoryError, MemoryResult, Strategy};
use crate::config::SimulatorConfig;
use crate::core::types::{Pid, Size};
use ahash::RandomState;
use free_list::FreeList;
use std::collections::HashMap;
use tracing::{debug, info};

/// Simulated address space
#[derive(Debug, Clone)]
pub struct AddressSpace {
    total_memory: Size,
    page_size: Size,
    cells: Vec<Cell>,
    free_list: FreeList,
    processes: HashMap<Pid, Allocation, RandomState>,
    strategy: Strategy,
    history: History,
}

impl AddressSpace {
    /// Create an all-free address space of `total_memory` units
    pub fn new(total_memory: Size, page_size: Size) -> MemoryResult<Self> {
        if total_memory == 0 || page_size == 0 {
            return Err(MemoryError::InvalidConfig {
                total_memory,
                page_size,
            });
        }

        info!(
            total_memory,
            page_size, "Address space initialized with a single free block"
        );

        Ok(Self {
            total_memory,
            page_size,
            cells: vec![Cell::Free; total_memory],
            free_list: FreeList::whole(total_memory),
            processes: HashMap::with_hasher(RandomState::new()),
            strategy: Strategy::default(),
            history: History::new(),
        })
    }

    /// Create an address space from configuration, including its initial strategy
    pub fn from_config(config: &SimulatorConfig) -> MemoryResult<Self> {
        let mut space = Self::new(config.total_memory, config.page_size)?;
        space.strategy = config.strategy;
        Ok(space)
    }

    /// Free every cell and forget all processes
    ///
    /// Strategy and history survive a reset.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Free);
        self.free_list = FreeList::whole(self.total_memory);
        self.processes.clear();
        self.history.record(HistoryEvent::reset());
        info!(total_memory = self.total_memory, "Address space reset");
    }

    /// Select the placement strategy for subsequent segment allocations
    pub fn set_strategy(&mut self, strategy: Strategy) {
        if strategy != self.strategy {
            info!(from = %self.strategy, to = %strategy, "Allocation strategy changed");
        }
        self.strategy = strategy;
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn total_memory(&self) -> Size {
        self.total_memory
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Number of pages, counting a short final page
    pub fn page_count(&self) -> usize {
        self.total_memory.div_ceil(self.page_size)
    }

    /// Owned copy of the cell array
    pub fn get_memory_state(&self) -> Vec<Cell> {
        self.cells.clone()
    }

    /// Free ranges in ascending start order
    pub fn free_blocks(&self) -> &[FreeBlock] {
        self.free_list.blocks()
    }

    pub fn allocation(&self, pid: Pid) -> Option<&Allocation> {
        self.processes.get(&pid)
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.processes.contains_key(&pid)
    }

    /// Process table entries sorted by pid
    pub fn processes(&self) -> Vec<(Pid, &Allocation)> {
        let mut entries: Vec<_> = self
            .processes
            .iter()
            .map(|(pid, allocation)| (*pid, allocation))
            .collect();
        entries.sort_unstable_by_key(|(pid, _)| *pid);
        entries
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn rebuild_free_list(&mut self) {
        self.free_list = FreeList::rebuild(&self.cells);
        debug!(
            free_blocks = self.free_list.len(),
            free_cells = self.free_list.total_free(),
            "Rebuilt free list"
        );
    }
}
