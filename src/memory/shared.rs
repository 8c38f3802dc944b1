/*!
 * Shared Address Space
 * Mutex-guarded handle for driving one simulator from several callers
 */

use super::simulator::{AddressSpace, Operation, Outcome};
use super::traits::MemoryInfo;
use super::types::{Allocation, Cell, Fragmentation, FreeBlock, MemoryResult, MemoryStats, Strategy};
use crate::core::types::{Pid, Size};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle; every call holds the lock for the whole operation
#[derive(Debug, Clone)]
pub struct SharedAddressSpace {
    inner: Arc<Mutex<AddressSpace>>,
}

impl SharedAddressSpace {
    pub fn new(space: AddressSpace) -> Self {
        Self {
            inner: Arc::new(Mutex::new(space)),
        }
    }

    /// Run `f` with exclusive access, for compound reads or updates
    pub fn with<R>(&self, f: impl FnOnce(&mut AddressSpace) -> R) -> R {
        let mut space = self.inner.lock();
        f(&mut space)
    }

    pub fn allocate_segment(&self, pid: Pid, size: Size) -> MemoryResult<Allocation> {
        self.inner.lock().allocate_segment(pid, size)
    }

    pub fn allocate_pages(&self, pid: Pid, size: Size) -> MemoryResult<Allocation> {
        self.inner.lock().allocate_pages(pid, size)
    }

    pub fn deallocate(&self, pid: Pid) -> MemoryResult<Size> {
        self.inner.lock().deallocate(pid)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn set_strategy(&self, strategy: Strategy) {
        self.inner.lock().set_strategy(strategy);
    }

    pub fn apply(&self, operation: Operation) -> Outcome {
        self.inner.lock().apply(operation)
    }

    pub fn get_memory_state(&self) -> Vec<Cell> {
        self.inner.lock().get_memory_state()
    }

    pub fn get_fragmentation(&self) -> Fragmentation {
        self.inner.lock().get_fragmentation()
    }

    pub fn get_utilization(&self) -> f64 {
        self.inner.lock().get_utilization()
    }

    pub fn free_blocks(&self) -> Vec<FreeBlock> {
        self.inner.lock().free_blocks().to_vec()
    }
}

impl MemoryInfo for SharedAddressSpace {
    fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    fn process_memory(&self, pid: Pid) -> Size {
        self.inner.lock().process_memory(pid)
    }
}

impl From<AddressSpace> for SharedAddressSpace {
    fn from(space: AddressSpace) -> Self {
        Self::new(space)
    }
}
