/*!
 * Allocation Implementation
 * Segment placement, page selection and deallocation
 */

use super::super::types::{
    Allocation, Cell, MemoryError, MemoryPressure, MemoryResult, Page, Segment,
};
use super::history::HistoryEvent;
use super::AddressSpace;
use crate::core::types::{Address, Pid, Size};
use tracing::{info, warn};

impl AddressSpace {
    /// Allocate one contiguous segment of `size` cells using the active strategy
    pub fn allocate_segment(&mut self, pid: Pid, size: Size) -> MemoryResult<Allocation> {
        self.check_request(pid, size)?;

        let Some(index) = self.free_list.find(size, self.strategy) else {
            let largest_free = self.free_list.largest();
            warn!(
                pid,
                size,
                largest_free,
                strategy = %self.strategy,
                "Segment allocation failed: no suitable block"
            );
            return Err(MemoryError::NoSuitableBlock {
                requested: size,
                largest_free,
                strategy: self.strategy,
            });
        };

        let start = self.free_list.split(index, size);
        self.cells[start..start + size].fill(Cell::Owned(pid));

        let allocation = Allocation::Segment(Segment { start, size });
        self.processes.insert(pid, allocation.clone());
        self.history
            .record(HistoryEvent::segment_allocated(pid, start, size));

        info!(pid, start, size, strategy = %self.strategy, "Allocated segment");
        self.check_pressure();

        Ok(allocation)
    }

    /// Allocate `ceil(size / page_size)` pages, taking the first free pages in address order
    pub fn allocate_pages(&mut self, pid: Pid, size: Size) -> MemoryResult<Allocation> {
        self.check_request(pid, size)?;

        let needed = size.div_ceil(self.page_size);
        let pages: Vec<Page> = self.free_pages().take(needed).collect();

        if pages.len() < needed {
            let available = pages.len();
            warn!(
                pid,
                size, needed, available, "Page allocation failed: not enough free pages"
            );
            return Err(MemoryError::InsufficientPages { needed, available });
        }

        for page in &pages {
            self.cells[page.range()].fill(Cell::Owned(pid));
        }
        self.rebuild_free_list();

        let allocation = Allocation::Paged {
            pages: pages.clone(),
            requested: size,
        };
        self.processes.insert(pid, allocation.clone());
        self.history
            .record(HistoryEvent::pages_allocated(pid, pages));

        info!(
            pid,
            size,
            pages = needed,
            internal_fragmentation = allocation.internal_fragmentation(),
            "Allocated pages"
        );
        self.check_pressure();

        Ok(allocation)
    }

    /// Release every cell owned by `pid`, returning how many were freed
    pub fn deallocate(&mut self, pid: Pid) -> MemoryResult<Size> {
        let Some(allocation) = self.processes.remove(&pid) else {
            warn!(pid, "Attempted to deallocate unknown process");
            return Err(MemoryError::ProcessNotFound(pid));
        };

        for range in allocation.ranges() {
            self.cells[range].fill(Cell::Free);
        }
        self.rebuild_free_list();
        self.history.record(HistoryEvent::deallocated(pid));

        let freed = allocation.cells();
        info!(
            pid,
            freed,
            paged = allocation.is_paged(),
            free_blocks = self.free_list.len(),
            "Deallocated process"
        );

        Ok(freed)
    }

    /// Free pages in scan order; the final page is clipped to the address space
    pub(super) fn free_pages(&self) -> impl Iterator<Item = Page> + '_ {
        self.page_starts().filter_map(move |start| {
            let page = self.page_at(start);
            self.cells[page.range()]
                .iter()
                .all(Cell::is_free)
                .then_some(page)
        })
    }

    pub(super) fn page_starts(&self) -> impl Iterator<Item = Address> {
        (0..self.total_memory).step_by(self.page_size)
    }

    pub(super) fn page_at(&self, start: Address) -> Page {
        let end = (start + self.page_size).min(self.total_memory);
        Page {
            start,
            size: end - start,
        }
    }

    fn check_request(&self, pid: Pid, size: Size) -> MemoryResult<()> {
        if pid == 0 {
            warn!(pid, "Rejected allocation with reserved process id");
            return Err(MemoryError::InvalidProcessId(pid));
        }
        if self.processes.contains_key(&pid) {
            warn!(pid, "Rejected allocation for existing process");
            return Err(MemoryError::DuplicateProcess(pid));
        }
        if size == 0 {
            warn!(pid, "Rejected zero-sized allocation");
            return Err(MemoryError::InvalidSize(size));
        }
        Ok(())
    }

    fn check_pressure(&self) {
        let pressure = self.pressure_level();
        if pressure >= MemoryPressure::High {
            warn!(
                %pressure,
                utilization = self.get_utilization(),
                free_cells = self.free_list.total_free(),
                "Memory pressure"
            );
        }
    }
}
