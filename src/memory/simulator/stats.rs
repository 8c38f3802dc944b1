/*!
 * Address Space Statistics
 * Fragmentation, utilization, pressure and renderer views
 */

use super::super::traits::MemoryInfo;
use super::super::types::{Cell, Fragmentation, MemoryPressure, MemoryStats};
use super::AddressSpace;
use crate::core::types::{Pid, Size};

impl AddressSpace {
    /// External fragmentation in percent and internal fragmentation in cells
    ///
    /// External is `0` when nothing is free or a single block holds all free memory.
    pub fn get_fragmentation(&self) -> Fragmentation {
        let total_free = self.free_list.total_free();
        let external_percent = if total_free == 0 {
            0.0
        } else {
            (1.0 - self.free_list.largest() as f64 / total_free as f64) * 100.0
        };

        let internal_units = self
            .processes
            .values()
            .map(|allocation| allocation.internal_fragmentation())
            .sum();

        Fragmentation {
            external_percent,
            internal_units,
        }
    }

    /// Owned cells as a percentage of the address space
    pub fn get_utilization(&self) -> f64 {
        self.used_cells() as f64 / self.total_memory as f64 * 100.0
    }

    pub fn used_cells(&self) -> Size {
        self.cells.iter().filter(|cell| !cell.is_free()).count()
    }

    pub(super) fn pressure_level(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.used_cells() as f64 / self.total_memory as f64)
    }

    /// Owner of each page, `None` when any cell is free or owners are mixed
    pub fn page_table(&self) -> Vec<Option<Pid>> {
        self.page_starts()
            .map(|start| {
                let page = self.page_at(start);
                let cells = &self.cells[page.range()];
                let owner = cells[0].owner()?;
                cells
                    .iter()
                    .all(|cell| *cell == Cell::Owned(owner))
                    .then_some(owner)
            })
            .collect()
    }

    /// Text memory map with `width` cells per row
    ///
    /// Free cells print as `.`; owned cells print the pid in base 36
    /// (wrapping for pids of 36 and above).
    pub fn render_map(&self, width: usize) -> String {
        let width = width.max(1);
        self.cells
            .chunks(width)
            .map(|row| row.iter().map(|cell| glyph(*cell)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Free => '.',
        Cell::Owned(pid) => std::char::from_digit(pid % 36, 36)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('#'),
    }
}

impl MemoryInfo for AddressSpace {
    fn stats(&self) -> MemoryStats {
        let fragmentation = self.get_fragmentation();
        let used_memory = self.used_cells();

        MemoryStats {
            total_memory: self.total_memory,
            used_memory,
            free_memory: self.free_list.total_free(),
            largest_free_block: self.free_list.largest(),
            free_block_count: self.free_list.len(),
            process_count: self.processes.len(),
            utilization_percent: used_memory as f64 / self.total_memory as f64 * 100.0,
            external_fragmentation_percent: fragmentation.external_percent,
            internal_fragmentation_units: fragmentation.internal_units,
        }
    }

    fn process_memory(&self, pid: Pid) -> Size {
        self.processes
            .get(&pid)
            .map_or(0, |allocation| allocation.cells())
    }

    fn pressure(&self) -> MemoryPressure {
        self.pressure_level()
    }
}
