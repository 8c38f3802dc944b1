/*!
 * Free Block List
 * Address-ordered free ranges with strategy-driven placement
 */

use super::super::types::{Cell, FreeBlock, Strategy};
use crate::core::types::{Address, Size};
use std::cmp::Reverse;

/// Free ranges kept sorted by start address
///
/// Invariant: blocks are disjoint, sorted, and never adjacent to each other.
/// The list always equals the maximal runs of free cells in the cell array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FreeList {
    blocks: Vec<FreeBlock>,
}

impl FreeList {
    /// Single block spanning the whole address space
    pub fn whole(total: Size) -> Self {
        Self {
            blocks: vec![FreeBlock::new(0, total - 1)],
        }
    }

    /// Recompute free runs by a full linear scan of the cell array
    pub fn rebuild(cells: &[Cell]) -> Self {
        let mut blocks = Vec::new();
        let mut run_start: Option<Address> = None;

        for (address, cell) in cells.iter().enumerate() {
            match (cell.is_free(), run_start) {
                (true, None) => run_start = Some(address),
                (false, Some(start)) => {
                    blocks.push(FreeBlock::new(start, address - 1));
                    run_start = None;
                }
                _ => {}
            }
        }

        if let Some(start) = run_start {
            blocks.push(FreeBlock::new(start, cells.len() - 1));
        }

        Self { blocks }
    }

    pub fn blocks(&self) -> &[FreeBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn total_free(&self) -> Size {
        self.blocks.iter().map(FreeBlock::size).sum()
    }

    pub fn largest(&self) -> Size {
        self.blocks.iter().map(FreeBlock::size).max().unwrap_or(0)
    }

    /// Index of the block chosen for `size` under `strategy`
    ///
    /// Ties resolve to the lowest start address for every strategy.
    pub fn find(&self, size: Size, strategy: Strategy) -> Option<usize> {
        let mut candidates = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.size() >= size);

        // min_by_key keeps the first of equal minima
        let chosen = match strategy {
            Strategy::FirstFit => candidates.next(),
            Strategy::BestFit => candidates.min_by_key(|(_, block)| block.size() - size),
            Strategy::WorstFit => candidates.min_by_key(|(_, block)| Reverse(block.size())),
        };

        chosen.map(|(index, _)| index)
    }

    /// Carve `size` cells off the front of block `index`, returning their start
    ///
    /// The remainder stays in place as a free block. Its neighbours were
    /// already non-adjacent, so no merge is needed.
    pub fn split(&mut self, index: usize, size: Size) -> Address {
        let block = self.blocks[index];
        let start = block.start;

        if start + size <= block.end {
            self.blocks[index] = FreeBlock::new(start + size, block.end);
        } else {
            self.blocks.remove(index);
        }

        start
    }
}
