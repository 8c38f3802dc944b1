/*!
 * Memory Types
 * Common types for the address-space simulator
 */

use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is a recoverable outcome: a failed operation leaves the
/// address space untouched and appends nothing to the history log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Process already exists: PID {0}")]
    DuplicateProcess(Pid),

    #[error("No suitable block found: requested {requested} units, largest free block {largest_free} units ({strategy})")]
    NoSuitableBlock {
        requested: Size,
        largest_free: Size,
        strategy: Strategy,
    },

    #[error("Not enough free pages: need {needed}, {available} free")]
    InsufficientPages { needed: usize, available: usize },

    #[error("Process not found: PID {0}")]
    ProcessNotFound(Pid),

    #[error("Invalid allocation size: {0}")]
    InvalidSize(Size),

    #[error("Invalid process id: {0} (process ids must be positive)")]
    InvalidProcessId(Pid),

    #[error("Invalid address space configuration: total_memory={total_memory}, page_size={page_size}")]
    InvalidConfig { total_memory: Size, page_size: Size },
}

/// A single address unit of the simulated memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Free,
    Owned(Pid),
}

impl Cell {
    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }

    #[inline]
    pub fn owner(&self) -> Option<Pid> {
        match self {
            Cell::Free => None,
            Cell::Owned(pid) => Some(*pid),
        }
    }

    /// Numeric form used by renderers: `0` for free, the owning pid otherwise
    #[inline]
    pub fn raw(&self) -> Pid {
        self.owner().unwrap_or(0)
    }
}

/// Placement strategy for segment allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    FirstFit,
    BestFit,
    WorstFit,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::FirstFit, Strategy::BestFit, Strategy::WorstFit];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FirstFit => write!(f, "first-fit"),
            Strategy::BestFit => write!(f, "best-fit"),
            Strategy::WorstFit => write!(f, "worst-fit"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first-fit" | "first" => Ok(Strategy::FirstFit),
            "best-fit" | "best" => Ok(Strategy::BestFit),
            "worst-fit" | "worst" => Ok(Strategy::WorstFit),
            other => Err(format!("unknown allocation strategy: {other}")),
        }
    }
}

/// Contiguous range owned by a segmented process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Address,
    pub size: Size,
}

/// One page owned by a paged process
///
/// `size` is the page size, clipped for a short final page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub start: Address,
    pub size: Size,
}

impl Page {
    #[inline]
    pub fn range(&self) -> Range<Address> {
        self.start..self.start + self.size
    }
}

/// Allocation record held in the process table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Allocation {
    Segment(Segment),
    Paged {
        /// Pages in the order they were selected
        pages: Vec<Page>,
        /// Size the caller asked for
        requested: Size,
    },
}

impl Allocation {
    /// Cell ranges covered by this record
    pub fn ranges(&self) -> Vec<Range<Address>> {
        match self {
            Allocation::Segment(segment) => vec![segment.start..segment.start + segment.size],
            Allocation::Paged { pages, .. } => pages.iter().map(Page::range).collect(),
        }
    }

    /// Number of cells owned by this record
    pub fn cells(&self) -> Size {
        match self {
            Allocation::Segment(segment) => segment.size,
            Allocation::Paged { pages, .. } => pages.iter().map(|p| p.size).sum(),
        }
    }

    /// Unused tail space inside allocated pages; segments are always exact
    pub fn internal_fragmentation(&self) -> Size {
        match self {
            Allocation::Segment(_) => 0,
            Allocation::Paged { requested, .. } => self.cells().saturating_sub(*requested),
        }
    }

    pub fn is_paged(&self) -> bool {
        matches!(self, Allocation::Paged { .. })
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allocation::Segment(segment) => {
                write!(f, "Allocated {} units at {}", segment.size, segment.start)
            }
            Allocation::Paged { pages, .. } => write!(f, "Allocated {} pages", pages.len()),
        }
    }
}

/// Inclusive range of contiguous free cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeBlock {
    pub start: Address,
    pub end: Address,
}

impl FreeBlock {
    #[inline]
    pub fn new(start: Address, end: Address) -> Self {
        Self { start, end }
    }

    /// Number of cells in the block, ends inclusive
    #[inline]
    pub fn size(&self) -> Size {
        self.end - self.start + 1
    }
}

/// Fragmentation snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fragmentation {
    /// Share of free memory outside the largest free block, in percent
    pub external_percent: f64,
    /// Wasted tail cells inside allocated pages
    pub internal_units: Size,
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub free_memory: Size,
    pub largest_free_block: Size,
    pub free_block_count: usize,
    pub process_count: usize,
    pub utilization_percent: f64,
    pub external_fragmentation_percent: f64,
    pub internal_fragmentation_units: Size,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.utilization_percent / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        use crate::core::limits::{
            PRESSURE_CRITICAL_THRESHOLD, PRESSURE_HIGH_THRESHOLD, PRESSURE_MEDIUM_THRESHOLD,
        };

        if ratio >= PRESSURE_CRITICAL_THRESHOLD {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH_THRESHOLD {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
