/*!
 * Allocation History
 * Append-only log of allocate, deallocate and reset events
 */

use super::super::types::Page;
use crate::core::types::{Address, Pid, Size};
use serde::{Deserialize, Serialize};

/// Structured payload of a history event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventDetail {
    SegmentAllocated {
        pid: Pid,
        start: Address,
        size: Size,
    },
    PagesAllocated {
        pid: Pid,
        pages: Vec<Page>,
    },
    Deallocated {
        pid: Pid,
    },
    Reset,
}

/// One entry of the history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub description: String,
    pub detail: EventDetail,
}

impl HistoryEvent {
    pub fn segment_allocated(pid: Pid, start: Address, size: Size) -> Self {
        Self {
            description: format!("Allocated segment for {}", pid),
            detail: EventDetail::SegmentAllocated { pid, start, size },
        }
    }

    pub fn pages_allocated(pid: Pid, pages: Vec<Page>) -> Self {
        Self {
            description: format!("Allocated pages for {}", pid),
            detail: EventDetail::PagesAllocated { pid, pages },
        }
    }

    pub fn deallocated(pid: Pid) -> Self {
        Self {
            description: format!("Deallocated {}", pid),
            detail: EventDetail::Deallocated { pid },
        }
    }

    pub fn reset() -> Self {
        Self {
            description: "System Reset".to_string(),
            detail: EventDetail::Reset,
        }
    }
}

/// Unbounded event log; display truncation is left to the caller
#[derive(Debug, Clone, Default)]
pub struct History {
    events: Vec<HistoryEvent>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, event: HistoryEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[HistoryEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&HistoryEvent> {
        self.events.last()
    }

    /// Last `n` events, oldest first
    pub fn recent(&self, n: usize) -> &[HistoryEvent] {
        let from = self.events.len().saturating_sub(n);
        &self.events[from..]
    }
}
