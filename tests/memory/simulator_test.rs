/*!
 * Address Space Tests
 * Segment allocation, deallocation, reset and accounting on a 256-unit space
 */

use memsim::memory::{
    AddressSpace, Allocation, Cell, EventDetail, FreeBlock, MemoryError, MemoryInfo, MemoryPressure,
    Segment, Strategy,
};
use pretty_assertions::assert_eq;

fn space() -> AddressSpace {
    AddressSpace::new(256, 32).unwrap()
}

#[test]
fn test_initialization() {
    let space = space();

    assert_eq!(space.total_memory(), 256);
    assert_eq!(space.page_size(), 32);
    assert!(space.get_memory_state().iter().all(Cell::is_free));
    assert_eq!(space.free_blocks(), &[FreeBlock::new(0, 255)]);
    assert_eq!(space.strategy(), Strategy::FirstFit);
    assert!(space.history().is_empty());
}

#[test]
fn test_invalid_configuration_rejected() {
    assert!(matches!(
        AddressSpace::new(0, 32),
        Err(MemoryError::InvalidConfig { total_memory: 0, .. })
    ));
    assert!(matches!(
        AddressSpace::new(256, 0),
        Err(MemoryError::InvalidConfig { page_size: 0, .. })
    ));
}

#[test]
fn test_allocate_segment_first_fit() {
    let mut space = space();

    let allocation = space.allocate_segment(1, 64).unwrap();

    assert_eq!(allocation, Allocation::Segment(Segment { start: 0, size: 64 }));
    assert_eq!(space.allocation(1), Some(&allocation));
    assert_eq!(space.free_blocks(), &[FreeBlock::new(64, 255)]);

    let state = space.get_memory_state();
    assert!(state[..64].iter().all(|c| *c == Cell::Owned(1)));
    assert!(state[64..].iter().all(Cell::is_free));
    assert_eq!(
        space.history().last().map(|e| &e.detail),
        Some(&EventDetail::SegmentAllocated {
            pid: 1,
            start: 0,
            size: 64
        })
    );
}

#[test]
fn test_allocate_segment_best_fit_single_block() {
    let mut space = space();
    space.set_strategy(Strategy::BestFit);

    space.allocate_segment(1, 64).unwrap();
    space.allocate_segment(2, 32).unwrap();

    assert_eq!(
        space.allocation(2),
        Some(&Allocation::Segment(Segment { start: 64, size: 32 }))
    );
    assert!(space.get_memory_state()[64..96]
        .iter()
        .all(|c| *c == Cell::Owned(2)));
}

#[test]
fn test_allocate_segment_worst_fit_single_block() {
    let mut space = space();
    space.set_strategy(Strategy::WorstFit);

    space.allocate_segment(1, 64).unwrap();
    space.allocate_segment(2, 32).unwrap();

    assert_eq!(
        space.allocation(2),
        Some(&Allocation::Segment(Segment { start: 64, size: 32 }))
    );
}

#[test]
fn test_duplicate_process_leaves_state_unchanged() {
    let mut space = space();
    space.allocate_segment(1, 64).unwrap();
    let before = space.get_memory_state();
    let history_len = space.history().len();

    let result = space.allocate_segment(1, 32);
    assert_eq!(result, Err(MemoryError::DuplicateProcess(1)));
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Process already exists"));

    // paged requests collide with segmented owners too
    assert_eq!(
        space.allocate_pages(1, 10),
        Err(MemoryError::DuplicateProcess(1))
    );

    assert_eq!(space.get_memory_state(), before);
    assert_eq!(space.free_blocks(), &[FreeBlock::new(64, 255)]);
    assert_eq!(space.history().len(), history_len);
}

#[test]
fn test_oversized_segment_fails() {
    let mut space = space();

    let result = space.allocate_segment(1, 300);
    match result {
        Err(MemoryError::NoSuitableBlock {
            requested,
            largest_free,
            strategy,
        }) => {
            assert_eq!(requested, 300);
            assert_eq!(largest_free, 256);
            assert_eq!(strategy, Strategy::FirstFit);
        }
        other => panic!("Expected NoSuitableBlock, got {:?}", other),
    }

    assert_eq!(space.free_blocks(), &[FreeBlock::new(0, 255)]);
    assert_eq!(space.process_count(), 0);
    assert!(space.history().is_empty());
}

#[test]
fn test_deallocate_segment_merges_free_space() {
    let mut space = space();
    space.allocate_segment(1, 64).unwrap();

    let freed = space.deallocate(1).unwrap();

    assert_eq!(freed, 64);
    assert!(!space.contains(1));
    assert!(space.get_memory_state().iter().all(Cell::is_free));
    assert_eq!(space.free_blocks(), &[FreeBlock::new(0, 255)]);
}

#[test]
fn test_deallocate_middle_segment_coalesces_neighbours() {
    let mut space = space();
    space.allocate_segment(1, 50).unwrap();
    space.allocate_segment(2, 50).unwrap();
    space.allocate_segment(3, 50).unwrap();

    space.deallocate(1).unwrap();
    space.deallocate(3).unwrap();
    assert_eq!(
        space.free_blocks(),
        &[FreeBlock::new(0, 49), FreeBlock::new(100, 255)]
    );

    space.deallocate(2).unwrap();
    assert_eq!(space.free_blocks(), &[FreeBlock::new(0, 255)]);
}

#[test]
fn test_deallocate_unknown_process() {
    let mut space = space();
    space.allocate_segment(1, 64).unwrap();
    let history_len = space.history().len();

    assert_eq!(space.deallocate(7), Err(MemoryError::ProcessNotFound(7)));
    assert_eq!(space.history().len(), history_len);
    assert_eq!(space.free_blocks(), &[FreeBlock::new(64, 255)]);
    assert!(space.contains(1));
}

#[test]
fn test_reset_keeps_history_and_strategy() {
    let mut space = space();
    space.set_strategy(Strategy::WorstFit);
    space.allocate_segment(1, 64).unwrap();
    space.allocate_pages(2, 40).unwrap();

    space.reset();

    assert!(space.get_memory_state().iter().all(Cell::is_free));
    assert_eq!(space.free_blocks(), &[FreeBlock::new(0, 255)]);
    assert_eq!(space.process_count(), 0);
    assert_eq!(space.strategy(), Strategy::WorstFit);
    assert_eq!(space.history().len(), 3);
    assert!(space
        .history()
        .iter()
        .any(|e| e.description.contains("System Reset")));
}

#[test]
fn test_reset_is_idempotent() {
    let mut space = space();
    space.allocate_segment(1, 100).unwrap();

    space.reset();
    let once = (space.get_memory_state(), space.free_blocks().to_vec(), space.stats());
    space.reset();
    let twice = (space.get_memory_state(), space.free_blocks().to_vec(), space.stats());

    assert_eq!(once, twice);
    assert_eq!(space.history().len(), 3);
}

#[test]
fn test_memory_state_is_a_copy() {
    let mut space = space();
    space.allocate_segment(1, 64).unwrap();

    let mut state = space.get_memory_state();
    state.fill(Cell::Owned(9));

    assert!(space.get_memory_state()[64..].iter().all(Cell::is_free));
    assert_eq!(state[0].raw(), 9);
    assert_eq!(space.get_memory_state()[100].raw(), 0);
}

#[test]
fn test_segment_fragmentation_and_utilization() {
    let mut space = space();
    space.allocate_segment(1, 64).unwrap();

    let fragmentation = space.get_fragmentation();
    assert_eq!(fragmentation.external_percent, 0.0);
    assert_eq!(fragmentation.internal_units, 0);
    assert_eq!(space.get_utilization(), 64.0 / 256.0 * 100.0);
}

#[test]
fn test_external_fragmentation_with_holes() {
    let mut space = space();
    space.allocate_segment(1, 64).unwrap();
    space.allocate_segment(2, 64).unwrap();
    space.allocate_segment(3, 64).unwrap();
    space.deallocate(2).unwrap();

    // free: 64 in the hole, 64 at the tail
    let fragmentation = space.get_fragmentation();
    assert_eq!(fragmentation.external_percent, 50.0);
}

#[test]
fn test_fragmentation_when_full() {
    let mut space = space();
    space.allocate_segment(1, 256).unwrap();

    assert_eq!(space.get_fragmentation().external_percent, 0.0);
    assert_eq!(space.get_utilization(), 100.0);
    assert_eq!(space.pressure(), MemoryPressure::Critical);
}

#[test]
fn test_stats_and_process_memory() {
    let mut space = space();
    space.allocate_segment(1, 100).unwrap();
    space.allocate_pages(2, 40).unwrap();

    let stats = space.stats();
    assert_eq!(stats.total_memory, 256);
    assert_eq!(stats.used_memory, 164);
    // pages land at 128 and 160, leaving holes at 100..128 and 192..256
    assert_eq!(stats.free_memory, 92);
    assert_eq!(stats.largest_free_block, 64);
    assert_eq!(stats.free_block_count, 2);
    assert_eq!(stats.process_count, 2);
    assert_eq!(stats.internal_fragmentation_units, 24);

    assert_eq!(space.info(), (256, 164, 92));
    assert_eq!(space.process_memory(1), 100);
    assert_eq!(space.process_memory(2), 64);
    assert_eq!(space.process_memory(3), 0);
    assert_eq!(space.pressure(), MemoryPressure::Medium);
}

#[test]
fn test_processes_sorted_by_pid() {
    let mut space = space();
    space.allocate_segment(30, 8).unwrap();
    space.allocate_segment(4, 8).unwrap();
    space.allocate_pages(12, 8).unwrap();

    let pids: Vec<_> = space.processes().into_iter().map(|(pid, _)| pid).collect();
    assert_eq!(pids, vec![4, 12, 30]);
}
