/*!
 * Memory Module
 * Address-space simulation: segmentation, paging and fragmentation accounting
 */

pub mod shared;
pub mod simulator;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use shared::SharedAddressSpace;
pub use simulator::{AddressSpace, EventDetail, History, HistoryEvent, Operation, Outcome};
pub use traits::*;
pub use types::*;
