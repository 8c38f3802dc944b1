/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
///
/// Caller-supplied and strictly positive; zero never names a process.
pub type Pid = u32;

/// Address type for cell offsets within the simulated address space
pub type Address = usize;

/// Size type for cell counts
pub type Size = usize;
