/*!
 * Simulator Limits and Constants
 *
 * Centralized location for defaults and thresholds.
 * Grouped by domain: address space, memory pressure, display.
 */

// =============================================================================
// ADDRESS SPACE DEFAULTS
// =============================================================================

/// Default number of address units in a simulated address space
pub const DEFAULT_TOTAL_MEMORY: usize = 2048;

/// Default page size used by paged allocation
pub const DEFAULT_PAGE_SIZE: usize = 64;

// =============================================================================
// MEMORY PRESSURE THRESHOLDS (fraction of total memory in use)
// =============================================================================

/// Utilization at which pressure is reported as medium
pub const PRESSURE_MEDIUM_THRESHOLD: f64 = 0.60;

/// Utilization at which pressure is reported as high (warning logged)
pub const PRESSURE_HIGH_THRESHOLD: f64 = 0.80;

/// Utilization at which pressure is reported as critical
pub const PRESSURE_CRITICAL_THRESHOLD: f64 = 0.95;

// =============================================================================
// DISPLAY
// =============================================================================

/// Number of history events a renderer shows by default
pub const DEFAULT_HISTORY_DISPLAY: usize = 10;

/// Cells per row in the text memory map
pub const DEFAULT_MAP_WIDTH: usize = 64;
