//! Editor-wide constants.
//!
//! Centralizes magic numbers so the defaults in `settings` and the
//! behavior of the interaction code stay in one place.

// ============================================================================
// Board Geometry
// ============================================================================

/// Default number of cells along each side of the (square) board
pub const DEFAULT_BOARD_SIZE: i32 = 64;

/// World units per grid cell
pub const DEFAULT_CELL_SIZE: f32 = 10.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum view scale
pub const MIN_SCALE: f32 = 0.25;

/// Maximum view scale
pub const MAX_SCALE: f32 = 8.0;

/// Default view scale
pub const DEFAULT_SCALE: f32 = 1.0;

/// Exponential zoom factor per wheel delta unit
pub const ZOOM_SENSITIVITY: f32 = 0.0015;

// ============================================================================
// Interaction
// ============================================================================

/// Pointer travel (screen pixels) before a press becomes a drag
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

/// Maximum undo history entries to keep
pub const MAX_HISTORY_OPERATIONS: usize = 100;

/// Prefix for automatically named regions ("Region 1", "Region 2", ...)
pub const DEFAULT_REGION_PREFIX: &str = "Region";

// ============================================================================
// Notifications
// ============================================================================

/// Maximum toasts kept in the queue; oldest are dropped first
pub const MAX_TOASTS: usize = 5;

// ============================================================================
// Rendering
// ============================================================================

/// Extra world units kept around the viewport when culling grid lines
pub const CULLING_MARGIN: f32 = 20.0;

/// Radius (world units) of a cleanup stroke marker
pub const STROKE_MARKER_RADIUS: f32 = 2.0;
