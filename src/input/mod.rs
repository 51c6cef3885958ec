//! Pointer and wheel input handling for the floor-plan canvas.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`InteractionState`) to
//! track the current gesture. A press picks a gesture, moves update the
//! transient overlay ephemerally, and the release commits the result through
//! history.
//!
//! ## Modules
//!
//! - `events` - Pointer event, button and modifier types
//! - `state` - Interaction state machine enum and helper methods
//! - `tools` - Per-tool press strategies
//! - `mouse_down` - Pointer-down handling (gesture selection)
//! - `drag` - Pointer-move handling (hover, overlays, panning)
//! - `mouse_up` - Pointer-up handling (commit the gesture)
//! - `transform` - Wheel zoom, panning and view reset
//! - `coords` - Screen/world/grid conversions

pub mod coords;
mod drag;
pub mod events;
mod mouse_down;
mod mouse_up;
mod state;
pub mod tools;
mod transform;

pub use events::{Modifiers, PointerButton, PointerEvent};
pub use state::{DragStart, InteractionState};
pub use tools::Gesture;
