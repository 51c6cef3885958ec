//! Floor-plan grid editor core.
//!
//! A floor plan is a square board of cells. Users select cells, turn a
//! selection into a named region, drag regions around and trim them with a
//! lasso stroke. Every edit goes through an undoable command history.
//!
//! ## Modules
//!
//! - `view`, `input::coords` - camera and coordinate conversions
//! - `cells` - cell-set algebra and connectivity
//! - `outline` - boundary extraction from cell sets
//! - `spatial_index` - innermost-region hit testing
//! - `store`, `frame`, `commands`, `history` - state, frame coalescing, undo/redo
//! - `input` - pointer interaction state machine
//! - `render` - scene building for a host renderer
//! - `editor` - the `Editor` facade tying it together

pub mod cells;
pub mod cleanup;
pub mod commands;
pub mod constants;
pub mod editor;
pub mod error;
pub mod frame;
pub mod history;
pub mod input;
pub mod logging;
pub mod notifications;
pub mod outline;
pub mod perf;
pub mod persistence;
pub mod render;
pub mod script;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod store;
pub mod types;
pub mod view;

pub use cells::CellSet;
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use input::{Modifiers, PointerButton, PointerEvent};
pub use outline::Outline;
pub use persistence::{PersistenceMode, RegionPersistence};
pub use settings::EditorSettings;
pub use types::{Cell, GridPoint, Region, RegionId, RegionRecord, ToolMode};
pub use view::View;
