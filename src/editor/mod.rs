//! The editor facade.
//!
//! `Editor` wires the store, history, hit-test index and interaction state
//! machine together behind the surface the host UI talks to.
//!
//! ## Modules
//!
//! - `state` - The `Editor` struct, accessors and dispatch plumbing
//! - `lifecycle` - Construction, settings reload, frames, tools and undo/redo
//! - `region_management` - Region create/delete/rename/sync and selection
//!
//! Pointer and wheel handlers live in [`crate::input`].

mod lifecycle;
mod region_management;
mod state;

pub use state::Editor;
