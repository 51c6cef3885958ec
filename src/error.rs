//! Error types for editor operations
//!
//! Every rejected edit flows through [`EditorError`]. Commands validate before
//! they touch state, so an `Err` always means nothing was mutated.

use crate::types::RegionId;
use thiserror::Error;

/// Errors that can occur while editing a floor plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A cell or vertex lies outside the board
    #[error("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: i32, y: i32, size: i32 },

    /// The cells split into more than one 4-connected area
    #[error("selection is split into {components} separate areas; regions must be one connected area")]
    Disconnected { components: usize },

    /// Nothing to commit
    #[error("nothing is selected")]
    EmptySelection,

    /// Boundary walk could not close a chain
    #[error("outline of {cells} cells could not be closed at vertex ({x}, {y})")]
    MalformedBoundary { cells: usize, x: i32, y: i32 },

    /// No region with this id
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),

    /// Two regions share an id
    #[error("region {0} appears more than once")]
    DuplicateRegion(RegionId),

    /// `set_tool` received an id outside the tool table
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    /// The persistence collaborator reported a failure
    #[error("saving failed: {0}")]
    Persistence(String),
}

impl EditorError {
    /// Wrap a collaborator failure. The source chain is flattened into the message.
    pub fn persistence(err: &anyhow::Error) -> Self {
        EditorError::Persistence(format!("{err:#}"))
    }

    /// Whether the user should see this error (as opposed to a programming fault)
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, EditorError::MalformedBoundary { .. })
    }
}

/// Result type alias for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
