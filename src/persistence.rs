//! Persistence collaborator.
//!
//! The editor never talks to a database itself. In [`PersistenceMode::External`]
//! it hands region changes to a [`RegionPersistence`] implementation; new
//! regions come back through `Editor::sync_regions_from_outside` once the
//! backend has assigned them an id.

use crate::cells::CellSet;
use crate::types::RegionId;

/// Callbacks into whatever stores regions. Calls are fire-and-forget: the
/// editor has already updated its own state and never rolls back.
pub trait RegionPersistence {
    fn on_create(&mut self, name: &str, cells: &CellSet) -> anyhow::Result<()>;

    fn on_update(&mut self, id: RegionId, cells: &CellSet) -> anyhow::Result<()>;

    fn on_select(&mut self, id: RegionId) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Regions live only in the editor store.
    #[default]
    Local,
    /// Creation is delegated to the collaborator; updates are reported to it.
    External,
}

/// Persistence that accepts everything and stores nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPersistence;

impl RegionPersistence for NoopPersistence {
    fn on_create(&mut self, _name: &str, _cells: &CellSet) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_update(&mut self, _id: RegionId, _cells: &CellSet) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_select(&mut self, _id: RegionId) -> anyhow::Result<()> {
        Ok(())
    }
}
