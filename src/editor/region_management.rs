//! Region and selection operations exposed to the host UI.

use crate::commands::{
    self, AddRegion, ClearRegions, ClearSelection, DeleteRegion, RenameRegion, SetSelectedRegion,
};
use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::persistence::PersistenceMode;
use crate::types::{Region, RegionId, RegionRecord};
use std::collections::HashSet;

impl Editor {
    pub fn regions(&self) -> &[Region] {
        &self.store.state().regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.store.state().region(id)
    }

    /// Serializable snapshot of every region, oldest first.
    pub fn region_records(&self) -> Vec<RegionRecord> {
        self.regions().iter().map(Region::record).collect()
    }

    /// Turn the current selection into a region.
    ///
    /// Returns the new id in local mode. In external mode the selection is
    /// handed to `on_create` and `Ok(None)` is returned; the region shows up
    /// once the host calls `sync_regions_from_outside`. An empty selection
    /// does nothing.
    pub fn create_region(&mut self, name: Option<&str>) -> EditorResult<Option<RegionId>> {
        let state = self.store.state();
        if state.selection.is_empty() {
            tracing::debug!("Create region ignored: nothing selected");
            return Ok(None);
        }
        let next_id = state.next_region_id;
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.region_name(next_id));

        match self.mode {
            PersistenceMode::Local => match self.try_commit(AddRegion::from_selection(name)) {
                Ok(_) => {
                    tracing::info!(region = %RegionId(next_id), "Region created");
                    Ok(Some(RegionId(next_id)))
                }
                Err(err) => {
                    self.report("create region", &err);
                    Err(err)
                }
            },
            PersistenceMode::External => {
                let selection = self.store.state().selection.clone();
                if let Err(err) = selection.validate_region(self.store.bounds()) {
                    self.report("create region", &err);
                    return Err(err);
                }
                if let Err(err) = self.persistence.on_create(&name, &selection) {
                    let editor_err = EditorError::persistence(&err);
                    self.report_persistence("create region", err);
                    return Err(editor_err);
                }
                tracing::info!(name = %name, cells = selection.len(), "Region handed to persistence");
                self.commit(ClearSelection::new());
                Ok(None)
            }
        }
    }

    pub fn delete_region(&mut self, id: RegionId) -> EditorResult<()> {
        self.try_commit(DeleteRegion::new(id))
            .map(|_| ())
            .inspect_err(|err| self.report("delete region", err))
    }

    pub fn rename_region(&mut self, id: RegionId, name: &str) -> EditorResult<()> {
        self.try_commit(RenameRegion::new(id, name))
            .map(|_| ())
            .inspect_err(|err| self.report("rename region", err))
    }

    /// Remove every region (undoable).
    pub fn clear_regions(&mut self) -> bool {
        self.commit(ClearRegions::new())
    }

    pub fn clear_selection(&mut self) -> bool {
        self.commit(ClearSelection::new())
    }

    /// Mark a region as selected (not undoable) and tell the persistence layer.
    pub fn select_region(&mut self, id: Option<RegionId>) -> EditorResult<()> {
        if let Err(err) = commands::ephemeral(SetSelectedRegion::new(id), &mut self.store) {
            self.report("select region", &err);
            return Err(err);
        }
        if let Some(id) = id {
            self.notify_selected(id);
        }
        Ok(())
    }

    /// Replace the regions with the persistence layer's view of them. Not
    /// recorded in history. Nothing changes if any record is invalid.
    pub fn sync_regions_from_outside(&mut self, records: Vec<RegionRecord>) -> EditorResult<()> {
        let bounds = self.store.bounds();
        let mut seen = HashSet::with_capacity(records.len());
        let mut regions = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id) {
                let err = EditorError::DuplicateRegion(record.id);
                self.report("sync regions", &err);
                return Err(err);
            }
            match Region::from_record(record, bounds) {
                Ok(region) => regions.push(region),
                Err(err) => {
                    self.report("sync regions", &err);
                    return Err(err);
                }
            }
        }

        if let Some(region) = self.interaction.relocating_region() {
            if !seen.contains(&region) {
                self.cancel_interaction();
            }
        }
        tracing::debug!(regions = regions.len(), "Regions synced from outside");
        self.store.mutate_regions(|s| {
            let max_id = regions.iter().map(|r| r.id.0).max().unwrap_or(0);
            s.next_region_id = s.next_region_id.max(max_id + 1);
            s.regions = regions;
            if s.hover.is_some_and(|id| !seen.contains(&id)) {
                s.hover = None;
            }
            if s.selected.is_some_and(|id| !seen.contains(&id)) {
                s.selected = None;
            }
        });
        Ok(())
    }
}
