//! Editor commands.
//!
//! Every state change goes through a [`Command`]. Commands validate before
//! touching the store, so a failed `execute` leaves state untouched, and they
//! remember whatever they need to restore on `undo`. `execute` runs again on
//! redo and must reproduce the same result (ids assigned on first run are
//! reused).
//!
//! Commands come in two flavors:
//! - undoable ones, committed through [`crate::history::History`]
//! - ephemeral ones (hover, overlay, selected region), run with [`ephemeral`]

use crate::cells::CellSet;
use crate::cleanup;
use crate::error::{EditorError, EditorResult};
use crate::store::{EditorState, Effect, Store};
use crate::types::{Cell, GridPoint, Overlay, Region, RegionId};
use std::fmt;

pub trait Command: fmt::Debug {
    /// Short name for logs.
    fn label(&self) -> &'static str;

    fn execute(&mut self, store: &mut Store) -> EditorResult<()>;

    fn undo(&mut self, store: &mut Store);

    /// True when the last `execute` changed nothing. History drops such commands.
    fn is_noop(&self) -> bool {
        false
    }
}

/// Run a command outside history.
pub fn ephemeral(mut command: impl Command, store: &mut Store) -> EditorResult<()> {
    tracing::trace!(command = command.label(), "Ephemeral dispatch");
    command.execute(store)
}

/// Clear hover and selected-region references to a region that is going away.
fn forget_region(state: &mut EditorState, id: RegionId) {
    if state.hover == Some(id) {
        state.hover = None;
    }
    if state.selected == Some(id) {
        state.selected = None;
    }
    if matches!(state.overlay, Overlay::Relocate { region, .. } if region == id) {
        state.overlay = Overlay::None;
    }
}

fn find_region(store: &Store, id: RegionId) -> EditorResult<usize> {
    store
        .state()
        .region_position(id)
        .ok_or(EditorError::UnknownRegion(id))
}

// ============================================================================
// Ephemeral
// ============================================================================

#[derive(Debug, Clone)]
pub struct SetHover {
    hover: Option<RegionId>,
    previous: Option<RegionId>,
}

impl SetHover {
    pub fn new(hover: Option<RegionId>) -> Self {
        Self { hover, previous: None }
    }
}

impl Command for SetHover {
    fn label(&self) -> &'static str {
        "set_hover"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        self.previous = store.state().hover;
        if self.previous != self.hover {
            let hover = self.hover;
            store.mutate(|s| s.hover = hover);
        }
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let previous = self.previous;
        store.mutate(|s| s.hover = previous);
    }
}

#[derive(Debug, Clone)]
pub struct SetOverlay {
    overlay: Overlay,
    previous: Overlay,
}

impl SetOverlay {
    pub fn new(overlay: Overlay) -> Self {
        Self { overlay, previous: Overlay::None }
    }
}

impl Command for SetOverlay {
    fn label(&self) -> &'static str {
        "set_overlay"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        if store.state().overlay == self.overlay {
            self.previous = self.overlay.clone();
            return Ok(());
        }
        let overlay = self.overlay.clone();
        self.previous = store.mutate(|s| std::mem::replace(&mut s.overlay, overlay));
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let previous = self.previous.clone();
        store.mutate(|s| s.overlay = previous);
    }
}

#[derive(Debug, Clone)]
pub struct SetSelectedRegion {
    region: Option<RegionId>,
    previous: Option<RegionId>,
}

impl SetSelectedRegion {
    pub fn new(region: Option<RegionId>) -> Self {
        Self { region, previous: None }
    }
}

impl Command for SetSelectedRegion {
    fn label(&self) -> &'static str {
        "set_selected_region"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        if let Some(id) = self.region {
            find_region(store, id)?;
        }
        let region = self.region;
        self.previous = store.mutate(|s| std::mem::replace(&mut s.selected, region));
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let previous = self.previous;
        store.mutate(|s| s.selected = previous);
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Union `cells` into the selection, or subtract them.
#[derive(Debug, Clone)]
pub struct ApplySelection {
    cells: CellSet,
    subtract: bool,
    previous: Option<CellSet>,
}

impl ApplySelection {
    pub fn new(cells: CellSet, subtract: bool) -> Self {
        Self { cells, subtract, previous: None }
    }
}

impl Command for ApplySelection {
    fn label(&self) -> &'static str {
        if self.subtract { "deselect_cells" } else { "select_cells" }
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        let bounds = store.bounds();
        if let Some(cell) = self.cells.first_out_of_bounds(bounds) {
            bounds.check_cell(cell)?;
        }
        let current = &store.state().selection;
        let next = if self.subtract {
            current.subtract(&self.cells)
        } else {
            current.union(&self.cells)
        };
        if &next == current {
            self.previous = None;
            return Ok(());
        }
        self.previous = Some(store.mutate(|s| std::mem::replace(&mut s.selection, next)));
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        if let Some(previous) = self.previous.take() {
            store.mutate(|s| s.selection = previous);
        }
    }

    fn is_noop(&self) -> bool {
        self.previous.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ToggleCell {
    cell: Cell,
}

impl ToggleCell {
    pub fn new(cell: Cell) -> Self {
        Self { cell }
    }
}

impl Command for ToggleCell {
    fn label(&self) -> &'static str {
        "toggle_cell"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        store.bounds().check_cell(self.cell)?;
        let cell = self.cell;
        store.mutate(|s| s.selection.toggle(cell));
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let cell = self.cell;
        store.mutate(|s| s.selection.toggle(cell));
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClearSelection {
    previous: Option<CellSet>,
}

impl ClearSelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for ClearSelection {
    fn label(&self) -> &'static str {
        "clear_selection"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        if store.state().selection.is_empty() {
            self.previous = None;
            return Ok(());
        }
        self.previous = Some(store.mutate(|s| std::mem::take(&mut s.selection)));
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        if let Some(previous) = self.previous.take() {
            store.mutate(|s| s.selection = previous);
        }
    }

    fn is_noop(&self) -> bool {
        self.previous.is_none()
    }
}

// ============================================================================
// Regions
// ============================================================================

/// Create a region from explicit cells, or from the current selection.
#[derive(Debug, Clone)]
pub struct AddRegion {
    name: String,
    cells: Option<CellSet>,
    id: Option<RegionId>,
    previous_selection: Option<CellSet>,
    previous_next_id: u64,
}

impl AddRegion {
    /// Commit the current selection as a new region.
    pub fn from_selection(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: None,
            id: None,
            previous_selection: None,
            previous_next_id: 0,
        }
    }

    pub fn with_cells(name: impl Into<String>, cells: CellSet) -> Self {
        Self { cells: Some(cells), ..Self::from_selection(name) }
    }

    /// Use a caller-supplied id instead of allocating one.
    pub fn with_id(mut self, id: RegionId) -> Self {
        self.id = Some(id);
        self
    }

    /// Id assigned by the last successful execute.
    pub fn id(&self) -> Option<RegionId> {
        self.id
    }
}

impl Command for AddRegion {
    fn label(&self) -> &'static str {
        "add_region"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        let state = store.state();
        let cells = match &self.cells {
            Some(cells) => cells.clone(),
            None => state.selection.clone(),
        };
        let id = self.id.unwrap_or(RegionId(state.next_region_id));
        if state.region(id).is_some() {
            return Err(EditorError::DuplicateRegion(id));
        }
        let region = Region::new(id, self.name.clone(), cells, store.bounds())?;

        self.id = Some(id);
        self.previous_next_id = state.next_region_id;
        let effect = Effect::Created {
            id,
            name: region.name.clone(),
            cells: region.cells().clone(),
        };
        let consumes_selection = self.cells.is_none();
        self.previous_selection = store.mutate_regions(|s| {
            s.regions.push(region);
            s.next_region_id = s.next_region_id.max(id.0 + 1);
            consumes_selection.then(|| std::mem::take(&mut s.selection))
        });
        store.emit(effect);
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let Some(id) = self.id else {
            return;
        };
        let previous_selection = self.previous_selection.take();
        let previous_next_id = self.previous_next_id;
        store.mutate_regions(|s| {
            s.regions.retain(|region| region.id != id);
            forget_region(s, id);
            if let Some(selection) = previous_selection {
                s.selection = selection;
            }
            s.next_region_id = previous_next_id;
        });
        store.emit(Effect::Removed { id });
    }
}

/// Shift a region by whole cells. The outline is recomputed.
#[derive(Debug, Clone)]
pub struct MoveRegion {
    id: RegionId,
    dx: i32,
    dy: i32,
    before: Option<Region>,
}

impl MoveRegion {
    pub fn new(id: RegionId, dx: i32, dy: i32) -> Self {
        Self { id, dx, dy, before: None }
    }
}

impl Command for MoveRegion {
    fn label(&self) -> &'static str {
        "move_region"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        let position = find_region(store, self.id)?;
        let region = &store.state().regions[position];
        if self.dx == 0 && self.dy == 0 {
            self.before = None;
            return Ok(());
        }
        let mut moved = region.clone();
        moved.set_cells(region.cells().translate(self.dx, self.dy), store.bounds())?;

        let effect = Effect::Updated { id: self.id, cells: moved.cells().clone() };
        self.before = Some(store.mutate_regions(|s| std::mem::replace(&mut s.regions[position], moved)));
        store.emit(effect);
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let Some(before) = self.before.take() else {
            return;
        };
        let Some(position) = store.state().region_position(self.id) else {
            tracing::warn!(region = %self.id, "Region vanished before move undo");
            return;
        };
        let effect = Effect::Updated { id: self.id, cells: before.cells().clone() };
        store.mutate_regions(|s| s.regions[position] = before);
        store.emit(effect);
    }

    fn is_noop(&self) -> bool {
        self.before.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct DeleteRegion {
    id: RegionId,
    removed: Option<(usize, Region, EditorSnapshot)>,
}

/// Hover/selected/overlay references restored when a removal is undone.
#[derive(Debug, Clone)]
struct EditorSnapshot {
    hover: Option<RegionId>,
    selected: Option<RegionId>,
    overlay: Overlay,
}

impl EditorSnapshot {
    fn capture(state: &EditorState) -> Self {
        Self {
            hover: state.hover,
            selected: state.selected,
            overlay: state.overlay.clone(),
        }
    }

    fn restore(self, state: &mut EditorState) {
        state.hover = self.hover;
        state.selected = self.selected;
        state.overlay = self.overlay;
    }
}

impl DeleteRegion {
    pub fn new(id: RegionId) -> Self {
        Self { id, removed: None }
    }
}

impl Command for DeleteRegion {
    fn label(&self) -> &'static str {
        "delete_region"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        let position = find_region(store, self.id)?;
        let snapshot = EditorSnapshot::capture(store.state());
        let id = self.id;
        let region = store.mutate_regions(|s| {
            forget_region(s, id);
            s.regions.remove(position)
        });
        self.removed = Some((position, region, snapshot));
        store.emit(Effect::Removed { id });
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let Some((position, region, snapshot)) = self.removed.take() else {
            return;
        };
        let effect = Effect::Created {
            id: region.id,
            name: region.name.clone(),
            cells: region.cells().clone(),
        };
        store.mutate_regions(|s| {
            let position = position.min(s.regions.len());
            s.regions.insert(position, region);
            snapshot.restore(s);
        });
        store.emit(effect);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClearRegions {
    removed: Option<(Vec<Region>, EditorSnapshot)>,
}

impl ClearRegions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for ClearRegions {
    fn label(&self) -> &'static str {
        "clear_regions"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        if store.state().regions.is_empty() {
            self.removed = None;
            return Ok(());
        }
        let snapshot = EditorSnapshot::capture(store.state());
        let regions = store.mutate_regions(|s| {
            s.hover = None;
            s.selected = None;
            if matches!(s.overlay, Overlay::Relocate { .. }) {
                s.overlay = Overlay::None;
            }
            std::mem::take(&mut s.regions)
        });
        for region in &regions {
            store.emit(Effect::Removed { id: region.id });
        }
        self.removed = Some((regions, snapshot));
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let Some((regions, snapshot)) = self.removed.take() else {
            return;
        };
        for region in &regions {
            store.emit(Effect::Created {
                id: region.id,
                name: region.name.clone(),
                cells: region.cells().clone(),
            });
        }
        store.mutate_regions(|s| {
            s.regions = regions;
            snapshot.restore(s);
        });
    }

    fn is_noop(&self) -> bool {
        self.removed.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct RenameRegion {
    id: RegionId,
    name: String,
    previous: Option<String>,
}

impl RenameRegion {
    pub fn new(id: RegionId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), previous: None }
    }
}

impl Command for RenameRegion {
    fn label(&self) -> &'static str {
        "rename_region"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        let position = find_region(store, self.id)?;
        let name = self.name.clone();
        self.previous = Some(store.mutate(|s| std::mem::replace(&mut s.regions[position].name, name)));
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        if let Some(position) = store.state().region_position(self.id) {
            store.mutate(|s| s.regions[position].name = previous);
        }
    }
}

/// Trim regions with a closed cleanup stroke.
#[derive(Debug, Clone)]
pub struct CleanSegments {
    points: Vec<GridPoint>,
    before: Option<(Vec<Region>, EditorSnapshot)>,
}

impl CleanSegments {
    pub fn new(points: Vec<GridPoint>) -> Self {
        Self { points, before: None }
    }
}

impl Command for CleanSegments {
    fn label(&self) -> &'static str {
        "clean_segments"
    }

    fn execute(&mut self, store: &mut Store) -> EditorResult<()> {
        let Some(outcome) = cleanup::trim_regions(&store.state().regions, &self.points, store.bounds())?
        else {
            self.before = None;
            return Ok(());
        };

        let effects: Vec<Effect> = outcome
            .updated
            .iter()
            .filter_map(|id| outcome.regions.iter().find(|r| r.id == *id))
            .map(|region| Effect::Updated { id: region.id, cells: region.cells().clone() })
            .chain(outcome.removed.iter().map(|&id| Effect::Removed { id }))
            .collect();
        let removed = outcome.removed;
        let snapshot = EditorSnapshot::capture(store.state());
        let regions = store.mutate_regions(|s| {
            for &id in &removed {
                forget_region(s, id);
            }
            std::mem::replace(&mut s.regions, outcome.regions)
        });
        self.before = Some((regions, snapshot));
        for effect in effects {
            store.emit(effect);
        }
        Ok(())
    }

    fn undo(&mut self, store: &mut Store) {
        let Some((before, snapshot)) = self.before.take() else {
            return;
        };
        let mut effects = Vec::new();
        for region in &before {
            match store.state().region(region.id) {
                Some(current) if current.cells() == region.cells() => {}
                Some(_) => effects.push(Effect::Updated { id: region.id, cells: region.cells().clone() }),
                None => effects.push(Effect::Created {
                    id: region.id,
                    name: region.name.clone(),
                    cells: region.cells().clone(),
                }),
            }
        }
        store.mutate_regions(|s| {
            s.regions = before;
            snapshot.restore(s);
        });
        for effect in effects {
            store.emit(effect);
        }
    }

    fn is_noop(&self) -> bool {
        self.before.is_none()
    }
}
