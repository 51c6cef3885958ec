//! Editor state and dispatch plumbing.

use crate::commands::{self, Command};
use crate::error::{EditorError, EditorResult};
use crate::history::History;
use crate::input::InteractionState;
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::notifications::{Toast, ToastManager};
use crate::perf::FrameMonitor;
use crate::persistence::{PersistenceMode, RegionPersistence};
use crate::render::{Palette, Renderer, Viewport};
use crate::settings::EditorSettings;
use crate::settings_watcher::SettingsWatcher;
use crate::spatial_index::HitTestIndex;
use crate::store::{EditorState, Effect, Store};
use crate::types::{Cell, GridPoint, RegionId, ToolMode};
use crate::view::ScreenPoint;

/// The floor-plan editor: store, history, hit-test index and the active gesture.
pub struct Editor {
    pub(crate) store: Store,
    pub(crate) history: History,
    pub(crate) index: HitTestIndex,
    pub(crate) interaction: InteractionState,
    pub(crate) settings: EditorSettings,
    pub(crate) persistence: Box<dyn RegionPersistence>,
    pub(crate) mode: PersistenceMode,
    pub(crate) toasts: ToastManager,
    pub(crate) settings_watcher: Option<SettingsWatcher>,
    pub(crate) renderer: Option<Box<dyn Renderer>>,
    pub(crate) viewport: Viewport,
    pub(crate) palette: Palette,
    pub(crate) frame_monitor: FrameMonitor,
}

impl Editor {
    pub fn state(&self) -> &EditorState {
        self.store.state()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn tool(&self) -> ToolMode {
        self.store.state().tool
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        self.mode
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    pub fn frame_monitor(&self) -> &FrameMonitor {
        &self.frame_monitor
    }

    // ------------------------------------------------------------------------
    // Coordinates
    // ------------------------------------------------------------------------

    pub(crate) fn screen_to_cell(&self, position: ScreenPoint) -> Cell {
        let view = self.store.state().view;
        let ctx = CoordinateContext::new(&view, self.settings.cell_size);
        CoordinateConverter::screen_to_cell(position, &ctx)
    }

    pub(crate) fn screen_to_point(&self, position: ScreenPoint) -> GridPoint {
        let view = self.store.state().view;
        let ctx = CoordinateContext::new(&view, self.settings.cell_size);
        CoordinateConverter::screen_to_point(position, &ctx)
    }

    // ------------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------------

    /// Rebuild the index if regions changed since it was last built.
    pub(crate) fn sync_index(&mut self) {
        let revision = self.store.region_revision();
        self.index.sync_if_stale(&self.store.state().regions, revision);
    }

    /// Innermost region covering `cell`.
    pub fn region_at(&mut self, cell: Cell) -> Option<RegionId> {
        self.sync_index();
        self.index.innermost(cell)
    }

    /// Innermost region under a screen position.
    pub fn hit_test(&mut self, position: ScreenPoint) -> Option<RegionId> {
        let cell = self.screen_to_cell(position);
        self.region_at(cell)
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Commit through history, surfacing rejection to the user.
    /// Returns whether the command was recorded.
    pub(crate) fn commit(&mut self, command: impl Command + 'static) -> bool {
        let label = command.label();
        let result = self.history.commit(Box::new(command), &mut self.store);
        self.flush_effects();
        match result {
            Ok(recorded) => recorded,
            Err(err) => {
                self.report(label, &err);
                false
            }
        }
    }

    /// Like [`Editor::commit`] but hands the error back instead of reporting it.
    pub(crate) fn try_commit(&mut self, command: impl Command + 'static) -> EditorResult<bool> {
        let result = self.history.commit(Box::new(command), &mut self.store);
        self.flush_effects();
        result
    }

    /// Run a command outside history. Failures are logged only.
    pub(crate) fn ephemeral(&mut self, command: impl Command) {
        let label = command.label();
        if let Err(err) = commands::ephemeral(command, &mut self.store) {
            tracing::debug!(command = label, error = %err, "Ephemeral command rejected");
        }
    }

    /// Hold frame requests while `f` runs so it produces a single redraw.
    pub(crate) fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.store.begin_transaction();
        let result = f(self);
        self.store.end_transaction();
        result
    }

    /// Log a rejected edit and queue a toast.
    pub(crate) fn report(&mut self, action: &str, err: &EditorError) {
        if err.is_user_facing() {
            tracing::warn!(action, error = %err, "Edit rejected");
        } else {
            tracing::error!(action, error = %err, "Edit failed");
        }
        self.toasts.push(Toast::from(err));
    }

    pub(crate) fn report_persistence(&mut self, action: &str, err: anyhow::Error) {
        tracing::error!(action, "Persistence call failed: {err:#}");
        let err = EditorError::persistence(&err);
        self.toasts.push(Toast::from(&err));
    }

    /// Forward region changes recorded by commands to the persistence layer.
    pub(crate) fn flush_effects(&mut self) {
        for effect in self.store.drain_effects() {
            match (self.mode, effect) {
                (PersistenceMode::External, Effect::Updated { id, cells }) => {
                    if let Err(err) = self.persistence.on_update(id, &cells) {
                        self.report_persistence("update region", err);
                    }
                }
                (_, effect) => tracing::trace!(?effect, "Effect not forwarded"),
            }
        }
    }

    pub(crate) fn notify_selected(&mut self, id: RegionId) {
        if let Err(err) = self.persistence.on_select(id) {
            self.report_persistence("select region", err);
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("store", &self.store)
            .field("history", &self.history)
            .field("interaction", &self.interaction.name())
            .field("mode", &self.mode)
            .finish()
    }
}
