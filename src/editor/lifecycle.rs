//! Editor construction, settings reload, frames and history navigation.

use crate::commands::SetOverlay;
use crate::editor::Editor;
use crate::error::EditorResult;
use crate::history::History;
use crate::input::InteractionState;
use crate::notifications::{Toast, ToastManager};
use crate::perf::FrameMonitor;
use crate::persistence::{NoopPersistence, PersistenceMode, RegionPersistence};
use crate::render::{Palette, Renderer, Viewport, build_scene};
use crate::settings::EditorSettings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::spatial_index::HitTestIndex;
use crate::store::{EditorState, Store, SubscriptionId};
use crate::types::{Overlay, ToolMode};
use crate::view::View;
use std::path::PathBuf;

impl Editor {
    /// Editor whose regions live only in its own store.
    pub fn new(settings: EditorSettings) -> Self {
        Self::build(settings, PersistenceMode::Local, Box::new(NoopPersistence))
    }

    /// Editor backed by an external persistence layer. Region creation goes
    /// through `on_create`; new regions arrive via `sync_regions_from_outside`.
    pub fn with_persistence(settings: EditorSettings, persistence: impl RegionPersistence + 'static) -> Self {
        Self::build(settings, PersistenceMode::External, Box::new(persistence))
    }

    fn build(settings: EditorSettings, mode: PersistenceMode, persistence: Box<dyn RegionPersistence>) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                tracing::warn!("Invalid settings, using defaults: {err:#}");
                EditorSettings::default()
            }
        };
        let viewport = Viewport::default();
        let state = EditorState {
            view: View::centered_on(
                settings.board_world_size(),
                (viewport.width, viewport.height),
                settings.scale_limits(),
            ),
            ..EditorState::default()
        };
        tracing::info!(
            board_size = settings.board_size,
            cell_size = settings.cell_size,
            ?mode,
            "Editor created"
        );
        Self {
            store: Store::new(state, settings.bounds()),
            history: History::new(settings.history_limit),
            index: HitTestIndex::new(),
            interaction: InteractionState::Idle,
            settings,
            persistence,
            mode,
            toasts: ToastManager::new(),
            settings_watcher: None,
            renderer: None,
            viewport,
            palette: Palette::default(),
            frame_monitor: FrameMonitor::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Start watching a settings file for `check_settings_reload`.
    pub fn watch_settings(&mut self, path: PathBuf) -> anyhow::Result<()> {
        self.settings_watcher = Some(SettingsWatcher::new(path)?);
        Ok(())
    }

    /// Watch the default settings location, if there is one.
    pub fn watch_default_settings(&mut self) {
        let Some(path) = crate::settings_watcher::default_settings_path() else {
            return;
        };
        if let Err(err) = self.watch_settings(path) {
            tracing::warn!("Settings hot-reload unavailable: {err:#}");
        }
    }

    /// Poll the settings watcher and apply changes. Returns true if settings
    /// were reloaded.
    pub fn check_settings_reload(&mut self) -> bool {
        let Some(event) = self.settings_watcher.as_mut().and_then(|w| w.poll()) else {
            return false;
        };
        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                tracing::info!("Settings file changed, reloading...");
                let loaded = self
                    .settings_watcher
                    .as_ref()
                    .map(|w| EditorSettings::load_from(w.path()));
                match loaded {
                    Some(Ok(settings)) => {
                        self.apply_settings(settings);
                        self.toasts.push(Toast::info("Settings reloaded"));
                        true
                    }
                    Some(Err(err)) => {
                        tracing::warn!("Keeping current settings: {err:#}");
                        self.toasts.push(Toast::warning("Settings file is invalid"));
                        false
                    }
                    None => false,
                }
            }
            SettingsEvent::Deleted => {
                tracing::warn!("Settings file deleted");
                self.toasts.push(Toast::warning("Settings file deleted"));
                false
            }
            SettingsEvent::Error(e) => {
                tracing::error!("Settings watch error: {}", e);
                false
            }
        }
    }

    /// Replace the settings. The view is re-clamped to the new scale limits.
    /// Board size changes only take effect for regions that still fit.
    pub fn apply_settings(&mut self, settings: EditorSettings) {
        if let Err(err) = settings.validate() {
            tracing::warn!("Rejected settings: {err:#}");
            return;
        }
        let limits = settings.scale_limits();
        self.history.set_limit(settings.history_limit);
        self.store.set_bounds(settings.bounds());
        self.store.mutate(|s| s.view = s.view.clamped(limits));
        self.settings = settings;
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    pub fn attach_renderer(&mut self, renderer: impl Renderer + 'static) {
        self.renderer = Some(Box::new(renderer));
        self.request_redraw();
    }

    pub fn detach_renderer(&mut self) {
        self.renderer = None;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        self.request_redraw();
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.request_redraw();
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_redraw(&mut self) {
        self.store.mutate(|_| ());
    }

    /// Hook the host uses to schedule a frame callback.
    pub fn set_frame_requester(&mut self, requester: impl FnMut() + 'static) {
        self.store.set_frame_requester(requester);
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&EditorState) + 'static) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Draw a pending frame: notify subscribers, then render. Returns false
    /// when nothing was scheduled.
    pub fn run_frame(&mut self) -> bool {
        self.toasts.remove_expired();
        self.frame_monitor.begin_frame();
        let Self { store, renderer, settings, viewport, palette, .. } = self;
        let drawn = store.run_frame_with(|state| {
            if let Some(renderer) = renderer.as_mut() {
                let scene = build_scene(*viewport, state, settings, palette);
                renderer.render(&scene);
            }
        });
        if drawn {
            self.frame_monitor.end_frame();
        }
        drawn
    }

    // ------------------------------------------------------------------------
    // Tools & history
    // ------------------------------------------------------------------------

    /// Switch tools by id (`default`, `select`, `deselect`, `cleanup`).
    pub fn set_tool(&mut self, id: &str) -> EditorResult<()> {
        let tool: ToolMode = match id.parse() {
            Ok(tool) => tool,
            Err(err) => {
                self.report("set tool", &err);
                return Err(err);
            }
        };
        self.cancel_interaction();
        if self.store.state().tool != tool {
            tracing::debug!(tool = tool.id(), "Tool changed");
            self.store.mutate(|s| s.tool = tool);
        }
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_interaction();
        let undone = self.history.undo(&mut self.store);
        self.flush_effects();
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_interaction();
        let redone = self.history.redo(&mut self.store);
        self.flush_effects();
        redone
    }

    /// Forget every undo and redo step (e.g. after loading a saved plan).
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drop any in-progress gesture without committing it.
    pub fn cancel_interaction(&mut self) {
        if self.interaction.is_idle() {
            return;
        }
        tracing::debug!(state = self.interaction.name(), "Interaction cancelled");
        self.interaction.reset();
        self.ephemeral(SetOverlay::new(Overlay::None));
    }
}
