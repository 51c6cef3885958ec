//! State store with subscriber notification.
//!
//! The store is the single writer of [`EditorState`]. Every mutation requests
//! a frame; subscribers run once per drawn frame no matter how many mutations
//! happened since the last one. `transaction` groups nested mutations so they
//! issue a single frame request.
//!
//! Commands that change regions go through [`Store::mutate_regions`], which
//! bumps the region revision the hit-test index keys its rebuilds on.

use crate::cells::CellSet;
use crate::frame::FrameScheduler;
use crate::profile_scope;
use crate::types::{GridBounds, Overlay, Region, RegionId, ToolMode};
use crate::view::View;

/// Everything the editor draws and edits.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    pub view: View,
    /// Committed regions, oldest first
    pub regions: Vec<Region>,
    pub selection: CellSet,
    pub hover: Option<RegionId>,
    pub selected: Option<RegionId>,
    pub overlay: Overlay,
    pub tool: ToolMode,
    /// Next locally assigned region id
    pub next_region_id: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            view: View::default(),
            regions: Vec::new(),
            selection: CellSet::new(),
            hover: None,
            selected: None,
            overlay: Overlay::None,
            tool: ToolMode::Default,
            next_region_id: 1,
        }
    }
}

impl EditorState {
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|region| region.id == id)
    }

    pub fn region_position(&self, id: RegionId) -> Option<usize> {
        self.regions.iter().position(|region| region.id == id)
    }
}

/// A region change the persistence layer may need to hear about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Created { id: RegionId, name: String, cells: CellSet },
    Updated { id: RegionId, cells: CellSet },
    Removed { id: RegionId },
}

pub type Subscriber = Box<dyn FnMut(&EditorState)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Store {
    state: EditorState,
    bounds: GridBounds,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    frames: FrameScheduler,
    frame_requester: Option<Box<dyn FnMut()>>,
    transaction_depth: usize,
    deferred_request: bool,
    region_revision: u64,
    effects: Vec<Effect>,
}

impl Store {
    pub fn new(state: EditorState, bounds: GridBounds) -> Self {
        Self {
            state,
            bounds,
            subscribers: Vec::new(),
            next_subscription: 0,
            frames: FrameScheduler::new(),
            frame_requester: None,
            transaction_depth: 0,
            deferred_request: false,
            region_revision: 0,
            effects: Vec::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: GridBounds) {
        self.bounds = bounds;
    }

    /// Bumped on every region-list change.
    pub fn region_revision(&self) -> u64 {
        self.region_revision
    }

    /// Apply a state transition and request a redraw.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        let result = f(&mut self.state);
        self.request_frame();
        result
    }

    /// Like [`Store::mutate`] for transitions that touch `regions`.
    pub fn mutate_regions<R>(&mut self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        self.region_revision += 1;
        self.mutate(f)
    }

    /// Run `f` with frame requests held back; one request is issued at the
    /// end of the outermost transaction if anything mutated.
    pub fn transaction<R>(&mut self, f: impl FnOnce(&mut Store) -> R) -> R {
        self.begin_transaction();
        let result = f(self);
        self.end_transaction();
        result
    }

    /// Open a transaction spanning calls that need more than the store.
    /// Must be paired with [`Store::end_transaction`].
    pub(crate) fn begin_transaction(&mut self) {
        self.transaction_depth += 1;
    }

    pub(crate) fn end_transaction(&mut self) {
        self.transaction_depth = self.transaction_depth.saturating_sub(1);
        if self.transaction_depth == 0 && std::mem::take(&mut self.deferred_request) {
            self.request_frame();
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction_depth > 0
    }

    fn request_frame(&mut self) {
        if self.transaction_depth > 0 {
            self.deferred_request = true;
            return;
        }
        if self.frames.request() {
            if let Some(requester) = self.frame_requester.as_mut() {
                requester();
            }
        }
    }

    /// Called by the host when a frame it scheduled comes due. Notifies every
    /// subscriber once; returns false if no frame was pending.
    pub fn run_frame(&mut self) -> bool {
        self.run_frame_with(|_| {})
    }

    /// Like [`Store::run_frame`], calling `draw` after the subscribers.
    pub fn run_frame_with(&mut self, draw: impl FnOnce(&EditorState)) -> bool {
        profile_scope!("run_frame");

        if !self.frames.begin() {
            return false;
        }
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
        draw(&self.state);
        if self.frames.end() {
            if let Some(requester) = self.frame_requester.as_mut() {
                requester();
            }
        }
        true
    }

    /// Hook fired whenever a new frame must be scheduled (e.g. the host's
    /// animation-frame request).
    pub fn set_frame_requester(&mut self, requester: impl FnMut() + 'static) {
        self.frame_requester = Some(Box::new(requester));
    }

    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&EditorState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub(crate) fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub(crate) fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("subscribers", &self.subscribers.len())
            .field("region_revision", &self.region_revision)
            .finish()
    }
}
