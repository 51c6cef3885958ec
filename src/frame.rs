//! Frame coalescing.
//!
//! Redraws are requested on every state change but drawn at most once per
//! display refresh:
//!
//! ```text
//! Idle      --request--> Scheduled      (host must schedule a frame callback)
//! Scheduled --request--> Scheduled      (collapsed)
//! Scheduled --begin----> Drawing
//! Drawing   --request--> Drawing{pending}
//! Drawing   --end------> Idle | Scheduled (exactly one more frame if pending)
//! ```
//!
//! The scheduler is a cheap cloneable handle so a renderer can ask for another
//! frame from inside a draw. Everything runs on the UI thread, so the handle is
//! `Rc<Cell<_>>` and not `Send`.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FramePhase {
    #[default]
    Idle,
    Scheduled,
    Drawing { pending: bool },
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameInner {
    phase: FramePhase,
    frames_drawn: u64,
    requests: u64,
}

/// Shared frame state. Clones refer to the same scheduler.
#[derive(Clone, Debug, Default)]
pub struct FrameScheduler {
    inner: Rc<Cell<FrameInner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<R>(&self, f: impl FnOnce(&mut FrameInner) -> R) -> R {
        let mut inner = self.inner.get();
        let result = f(&mut inner);
        self.inner.set(inner);
        result
    }

    /// Ask for a redraw. Returns true when the caller must schedule a frame
    /// callback (the scheduler was idle); false when one is already coming.
    pub fn request(&self) -> bool {
        self.update(|inner| {
            inner.requests += 1;
            match inner.phase {
                FramePhase::Idle => {
                    inner.phase = FramePhase::Scheduled;
                    true
                }
                FramePhase::Scheduled => false,
                FramePhase::Drawing { .. } => {
                    inner.phase = FramePhase::Drawing { pending: true };
                    false
                }
            }
        })
    }

    /// Enter the draw. False if no frame was scheduled (nothing to draw).
    pub fn begin(&self) -> bool {
        self.update(|inner| {
            if inner.phase != FramePhase::Scheduled {
                return false;
            }
            inner.phase = FramePhase::Drawing { pending: false };
            true
        })
    }

    /// Leave the draw. Returns true when a request arrived mid-draw and one
    /// further frame is now scheduled.
    pub fn end(&self) -> bool {
        self.update(|inner| {
            let FramePhase::Drawing { pending } = inner.phase else {
                return false;
            };
            inner.frames_drawn += 1;
            inner.phase = if pending { FramePhase::Scheduled } else { FramePhase::Idle };
            pending
        })
    }

    pub fn phase(&self) -> FramePhase {
        self.inner.get().phase
    }

    pub fn is_scheduled(&self) -> bool {
        self.phase() == FramePhase::Scheduled
    }

    pub fn frames_drawn(&self) -> u64 {
        self.inner.get().frames_drawn
    }

    pub fn requests(&self) -> u64 {
        self.inner.get().requests
    }
}
