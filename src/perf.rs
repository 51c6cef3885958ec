//! Timing for frames and hot paths.
//!
//! [`FrameMonitor`] keeps a short window of `Editor::run_frame` durations and
//! counts the frames that blew the budget. [`ScopedTimer`] and the
//! [`profile_scope!`] macro time a block and log it when it runs long; with
//! the `profiling` feature off the macro compiles to nothing.
//!
//! ```ignore
//! use floorgrid::profile_scope;
//!
//! fn extract(cells: &CellSet) -> Outline {
//!     profile_scope!("outline_extract");
//!     // ...
//! }
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// Frame budget at 60 Hz, in milliseconds
pub const TARGET_FRAME_MS: f64 = 16.67;

/// A frame counts as slow past this multiple of the budget
const SLOW_FRAME_FACTOR: f64 = 2.0;

/// Frames kept for the rolling statistics
const WINDOW: usize = 60;

fn as_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Time the enclosing scope. Expands to nothing without the `profiling` feature.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _scope = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _scope = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

/// Rolling statistics over drawn frames.
#[derive(Debug, Default)]
pub struct FrameMonitor {
    window: VecDeque<Duration>,
    started: Option<Instant>,
    drawn: u64,
    over_budget: u64,
}

impl FrameMonitor {
    pub fn new() -> Self {
        Self {
            window: VecDeque::with_capacity(WINDOW),
            ..Self::default()
        }
    }

    pub fn begin_frame(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the frame opened by `begin_frame` and return its length in
    /// milliseconds. A frame that was never begun is not counted.
    pub fn end_frame(&mut self) -> Option<f64> {
        let elapsed = self.started.take()?.elapsed();
        if self.window.len() == WINDOW {
            self.window.pop_front();
        }
        self.window.push_back(elapsed);
        self.drawn += 1;

        let ms = as_ms(elapsed);
        if ms > TARGET_FRAME_MS * SLOW_FRAME_FACTOR {
            self.over_budget += 1;
            warn!(frame_ms = format!("{ms:.2}"), budget_ms = TARGET_FRAME_MS, "Frame over budget");
        }
        Some(ms)
    }

    pub fn average_frame_time(&self) -> f64 {
        match self.window.len() {
            0 => 0.0,
            n => as_ms(self.window.iter().sum::<Duration>()) / n as f64,
        }
    }

    pub fn max_frame_time(&self) -> f64 {
        self.window.iter().max().map_or(0.0, |d| as_ms(*d))
    }

    pub fn total_frames(&self) -> u64 {
        self.drawn
    }

    pub fn slow_frame_percentage(&self) -> f64 {
        if self.drawn == 0 {
            0.0
        } else {
            self.over_budget as f64 * 100.0 / self.drawn as f64
        }
    }
}

/// Warns on drop if the guarded block took longer than its threshold.
pub struct ScopedTimer {
    label: &'static str,
    started: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(label: &'static str, threshold_ms: f64) -> Self {
        Self { label, started: Instant::now(), threshold_ms }
    }

    /// 1ms threshold, used by `profile_scope!`.
    pub fn for_profiling(label: &'static str) -> Self {
        Self::new(label, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_ms(self.started.elapsed())
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            #[cfg(feature = "profiling")]
            trace!(scope = self.label, "{elapsed_ms:.2}ms");
            #[cfg(not(feature = "profiling"))]
            warn!(scope = self.label, elapsed_ms = format!("{elapsed_ms:.2}"), "Slow scope");
        }
    }
}

/// Run `f`, returning its result and how long it took in milliseconds.
#[inline]
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let value = f();
    (value, as_ms(started.elapsed()))
}

/// Run `f` and warn when it exceeds `threshold_ms`.
#[inline]
pub fn measure_and_log<T>(label: &str, threshold_ms: f64, f: impl FnOnce() -> T) -> T {
    let (value, elapsed_ms) = measure(f);
    if elapsed_ms > threshold_ms {
        warn!(scope = label, elapsed_ms = format!("{elapsed_ms:.2}"), threshold_ms, "Slow scope");
    }
    value
}
