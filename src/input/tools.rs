//! Press strategies per tool.
//!
//! Pointer-down looks the active tool up in [`STRATEGIES`] to decide which
//! gesture a press starts. Forced tools ignore what is under the pointer;
//! the default tool drags a hit region and box-selects otherwise.

use crate::input::events::Modifiers;
use crate::types::{RegionId, ToolMode};

/// Gesture a press starts (panning is decided before tools are consulted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Box { subtract: bool },
    Relocate(RegionId),
    Stroke,
}

/// What the strategy can see about the press.
#[derive(Debug, Clone, Copy, Default)]
pub struct PressContext {
    /// Innermost region under the press, for tools that hit-test
    pub hit: Option<RegionId>,
    pub modifiers: Modifiers,
}

pub type Strategy = fn(&PressContext) -> Gesture;

/// Tool id -> strategy.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("default", default_press),
    ("select", |_| Gesture::Box { subtract: false }),
    ("deselect", |_| Gesture::Box { subtract: true }),
    ("cleanup", |_| Gesture::Stroke),
];

fn default_press(ctx: &PressContext) -> Gesture {
    match ctx.hit {
        Some(region) => Gesture::Relocate(region),
        None => Gesture::Box { subtract: ctx.modifiers.alt },
    }
}

pub fn strategy_for(tool: ToolMode) -> Strategy {
    STRATEGIES
        .iter()
        .find(|(id, _)| *id == tool.id())
        .map(|(_, strategy)| *strategy)
        .unwrap_or(default_press)
}

/// Whether the tool needs a hit-test on press.
pub fn needs_hit_test(tool: ToolMode) -> bool {
    !tool.is_forced()
}
