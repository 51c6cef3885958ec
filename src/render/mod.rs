//! Rendering contract.
//!
//! The editor does not draw. Once per frame it builds a [`Scene`] from the
//! current state and hands it to the attached [`Renderer`].
//!
//! - `scene` - Draw commands, scene building, the `Renderer` trait
//! - `palette` - Light and dark color sets

pub mod palette;
pub mod scene;

pub use palette::{Hsla, Palette, hsla};
pub use scene::{DrawCommand, Renderer, Scene, Viewport, WorldRect, build_scene};
