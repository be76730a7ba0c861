use bevy::prelude::*;

pub mod field;
pub mod glyphs;
pub mod grid;
pub mod interaction;
pub mod resize;
pub mod ripples;

/// Ordering of the per-frame simulation sweep: new sources first, then fish
/// movement, then the cell sampling pass, and expiry pruning last so a
/// source is still sampled on the frame it crosses the expiry bound.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FrameOrder {
    Spawn,
    Move,
    Sample,
    Prune,
}
