// Time-driven animation: part explode/assemble and grid scrolling

pub mod explode;
pub mod grid;
pub mod interpolation;
pub mod types;

pub use explode::{DEFAULT_EXPLODE_RATE, ExplodeAnimator, PoseFrame};
pub use grid::GridScroller;
pub use interpolation::Easing;
pub use types::*;
