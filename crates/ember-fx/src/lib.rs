//! Page effect models for the ember site enhancements.
//!
//! This crate holds everything that has state or logic: the particle field
//! and its animator, the list shuffler, the key-sequence easter egg, scroll
//! state, the typewriter, the viewport watch registry and the small DOM
//! effects (form feedback, print mode, fragment navigation). Drawing and
//! element access go through the [`Surface`], [`Stage`] and [`ElementOps`]
//! traits so the browser binding and the terminal preview share one
//! implementation.

pub mod animator;
pub mod effect;
pub mod element;
pub mod form;
pub mod navigation;
pub mod particles;
pub mod print;
pub mod scroll;
pub mod sequence;
pub mod setup;
pub mod shuffle;
mod surface;
pub mod typing;
pub mod watch;

#[cfg(test)]
mod test_support;

pub use animator::{ParticleAnimator, Stage};
pub use effect::{EasterEgg, TimedEffect};
pub use element::{ElementOps, Reaction, clear_hidden, prepare_hidden};
pub use particles::{Link, Particle, ParticleField};
pub use scroll::{FrameGate, ScrollMetrics, ScrollView};
pub use sequence::KeySequence;
pub use setup::Setup;
pub use shuffle::shuffle;
pub use surface::Surface;
pub use watch::{Report, TargetKeys, Triggered, Watch, WatchRegistry};
