//! Core types shared by the ember crates.
//!
//! Holds the page configuration (every tunable constant of the site effects,
//! with defaults matching the published theme) and the accent color helpers
//! used by both the browser and terminal renderers.

pub mod color;
pub mod config;
mod error;

pub use color::Rgb;
pub use config::{
    CategoryConfig, EasterEggConfig, EnhancementConfig, FormConfig, LazyImageConfig, LinkConfig,
    ParticleConfig, PrintConfig, RevealConfig, ScrollConfig, ShuffleConfig, TypingConfig,
};
pub use error::ConfigError;
