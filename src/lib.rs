//! Ouitanks - top-down tank arena
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (OBB collisions, actor lifecycle, behaviors)
//! - `settings`: Data-driven gameplay tuning
//!
//! Rendering, audio, input capture and networking live outside this crate and
//! talk to it through [`sim::TickInput`], [`sim::GameEvent`] and
//! [`sim::ActorSnapshot`].

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Level grid dimensions (cells)
    pub const LEVEL_WIDTH: usize = 23;
    pub const LEVEL_HEIGHT: usize = 17;

    /// Gap left between a pushed-out mover and its obstacle
    pub const CONTACT_SKIN: f32 = 1e-4;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU itself
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Rotate `v` counter-clockwise by `angle`
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
