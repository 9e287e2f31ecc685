//! Gameplay tuning
//!
//! Every number the behaviors use lives here so a level designer can override
//! it with a JSON file. Missing fields fall back to the defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Failure to produce a usable [`Tuning`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Tank ===
    /// Hull speed (units per second)
    pub tank_speed: f32,
    /// Hull turn rate (radians per second)
    pub tank_turn_speed: f32,
    /// Hull half extents (length along heading, width)
    pub tank_half_size: Vec2,
    /// Distance from hull center to the muzzle along the aim direction
    pub muzzle_offset: f32,
    /// Initial aim point distance ahead of a freshly spawned tank
    pub aim_offset: f32,

    // === Bullet ===
    pub bullet_speed: f32,
    pub bullet_half_size: Vec2,
    /// Wall bounces before the next wall hit destroys the bullet
    pub bullet_bounces: u32,

    // === Mine ===
    /// Seconds from planting to detonation
    pub mine_countdown: f32,
    pub mine_half_size: Vec2,
    /// Warning light toggles every period
    pub mine_blink_period: f32,

    // === Explosion ===
    /// Seconds an explosion stays active
    pub explosion_lifetime: f32,
    /// Radius reached at the end of the lifetime
    pub explosion_radius: f32,
    /// Collision box of the explosion marker itself
    pub explosion_half_size: Vec2,

    // === Level ===
    /// Edge length of a wall cell
    pub wall_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tank_speed: 2.25,
            tank_turn_speed: 3.0,
            tank_half_size: Vec2::new(0.54, 0.42),
            muzzle_offset: 0.44,
            aim_offset: 3.0,

            bullet_speed: 6.0,
            bullet_half_size: Vec2::new(0.2, 0.06),
            bullet_bounces: 1,

            mine_countdown: 5.0,
            mine_half_size: Vec2::new(0.1, 0.1),
            mine_blink_period: 0.5,

            explosion_lifetime: 0.2,
            explosion_radius: 3.0,
            explosion_half_size: Vec2::new(0.05, 0.05),

            wall_size: 1.0,
        }
    }
}

fn check_extent(field: &'static str, v: Vec2) -> Result<(), ConfigError> {
    if !v.is_finite() || v.x < 0.0 || v.y < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "half extents must be finite and non-negative",
        });
    }
    Ok(())
}

fn check_positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if !v.is_finite() || v <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be finite and greater than zero",
        });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if !v.is_finite() || v < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be finite and non-negative",
        });
    }
    Ok(())
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load tuning, falling back to defaults when the file is unusable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::warn!("{err}; using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values that would break geometry or timer invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extent("tank_half_size", self.tank_half_size)?;
        check_extent("bullet_half_size", self.bullet_half_size)?;
        check_extent("mine_half_size", self.mine_half_size)?;
        check_extent("explosion_half_size", self.explosion_half_size)?;

        check_non_negative("tank_speed", self.tank_speed)?;
        check_non_negative("tank_turn_speed", self.tank_turn_speed)?;
        check_non_negative("bullet_speed", self.bullet_speed)?;
        check_non_negative("muzzle_offset", self.muzzle_offset)?;
        check_non_negative("aim_offset", self.aim_offset)?;
        check_non_negative("explosion_radius", self.explosion_radius)?;

        check_positive("mine_countdown", self.mine_countdown)?;
        check_positive("mine_blink_period", self.mine_blink_period)?;
        check_positive("explosion_lifetime", self.explosion_lifetime)?;
        check_positive("wall_size", self.wall_size)?;
        Ok(())
    }
}
