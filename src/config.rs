//! Runtime gameplay tuning, optionally loaded from `astrocade.toml`.
//!
//! [`Tuning`] mirrors every gameplay constant. At startup [`Tuning::load`]
//! looks for `astrocade.toml` next to the executable and overwrites the
//! defaults with any values present; missing keys keep their compiled
//! defaults, so a minimal file can override just the values you care about.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

// Compile-time defaults. The ship/asteroid/bullet/particle block is tuned
// for the classic cabinet feel at 60 FPS.
pub const SHIP_SIZE: f32 = 20.0;
pub const TURN_SPEED: f32 = 360.0; // degrees per second
pub const SHIP_THRUST: f32 = 10.0; // impulse per 1/60 s of held thrust
pub const FRICTION: f32 = 0.98; // decay factor per 1/60 s
pub const MAX_SPEED: f32 = 500.0;
pub const ASTEROID_SPEED: f32 = 50.0;
pub const ASTEROID_VERTICES: usize = 10;
pub const ASTEROID_JAG: f32 = 0.4;
pub const BULLET_SPEED: f32 = 500.0;
pub const BULLET_LIFETIME: f32 = 2.0; // seconds
pub const SHOOT_DELAY: f32 = 0.25;
pub const PARTICLE_LIFETIME: f32 = 1.0;
pub const THRUST_PARTICLE_SPEED: f32 = 100.0;
pub const EXPLOSION_PARTICLE_SPEED: f32 = 200.0;
pub const SCREEN_SHAKE_DURATION: f32 = 0.2;
pub const STARTING_LIVES: u32 = 3;
pub const LEVEL_BONUS: u32 = 1000;
pub const SPAWN_EXCLUSION_RADIUS: f32 = 100.0;
pub const UFO_SPEED: f32 = 100.0;
pub const UFO_SPAWN_INTERVAL: f32 = 15.0;
pub const UFO_SHOOT_INTERVAL: f32 = 1.5;
pub const UFO_BULLET_SPEED: f32 = 300.0;
pub const UFO_RADIUS_LARGE: f32 = 30.0;
pub const UFO_RADIUS_SMALL: f32 = 15.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse tuning file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Every gameplay constant, runtime-overridable.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub ship_size: f32,
    pub turn_speed: f32,
    pub ship_thrust: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub asteroid_speed: f32,
    pub asteroid_vertices: usize,
    pub asteroid_jag: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub shoot_delay: f32,
    pub particle_lifetime: f32,
    pub thrust_particle_speed: f32,
    pub explosion_particle_speed: f32,
    pub screen_shake_duration: f32,
    pub starting_lives: u32,
    pub level_bonus: u32,
    pub spawn_exclusion_radius: f32,
    pub ufo_speed: f32,
    pub ufo_spawn_interval: f32,
    pub ufo_shoot_interval: f32,
    pub ufo_bullet_speed: f32,
    pub ufo_radius_large: f32,
    pub ufo_radius_small: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            ship_size: SHIP_SIZE,
            turn_speed: TURN_SPEED,
            ship_thrust: SHIP_THRUST,
            friction: FRICTION,
            max_speed: MAX_SPEED,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_vertices: ASTEROID_VERTICES,
            asteroid_jag: ASTEROID_JAG,
            bullet_speed: BULLET_SPEED,
            bullet_lifetime: BULLET_LIFETIME,
            shoot_delay: SHOOT_DELAY,
            particle_lifetime: PARTICLE_LIFETIME,
            thrust_particle_speed: THRUST_PARTICLE_SPEED,
            explosion_particle_speed: EXPLOSION_PARTICLE_SPEED,
            screen_shake_duration: SCREEN_SHAKE_DURATION,
            starting_lives: STARTING_LIVES,
            level_bonus: LEVEL_BONUS,
            spawn_exclusion_radius: SPAWN_EXCLUSION_RADIUS,
            ufo_speed: UFO_SPEED,
            ufo_spawn_interval: UFO_SPAWN_INTERVAL,
            ufo_shoot_interval: UFO_SHOOT_INTERVAL,
            ufo_bullet_speed: UFO_BULLET_SPEED,
            ufo_radius_large: UFO_RADIUS_LARGE,
            ufo_radius_small: UFO_RADIUS_SMALL,
        }
    }
}

impl Tuning {
    /// Load tuning from the given path, falling back to defaults if the file
    /// is absent or malformed. A missing file is not an error; a broken one
    /// is logged and ignored so a typo cannot take the game down.
    pub fn load(path: &Path) -> Tuning {
        match Self::read(path) {
            Ok(tuning) => {
                info!(path = %path.display(), "loaded tuning overrides");
                tuning
            }
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Tuning::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring tuning file");
                Tuning::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Tuning, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
