use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, particle::Color, vector::Vector2};

/// Speed particles are clamped to while an attraction target is active.
pub const MAX_VELOCITY: f64 = 15.0;

/// Number of sub-steps a frame is divided in.
pub const SUB_STEPS: u32 = 10;

/// Number of broad-phase cells along the x axis.
pub const GRID_WIDTH: usize = 50;

/// Number of broad-phase cells along the y axis.
pub const GRID_HEIGHT: usize = 30;

/// Radius shared by every particle.
pub const RADIUS: f64 = 10.0;

/// Restitution coefficient of particle-particle collisions.
pub const ELASTICITY: f64 = 0.1;

/// Strength of the inverse-square pull exerted by an attraction target.
pub const ATTRACTION_STRENGTH: f64 = 6.674E3;

/// Number of particles placed at random when a simulation is created.
pub const PARTICLE_COUNT: usize = 1000;

/// Rectangular region particles are confined to, spanning `[0, width] x [0, height]`.
///
/// The y axis points down: `y = 0` is the top wall and `y = height` the bottom one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Arena {
    /// Creates a new [`Arena`] of the given size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of the arena as a vector.
    #[inline]
    pub fn size(&self) -> Vector2 {
        Vector2::new(self.width, self.height)
    }

    /// Returns true if a circle of the given radius centered on `position` lies entirely inside the arena.
    #[inline]
    pub fn contains(&self, position: Vector2, radius: f64) -> bool {
        (radius..=self.width - radius).contains(&position.x)
            && (radius..=self.height - radius).contains(&position.y)
    }
}

impl Default for Arena {
    #[inline]
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Factors the velocity component normal to a wall is scaled by, then negated, when a particle hits it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallRestitution {
    /// Wall at `x = 0`.
    pub left: f64,
    /// Wall at `x = width`.
    pub right: f64,
    /// Wall at `y = 0`.
    pub top: f64,
    /// Wall at `y = height`, the floor.
    pub bottom: f64,
}

impl Default for WallRestitution {
    #[inline]
    fn default() -> Self {
        Self {
            left: 0.5,
            right: 0.5,
            top: 1.0,
            bottom: 0.35,
        }
    }
}

/// How the broad-phase enumerates the candidate pairs of neighbouring cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairPolicy {
    /// Every cell scans its full 3x3 neighbourhood, so each pair is visited twice, once in each order.
    ///
    /// The second visit bleeds a little more relative velocity out of the pair.
    #[default]
    AllNeighbors,
    /// Every unordered pair is visited exactly once.
    Unique,
}

/// Everything needed to build a [`Simulation`](crate::simulation::Simulation).
///
/// Missing fields take the default constants of this module when deserializing:
///
/// ```
/// # use jostle::prelude::*;
/// let config = SimulationConfig {
///     arena: Arena::new(1000.0, 600.0),
///     particle_count: 250,
///     ..Default::default()
/// };
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.cell_size(), Vector2::new(20.0, 20.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Region the particles are confined to.
    pub arena: Arena,
    /// Number of particles placed at random on creation.
    pub particle_count: usize,
    /// Number of broad-phase cells along x.
    pub grid_width: usize,
    /// Number of broad-phase cells along y.
    pub grid_height: usize,
    /// Radius shared by every particle.
    pub radius: f64,
    /// Number of sub-steps per frame.
    pub sub_steps: u32,
    /// Speed clamp applied while an attraction target is active.
    pub max_velocity: f64,
    /// Restitution coefficient of particle-particle collisions.
    pub elasticity: f64,
    /// Strength of the inverse-square attraction.
    pub attraction_strength: f64,
    /// Restitution of each wall.
    pub walls: WallRestitution,
    /// Uniform acceleration applied to every particle, in arena units per frame squared.
    pub gravity: Vector2,
    /// Candidate pair enumeration of the broad-phase.
    pub pair_policy: PairPolicy,
    /// Color of the initial particles.
    pub color: Color,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            particle_count: PARTICLE_COUNT,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            radius: RADIUS,
            sub_steps: SUB_STEPS,
            max_velocity: MAX_VELOCITY,
            elasticity: ELASTICITY,
            attraction_strength: ATTRACTION_STRENGTH,
            walls: WallRestitution::default(),
            gravity: Vector2::ZERO,
            pair_policy: PairPolicy::default(),
            color: Color::default(),
        }
    }
}

impl SimulationConfig {
    /// Size of a broad-phase cell.
    #[inline]
    pub fn cell_size(&self) -> Vector2 {
        Vector2::new(
            self.arena.width / self.grid_width as f64,
            self.arena.height / self.grid_height as f64,
        )
    }

    /// Checks that the configuration describes a simulation whose collisions are all detected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Arena { width, height } = self.arena;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }

        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }

        // Two touching particles are at most a diameter apart, which must not span more than one cell.
        let cell_size = self.cell_size();
        let diameter = self.radius * 2.0;
        if cell_size.x < diameter || cell_size.y < diameter {
            return Err(ConfigError::CellTooSmall {
                cell_width: cell_size.x,
                cell_height: cell_size.y,
                diameter,
            });
        }

        if self.sub_steps == 0 {
            return Err(ConfigError::NoSubSteps);
        }

        if !(self.max_velocity.is_finite() && self.max_velocity > 0.0) {
            return Err(ConfigError::InvalidMaxVelocity(self.max_velocity));
        }

        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(ConfigError::InvalidElasticity(self.elasticity));
        }

        Ok(())
    }
}
