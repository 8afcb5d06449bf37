use thiserror::Error;

/// Reasons a [`SimulationConfig`](crate::config::SimulationConfig) cannot drive a simulation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The arena has a non-positive or non-finite dimension.
    #[error("arena must have a positive finite size, got {width}x{height}")]
    InvalidArena {
        /// Width of the arena.
        width: f64,
        /// Height of the arena.
        height: f64,
    },

    /// The grid has no cell along one of its axes.
    #[error("grid must have at least one cell per axis, got {width}x{height}")]
    EmptyGrid {
        /// Number of cells along x.
        width: usize,
        /// Number of cells along y.
        height: usize,
    },

    /// The particle radius is non-positive or non-finite.
    #[error("particle radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// A grid cell is narrower than a particle, so colliding particles could sit two cells apart.
    #[error(
        "grid cells of {cell_width}x{cell_height} are smaller than the particle diameter {diameter}"
    )]
    CellTooSmall {
        /// Width of a cell.
        cell_width: f64,
        /// Height of a cell.
        cell_height: f64,
        /// Diameter of the particles.
        diameter: f64,
    },

    /// A frame must be split in at least one sub-step.
    #[error("at least one sub-step per frame is required")]
    NoSubSteps,

    /// The velocity clamp applied under attraction is non-positive or non-finite.
    #[error("maximum velocity must be positive and finite, got {0}")]
    InvalidMaxVelocity(f64),

    /// The restitution coefficient would inject energy into collisions.
    #[error("elasticity must lie in [0, 1], got {0}")]
    InvalidElasticity(f64),
}
