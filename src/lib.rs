//! # Jostle
//!
//! Jostle is a crate simulating many circular particles bouncing inside a rectangular arena in Rust.
//!
//! ## Goals
//!
//! The main goal of this crate is to provide a small physics kernel that can be driven by any
//! rendering or windowing layer. It does not draw, read input or schedule frames: the caller steps
//! the [`Simulation`](simulation::Simulation) and reads its particles back.
//!
//! Collisions are found with a uniform [`SpatialGrid`](grid::SpatialGrid) rebuilt every sub-step, so
//! only particles in the same or adjacent cells are tested against each other. Overlapping
//! particles are pushed apart, then lose part of their approaching velocity through an impulse.
//! All particles share the same radius and mass.
//!
//! # Using Jostle
//!
//! ## Setting up the simulation
//!
//! Either give the arena, particle count, grid resolution and radius, or a full
//! [`SimulationConfig`](config::SimulationConfig):
//!
//! ```
//! # use jostle::prelude::*;
//! let mut simulation = Simulation::from_config(SimulationConfig {
//!     arena: Arena::new(1280.0, 720.0),
//!     particle_count: 500,
//!     ..Default::default()
//! })?;
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! The grid cells must be at least as large as a particle's diameter, otherwise creating the
//! simulation fails with a [`ConfigError`](error::ConfigError).
//!
//! ## Stepping and reading the particles
//!
//! Call [`step_frame`](simulation::Simulation::step_frame) once per rendered frame. It runs
//! [`SUB_STEPS`](config::SUB_STEPS) sub-steps by default.
//!
//! ```
//! # use jostle::prelude::*;
//! # let mut simulation = Simulation::new(1280.0, 720.0, 500, 50, 30, 10.0)?;
//! // Pull particles toward the pointer while a button is held.
//! simulation.set_attraction_target(Some(Vector2::new(640.0, 360.0)));
//! simulation.step_frame();
//!
//! for particle in simulation.particles() {
//!     let color = Color::from_speed(particle.speed());
//!     // draw a circle of `particle.radius` at `particle.position`...
//! #   let _ = color;
//! }
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## Spawning particles over time
//!
//! Particles can be added directly with [`spawn`](simulation::Simulation::spawn) between frames,
//! or scheduled in a [`SpawnQueue`](spawn::SpawnQueue) polled by the frame loop.

#![warn(missing_docs)]

/// Resolution of collisions between pairs of particles.
pub mod collision;

/// Simulation parameters and their defaults.
pub mod config;

/// Errors returned when building a simulation.
pub mod error;

/// Uniform grid broad-phase.
pub mod grid;

/// Motion of particles over a sub-step.
pub mod integrator;

/// Circular bodies and their display tag.
pub mod particle;

/// Ownership and stepping of the particles.
pub mod simulation;

/// Delayed spawning of particles.
pub mod spawn;

/// Vector type and direction helpers.
pub mod vector;

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::collision::CollisionResolver;
    pub use crate::config::{Arena, PairPolicy, SimulationConfig, WallRestitution};
    pub use crate::error::ConfigError;
    pub use crate::grid::SpatialGrid;
    pub use crate::integrator::Integrator;
    pub use crate::particle::{Color, Particle};
    pub use crate::simulation::Simulation;
    pub use crate::spawn::{SpawnQueue, SpawnRequest};
    pub use crate::vector::{Unit, Vector2};
}
