use rand::Rng;

use crate::{
    collision::{pair_mut, CollisionResolver},
    config::{Arena, SimulationConfig},
    error::ConfigError,
    grid::SpatialGrid,
    integrator::Integrator,
    particle::{Color, Particle},
    vector::Vector2,
};

/// The structure owning the particles and advancing them in time.
///
/// Each sub-step integrates every particle, re-buckets it in the [`SpatialGrid`], then resolves the
/// collisions between the candidate pairs the grid yields.
///
/// ```
/// # use jostle::prelude::*;
/// let mut simulation = Simulation::new(1000.0, 600.0, 0, 50, 30, 10.0)?;
///
/// simulation.spawn(Vector2::new(500.0, 300.0), Vector2::new(10.0, 0.0), Color::RED);
/// simulation.set_attraction_target(None);
/// simulation.step_frame();
///
/// assert_eq!(simulation.particles()[0].position, Vector2::new(510.0, 300.0));
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
    particles: Vec<Particle>,
    grid: SpatialGrid,
    integrator: Integrator,
    resolver: CollisionResolver,
    attraction_target: Option<Vector2>,
    collisions: usize,
}

impl Simulation {
    /// Creates a [`Simulation`] with `particle_count` motionless particles at random positions.
    ///
    /// Every other parameter takes its default value from [`config`](crate::config).
    pub fn new(
        arena_width: f64,
        arena_height: f64,
        particle_count: usize,
        grid_width: usize,
        grid_height: usize,
        radius: f64,
    ) -> Result<Self, ConfigError> {
        Self::from_config(SimulationConfig {
            arena: Arena::new(arena_width, arena_height),
            particle_count,
            grid_width,
            grid_height,
            radius,
            ..Default::default()
        })
    }

    /// Creates a [`Simulation`] from a configuration, placing the initial particles with the thread-local generator.
    pub fn from_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::from_config_with_rng(config, &mut rand::thread_rng())
    }

    /// Creates a [`Simulation`] from a configuration, placing the initial particles with the given generator.
    ///
    /// The same configuration and seed always give the same initial state.
    pub fn from_config_with_rng<R: Rng + ?Sized>(
        config: SimulationConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let particles = (0..config.particle_count)
            .map(|_| Particle::random(config.arena, config.radius, config.color, rng))
            .collect();

        tracing::debug!(
            particles = config.particle_count,
            grid_width = config.grid_width,
            grid_height = config.grid_height,
            arena_width = config.arena.width,
            arena_height = config.arena.height,
            "created simulation"
        );

        Ok(Self {
            grid: SpatialGrid::new(config.arena, config.grid_width, config.grid_height),
            integrator: Integrator::from_config(&config),
            resolver: CollisionResolver::new(config.elasticity),
            attraction_target: None,
            collisions: 0,
            particles,
            config,
        })
    }
}

impl Simulation {
    /// Adds a particle with the shared radius.
    ///
    /// It is integrated, and therefore moved inside the arena, on the next sub-step.
    #[inline]
    pub fn spawn(&mut self, position: Vector2, velocity: Vector2, color: Color) {
        self.particles
            .push(Particle::new(position, velocity, self.config.radius, color));
    }

    /// Sets the point particles are pulled toward, or stops the pull with `None`.
    #[inline]
    pub fn set_attraction_target(&mut self, target: Option<Vector2>) {
        self.attraction_target = target;
    }

    /// The point particles are currently pulled toward, if any.
    #[inline]
    pub const fn attraction_target(&self) -> Option<Vector2> {
        self.attraction_target
    }

    /// Advances the simulation by one sub-step.
    ///
    /// Separating a pair resting against a wall can push one of them past it. It is moved back
    /// inside, and its velocity reflected, when it is integrated on the next sub-step.
    pub fn step_substep(&mut self) {
        let Self {
            config,
            particles,
            grid,
            integrator,
            resolver,
            attraction_target,
            collisions,
        } = self;

        grid.clear();

        for (id, particle) in particles.iter_mut().enumerate() {
            particle.acceleration = config.gravity;
            integrator.step(id, particle, grid, *attraction_target);
        }

        *collisions = 0;
        grid.for_each_candidate_pair(config.pair_policy, |i, j| {
            let (a, b) = pair_mut(particles, i, j);
            if resolver.resolve(a, b) {
                *collisions += 1;
            }
        });
    }

    /// Advances the simulation by one frame, made of [`sub_steps`](SimulationConfig::sub_steps) sub-steps.
    pub fn step_frame(&mut self) {
        let mut collisions = 0;
        for _ in 0..self.config.sub_steps {
            self.step_substep();
            collisions += self.collisions;
        }

        tracing::trace!(
            particles = self.particles.len(),
            collisions,
            "stepped frame"
        );
    }
}

impl Simulation {
    /// The particles, in the order they were created.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if there are no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The broad-phase grid as built during the last sub-step.
    #[inline]
    pub const fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// The configuration the simulation was built with.
    #[inline]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The region particles are confined to.
    #[inline]
    pub const fn arena(&self) -> Arena {
        self.config.arena
    }

    /// Number of colliding pairs resolved during the last sub-step.
    ///
    /// With [`PairPolicy::AllNeighbors`](crate::config::PairPolicy::AllNeighbors) a pair counts once per visit.
    #[inline]
    pub const fn collisions(&self) -> usize {
        self.collisions
    }

    /// Sum of the kinetic energy of all the particles.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}
