use crate::{
    config::{Arena, SimulationConfig, WallRestitution},
    grid::SpatialGrid,
    particle::Particle,
    vector::{Unit, Vector2},
};

/// Advances particles by one sub-step: motion, wall bounces and attraction.
///
/// A frame is split in [`sub_steps`](SimulationConfig::sub_steps) sub-steps, each moving
/// particles by the corresponding fraction of their velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct Integrator {
    arena: Arena,
    sub_steps: u32,
    walls: WallRestitution,
    attraction_strength: f64,
    max_velocity: f64,
}

impl Integrator {
    /// Creates an [`Integrator`] using the parameters of the given configuration.
    ///
    /// The configuration is expected to be [valid](SimulationConfig::validate), in particular to
    /// have at least one sub-step.
    pub fn from_config(config: &SimulationConfig) -> Self {
        debug_assert!(config.sub_steps > 0, "integrator needs at least one sub-step");

        Self {
            arena: config.arena,
            sub_steps: config.sub_steps,
            walls: config.walls,
            attraction_strength: config.attraction_strength,
            max_velocity: config.max_velocity,
        }
    }

    /// Integrates the particle and inserts it in the grid at its new position under the given id.
    #[inline]
    pub fn step(
        &self,
        id: usize,
        particle: &mut Particle,
        grid: &mut SpatialGrid,
        attraction_target: Option<Vector2>,
    ) {
        self.integrate(particle, attraction_target);
        grid.insert(id, particle.position);
    }

    /// Moves the particle, bounces it off the walls and pulls it toward the attraction target if any.
    pub fn integrate(&self, particle: &mut Particle, attraction_target: Option<Vector2>) {
        let sub_steps = self.sub_steps as f64;

        particle.position += particle.velocity / sub_steps;
        particle.velocity += particle.acceleration / sub_steps;

        self.bounce(particle);

        if let Some(target) = attraction_target {
            particle.velocity += self.attraction_force(particle.position, target) / sub_steps;

            if particle.velocity.length() > self.max_velocity {
                particle.velocity = particle.velocity.unit() * self.max_velocity;
            }
        }
    }

    /// Inverse-square pull exerted by `target` on a particle at `position`.
    ///
    /// Zero when the particle sits exactly on the target.
    ///
    /// ```
    /// # use jostle::prelude::*;
    /// let integrator = Integrator::from_config(&SimulationConfig::default());
    /// let position = Vector2::new(100.0, 100.0);
    ///
    /// let force = integrator.attraction_force(position, Vector2::new(110.0, 100.0));
    /// assert!((force - Vector2::new(66.74, 0.0)).length() < 1E-9);
    ///
    /// assert_eq!(integrator.attraction_force(position, position), Vector2::ZERO);
    /// ```
    #[inline]
    pub fn attraction_force(&self, position: Vector2, target: Vector2) -> Vector2 {
        let displacement = target - position;
        let distance_squared = displacement.length_squared();

        if distance_squared == 0.0 {
            return Vector2::ZERO;
        }

        displacement.unit() * (self.attraction_strength / distance_squared)
    }

    // Walls are handled one axis at a time, a corner hit bounces on both.
    fn bounce(&self, particle: &mut Particle) {
        let radius = particle.radius;
        let Arena { width, height } = self.arena;
        let (position, velocity) = (&mut particle.position, &mut particle.velocity);

        if position.x > width - radius {
            position.x = width - radius;
            velocity.x *= -self.walls.right;
        }
        if position.x < radius {
            position.x = radius;
            velocity.x *= -self.walls.left;
        }
        if position.y > height - radius {
            position.y = height - radius;
            velocity.y *= -self.walls.bottom;
        }
        if position.y < radius {
            position.y = radius;
            velocity.y *= -self.walls.top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Color;

    const EPSILON: f64 = 1E-9;

    fn integrator(width: f64, height: f64) -> Integrator {
        Integrator::from_config(&SimulationConfig {
            arena: Arena::new(width, height),
            ..Default::default()
        })
    }

    fn particle(position: (f64, f64), velocity: (f64, f64)) -> Particle {
        Particle::new(
            Vector2::from(position),
            Vector2::from(velocity),
            10.0,
            Color::RED,
        )
    }

    #[test]
    fn moves_by_a_fraction_of_the_velocity() {
        let integrator = integrator(1000.0, 1000.0);
        let mut p = particle((100.0, 100.0), (5.0, -20.0));
        p.acceleration = Vector2::new(1.0, 2.0);

        integrator.integrate(&mut p, None);

        assert!((p.position - Vector2::new(100.5, 98.0)).length() < EPSILON);
        assert!((p.velocity - Vector2::new(5.1, -19.8)).length() < EPSILON);
    }

    #[test]
    fn top_left_corner_bounce() {
        let integrator = integrator(1000.0, 1000.0);
        let mut p = particle((5.0, 5.0), (-10.0, -10.0));

        integrator.integrate(&mut p, None);

        assert_eq!(p.position, Vector2::new(10.0, 10.0));
        assert_eq!(p.velocity, Vector2::new(5.0, 10.0));
    }

    #[test]
    fn bottom_right_corner_bounce() {
        let integrator = integrator(1000.0, 500.0);
        let mut p = particle((995.0, 495.0), (20.0, 20.0));

        integrator.integrate(&mut p, None);

        assert_eq!(p.position, Vector2::new(990.0, 490.0));
        assert!((p.velocity - Vector2::new(-10.0, -7.0)).length() < EPSILON);
    }

    #[test]
    fn attraction_at_target_is_zero() {
        let integrator = integrator(1000.0, 1000.0);
        let mut p = particle((300.0, 300.0), (0.0, 0.0));

        integrator.integrate(&mut p, Some(Vector2::new(300.0, 300.0)));

        assert_eq!(p.velocity, Vector2::ZERO);
        assert_eq!(p.position, Vector2::new(300.0, 300.0));
        assert!(p.velocity.is_finite() && p.position.is_finite());
    }

    #[test]
    fn attraction_pulls_toward_target() {
        let integrator = integrator(1000.0, 1000.0);
        let mut p = particle((300.0, 300.0), (0.0, 0.0));

        integrator.integrate(&mut p, Some(Vector2::new(300.0, 400.0)));

        // 6674 / 100^2 / 10 sub-steps
        assert!((p.velocity - Vector2::new(0.0, 0.06674)).length() < EPSILON);
    }

    #[test]
    fn attraction_clamps_velocity() {
        let integrator = integrator(1000.0, 1000.0);
        let mut p = particle((300.0, 300.0), (14.0, 0.0));

        integrator.integrate(&mut p, Some(Vector2::new(303.0, 300.0)));

        assert!((p.velocity.length() - 15.0).abs() < EPSILON);
        assert!(p.velocity.x > 0.0);
    }

    #[test]
    fn no_clamp_without_target() {
        let integrator = integrator(1000.0, 1000.0);
        let mut p = particle((300.0, 300.0), (40.0, 0.0));

        integrator.integrate(&mut p, None);

        assert_eq!(p.velocity, Vector2::new(40.0, 0.0));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn zero_sub_steps() {
        Integrator::from_config(&SimulationConfig {
            sub_steps: 0,
            ..Default::default()
        });
    }

    #[test]
    fn step_inserts_in_grid() {
        let integrator = integrator(1000.0, 1000.0);
        let mut grid = SpatialGrid::new(integrator.arena, 50, 30);
        let mut p = particle((5.0, 5.0), (-10.0, -10.0));

        integrator.step(7, &mut p, &mut grid, None);

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.cell(0, 0), &[7]);
    }
}
