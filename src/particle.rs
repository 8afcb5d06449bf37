use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{config::Arena, vector::Vector2};

/// Opaque display tag carried by a [`Particle`]. It has no effect on the physics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure red, the color particles get unless told otherwise.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Creates a [`Color`] from its three channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Shade of red proportional to a speed, saturating at a speed of 10 units per frame.
    ///
    /// ```
    /// # use jostle::prelude::*;
    /// assert_eq!(Color::from_speed(0.0), Color::rgb(0, 0, 0));
    /// assert_eq!(Color::from_speed(5.0), Color::rgb(127, 0, 0));
    /// assert_eq!(Color::from_speed(42.0), Color::RED);
    /// ```
    #[inline]
    pub fn from_speed(speed: f64) -> Self {
        let red = (speed * 255.0 / 10.0).clamp(0.0, 255.0);
        Self::rgb(red as u8, 0, 0)
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::RED
    }
}

/// A circular body moving in the arena.
///
/// All particles have the same mass, so collisions only depend on their positions, velocities and radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Center of the particle.
    pub position: Vector2,
    /// Velocity in arena units per frame.
    pub velocity: Vector2,
    /// Acceleration applied during the current sub-step.
    pub acceleration: Vector2,
    /// Radius used for collisions against other particles and the walls.
    pub radius: f64,
    /// Display tag.
    pub color: Color,
}

impl Particle {
    /// Creates a new [`Particle`] with no acceleration.
    #[inline]
    pub fn new(position: Vector2, velocity: Vector2, radius: f64, color: Color) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2::ZERO,
            radius,
            color,
        }
    }

    /// Creates a motionless [`Particle`] at a uniformly random position entirely inside the arena.
    pub fn random<R: Rng + ?Sized>(arena: Arena, radius: f64, color: Color, rng: &mut R) -> Self {
        let x = radius + rng.gen::<f64>() * (arena.width - radius * 2.0);
        let y = radius + rng.gen::<f64>() * (arena.height - radius * 2.0);

        Self::new(Vector2::new(x, y), Vector2::ZERO, radius, color)
    }

    /// Magnitude of the velocity.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Kinetic energy of the particle, taking its mass as one.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.velocity.length_squared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_particles_are_inside_the_arena() {
        let arena = Arena::new(100.0, 60.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let particle = Particle::random(arena, 10.0, Color::RED, &mut rng);

            assert!(particle.position.x >= 10.0 && particle.position.x <= 90.0);
            assert!(particle.position.y >= 10.0 && particle.position.y <= 50.0);
            assert_eq!(particle.velocity, Vector2::ZERO);
            assert_eq!(particle.acceleration, Vector2::ZERO);
        }
    }

    #[test]
    fn kinetic_energy_uses_unit_mass() {
        let particle = Particle::new(Vector2::ZERO, Vector2::new(3.0, 4.0), 1.0, Color::RED);

        assert_eq!(particle.speed(), 5.0);
        assert_eq!(particle.kinetic_energy(), 12.5);
    }
}
