use crate::{config::ELASTICITY, particle::Particle, vector::Unit};

/// Resolves collisions between pairs of particles of equal mass.
///
/// A colliding pair is first pushed apart so that the particles only touch, then an impulse
/// along the line joining their centers removes part of their approaching velocity.
///
/// ```
/// # use jostle::prelude::*;
/// let resolver = CollisionResolver::default();
/// let mut a = Particle::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 1.0, Color::RED);
/// let mut b = Particle::new(Vector2::new(1.0, 0.0), Vector2::new(-1.0, 0.0), 1.0, Color::RED);
///
/// assert!(resolver.resolve(&mut a, &mut b));
/// assert_eq!(b.position.x - a.position.x, 2.0);
/// assert!((a.velocity.x - 0.8).abs() < 1E-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResolver {
    /// Fraction of the approaching normal velocity each particle gives up in a collision.
    ///
    /// The relative normal velocity `s` becomes `s * (1 - 2 * elasticity)`: 0 leaves it unchanged,
    /// 0.5 stops the pair along the normal and 1 fully reverses it.
    pub elasticity: f64,
}

impl Default for CollisionResolver {
    #[inline]
    fn default() -> Self {
        Self::new(ELASTICITY)
    }
}

impl CollisionResolver {
    /// Creates a new [`CollisionResolver`] with the given restitution coefficient.
    #[inline]
    pub const fn new(elasticity: f64) -> Self {
        Self { elasticity }
    }

    /// Returns true if the two particles overlap or touch.
    #[inline]
    pub fn are_colliding(a: &Particle, b: &Particle) -> bool {
        a.position.distance(b.position) <= a.radius + b.radius
    }

    /// Moves both particles apart by half of their overlap each, along the line joining their centers.
    ///
    /// Particles with the exact same center have no separating direction and are left in place.
    #[inline]
    pub fn penetration_resolution(a: &mut Particle, b: &mut Particle) {
        let offset = a.position - b.position;
        let depth = a.radius + b.radius - offset.length();
        let correction = offset.unit() * (depth / 2.0);

        a.position += correction;
        b.position -= correction;
    }

    /// Applies equal and opposite impulses to the particles if they are moving toward each other.
    #[inline]
    pub fn resolve_collision(&self, a: &mut Particle, b: &mut Particle) {
        let normal = (a.position - b.position).unit();
        let separating_velocity = (a.velocity - b.velocity).dot(normal);

        if separating_velocity > 0.0 {
            return;
        }

        let impulse = normal * (-separating_velocity * self.elasticity);

        a.velocity += impulse;
        b.velocity -= impulse;
    }

    /// Separates and bounces the particles if they collide, returning whether they did.
    #[inline]
    pub fn resolve(&self, a: &mut Particle, b: &mut Particle) -> bool {
        if !Self::are_colliding(a, b) {
            return false;
        }

        Self::penetration_resolution(a, b);
        self.resolve_collision(a, b);

        true
    }
}

/// Returns mutable references to two distinct elements of a slice.
///
/// Panics if `i == j` or if either index is out of bounds.
#[inline]
pub fn pair_mut<T>(slice: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "cannot borrow the same element twice");

    if i < j {
        let (left, right) = slice.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
