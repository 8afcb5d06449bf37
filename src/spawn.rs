use std::{cmp::Reverse, collections::BinaryHeap, time::Duration};

use crate::{particle::Color, simulation::Simulation, vector::Vector2};

/// A particle waiting to be added to a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRequest {
    /// Initial position of the particle.
    pub position: Vector2,
    /// Initial velocity of the particle.
    pub velocity: Vector2,
    /// Display tag of the particle.
    pub color: Color,
}

impl SpawnRequest {
    /// Creates a new [`SpawnRequest`].
    #[inline]
    pub const fn new(position: Vector2, velocity: Vector2, color: Color) -> Self {
        Self {
            position,
            velocity,
            color,
        }
    }
}

#[derive(Debug)]
struct Pending {
    due: Duration,
    sequence: u64,
    request: SpawnRequest,
}

impl Pending {
    #[inline]
    fn key(&self) -> (Duration, u64) {
        (self.due, self.sequence)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

/// Spawn requests released into a [`Simulation`] once their due time is reached.
///
/// Times are measured from an arbitrary origin chosen by the caller, usually the start of the
/// program. The queue never spawns anything by itself: the caller [`polls`](Self::poll) it between
/// frames, which keeps spawning out of the sub-steps.
///
/// ```
/// # use jostle::prelude::*;
/// # use std::time::Duration;
/// let mut simulation = Simulation::new(1000.0, 600.0, 0, 50, 30, 10.0)?;
/// let mut queue = SpawnQueue::new();
///
/// let request = SpawnRequest::new(Vector2::new(100.0, 100.0), Vector2::new(5.0, 0.0), Color::RED);
/// queue.schedule_burst(Duration::ZERO, 3, Duration::from_millis(100), request);
///
/// assert_eq!(queue.poll(Duration::from_millis(150), &mut simulation), 2);
/// assert_eq!(simulation.len(), 2);
/// assert_eq!(queue.next_due(), Some(Duration::from_millis(200)));
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct SpawnQueue {
    pending: BinaryHeap<Reverse<Pending>>,
    sequence: u64,
}

impl SpawnQueue {
    /// Creates an empty [`SpawnQueue`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests not released yet.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if every request was released.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Time at which the next request is due, if any.
    #[inline]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.peek().map(|Reverse(pending)| pending.due)
    }

    /// Schedules a single request, due at time `at`.
    pub fn schedule(&mut self, at: Duration, request: SpawnRequest) {
        self.pending.push(Reverse(Pending {
            due: at,
            sequence: self.sequence,
            request,
        }));
        self.sequence += 1;
    }

    /// Schedules `amount` copies of a request, the first due at `start` and each following one `interval` later.
    pub fn schedule_burst(
        &mut self,
        start: Duration,
        amount: usize,
        interval: Duration,
        request: SpawnRequest,
    ) {
        let mut due = start;
        for _ in 0..amount {
            self.schedule(due, request);
            due += interval;
        }
    }

    /// Spawns every request due at or before `now` into the simulation, returning how many were released.
    ///
    /// Requests are released by due time, and in scheduling order when due at the same time.
    pub fn poll(&mut self, now: Duration, simulation: &mut Simulation) -> usize {
        let mut released = 0;

        while let Some(Reverse(pending)) = self.pending.peek() {
            if pending.due > now {
                break;
            }

            if let Some(Reverse(Pending { request, .. })) = self.pending.pop() {
                simulation.spawn(request.position, request.velocity, request.color);
                released += 1;
            }
        }

        if released > 0 {
            tracing::debug!(released, remaining = self.pending.len(), "released spawn requests");
        }

        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Arena, SimulationConfig};

    fn simulation() -> Simulation {
        Simulation::from_config(SimulationConfig {
            arena: Arena::new(1000.0, 600.0),
            particle_count: 0,
            ..Default::default()
        })
        .unwrap()
    }

    fn request(x: f64, color: Color) -> SpawnRequest {
        SpawnRequest::new(Vector2::new(x, 100.0), Vector2::ZERO, color)
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn nothing_is_released_early() {
        let mut simulation = simulation();
        let mut queue = SpawnQueue::new();
        queue.schedule(ms(50), request(100.0, Color::RED));

        assert_eq!(queue.poll(ms(49), &mut simulation), 0);
        assert!(simulation.is_empty());
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.poll(ms(50), &mut simulation), 1);
        assert_eq!(simulation.len(), 1);
        assert!(queue.is_empty());
        assert_eq!(queue.next_due(), None);
    }

    #[test]
    fn burst_is_spread_over_time() {
        let mut simulation = simulation();
        let mut queue = SpawnQueue::new();
        queue.schedule_burst(ms(10), 5, ms(20), request(100.0, Color::RED));

        let released: Vec<_> = [0, 10, 45, 45, 200]
            .into_iter()
            .map(|now| queue.poll(ms(now), &mut simulation))
            .collect();

        assert_eq!(released, vec![0, 1, 1, 0, 3]);
        assert_eq!(simulation.len(), 5);
        assert!(simulation
            .particles()
            .iter()
            .all(|p| p.position == Vector2::new(100.0, 100.0) && p.radius == 10.0));
    }

    #[test]
    fn release_order_follows_due_time_then_schedule_order() {
        let mut simulation = simulation();
        let mut queue = SpawnQueue::new();
        queue.schedule(ms(30), request(300.0, Color::RED));
        queue.schedule(ms(10), request(100.0, Color::RED));
        queue.schedule(ms(20), request(200.0, Color::rgb(0, 255, 0)));
        queue.schedule(ms(20), request(250.0, Color::rgb(0, 0, 255)));

        assert_eq!(queue.next_due(), Some(ms(10)));
        assert_eq!(queue.poll(ms(100), &mut simulation), 4);

        let xs: Vec<_> = simulation.particles().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![100.0, 200.0, 250.0, 300.0]);
        assert_eq!(simulation.particles()[1].color, Color::rgb(0, 255, 0));
    }

    #[test]
    fn empty_burst_schedules_nothing() {
        let mut queue = SpawnQueue::new();
        queue.schedule_burst(ms(0), 0, ms(5), request(1.0, Color::RED));

        assert!(queue.is_empty());
    }
}
