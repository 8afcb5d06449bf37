use crate::{
    config::{Arena, PairPolicy},
    vector::Vector2,
};

/// Neighbour offsets visited by [`PairPolicy::Unique`] besides the cell itself.
///
/// Together with their opposites they cover the 3x3 neighbourhood, so scanning only these
/// reaches each pair of adjacent cells once.
const FORWARD_NEIGHBOURS: [(isize, isize); 4] = [(1, -1), (1, 0), (1, 1), (0, 1)];

/// Uniform grid over the arena used as the collision broad-phase.
///
/// Cells store the index of the particles they contain and are rebuilt from scratch every
/// sub-step. Particles that can touch are guaranteed to be in the same or adjacent cells as
/// long as a cell is at least as wide and tall as a particle's diameter.
///
/// ```
/// # use jostle::prelude::*;
/// let mut grid = SpatialGrid::new(Arena::new(100.0, 100.0), 5, 5);
/// grid.insert(0, Vector2::new(10.0, 10.0));
/// grid.insert(1, Vector2::new(25.0, 10.0));
/// grid.insert(2, Vector2::new(90.0, 90.0));
///
/// let mut pairs = Vec::new();
/// grid.for_each_candidate_pair(PairPolicy::Unique, |i, j| pairs.push((i, j)));
///
/// assert_eq!(pairs, vec![(0, 1)]);
/// ```
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    arena: Arena,
    width: usize,
    height: usize,
    cells: Vec<Vec<usize>>,
    len: usize,
}

impl SpatialGrid {
    /// Creates an empty [`SpatialGrid`] dividing the arena in `width` by `height` cells.
    ///
    /// Panics if either dimension is zero.
    pub fn new(arena: Arena, width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");

        Self {
            arena,
            width,
            height,
            cells: vec![Vec::new(); width * height],
            len: 0,
        }
    }

    /// Number of cells along x and y.
    #[inline]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Size of a single cell in arena units.
    #[inline]
    pub fn cell_size(&self) -> Vector2 {
        Vector2::new(
            self.arena.width / self.width as f64,
            self.arena.height / self.height as f64,
        )
    }

    /// Number of particles inserted since the last [`clear`](Self::clear).
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no particle was inserted since the last [`clear`](Self::clear).
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Particles currently in the cell at the given coordinates.
    ///
    /// Panics if the coordinates are outside the grid.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &[usize] {
        assert!(x < self.width && y < self.height, "cell out of the grid");
        &self.cells[self.index(x, y)]
    }

    /// Coordinates of the cell containing `position`.
    ///
    /// Positions on the far walls belong to the last cell of their row or column.
    #[inline]
    pub fn cell_of(&self, position: Vector2) -> (usize, usize) {
        let dimensions = Vector2::new(self.width as f64, self.height as f64);
        let cell = position / self.arena.size() * dimensions;

        // Negative values saturate to 0 when cast.
        let x = (cell.x.floor() as usize).min(self.width - 1);
        let y = (cell.y.floor() as usize).min(self.height - 1);

        (x, y)
    }

    /// Empties every cell, keeping their allocations.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.len = 0;
    }

    /// Adds the particle `id` to the cell containing `position`.
    pub fn insert(&mut self, id: usize, position: Vector2) {
        debug_assert!(
            (0.0..=self.arena.width).contains(&position.x)
                && (0.0..=self.arena.height).contains(&position.y),
            "particle {id} inserted outside the arena at {position}"
        );

        let (x, y) = self.cell_of(position);
        let index = self.index(x, y);
        self.cells[index].push(id);
        self.len += 1;
    }

    /// Calls `f` with the indices of every pair of particles sharing a cell or sitting in adjacent cells.
    ///
    /// Which pairs are visited, and how many times, depends on the [`PairPolicy`]. A particle is
    /// never paired with itself.
    pub fn for_each_candidate_pair<F>(&self, policy: PairPolicy, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        match policy {
            PairPolicy::AllNeighbors => self.all_neighbour_pairs(&mut f),
            PairPolicy::Unique => self.unique_pairs(&mut f),
        }
    }

    #[inline]
    const fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    #[inline]
    fn neighbour(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<&[usize]> {
        let nx = x.checked_add_signed(dx).filter(|&nx| nx < self.width)?;
        let ny = y.checked_add_signed(dy).filter(|&ny| ny < self.height)?;

        Some(self.cells[self.index(nx, ny)].as_slice())
    }

    fn all_neighbour_pairs<F>(&self, f: &mut F)
    where
        F: FnMut(usize, usize),
    {
        for x in 0..self.width {
            for y in 0..self.height {
                let current = &self.cells[self.index(x, y)];
                if current.is_empty() {
                    continue;
                }

                for dx in -1..=1 {
                    for dy in -1..=1 {
                        let Some(other) = self.neighbour(x, y, dx, dy) else {
                            continue;
                        };
                        let same_cell = dx == 0 && dy == 0;

                        for (slot1, &id1) in current.iter().enumerate() {
                            for (slot2, &id2) in other.iter().enumerate() {
                                if same_cell && slot1 == slot2 {
                                    continue;
                                }
                                f(id1, id2);
                            }
                        }
                    }
                }
            }
        }
    }

    fn unique_pairs<F>(&self, f: &mut F)
    where
        F: FnMut(usize, usize),
    {
        for x in 0..self.width {
            for y in 0..self.height {
                let current = &self.cells[self.index(x, y)];
                if current.is_empty() {
                    continue;
                }

                for (slot, &id1) in current.iter().enumerate() {
                    for &id2 in &current[slot + 1..] {
                        f(id1, id2);
                    }
                }

                for (dx, dy) in FORWARD_NEIGHBOURS {
                    let Some(other) = self.neighbour(x, y, dx, dy) else {
                        continue;
                    };

                    for &id1 in current {
                        for &id2 in other {
                            f(id1, id2);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn grid_with(positions: &[(f64, f64)]) -> SpatialGrid {
        let mut grid = SpatialGrid::new(Arena::new(100.0, 60.0), 5, 3);
        for (id, &(x, y)) in positions.iter().enumerate() {
            grid.insert(id, Vector2::new(x, y));
        }
        grid
    }

    fn visits(grid: &SpatialGrid, policy: PairPolicy) -> HashMap<(usize, usize), usize> {
        let mut visits = HashMap::new();
        grid.for_each_candidate_pair(policy, |i, j| {
            assert_ne!(i, j);
            *visits.entry((i.min(j), i.max(j))).or_insert(0) += 1;
        });
        visits
    }

    #[test]
    fn cell_of_position() {
        let grid = grid_with(&[]);

        assert_eq!(grid.cell_size(), Vector2::new(20.0, 20.0));
        assert_eq!(grid.cell_of(Vector2::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_of(Vector2::new(19.9, 30.0)), (0, 1));
        assert_eq!(grid.cell_of(Vector2::new(55.0, 59.0)), (2, 2));
        assert_eq!(grid.cell_of(Vector2::new(100.0, 60.0)), (4, 2));
    }

    #[test]
    fn insert_and_clear() {
        let mut grid = grid_with(&[(10.0, 10.0), (15.0, 12.0), (70.0, 50.0)]);

        assert_eq!(grid.len(), 3);
        assert_eq!(grid.cell(0, 0), &[0, 1]);
        assert_eq!(grid.cell(3, 2), &[2]);

        grid.clear();

        assert!(grid.is_empty());
        assert!(grid.cell(0, 0).is_empty());
        assert!(grid.cell(3, 2).is_empty());
    }

    #[test]
    fn all_neighbours_visits_each_pair_in_both_orders() {
        // 0 and 1 share a cell, 2 is adjacent to both, 3 is two cells away from everyone.
        let grid = grid_with(&[(5.0, 5.0), (8.0, 8.0), (25.0, 25.0), (90.0, 50.0)]);

        let mut ordered = Vec::new();
        grid.for_each_candidate_pair(PairPolicy::AllNeighbors, |i, j| ordered.push((i, j)));
        ordered.sort_unstable();

        assert_eq!(
            ordered,
            vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn unique_visits_each_pair_once() {
        let grid = grid_with(&[(5.0, 5.0), (8.0, 8.0), (25.0, 25.0), (90.0, 50.0)]);
        let visits = visits(&grid, PairPolicy::Unique);

        assert_eq!(visits.len(), 3);
        assert!(visits.values().all(|&count| count == 1));
        assert!(!visits.contains_key(&(0, 3)));
        assert!(!visits.contains_key(&(2, 3)));
    }

    #[test]
    fn policies_cover_the_same_pairs() {
        let mut positions = Vec::new();
        for i in 0..40 {
            let t = i as f64;
            positions.push(((t * 37.0) % 100.0, (t * 13.0) % 60.0));
        }
        let grid = grid_with(&positions);

        let all = visits(&grid, PairPolicy::AllNeighbors);
        let unique = visits(&grid, PairPolicy::Unique);

        assert_eq!(all.len(), unique.len());
        for (pair, count) in all {
            assert_eq!(count, 2);
            assert_eq!(unique.get(&pair), Some(&1));
        }
    }

    #[test]
    fn edge_cells_skip_missing_neighbours() {
        let grid = grid_with(&[(0.0, 0.0), (100.0, 60.0), (99.0, 1.0), (1.0, 59.0)]);

        assert!(visits(&grid, PairPolicy::AllNeighbors).is_empty());
        assert!(visits(&grid, PairPolicy::Unique).is_empty());
    }
}
