//! Neighbor discovery.
//!
//! A [`NeighborQuery`] answers, for one boid, which boids of its own flock
//! and which boids of its affinity targets lie within its sight range. All
//! lookups in a step read the same snapshot, handed to
//! [`NeighborQuery::prepare`] once before the first lookup.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::boid::Boid;
use crate::config::{AffinityLink, FlockConfig};
use crate::vector::floor;

/// Boids found within range of an affinity target flock.
#[derive(Debug, Clone, PartialEq)]
pub struct AffinityGroup {
    pub link: AffinityLink,
    /// Indices into the population slice.
    pub members: Vec<usize>,
}

/// The neighbors of a single boid, as indices into the population slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighbors {
    /// Same-flock boids in sight, excluding the boid itself.
    pub cohort: Vec<usize>,
    /// One group per affinity entry, in affinity-table order. Groups may be empty.
    pub affinity: Vec<AffinityGroup>,
}

impl Neighbors {
    /// Sorts `candidates` into cohort and affinity groups. Candidates must
    /// be in ascending index order for the result to be identical across
    /// query strategies.
    fn collect<I>(
        boids: &[Boid],
        index: usize,
        sight_range: f32,
        affinity: &[AffinityLink],
        candidates: I,
    ) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let boid = &boids[index];
        let mut neighbors = Neighbors {
            cohort: Vec::new(),
            affinity: affinity
                .iter()
                .map(|&link| AffinityGroup {
                    link,
                    members: Vec::new(),
                })
                .collect(),
        };

        for candidate in candidates {
            if candidate == index {
                continue;
            }
            let other = &boids[candidate];
            if !boid.in_range(other, sight_range) {
                continue;
            }
            if other.flock == boid.flock {
                neighbors.cohort.push(candidate);
            }
            for group in neighbors.affinity.iter_mut() {
                if group.link.target == other.flock {
                    group.members.push(candidate);
                }
            }
        }

        neighbors
    }
}

/// Strategy for finding the neighbors of a boid.
pub trait NeighborQuery {
    /// Indexes the snapshot the coming step will read.
    fn prepare(&mut self, boids: &[Boid], flocks: &[FlockConfig]);

    /// Returns the neighbors of `boids[index]`. `boids` must be the slice
    /// last passed to [`prepare`](NeighborQuery::prepare).
    fn neighbors(
        &self,
        boids: &[Boid],
        index: usize,
        sight_range: f32,
        affinity: &[AffinityLink],
    ) -> Neighbors;
}

/// Scans the whole population for every boid.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl NeighborQuery for BruteForce {
    fn prepare(&mut self, _boids: &[Boid], _flocks: &[FlockConfig]) {}

    fn neighbors(
        &self,
        boids: &[Boid],
        index: usize,
        sight_range: f32,
        affinity: &[AffinityLink],
    ) -> Neighbors {
        Neighbors::collect(boids, index, sight_range, affinity, 0..boids.len())
    }
}

type Cell = (i32, i32);

/// Buckets boids into square cells as wide as the largest sight range, so a
/// lookup only visits the 3x3 block of cells around the boid.
#[derive(Debug, Clone, Default)]
pub struct UniformGrid {
    cell_size: f32,
    cells: BTreeMap<Cell, Vec<usize>>,
}

impl UniformGrid {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell_of(&self, boid: &Boid) -> Cell {
        (
            floor(boid.position.x / self.cell_size) as i32,
            floor(boid.position.y / self.cell_size) as i32,
        )
    }
}

impl NeighborQuery for UniformGrid {
    fn prepare(&mut self, boids: &[Boid], flocks: &[FlockConfig]) {
        self.cell_size = flocks
            .iter()
            .map(|flock| flock.sight_range)
            .fold(0.0, f32::max);
        self.cells.clear();
        if self.cell_size <= 0.0 {
            return;
        }
        for (index, boid) in boids.iter().enumerate() {
            let cell = self.cell_of(boid);
            self.cells.entry(cell).or_default().push(index);
        }
    }

    fn neighbors(
        &self,
        boids: &[Boid],
        index: usize,
        sight_range: f32,
        affinity: &[AffinityLink],
    ) -> Neighbors {
        if self.cell_size <= 0.0 {
            return Neighbors::collect(boids, index, sight_range, affinity, 0..boids.len());
        }

        let (cx, cy) = self.cell_of(&boids[index]);
        let mut candidates = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(members) = self.cells.get(&(cx + dx, cy + dy)) {
                    candidates.extend_from_slice(members);
                }
            }
        }
        // Same visiting order as a full scan keeps float sums bit-identical.
        candidates.sort_unstable();
        Neighbors::collect(boids, index, sight_range, affinity, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2D;

    fn boid(flock: usize, x: f32, y: f32) -> Boid {
        Boid::new(flock, &FlockConfig::default(), Vector2D::new(x, y), Vector2D::zero())
    }

    #[test]
    fn test_cohort_excludes_self_and_out_of_range() {
        let boids = vec![
            boid(0, 0.0, 0.0),
            boid(0, 3.0, 4.0),  // distance 5
            boid(0, 30.0, 0.0), // distance 30
            boid(1, 1.0, 0.0),  // other flock
        ];
        let neighbors = BruteForce.neighbors(&boids, 0, 10.0, &[]);
        assert_eq!(neighbors.cohort, vec![1]);
        assert!(neighbors.affinity.is_empty());
    }

    #[test]
    fn test_sight_range_is_inclusive() {
        let boids = vec![boid(0, 0.0, 0.0), boid(0, 10.0, 0.0)];
        let neighbors = BruteForce.neighbors(&boids, 0, 10.0, &[]);
        assert_eq!(neighbors.cohort, vec![1]);
    }

    #[test]
    fn test_affinity_groups_follow_links() {
        let boids = vec![
            boid(0, 0.0, 0.0),
            boid(1, 5.0, 0.0),
            boid(1, 50.0, 0.0),
            boid(2, 0.0, 5.0),
            boid(3, 1.0, 1.0),
        ];
        let links = [
            AffinityLink { target: 1, value: 0.5 },
            AffinityLink { target: 2, value: -0.5 },
        ];
        let neighbors = BruteForce.neighbors(&boids, 0, 20.0, &links);

        assert!(neighbors.cohort.is_empty());
        assert_eq!(neighbors.affinity.len(), 2);
        assert_eq!(neighbors.affinity[0].members, vec![1]);
        assert_eq!(neighbors.affinity[1].members, vec![3]);
    }

    #[test]
    fn test_affinity_group_empty_when_target_out_of_sight() {
        let boids = vec![boid(0, 0.0, 0.0), boid(1, 500.0, 0.0)];
        let links = [AffinityLink { target: 1, value: 1.0 }];
        let neighbors = BruteForce.neighbors(&boids, 0, 20.0, &links);
        assert_eq!(neighbors.affinity.len(), 1);
        assert!(neighbors.affinity[0].members.is_empty());
    }

    #[test]
    fn test_grid_matches_brute_force() {
        let flocks = vec![
            FlockConfig {
                sight_range: 25.0,
                ..FlockConfig::default()
            },
            FlockConfig {
                sight_range: 40.0,
                ..FlockConfig::default()
            },
        ];
        let links = [AffinityLink { target: 0, value: 0.1 }];

        // A deterministic scatter, including negative coordinates outside the world.
        let boids: Vec<Boid> = (0..120)
            .map(|i| {
                let x = ((i * 37) % 200) as f32 - 20.0;
                let y = ((i * 53) % 150) as f32 - 10.0;
                boid(i % 2, x, y)
            })
            .collect();

        let mut grid = UniformGrid::new();
        grid.prepare(&boids, &flocks);
        let mut brute = BruteForce;
        brute.prepare(&boids, &flocks);

        for index in 0..boids.len() {
            let flock = &flocks[boids[index].flock];
            assert_eq!(
                grid.neighbors(&boids, index, flock.sight_range, &links),
                brute.neighbors(&boids, index, flock.sight_range, &links),
                "neighbors differ for boid {}",
                index
            );
        }
    }
}
