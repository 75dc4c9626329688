use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::grid::HeightGrid;

// Height added on the positive side of a fault (and removed on the other)
const FAULT_DELTA: f32 = 1.0;

// One straight fault line through a grid point.
// Cells on the side the direction points to (dot >= 0) are raised,
// the rest are lowered. Distance to the line does not matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fault {
    pub origin: (usize, usize),
    pub direction: Vec2,
    pub delta: f32,
}

impl Fault {
    pub fn new(origin: (usize, usize), angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            origin,
            direction: Vec2::new(cos, sin),
            delta: FAULT_DELTA,
        }
    }

    // Random origin in [0, size)² and angle in [0, 2π)
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Self {
        let origin = (rng.random_range(0..size), rng.random_range(0..size));
        let angle = rng.random_range(0.0..TAU);
        Self::new(origin, angle)
    }

    // Signed displacement this fault gives to cell (i, j)
    #[inline]
    pub fn displacement(&self, i: usize, j: usize) -> f32 {
        let b = Vec2::new(
            i as f32 - self.origin.0 as f32,
            j as f32 - self.origin.1 as f32,
        );
        if b.dot(self.direction) >= 0.0 {
            self.delta
        } else {
            -self.delta
        }
    }

    pub fn apply(&self, map: &mut HeightGrid) {
        let n = map.size();
        for i in 0..n {
            for j in 0..n {
                let h = map.get(i, j);
                map.set(i, j, h + self.displacement(i, j));
            }
        }
    }
}

pub struct FaultFormation2D {
    faults: usize,
}

impl FaultFormation2D {
    // faults - how many random fault lines to superimpose
    pub fn new(faults: usize) -> Self {
        Self { faults }
    }

    // In-place: draw and apply each fault in turn
    pub fn apply<R: Rng>(&self, map: &mut HeightGrid, rng: &mut R) {
        let size = map.size();
        for _ in 0..self.faults {
            Fault::random(size, rng).apply(map);
        }
        tracing::debug!(faults = self.faults, size, "fault formation applied");
    }
}
