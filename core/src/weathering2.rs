use crate::grid::HeightGrid;

// Weathering: every pass pulls each cell halfway toward the mean of its
// four neighbors. Off-grid neighbors take the cell's own height, so edges
// see a zero gradient.
pub struct Weathering2D {
    iterations: usize,
}

impl Weathering2D {
    // iterations - how many passes to run
    // More iterations = smoother terrain; 0 leaves the grid untouched.
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }

    // In-place from the caller's view; internally every pass reads the
    // previous heights and writes into a second buffer, then the two swap.
    pub fn apply(&self, map: &mut HeightGrid) {
        if self.iterations == 0 {
            return;
        }
        let mut next = map.clone();
        for _ in 0..self.iterations {
            Self::pass(map, &mut next);
            std::mem::swap(map, &mut next);
        }
        tracing::debug!(iterations = self.iterations, "weathering applied");
    }

    fn pass(src: &HeightGrid, dst: &mut HeightGrid) {
        let n = src.size();
        for i in 0..n {
            for j in 0..n {
                let h = src.get(i, j);
                let west = if j > 0 { src.get(i, j - 1) } else { h };
                let east = if j + 1 < n { src.get(i, j + 1) } else { h };
                let north = if i > 0 { src.get(i - 1, j) } else { h };
                let south = if i + 1 < n { src.get(i + 1, j) } else { h };
                let m = (west + north + south + east) / 4.0;
                dst.set(i, j, (h + m) / 2.0);
            }
        }
    }
}
