use crate::error::{Result, TerrainError};

pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 255;

// Square height grid, row-major: cell (i, j) is row i, column j.
// The dimension is fixed at construction; every stage keeps it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    size: usize,
    cells: Vec<f32>,
}

impl HeightGrid {
    // Allocate a size×size grid of zeros. Sizes outside [2, 255] are rejected.
    pub fn new(size: usize) -> Result<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(TerrainError::invalid_grid_size(size));
        }
        Ok(Self {
            size,
            cells: vec![0.0; size * size],
        })
    }

    // Build a grid from a height function of (row, column)
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f32) -> Result<Self> {
        let mut grid = Self::new(size)?;
        for i in 0..size {
            for j in 0..size {
                grid.cells[i * size + j] = f(i, j);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.cells[i * self.size + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, h: f32) {
        self.cells[i * self.size + j] = h;
    }

    // Heights flattened row-major, length size²
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.cells.chunks_exact(self.size)
    }

    // (min, max) over all cells
    pub fn min_max(&self) -> (f32, f32) {
        self.cells
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }

    // Population variance of the heights
    pub fn variance(&self) -> f32 {
        let n = self.cells.len() as f32;
        let mean = self.cells.iter().sum::<f32>() / n;
        self.cells.iter().map(|h| (h - mean) * (h - mean)).sum::<f32>() / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_rejects_out_of_range_sizes() {
        for size in [0, 1, 256, 1000] {
            let err = HeightGrid::new(size).unwrap_err();
            assert!(matches!(err, TerrainError::InvalidGridSize { size: s, .. } if s == size));
        }
    }

    #[test]
    fn grid_starts_flat() {
        let g = HeightGrid::new(7).unwrap();
        assert_eq!(g.size(), 7);
        assert_eq!(g.as_slice().len(), 49);
        assert!(g.as_slice().iter().all(|&h| h == 0.0));
        assert_eq!(g.min_max(), (0.0, 0.0));
        assert_eq!(g.variance(), 0.0);
    }

    #[test]
    fn grid_is_row_major() {
        let g = HeightGrid::from_fn(3, |i, j| (i * 10 + j) as f32).unwrap();
        assert_eq!(g.get(1, 2), 12.0);
        assert_eq!(g.as_slice()[5], 12.0);
        let rows: Vec<&[f32]> = g.rows().collect();
        assert_eq!(rows[2], &[20.0, 21.0, 22.0]);
    }
}
