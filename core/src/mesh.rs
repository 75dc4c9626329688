use glam::Vec3;

use crate::grid::HeightGrid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

// Triangulated terrain ready for a renderer.
//
// `positions` and `normals` hold one entry per grid cell (row-major, N²),
// `triangles` holds 2·(N−1)² index triples into them.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub size: usize,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    // Build positions, normals and triangles from final heights.
    pub fn from_grid(map: &HeightGrid) -> Self {
        let size = map.size();
        let positions = grid_positions(map);
        let normals = estimate_normals(&positions, size);
        Self {
            size,
            positions,
            normals,
            triangles: triangulate(size),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(&position, &normal)| Vertex { position, normal })
    }

    // Triangle indices flattened for an index buffer.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.triangles.iter().flatten().copied()
    }
}

// Cell (i, j) sits at x = j/N − 0.5, y = i/N − 0.5 with its height as z.
pub fn grid_positions(map: &HeightGrid) -> Vec<Vec3> {
    let n = map.size();
    let step = 1.0 / n as f32;
    let mut positions = Vec::with_capacity(n * n);
    for (i, row) in map.rows().enumerate() {
        for (j, &h) in row.iter().enumerate() {
            positions.push(Vec3::new(j as f32 * step - 0.5, i as f32 * step - 0.5, h));
        }
    }
    positions
}

// Two triangles per grid cell, in a fixed order and winding:
// `(k, k+1, k+N)` then `(k+1, k+N, k+N+1)` for k = i·N + j.
// Renderers cull back faces based on this order, so it must not change.
pub fn triangulate(size: usize) -> Vec<[u32; 3]> {
    let n = size as u32;
    let cells = size.saturating_sub(1);
    let mut triangles = Vec::with_capacity(2 * cells * cells);
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - 1 {
            let k = i * n + j;
            triangles.push([k, k + 1, k + n]);
            triangles.push([k + 1, k + n, k + n + 1]);
        }
    }
    triangles
}

// Per-vertex normals from the four grid neighbors:
// `normalize(cross(west − east, north − south))`.
//
// Missing neighbors on the border are synthesized one grid step away from
// the vertex at the vertex's own height. A zero cross product gives a
// zero normal instead of NaNs.
pub fn estimate_normals(positions: &[Vec3], size: usize) -> Vec<Vec3> {
    let step = 1.0 / size as f32;
    let dx = Vec3::new(step, 0.0, 0.0);
    let dy = Vec3::new(0.0, step, 0.0);

    let mut normals = Vec::with_capacity(positions.len());
    for i in 0..size {
        for j in 0..size {
            let k = i * size + j;
            let v = positions[k];
            let west = if j > 0 { positions[k - 1] } else { v - dx };
            let east = if j + 1 < size { positions[k + 1] } else { v + dx };
            let north = if i > 0 { positions[k - size] } else { v - dy };
            let south = if i + 1 < size { positions[k + size] } else { v + dy };
            normals.push((west - east).cross(north - south).normalize_or_zero());
        }
    }
    normals
}
