use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::grid::HeightGrid;

// Half-width of the normalized height range: heights end up in [-0.25, 0.25]
pub const HEIGHT_EXTENT: f32 = 0.25;

// Rescale heights so min -> -0.25 and max -> +0.25, centered on the midrange.
// min/max are read once before any cell is rewritten.
// A flat grid has nothing to rescale and is left as is; returns None then.
pub fn normalize_symmetric(map: &mut HeightGrid) -> Option<(f32, f32)> {
    let (min, max) = map.min_max();
    if min == max {
        tracing::debug!(height = min, "flat relief, normalization skipped");
        return None;
    }

    let mid = 0.5 * (min + max);
    let range = max - min;
    for h in map.as_mut_slice() {
        *h = 0.5 * ((*h - mid) / range);
    }
    tracing::debug!(min, max, "heights normalized");
    Some((min, max))
}

// Deep water to beach to grass to rock to snow
fn terrain_gradient() -> Gradient<LinSrgb> {
    Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
        (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
        (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
        (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
    ])
}

// Top-down color preview of a grid, one pixel per cell.
// Colors are relative to the grid's own min/max so any stage can be previewed.
pub fn to_height_image(map: &HeightGrid) -> RgbImage {
    let size = map.size() as u32;
    let (min, max) = map.min_max();
    let gradient = terrain_gradient();

    let mut img = RgbImage::new(size, size);
    for (i, row) in map.rows().enumerate() {
        for (j, &h) in row.iter().enumerate() {
            let t = if max > min { (h - min) / (max - min) } else { 0.5 };
            let rgb = gradient.get(t).into_format::<u8>();
            // column j is x, row i is y
            img.put_pixel(j as u32, i as u32, Rgb([rgb.red, rgb.green, rgb.blue]));
        }
    }
    img
}
