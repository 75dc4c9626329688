use eframe::egui;
use egui::{Color32, Painter, Pos2, Rect, Shape, epaint};
use faultscape_core::{Camera, FogState, Mesh};
use glam::{Mat4, Vec3, Vec4Swizzles};
use palette::{LinSrgb, Mix};

// Perspective used by the viewer: vertical fov (radians), near, far
const FOV_Y: f32 = 1.5;
const NEAR: f32 = 0.1;
const FAR: f32 = 10.0;

pub const CLEAR_COLOR: [f32; 3] = [0.075, 0.16, 0.292];
const TERRAIN_COLOR: [f32; 3] = [0.75, 0.5, 0.25];

pub fn view_projection(camera: &Camera, aspect: f32) -> Mat4 {
    let view = Mat4::look_at_rh(camera.position, camera.target(), Vec3::Z);
    Mat4::perspective_rh_gl(FOV_Y, aspect, NEAR, FAR) * view
}

// Share of the clear color mixed in at view depth `depth`
pub fn fog_factor(density: f32, depth: f32) -> f32 {
    (1.0 - (-density * depth).exp()).clamp(0.0, 1.0)
}

fn to_color32(c: LinSrgb) -> Color32 {
    let c = c.into_format::<u8>();
    Color32::from_rgb(c.red, c.green, c.blue)
}

pub fn clear_color32() -> Color32 {
    let [r, g, b] = CLEAR_COLOR;
    to_color32(LinSrgb::new(r, g, b))
}

// Screen position and view depth of one vertex, None when behind the near plane
fn project(vp: &Mat4, rect: Rect, p: Vec3) -> Option<(Pos2, f32)> {
    let clip = *vp * p.extend(1.0);
    if clip.w <= NEAR {
        return None;
    }
    let ndc = clip.xyz() / clip.w;
    if ndc.z > 1.0 {
        return None;
    }
    let x = rect.left() + (ndc.x + 1.0) * 0.5 * rect.width();
    let y = rect.top() + (1.0 - ndc.y) * 0.5 * rect.height();
    Some((Pos2::new(x, y), clip.w))
}

struct ShadedTriangle {
    corners: [Pos2; 3],
    depth: f32,
    color: Color32,
}

// Software stand-in for the GPU path: project every triangle, shade it
// flat with one directional light and fog, then draw back to front.
pub fn paint_terrain(painter: &Painter, rect: Rect, mesh: &Mesh, camera: &Camera, fog: &FogState) {
    let vp = view_projection(camera, rect.aspect_ratio());
    let light = Vec3::ONE.normalize();
    let [br, bg, bb] = TERRAIN_COLOR;
    let [cr, cg, cb] = CLEAR_COLOR;
    let clear = LinSrgb::new(cr, cg, cb);
    let density = fog.effective();

    let screen: Vec<Option<(Pos2, f32)>> = mesh
        .positions
        .iter()
        .map(|&p| project(&vp, rect, p))
        .collect();

    let mut triangles: Vec<ShadedTriangle> = mesh
        .triangles
        .iter()
        .filter_map(|&[a, b, c]| {
            let (pa, da) = screen[a as usize]?;
            let (pb, db) = screen[b as usize]?;
            let (pc, dc) = screen[c as usize]?;
            let depth = (da + db + dc) / 3.0;

            let normal = (mesh.normals[a as usize] + mesh.normals[b as usize] + mesh.normals[c as usize])
                .normalize_or_zero();
            let lambert = normal.dot(light).max(0.0);
            let lit = LinSrgb::new(br * lambert, bg * lambert, bb * lambert);
            let color = lit.mix(&clear, fog_factor(density, depth));
            Some(ShadedTriangle {
                corners: [pa, pb, pc],
                depth,
                color: to_color32(color),
            })
        })
        .collect();

    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut out = epaint::Mesh::default();
    for tri in &triangles {
        let first = out.vertices.len() as u32;
        for &corner in &tri.corners {
            out.colored_vertex(corner, tri.color);
        }
        out.add_triangle(first, first + 1, first + 2);
    }
    painter.add(Shape::mesh(out));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_target_projects_to_center() {
        let camera = Camera::default();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(200.0, 100.0));
        let vp = view_projection(&camera, rect.aspect_ratio());
        let (pos, depth) = project(&vp, rect, camera.target()).unwrap();
        assert!((pos.x - 100.0).abs() < 1e-3);
        assert!((pos.y - 50.0).abs() < 1e-3);
        assert!((depth - 1.0).abs() < 1e-5);
    }

    #[test]
    fn points_behind_camera_are_dropped() {
        let camera = Camera::default();
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let vp = view_projection(&camera, 1.0);
        assert!(project(&vp, rect, camera.position - camera.forward).is_none());
    }

    #[test]
    fn fog_grows_with_depth_and_vanishes_when_off() {
        assert_eq!(fog_factor(0.0, 5.0), 0.0);
        assert!(fog_factor(1.0, 0.5) < fog_factor(1.0, 2.0));
        assert!(fog_factor(100.0, 10.0) <= 1.0);
    }
}
