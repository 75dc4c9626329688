use glam::{Mat4, Vec3};

// Rotation by `angle` radians about the unit `axis` (Rodrigues' formula),
// as a 4×4 homogeneous matrix.
//
// The 16 entries below are listed row by row, the way the formula is
// usually written; `from_cols_array` reads them as columns, so the
// transpose at the end yields the rotation itself. A zero axis yields
// `cos(angle)·I` on the 3×3 block, which is not a rotation; callers
// must pass a unit axis.
pub fn rotation_from_axis_angle(axis: Vec3, angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let Vec3 { x: rx, y: ry, z: rz } = axis;

    #[rustfmt::skip]
    let listed = Mat4::from_cols_array(&[
        rx * rx * t + c,      rx * ry * t - rz * s, rx * rz * t + ry * s, 0.0,
        rx * ry * t + rz * s, ry * ry * t + c,      ry * rz * t - rx * s, 0.0,
        rx * rz * t - ry * s, ry * rz * t + rx * s, rz * rz * t + c,      0.0,
        0.0,                  0.0,                  0.0,                  1.0,
    ]);
    listed.transpose()
}

// Apply a homogeneous transform to a direction: extend with w = 1,
// transform, and drop w again.
#[inline]
pub fn transform_direction(m: &Mat4, v: Vec3) -> Vec3 {
    m.mul_vec4(v.extend(1.0)).truncate()
}
