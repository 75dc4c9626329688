use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::{rotation_from_axis_angle, transform_direction};

pub const YAW_STEP: f32 = 1.0 / 50.0;
pub const PITCH_STEP: f32 = 0.01;
pub const MOVE_STEP: f32 = 0.01;

// Navigation actions a held key can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

impl NavAction {
    pub const ALL: [NavAction; 8] = [
        NavAction::Forward,
        NavAction::Back,
        NavAction::StrafeLeft,
        NavAction::StrafeRight,
        NavAction::YawLeft,
        NavAction::YawRight,
        NavAction::PitchUp,
        NavAction::PitchDown,
    ];
}

// Snapshot of which navigation actions are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavInput {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
}

impl NavInput {
    pub fn with(actions: &[NavAction]) -> Self {
        let mut input = Self::default();
        for &action in actions {
            input.set(action, true);
        }
        input
    }

    pub fn set(&mut self, action: NavAction, held: bool) {
        *self.slot(action) = held;
    }

    pub fn is_held(&self, action: NavAction) -> bool {
        match action {
            NavAction::Forward => self.forward,
            NavAction::Back => self.back,
            NavAction::StrafeLeft => self.strafe_left,
            NavAction::StrafeRight => self.strafe_right,
            NavAction::YawLeft => self.yaw_left,
            NavAction::YawRight => self.yaw_right,
            NavAction::PitchUp => self.pitch_up,
            NavAction::PitchDown => self.pitch_down,
        }
    }

    pub fn is_idle(&self) -> bool {
        NavAction::ALL.iter().all(|&a| !self.is_held(a))
    }

    fn slot(&mut self, action: NavAction) -> &mut bool {
        match action {
            NavAction::Forward => &mut self.forward,
            NavAction::Back => &mut self.back,
            NavAction::StrafeLeft => &mut self.strafe_left,
            NavAction::StrafeRight => &mut self.strafe_right,
            NavAction::YawLeft => &mut self.yaw_left,
            NavAction::YawRight => &mut self.yaw_right,
            NavAction::PitchUp => &mut self.pitch_up,
            NavAction::PitchDown => &mut self.pitch_down,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw_step: f32,
    pub pitch_step: f32,
    pub move_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [1.0, 1.0, 0.5],
            yaw_step: YAW_STEP,
            pitch_step: PITCH_STEP,
            move_step: MOVE_STEP,
        }
    }
}

// Free-flight viewpoint.
//
// `forward` is never renormalized: rotations keep its length and
// translations only move `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    yaw_step: f32,
    pitch_step: f32,
    move_step: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    // Camera at `position` looking at the origin.
    pub fn looking_at_origin(position: Vec3) -> Self {
        Self::from_config(&CameraConfig {
            position: position.to_array(),
            ..CameraConfig::default()
        })
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let position = Vec3::from_array(config.position);
        Self {
            position,
            forward: (-position).normalize_or_zero(),
            yaw_step: config.yaw_step,
            pitch_step: config.pitch_step,
            move_step: config.move_step,
        }
    }

    // Horizontal right vector, `normalize(forward × Z)`. Zero when looking
    // straight up or down.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(Vec3::Z).normalize_or_zero()
    }

    // Point the camera looks at; handy for a look-at view matrix.
    pub fn target(&self) -> Vec3 {
        self.position + self.forward
    }

    // One frame of navigation. Every held action applies its full step,
    // so motion speed follows the frame rate.
    //
    // `right` is taken from the forward vector at the start of the frame
    // and drives both pitch and strafing. With no horizontal right axis
    // pitch and strafe are skipped for the frame.
    pub fn update(&mut self, input: &NavInput) -> (Vec3, Vec3) {
        let right = self.right();
        let has_right = right != Vec3::ZERO;

        if has_right {
            if input.pitch_up {
                self.rotate(right, self.pitch_step);
            }
            if input.pitch_down {
                self.rotate(right, -self.pitch_step);
            }
        }
        if input.yaw_left {
            self.rotate(Vec3::Z, self.yaw_step);
        }
        if input.yaw_right {
            self.rotate(Vec3::Z, -self.yaw_step);
        }

        if input.forward {
            self.position += self.forward * self.move_step;
        }
        if input.back {
            self.position -= self.forward * self.move_step;
        }
        if has_right {
            if input.strafe_left {
                self.position -= right * self.move_step;
            }
            if input.strafe_right {
                self.position += right * self.move_step;
            }
        }

        (self.position, self.forward)
    }

    fn rotate(&mut self, axis: Vec3, angle: f32) {
        let m = rotation_from_axis_angle(axis, angle);
        self.forward = transform_direction(&m, self.forward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::looking_at_origin(Vec3::new(1.0, 1.0, 0.5))
    }

    #[test]
    fn starts_looking_at_origin() {
        let cam = camera();
        assert!((cam.forward.length() - 1.0).abs() < 1e-6);
        assert!(cam.forward.abs_diff_eq(-cam.position.normalize(), 1e-6));
        assert!(cam.target().length() < cam.position.length());
    }

    #[test]
    fn idle_input_changes_nothing() {
        let mut cam = camera();
        let before = cam.clone();
        assert!(NavInput::default().is_idle());
        cam.update(&NavInput::default());
        assert_eq!(cam, before);
    }

    #[test]
    fn yaw_left_turns_counter_clockwise() {
        let mut cam = Camera::looking_at_origin(Vec3::new(-1.0, 0.0, 0.0));
        let (_, f) = cam.update(&NavInput::with(&[NavAction::YawLeft]));
        assert!((f.x - YAW_STEP.cos()).abs() < 1e-6);
        assert!((f.y - YAW_STEP.sin()).abs() < 1e-6);
        assert_eq!(f.z, 0.0);
    }

    #[test]
    fn pitch_up_raises_forward() {
        let mut cam = Camera::looking_at_origin(Vec3::new(-1.0, 0.0, 0.0));
        let (_, f) = cam.update(&NavInput::with(&[NavAction::PitchUp]));
        assert!((f.z - PITCH_STEP.sin()).abs() < 1e-6);
        assert!(f.y.abs() < 1e-6);
    }

    #[test]
    fn forward_moves_along_view() {
        let mut cam = camera();
        let start = cam.position;
        let (p, f) = cam.update(&NavInput::with(&[NavAction::Forward]));
        assert!(p.abs_diff_eq(start + f * MOVE_STEP, 1e-6));
        let (p, _) = cam.update(&NavInput::with(&[NavAction::Back]));
        assert!(p.abs_diff_eq(start, 1e-6));
    }

    #[test]
    fn strafe_right_moves_along_right() {
        let mut cam = Camera::looking_at_origin(Vec3::new(-1.0, 0.0, 0.0));
        // looking down +x, right is -y
        let (p, f) = cam.update(&NavInput::with(&[NavAction::StrafeRight]));
        assert!(p.abs_diff_eq(Vec3::new(-1.0, -MOVE_STEP, 0.0), 1e-6));
        assert_eq!(f, Vec3::X);
    }

    #[test]
    fn vertical_forward_skips_pitch_and_strafe() {
        let mut cam = Camera::looking_at_origin(Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(cam.right(), Vec3::ZERO);
        let before = cam.clone();
        cam.update(&NavInput::with(&[
            NavAction::PitchUp,
            NavAction::StrafeLeft,
        ]));
        assert_eq!(cam, before);
    }

    #[test]
    fn input_set_and_query() {
        let mut input = NavInput::default();
        for action in NavAction::ALL {
            input.set(action, true);
            assert!(input.is_held(action));
            input.set(action, false);
        }
        assert!(input.is_idle());
    }

    #[test]
    fn config_steps_are_used() {
        let mut cam = Camera::from_config(&CameraConfig {
            position: [-1.0, 0.0, 0.0],
            move_step: 0.5,
            ..CameraConfig::default()
        });
        let (p, _) = cam.update(&NavInput::with(&[NavAction::Forward]));
        assert!(p.abs_diff_eq(Vec3::new(-0.5, 0.0, 0.0), 1e-6));
    }
}
