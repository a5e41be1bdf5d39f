use glam::Vec3;
use log::debug;

use crate::camera::Camera;
use crate::config::Settings;
use crate::traits::{Button, Controller, ViewTarget};

/// Squared speed below which the camera snaps to rest.
pub const REST_THRESHOLD: f32 = 1.0e-9;

/// Discrete movement command. Each variant selects its camera-local axis and
/// the sign applied along it, replacing angle-literal comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Forward,
        MoveDirection::Backward,
        MoveDirection::Left,
        MoveDirection::Right,
    ];

    pub fn from_button(button: Button) -> Option<Self> {
        match button {
            Button::KeyW => Some(MoveDirection::Forward),
            Button::KeyS => Some(MoveDirection::Backward),
            Button::KeyA => Some(MoveDirection::Left),
            Button::KeyD => Some(MoveDirection::Right),
            Button::Escape => None,
        }
    }

    pub fn button(self) -> Button {
        match self {
            MoveDirection::Forward => Button::KeyW,
            MoveDirection::Backward => Button::KeyS,
            MoveDirection::Left => Button::KeyA,
            MoveDirection::Right => Button::KeyD,
        }
    }

    /// Movement axis in camera-local space and the sign applied along it.
    ///
    /// Positions integrate by subtracting velocity, so Forward pushes the
    /// velocity along the view matrix's forward basis row and Right pushes
    /// it along the left vector.
    fn axis_and_sign(self, camera: &Camera) -> (Vec3, f32) {
        match self {
            MoveDirection::Forward => (camera.forward_basis(), 1.0),
            MoveDirection::Backward => (camera.forward_basis(), -1.0),
            MoveDirection::Right => (camera.left_basis(), 1.0),
            MoveDirection::Left => (camera.left_basis(), -1.0),
        }
    }
}

/// Tri-state push signal driving the velocity blend.
///
/// `Accelerating` lasts exactly one frame: it is re-armed while a movement
/// key is held and decays to `Decelerating` at the end of every frame, so
/// the velocity decay, not a held flag, carries the camera between frames.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pushing {
    #[default]
    Idle,
    Accelerating,
    Decelerating,
}

/// Advance the motion model one frame and upload the resulting view matrix.
///
/// Velocity blends exponentially toward the commanded direction (X and Z
/// only; motion is planar) and the position integrates by a fixed per-frame
/// scale. The integration step is frame-rate dependent on purpose; see the
/// settings documentation.
pub fn step(
    camera: &mut Camera,
    controller: &dyn Controller,
    settings: &Settings,
    target: &mut dyn ViewTarget,
) {
    if MoveDirection::ALL
        .iter()
        .any(|direction| controller.is_down(direction.button()))
    {
        if camera.pushing == Pushing::Idle {
            debug!("pushing: Idle -> Accelerating, direction {:?}", camera.move_direction);
        }
        camera.pushing = Pushing::Accelerating;
    }

    if camera.pushing != Pushing::Idle {
        let accelerating = camera.pushing == Pushing::Accelerating;
        let max_velocity = if accelerating {
            settings.max_velocity
        } else {
            0.0
        };
        let blend = if accelerating {
            settings.acceleration
        } else {
            settings.deceleration
        };

        if let Some(direction) = camera.move_direction {
            let (axis, sign) = direction.axis_and_sign(camera);
            let push = axis * (sign * blend * max_velocity);
            camera.velocity.x = camera.velocity.x * (1.0 - blend) + push.x;
            camera.velocity.z = camera.velocity.z * (1.0 - blend) + push.z;
        }

        camera.position -= camera.velocity * settings.step_scale;

        if camera.velocity.length_squared() < REST_THRESHOLD {
            camera.velocity = Vec3::ZERO;
            camera.pushing = Pushing::Idle;
            debug!("at rest, position {:?}", camera.position);
        }
    }

    // Accelerating is an edge-triggered pulse; decay it every frame.
    if camera.pushing == Pushing::Accelerating {
        camera.pushing = Pushing::Decelerating;
    }

    camera.rebuild_view();
    target.set_view_matrix(camera.view_matrix());
}
