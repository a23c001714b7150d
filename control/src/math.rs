use bevy_math::{DQuat, DVec2, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// World pose of the vehicle's root link.
///
/// Frame conventions: world +Z up, body +X forward, +Y left, +Z up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootPose {
    pub translation: DVec3,
    /// Body→world rotation.
    pub rotation: DQuat,
}

impl RootPose {
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    pub const fn new(translation: DVec3, rotation: DQuat) -> Self {
        Self { translation, rotation }
    }

    /// Build a pose from a position and roll/pitch/yaw (Z-Y-X order).
    pub fn from_xyz_rpy(translation: DVec3, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            translation,
            rotation: DQuat::from_euler(EulerRot::ZYX, yaw, pitch, roll),
        }
    }
}

impl Default for RootPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Roll, pitch and yaw of a rotation, returned as `(roll, pitch, yaw)` in a
/// vector. Matches `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[inline]
pub fn rpy_from_rotation(q: DQuat) -> DVec3 {
    let (yaw, pitch, roll) = q.to_euler(EulerRot::ZYX);
    DVec3::new(roll, pitch, yaw)
}

/// Rotate a planar vector counter-clockwise by `angle` radians.
#[inline]
pub fn rotate_planar(v: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(v)
}
