use bevy_math::{DVec2, DVec3};
use tracing::debug;

use crate::{rpy_from_rotation, DeviceSet, RootPose, VerticalCommand};

/// Control channels, in the order used by every per-axis table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Depth,
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Depth, Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One pose sample: depth and attitude plus the planar position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseSample {
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub x: f64,
    pub y: f64,
}

impl PoseSample {
    pub fn from_root(root: &RootPose) -> Self {
        let rpy = rpy_from_rotation(root.rotation);
        Self {
            z: root.translation.z,
            roll: rpy.x,
            pitch: rpy.y,
            yaw: rpy.z,
            x: root.translation.x,
            y: root.translation.y,
        }
    }

    /// `[z, roll, pitch, yaw]`, indexed by [`Axis::index`].
    pub fn zrpy(&self) -> [f64; 4] {
        [self.z, self.roll, self.pitch, self.yaw]
    }

    pub fn xy(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Options passed by the host as plain strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Roll/pitch references follow the stick directly instead of the
    /// lateral-velocity loop.
    pub manual: bool,
}

impl ControllerOptions {
    pub fn from_options<S: AsRef<str>>(options: &[S]) -> Self {
        let mut out = Self::default();
        for opt in options {
            match opt.as_ref() {
                "manual" => out.manual = true,
                other => debug!(option = other, "ignoring unrecognized controller option"),
            }
        }
        out
    }
}

/// Everything the host hands over once, before the first tick.
#[derive(Debug, Clone)]
pub struct ControllerSetup {
    pub time_step: f64,
    pub options: ControllerOptions,
    pub initial_root: RootPose,
    pub devices: DeviceSet,
}

/// Per-tick measurements from the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub root: RootPose,
    /// Rate gyro reading in the body frame, if the host has one.
    pub gyro_angular_velocity: Option<DVec3>,
}

impl TickInput {
    pub fn new(root: RootPose) -> Self {
        Self { root, gyro_angular_velocity: None }
    }

    pub fn with_gyro(mut self, w: DVec3) -> Self {
        self.gyro_angular_velocity = Some(w);
        self
    }
}

/// Setpoints carried between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct References {
    /// Depth, roll, pitch references. The yaw slot is unused.
    pub position: [f64; 4],
    /// Depth-rate reference in slot 0, yaw-rate reference in slot 3.
    pub rate: [f64; 4],
    /// Desired lateral velocities feeding roll (0) and pitch (1).
    pub lateral_velocity: [f64; 2],
}

/// Last output written to the thrusters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrusterCommands {
    /// Front-right, front-left, rear-left, rear-right.
    pub vertical: [VerticalCommand; 4],
    /// Right, left. Held at their last value while stabilization is off.
    pub horizontal: [f64; 2],
}

/// Intermediate values of one tick, for telemetry and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlDebug {
    pub dt: f64,
    pub pose: PoseSample,
    pub stabilization: bool,
    pub rate: [f64; 4],
    pub accel: [f64; 4],
    pub planar_velocity_local: DVec2,
    pub planar_accel_local: DVec2,
    /// Effective stick value per channel after the deadzone.
    pub sticks: [f64; 4],
    pub axis_forces: [f64; 4],
    pub gyro_used: bool,
}
