//! Rigid-body stand-in for the simulated ROV.
//!
//! Frames: world +Z up; body +X forward, +Y left, +Z up. The hull is
//! neutrally buoyant; the centre of buoyancy sits above the centre of mass,
//! which gives a righting moment in roll and pitch.

use bevy_math::{DQuat, DVec3};
use control::{rpy_from_rotation, RootPose};
use serde::{Deserialize, Serialize};

const GRAVITY: f64 = 9.81;

/// Physical parameters of the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    pub mass: f64,
    /// Principal moments about body x, y, z.
    pub inertia: DVec3,
    /// Linear drag per body axis, N/(m/s).
    pub linear_drag: DVec3,
    /// Quadratic drag per body axis, N/(m/s)^2.
    pub quadratic_drag: DVec3,
    /// Angular damping per body axis, N·m/(rad/s).
    pub angular_drag: DVec3,
    /// Centre of buoyancy relative to the centre of mass, body frame.
    pub cb_offset_body: DVec3,
    /// Vertical thrusters sit at (±x, ±y).
    pub vertical_offset: [f64; 2],
    /// Horizontal thrusters sit at (0, ±y).
    pub horizontal_offset: f64,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            mass: 30.0,
            inertia: DVec3::new(0.6, 0.8, 0.9),
            linear_drag: DVec3::new(20.0, 30.0, 40.0),
            quadratic_drag: DVec3::new(15.0, 25.0, 30.0),
            angular_drag: DVec3::new(1.0, 1.0, 1.0),
            cb_offset_body: DVec3::new(0.0, 0.0, 0.05),
            vertical_offset: [0.2, 0.15],
            horizontal_offset: 0.2,
        }
    }
}

impl VehicleSpec {
    /// Body positions of the vertical thrusters: front-right, front-left,
    /// rear-left, rear-right.
    pub fn vertical_positions(&self) -> [DVec3; 4] {
        let [x, y] = self.vertical_offset;
        [
            DVec3::new(x, -y, 0.0),
            DVec3::new(x, y, 0.0),
            DVec3::new(-x, y, 0.0),
            DVec3::new(-x, -y, 0.0),
        ]
    }

    /// Body positions of the horizontal thrusters: right, left.
    pub fn horizontal_positions(&self) -> [DVec3; 2] {
        let y = self.horizontal_offset;
        [DVec3::new(0.0, -y, 0.0), DVec3::new(0.0, y, 0.0)]
    }
}

/// Thruster outputs in the fixed layout order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrusterForces {
    /// (force, reaction torque) per vertical thruster.
    pub vertical: [(f64, f64); 4],
    pub horizontal: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantState {
    pub position: DVec3,
    /// World-frame linear velocity.
    pub velocity: DVec3,
    /// Body→world.
    pub orientation: DQuat,
    /// Body-frame angular velocity.
    pub angular_velocity: DVec3,
}

impl PlantState {
    pub fn at_rest(root: RootPose) -> Self {
        Self {
            position: root.translation,
            velocity: DVec3::ZERO,
            orientation: root.rotation,
            angular_velocity: DVec3::ZERO,
        }
    }

    pub fn root(&self) -> RootPose {
        RootPose::new(self.position, self.orientation)
    }

    /// `(roll, pitch, yaw)`.
    pub fn rpy(&self) -> DVec3 {
        rpy_from_rotation(self.orientation)
    }
}

#[derive(Debug, Clone)]
pub struct Plant {
    pub spec: VehicleSpec,
    pub state: PlantState,
}

impl Plant {
    pub fn new(spec: VehicleSpec, root: RootPose) -> Self {
        Self { spec, state: PlantState::at_rest(root) }
    }

    /// What a body-mounted rate gyro would read.
    pub fn gyro_reading(&self) -> DVec3 {
        self.state.angular_velocity
    }

    /// Net body-frame force and torque from the thrusters alone.
    pub fn thruster_wrench(&self, thrust: &ThrusterForces) -> (DVec3, DVec3) {
        let mut force = DVec3::ZERO;
        let mut torque = DVec3::ZERO;
        for (r, &(f, tau)) in self.spec.vertical_positions().iter().zip(&thrust.vertical) {
            let f_b = DVec3::new(0.0, 0.0, f);
            force += f_b;
            torque += r.cross(f_b) + DVec3::new(0.0, 0.0, tau);
        }
        for (r, &f) in self.spec.horizontal_positions().iter().zip(&thrust.horizontal) {
            let f_b = DVec3::new(f, 0.0, 0.0);
            force += f_b;
            torque += r.cross(f_b);
        }
        (force, torque)
    }

    /// Advance by `dt` with semi-implicit Euler.
    pub fn step(&mut self, thrust: &ThrusterForces, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        let (f_thrust, tau_thrust) = self.thruster_wrench(thrust);
        let spec = &self.spec;
        let s = &mut self.state;
        let world_to_body = s.orientation.inverse();

        // Hydrodynamic drag on body-frame velocity.
        let v_b = world_to_body * s.velocity;
        let f_drag = -(spec.linear_drag * v_b + spec.quadratic_drag * v_b.abs() * v_b);

        // Buoyancy acting at the centre of buoyancy; weight cancels it at the
        // centre of mass, leaving only the righting moment.
        let buoyancy_b = world_to_body * DVec3::new(0.0, 0.0, spec.mass * GRAVITY);
        let tau_righting = spec.cb_offset_body.cross(buoyancy_b);

        let accel = s.orientation * (f_thrust + f_drag) / spec.mass;
        s.velocity += accel * dt;
        s.position += s.velocity * dt;

        let w = s.angular_velocity;
        let tau = tau_thrust + tau_righting - spec.angular_drag * w - w.cross(spec.inertia * w);
        s.angular_velocity += tau / spec.inertia * dt;
        s.orientation = (s.orientation * DQuat::from_scaled_axis(s.angular_velocity * dt)).normalize();
    }
}
