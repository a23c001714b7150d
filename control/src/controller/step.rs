use bevy_math::DVec2;
use tracing::{debug, info};

use super::types::{
    Axis, ControlDebug, ControllerOptions, ControllerSetup, PoseSample, References,
    ThrusterCommands, TickInput,
};
use crate::{
    apply_deadzone, rotate_planar, ControllerConfig, DeviceSet, EdgeToggle, Joystick,
    SetupError, ThrusterSink,
};

/// Values from the previous tick used for differencing.
#[derive(Debug, Clone, Copy)]
struct Previous {
    zrpy: [f64; 4],
    zrpy_rate: [f64; 4],
    xy: DVec2,
    xy_rate: DVec2,
}

/// Joystick-to-thruster controller for a four-vertical, two-horizontal
/// thruster vehicle.
///
/// One instance per vehicle. Everything it remembers between ticks lives in
/// the instance, so several controllers can run side by side.
#[derive(Debug, Clone)]
pub struct JoystickThrusterController {
    config: ControllerConfig,
    dt: f64,
    options: ControllerOptions,
    devices: DeviceSet,
    toggle: EdgeToggle,
    stabilization: bool,
    refs: References,
    prev: Previous,
    commands: ThrusterCommands,
}

impl JoystickThrusterController {
    pub fn new(config: ControllerConfig, setup: ControllerSetup) -> Result<Self, SetupError> {
        config.validate()?;
        let dt = setup.time_step;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SetupError::InvalidTimeStep(dt));
        }

        let pose = PoseSample::from_root(&setup.initial_root);
        let refs = References {
            position: pose.zrpy(),
            rate: [0.0; 4],
            lateral_velocity: [0.0; 2],
        };
        let prev = Previous {
            zrpy: pose.zrpy(),
            zrpy_rate: [0.0; 4],
            xy: pose.xy(),
            xy_rate: DVec2::ZERO,
        };

        info!(
            dt,
            manual = setup.options.manual,
            gyro = setup.devices.gyro.is_some(),
            "joystick thruster controller initialized"
        );
        info!("Press the A button.");

        Ok(Self {
            config,
            dt,
            options: setup.options,
            devices: setup.devices,
            toggle: EdgeToggle::default(),
            stabilization: true,
            refs,
            prev,
            commands: ThrusterCommands::default(),
        })
    }

    pub fn stabilization_enabled(&self) -> bool {
        self.stabilization
    }

    pub fn references(&self) -> &References {
        &self.refs
    }

    pub fn commands(&self) -> &ThrusterCommands {
        &self.commands
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn time_step(&self) -> f64 {
        self.dt
    }

    /// Run one control tick. See `control_dbg` for the telemetry variant.
    pub fn control<J, S>(&mut self, input: &TickInput, joystick: &mut J, sink: &mut S) -> &ThrusterCommands
    where
        J: Joystick + ?Sized,
        S: ThrusterSink + ?Sized,
    {
        self.control_dbg(input, joystick, sink, None)
    }

    /// Variant of `control` that fills out an optional debug struct.
    pub fn control_dbg<J, S>(
        &mut self,
        input: &TickInput,
        joystick: &mut J,
        sink: &mut S,
        mut dbg: Option<&mut ControlDebug>,
    ) -> &ThrusterCommands
    where
        J: Joystick + ?Sized,
        S: ThrusterSink + ?Sized,
    {
        joystick.refresh();
        let mapping = self.config.mapping;

        if self.toggle.update(joystick.button(mapping.toggle)) {
            self.stabilization = !self.stabilization;
            info!(enabled = self.stabilization, "stabilization toggled");
        }

        let deadzone = self.config.deadzone;
        let read = |axis| apply_deadzone(joystick.axis(axis), deadzone);

        // Horizontal pair: differential drive, only written while stabilized.
        if self.stabilization {
            let forward = read(mapping.forward);
            let turn = read(mapping.turn);
            self.commands.horizontal = self.config.mixer.mix_horizontal(forward, turn);
            for (id, force) in self.devices.horizontal.iter().zip(self.commands.horizontal) {
                if let Some(id) = id {
                    sink.notify_state_change(*id, force, 0.0);
                }
            }
        }

        let dt = self.dt;
        let sample = PoseSample::from_root(&input.root);
        let z = sample.zrpy();
        let mut dz: [f64; 4] = std::array::from_fn(|k| (z[k] - self.prev.zrpy[k]) / dt);

        let yaw = Axis::Yaw.index();
        let mut gyro_used = false;
        if let (Some(_), Some(w)) = (self.devices.gyro, input.gyro_angular_velocity) {
            let w_world = input.root.rotation * w;
            dz[yaw] = w_world.z;
            gyro_used = true;
        }
        let ddz: [f64; 4] = std::array::from_fn(|k| (dz[k] - self.prev.zrpy_rate[k]) / dt);

        let xy = sample.xy();
        let dxy = (xy - self.prev.xy) / dt;
        let ddxy = (dxy - self.prev.xy_rate) / dt;
        // Planar motion seen from the vehicle's own heading.
        let dxy_local = rotate_planar(dxy, -z[yaw]);
        let ddxy_local = rotate_planar(ddxy, -z[yaw]);

        let depth = Axis::Depth.index();
        if !self.stabilization {
            self.refs.position[depth] = z[depth];
            self.refs.rate[depth] = dz[depth];
        }

        let gains = &self.config.gains;
        let lateral = &self.config.lateral;
        let refs = &mut self.refs;
        let mut sticks = [0.0; 4];
        let mut f = [0.0; 4];
        for axis in Axis::ALL {
            let i = axis.index();
            let pos = read(mapping.channel(i));
            sticks[i] = pos;

            if axis == Axis::Yaw {
                refs.rate[i] = gains.stick[i] * pos;
                f[i] = gains.p[i] * (refs.rate[i] - dz[i]) + gains.d[i] * (0.0 - ddz[i]);
                continue;
            }

            if axis == Axis::Depth {
                refs.position[i] += gains.stick[i] * pos;
            } else if self.options.manual {
                refs.position[i] = gains.stick[i] * pos;
            } else {
                // Roll corrects sideways drift, pitch corrects fore/aft drift.
                let j = i - 1;
                refs.lateral_velocity[j] = lateral.stick[j] * pos;
                refs.position[i] = lateral.p[j] * (refs.lateral_velocity[j] - dxy_local[1 - j])
                    + lateral.d[j] * (0.0 - ddxy_local[1 - j]);
            }
            if axis == Axis::Roll {
                refs.position[i] *= -1.0;
            }
            f[i] = gains.p[i] * (refs.position[i] - z[i]) + gains.d[i] * (0.0 - dz[i]);
        }

        self.prev = Previous { zrpy: z, zrpy_rate: dz, xy, xy_rate: dxy };

        self.commands.vertical = self.config.mixer.mix_vertical(f, self.stabilization);
        for (id, cmd) in self.devices.vertical.iter().zip(self.commands.vertical) {
            if let Some(id) = id {
                sink.notify_state_change(*id, cmd.force, cmd.torque);
            }
        }

        debug!(
            stabilization = self.stabilization,
            depth = z[depth],
            depth_ref = self.refs.position[depth],
            forces = ?f,
            "control tick"
        );

        if let Some(d) = dbg.as_mut() {
            d.dt = dt;
            d.pose = sample;
            d.stabilization = self.stabilization;
            d.rate = dz;
            d.accel = ddz;
            d.planar_velocity_local = dxy_local;
            d.planar_accel_local = ddxy_local;
            d.sticks = sticks;
            d.axis_forces = f;
            d.gyro_used = gyro_used;
        }

        &self.commands
    }
}
