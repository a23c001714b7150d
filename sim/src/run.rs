use std::io::{Read, Write};

use anyhow::{bail, Context, Result};
use control::{
    ControllerOptions, ControllerSetup, DeviceSet, JoystickThrusterController, TickInput,
};
use protocol::{read_record, write_record, PoseRecord, Record, TelemetryFrame, ThrusterRecord};
use tracing::info;

use crate::{Config, HostDevices, Plant, PlantState, ScriptedJoystick};

/// Outcome of a scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub final_pose: PoseRecord,
    pub stabilization: bool,
    pub min_depth: f64,
    pub max_depth: f64,
    /// Largest vertical thruster force magnitude seen.
    pub peak_vertical_force: f64,
}

/// What a recording contains, as reported by `replay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSummary {
    pub time_step: f64,
    pub manual: bool,
    pub gyro: bool,
    pub frames: u64,
    pub duration: f64,
    pub min_depth: f64,
    pub max_depth: f64,
    /// Number of stabilization mode changes between consecutive frames.
    pub toggles: u64,
    pub final_stabilization: bool,
    pub final_pose: PoseRecord,
}

fn pose_record(state: &PlantState) -> PoseRecord {
    let rpy = state.rpy();
    PoseRecord {
        x: state.position.x,
        y: state.position.y,
        z: state.position.z,
        roll: rpy.x,
        pitch: rpy.y,
        yaw: rpy.z,
    }
}

/// Drive the controller against the plant for the configured duration.
///
/// Each tick: sample the plant, run one control step, read the thruster
/// table back and integrate the plant. Frames record the pose the controller
/// saw together with the commands it produced.
pub fn run_scenario(cfg: &Config, mut recorder: Option<&mut dyn Write>) -> Result<RunSummary> {
    cfg.validate()?;
    let dt = cfg.sim.time_step;
    let root = cfg.initial.root();
    let names = &cfg.controller.devices;

    let mut host = HostDevices::standard(names, cfg.sim.gyro);
    let devices = DeviceSet::resolve(&host, names);
    let options = ControllerOptions::from_options(&cfg.sim.options);
    let setup = ControllerSetup { time_step: dt, options, initial_root: root, devices };
    let mut controller = JoystickThrusterController::new(cfg.controller.clone(), setup)
        .context("controller setup failed")?;
    let mut joystick = ScriptedJoystick::new(cfg.script.clone(), dt);
    let mut plant = Plant::new(cfg.vehicle.clone(), root);

    if let Some(out) = recorder.as_deref_mut() {
        let header = Record::Header { time_step: dt, manual: options.manual, gyro: host.has_gyro() };
        write_record(out, &header).context("writing recording header")?;
    }

    let ticks = cfg.tick_count();
    info!(ticks, dt, manual = options.manual, gyro = host.has_gyro(), "scenario start");

    let mut min_depth = plant.state.position.z;
    let mut max_depth = plant.state.position.z;
    let mut peak_vertical_force: f64 = 0.0;
    for tick in 0..ticks {
        let seen = plant.state;
        let mut input = TickInput::new(seen.root());
        if host.has_gyro() {
            input = input.with_gyro(plant.gyro_reading());
        }
        controller.control(&input, &mut joystick, &mut host);

        let forces = host.forces(&devices);
        plant.step(&forces, dt);

        let z = plant.state.position.z;
        min_depth = min_depth.min(z);
        max_depth = max_depth.max(z);
        for (f, _) in forces.vertical {
            peak_vertical_force = peak_vertical_force.max(f.abs());
        }

        if let Some(out) = recorder.as_deref_mut() {
            let frame = TelemetryFrame {
                tick,
                time: tick as f64 * dt,
                stabilization: controller.stabilization_enabled(),
                pose: pose_record(&seen),
                vertical: forces
                    .vertical
                    .map(|(force, torque)| ThrusterRecord { force, torque }),
                horizontal: forces
                    .horizontal
                    .map(|force| ThrusterRecord { force, torque: 0.0 }),
            };
            write_record(out, &Record::Frame(frame))
                .with_context(|| format!("writing frame {tick}"))?;
        }

        if cfg.sim.log_every > 0 && tick % cfg.sim.log_every == 0 {
            info!(
                tick,
                z,
                stabilization = controller.stabilization_enabled(),
                "progress"
            );
        }
    }

    let summary = RunSummary {
        ticks,
        final_pose: pose_record(&plant.state),
        stabilization: controller.stabilization_enabled(),
        min_depth,
        max_depth,
        peak_vertical_force,
    };
    info!(
        ticks,
        z = summary.final_pose.z,
        min_depth,
        max_depth,
        stabilization = summary.stabilization,
        "scenario done"
    );
    Ok(summary)
}

/// Read a recording written by [`run_scenario`] and summarize it.
pub fn summarize_recording<R: Read>(mut input: R) -> Result<RecordingSummary> {
    let (time_step, manual, gyro) = match read_record(&mut input)? {
        Some(Record::Header { time_step, manual, gyro }) => (time_step, manual, gyro),
        Some(Record::Frame(_)) => bail!("recording does not start with a header"),
        None => bail!("recording is empty"),
    };

    let mut frames = 0u64;
    let mut last: Option<TelemetryFrame> = None;
    let mut min_depth = f64::INFINITY;
    let mut max_depth = f64::NEG_INFINITY;
    let mut toggles = 0u64;
    while let Some(record) = read_record(&mut input).with_context(|| format!("reading frame {frames}"))? {
        let Record::Frame(frame) = record else {
            bail!("unexpected header after {frames} frames");
        };
        if last.is_some_and(|prev| prev.stabilization != frame.stabilization) {
            toggles += 1;
        }
        min_depth = min_depth.min(frame.pose.z);
        max_depth = max_depth.max(frame.pose.z);
        frames += 1;
        last = Some(frame);
    }

    let last = last.context("recording has no frames")?;
    Ok(RecordingSummary {
        time_step,
        manual,
        gyro,
        frames,
        duration: frames as f64 * time_step,
        min_depth,
        max_depth,
        toggles,
        final_stabilization: last.stabilization,
        final_pose: last.pose,
    })
}
