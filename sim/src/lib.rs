//! Headless host for the joystick thruster controller.
//!
//! Stands in for the simulator the controller normally lives in: it owns a
//! small rigid-body vehicle, a scripted joystick and a named device table,
//! and drives the controller at a fixed rate.

pub mod args;
pub mod config;
pub mod host;
pub mod joystick;
pub mod plant;
pub mod run;

pub use args::{Args, Command};
pub use config::{load_config, Config, InitialPose, SimSettings};
pub use host::HostDevices;
pub use joystick::{ScriptSegment, ScriptedJoystick};
pub use plant::{Plant, PlantState, ThrusterForces, VehicleSpec};
pub use run::{run_scenario, summarize_recording, RecordingSummary, RunSummary};
