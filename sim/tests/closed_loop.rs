use control::{JoystickAxis, JoystickButton};
use sim::{run_scenario, summarize_recording, Config, ScriptSegment};

fn scenario(duration_s: f64, script: Vec<ScriptSegment>) -> Config {
    let mut cfg = Config::default();
    cfg.sim.duration_s = duration_s;
    cfg.sim.log_every = 0;
    cfg.script = script;
    cfg
}

#[test]
fn holds_depth_with_sticks_neutral() {
    let cfg = scenario(10.0, Vec::new());
    let summary = run_scenario(&cfg, None).unwrap();

    assert_eq!(summary.ticks, 2000);
    assert!(summary.stabilization);
    assert!((summary.final_pose.z + 2.0).abs() < 1e-9, "z = {}", summary.final_pose.z);
    assert!(summary.final_pose.roll.abs() < 1e-9);
    assert!(summary.final_pose.pitch.abs() < 1e-9);
}

#[test]
fn depth_stick_moves_the_reference_and_the_vehicle_follows() {
    // 1000 ticks of full up-stick raise the depth reference by 0.1 m.
    let cfg = scenario(
        15.0,
        vec![ScriptSegment::new(5.0).axis(JoystickAxis::RStickV, -1.0)],
    );
    let summary = run_scenario(&cfg, None).unwrap();

    let z = summary.final_pose.z;
    assert!((z - -1.9).abs() < 0.01, "z = {z}");
    assert!(summary.max_depth < -1.89);
}

#[test]
fn small_stick_deflections_do_nothing() {
    let cfg = scenario(
        5.0,
        vec![ScriptSegment::new(5.0)
            .axis(JoystickAxis::RStickV, 0.15)
            .axis(JoystickAxis::LStickV, -0.19)
            .axis(JoystickAxis::LStickH, 0.1)],
    );
    let summary = run_scenario(&cfg, None).unwrap();

    assert_eq!(summary.peak_vertical_force, 0.0);
    assert!((summary.final_pose.z + 2.0).abs() < 1e-12);
    assert!(summary.final_pose.x.abs() < 1e-12);
}

#[test]
fn forward_stick_drives_ahead_at_constant_depth() {
    let cfg = scenario(
        10.0,
        vec![ScriptSegment::new(10.0).axis(JoystickAxis::LStickV, -1.0)],
    );
    let summary = run_scenario(&cfg, None).unwrap();

    let pose = summary.final_pose;
    assert!(pose.x > 0.2, "x = {}", pose.x);
    assert!(pose.y.abs() < 1e-6, "y = {}", pose.y);
    assert!((pose.z + 2.0).abs() < 0.05, "z = {}", pose.z);
}

#[test]
fn turn_stick_yaws_right() {
    let cfg = scenario(
        5.0,
        vec![
            // Stabilization must be on for the horizontal pair to be driven.
            ScriptSegment::new(5.0).axis(JoystickAxis::LStickH, 1.0),
        ],
    );
    let summary = run_scenario(&cfg, None).unwrap();
    assert!(summary.final_pose.yaw < -0.05, "yaw = {}", summary.final_pose.yaw);
}

#[test]
fn pressing_a_cuts_the_vertical_thrusters() {
    let cfg = scenario(
        2.0,
        vec![
            ScriptSegment::new(0.1).button(JoystickButton::A, true),
            // Ignored once stabilization is off: no vertical thrust at all.
            ScriptSegment::new(1.9).axis(JoystickAxis::RStickV, 1.0),
        ],
    );
    let summary = run_scenario(&cfg, None).unwrap();

    assert!(!summary.stabilization);
    assert_eq!(summary.peak_vertical_force, 0.0);
    assert!((summary.final_pose.z + 2.0).abs() < 1e-12);
}

#[test]
fn recording_replays_to_the_same_run() {
    let cfg = scenario(
        1.0,
        vec![
            ScriptSegment::new(0.05).button(JoystickButton::A, true),
            ScriptSegment::new(0.05),
            ScriptSegment::new(0.05).button(JoystickButton::A, true),
        ],
    );
    let mut buf: Vec<u8> = Vec::new();
    let run = run_scenario(&cfg, Some(&mut buf)).unwrap();
    let replay = summarize_recording(buf.as_slice()).unwrap();

    assert_eq!(replay.frames, run.ticks);
    assert_eq!(replay.time_step, cfg.sim.time_step);
    assert!(!replay.manual);
    assert!(replay.gyro);
    // Frame 0 already shows the first press; only the second one is a change.
    assert_eq!(replay.toggles, 1);
    assert!(replay.final_stabilization);
    assert_eq!(replay.final_stabilization, run.stabilization);
}

#[test]
fn empty_recording_is_rejected() {
    assert!(summarize_recording(std::io::empty()).is_err());
}

#[test]
fn invalid_scenario_is_rejected_before_running() {
    let mut cfg = scenario(1.0, Vec::new());
    cfg.sim.time_step = 0.0;
    assert!(run_scenario(&cfg, None).is_err());

    let mut cfg = scenario(1.0, Vec::new());
    cfg.controller.deadzone = -1.0;
    assert!(run_scenario(&cfg, None).is_err());
}
