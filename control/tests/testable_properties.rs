use bevy_math::DVec3;
use control::{
    apply_deadzone, ControllerConfig, ControllerOptions, ControllerSetup, DeviceSet, EdgeToggle,
    JoystickAxis, JoystickButton, JoystickState, JoystickThrusterController, RootPose,
    ThrustMixer, ThrusterId, ThrusterSink, TickInput,
};

const DT: f64 = 0.005;

#[derive(Default)]
struct RecordingSink {
    writes: Vec<(ThrusterId, f64, f64)>,
}

impl ThrusterSink for RecordingSink {
    fn notify_state_change(&mut self, id: ThrusterId, force: f64, torque: f64) {
        self.writes.push((id, force, torque));
    }
}

fn all_devices() -> DeviceSet {
    DeviceSet {
        vertical: [Some(ThrusterId(0)), Some(ThrusterId(1)), Some(ThrusterId(2)), Some(ThrusterId(3))],
        horizontal: [Some(ThrusterId(4)), Some(ThrusterId(5))],
        gyro: None,
    }
}

fn controller_at(root: RootPose) -> JoystickThrusterController {
    let setup = ControllerSetup {
        time_step: DT,
        options: ControllerOptions::default(),
        initial_root: root,
        devices: all_devices(),
    };
    JoystickThrusterController::new(ControllerConfig::default(), setup).expect("valid setup")
}

fn root_at_depth(z: f64) -> RootPose {
    RootPose::new(DVec3::new(0.0, 0.0, z), Default::default())
}

/// Press and release the toggle button so stabilization ends up disabled.
fn disable(ctrl: &mut JoystickThrusterController, root: RootPose, sink: &mut RecordingSink) {
    let mut pressed = JoystickState::neutral().with_button(JoystickButton::A, true);
    ctrl.control(&TickInput::new(root), &mut pressed, sink);
    assert!(!ctrl.stabilization_enabled());
}

#[test]
fn deadzone_zeroes_small_readings_and_passes_the_rest() {
    for v in [0.0, 0.05, -0.1, 0.199_999, -0.199_999] {
        assert_eq!(apply_deadzone(v, 0.20), 0.0, "reading {v}");
    }
    for v in [0.20, -0.20, 0.5, -0.75, 1.0] {
        assert_eq!(apply_deadzone(v, 0.20), v, "reading {v}");
    }
}

#[test]
fn deadzone_applies_to_controller_inputs() {
    let mut ctrl = controller_at(root_at_depth(-1.0));
    let mut sink = RecordingSink::default();
    // Forward stick inside the deadzone: horizontal thrusters stay at zero.
    let mut js = JoystickState::neutral().with_axis(JoystickAxis::LStickV, -0.19);
    ctrl.control(&TickInput::new(root_at_depth(-1.0)), &mut js, &mut sink);
    assert_eq!(ctrl.commands().horizontal, [0.0, 0.0]);

    js.set_axis(JoystickAxis::LStickV, -0.2);
    ctrl.control(&TickInput::new(root_at_depth(-1.0)), &mut js, &mut sink);
    let expected = 0.3 * (-2.0 * -0.2);
    assert_eq!(ctrl.commands().horizontal, [expected, expected]);
}

#[test]
fn toggle_flips_only_on_rising_edges() {
    let mut toggle = EdgeToggle::default();
    let edges: Vec<bool> = [false, true, true, false, true]
        .into_iter()
        .map(|p| toggle.update(p))
        .collect();
    assert_eq!(edges, vec![false, true, false, false, true]);
    assert!(toggle.previous(), "last level seen was pressed");
}

#[test]
fn controller_stabilization_follows_button_edges() {
    let root = root_at_depth(-1.0);
    let mut ctrl = controller_at(root);
    let mut sink = RecordingSink::default();
    let mut states = Vec::new();
    for pressed in [false, true, true, false, true] {
        let mut js = JoystickState::neutral().with_button(JoystickButton::A, pressed);
        ctrl.control(&TickInput::new(root), &mut js, &mut sink);
        states.push(ctrl.stabilization_enabled());
    }
    // Starts enabled; flips at indices 1 and 4 only.
    assert_eq!(states, vec![true, false, false, false, true]);
}

#[test]
fn depth_reference_tracks_measurement_while_disabled() {
    let start = root_at_depth(-1.0);
    let mut ctrl = controller_at(start);
    let mut sink = RecordingSink::default();
    disable(&mut ctrl, start, &mut sink);

    let moved = root_at_depth(-1.3);
    let mut js = JoystickState::neutral();
    ctrl.control(&TickInput::new(moved), &mut js, &mut sink);

    let refs = ctrl.references();
    assert_eq!(refs.position[0], -1.3);
    assert_eq!(refs.rate[0], (-1.3 - -1.0) / DT);
}

#[test]
fn vertical_thrust_is_suppressed_while_disabled() {
    let start = root_at_depth(-1.0);
    let mut ctrl = controller_at(start);
    let mut sink = RecordingSink::default();
    disable(&mut ctrl, start, &mut sink);

    let mut js = JoystickState::neutral()
        .with_axis(JoystickAxis::RStickV, 1.0)
        .with_axis(JoystickAxis::RStickH, -1.0)
        .with_axis(JoystickAxis::LStickH, 0.8)
        .with_axis(JoystickAxis::LStickV, -0.6);
    let tilted = RootPose::from_xyz_rpy(DVec3::new(0.4, -0.2, -2.5), 0.3, -0.2, 1.0);
    sink.writes.clear();
    ctrl.control(&TickInput::new(tilted), &mut js, &mut sink);

    for cmd in ctrl.commands().vertical {
        assert_eq!(cmd.force, 0.0);
        assert_eq!(cmd.torque, 0.0);
    }
    // Only the vertical thrusters are notified while disabled.
    let ids: Vec<usize> = sink.writes.iter().map(|(id, _, _)| id.0).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn depth_only_force_follows_the_depth_column() {
    let mixer = ThrustMixer::default();
    let force = 3.5;
    let out = mixer.mix_vertical([force, 0.0, 0.0, 0.0], true);
    for (i, cmd) in out.iter().enumerate() {
        assert_eq!(cmd.force, mixer.sign[i][0] * force);
        assert_eq!(cmd.torque, mixer.torque_dir[i] * mixer.sign[i][0] * force);
    }
}

#[test]
fn depth_error_drives_all_vertical_thrusters_equally() {
    let mut ctrl = controller_at(root_at_depth(-1.0));
    let mut sink = RecordingSink::default();
    let mut js = JoystickState::neutral();
    // Held still 0.1 m below the reference: only the depth channel acts.
    ctrl.control(&TickInput::new(root_at_depth(-1.1)), &mut js, &mut sink);
    ctrl.control(&TickInput::new(root_at_depth(-1.1)), &mut js, &mut sink);

    let expected = 10.0 * (-1.0 - -1.1);
    for cmd in ctrl.commands().vertical {
        assert!((cmd.force - expected).abs() < 1e-9, "force {}", cmd.force);
    }
}

#[test]
fn differential_drive_is_symmetric() {
    let mixer = ThrustMixer::default();
    let f = -0.8;
    assert_eq!(mixer.mix_horizontal(f, 0.0), [0.3 * (-2.0 * f), 0.3 * (-2.0 * f)]);
    let t = 0.6;
    assert_eq!(mixer.mix_horizontal(0.0, t), [0.3 * (-t), 0.3 * t]);
}

#[test]
fn turn_stick_reaches_horizontal_thrusters() {
    let root = root_at_depth(-1.0);
    let mut ctrl = controller_at(root);
    let mut sink = RecordingSink::default();
    let mut js = JoystickState::neutral().with_axis(JoystickAxis::LStickH, 0.5);
    ctrl.control(&TickInput::new(root), &mut js, &mut sink);
    assert_eq!(ctrl.commands().horizontal, [0.3 * -0.5, 0.3 * 0.5]);
    assert!(sink.writes.contains(&(ThrusterId(4), 0.3 * -0.5, 0.0)));
    assert!(sink.writes.contains(&(ThrusterId(5), 0.3 * 0.5, 0.0)));
}
