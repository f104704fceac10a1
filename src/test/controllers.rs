use super::{unique_temp_dir, wait_until};
use crate::Error;
use crate::config::{
    CleanupSpec, CommandTemplate, LaunchDescriptor, LaunchFileSpec, RecorderSpec, SimulationSpec,
    StopSignal, WorkloadSpec,
};
use crate::control::{
    RecorderControl, RecorderController, SimulationControl, SimulationController, WorkloadControl,
    WorkloadController,
};
use crate::driver::ScenarioId;
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

const GRACE: Duration = Duration::from_secs(2);

fn sleeper() -> LaunchDescriptor {
    LaunchDescriptor::Command(CommandTemplate::new("sleep", ["30"]))
}

/// `$0` 为产物路径，`$1` 为通道：写入通道名后一直运行直到被停止。
fn shell_recorder() -> RecorderSpec {
    RecorderSpec {
        command: CommandTemplate::new(
            "sh",
            ["-c", "echo \"$1\" > \"$0\"; exec sleep 30", "{output}", "{channel}"],
        ),
        channel: "/sampling_performance".to_string(),
        name: "record_bag".to_string(),
        stop_signal: StopSignal::Term,
    }
}

#[test]
fn recorder_writes_artifact_and_stops_by_name() {
    let dir = unique_temp_dir("recorder");
    let artifact = dir.join("nested").join("scenario1_0.bag");
    let mut recorder = RecorderController::new(shell_recorder(), GRACE);
    assert_eq!(recorder.name(), "record_bag");

    recorder.start(&artifact).expect("start recorder");
    assert!(recorder.is_recording());
    assert!(wait_until(Duration::from_secs(5), || {
        fs::read_to_string(&artifact).is_ok_and(|s| s.trim() == "/sampling_performance")
    }));

    recorder.stop();
    assert!(!recorder.is_recording());
    recorder.stop();

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn recorder_refuses_second_start_while_first_is_running() {
    let dir = unique_temp_dir("recorder-collision");
    let mut recorder = RecorderController::new(shell_recorder(), GRACE);
    recorder
        .start(&dir.join("scenario1_0.bag"))
        .expect("first start");

    let err = recorder
        .start(&dir.join("scenario1_1.bag"))
        .expect_err("second start collides");
    assert!(matches!(err, Error::NameCollision(_)));
    assert!(!dir.join("scenario1_1.bag").exists());

    recorder.stop();
    recorder
        .start(&dir.join("scenario1_1.bag"))
        .expect("start after stop");
    recorder.stop();

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn simulation_start_stop_and_cleanup() {
    let spec = SimulationSpec {
        launch: sleeper(),
        stop_signal: StopSignal::Int,
        cleanup: Some(CleanupSpec {
            process_name: "simtrial-no-such-worker".to_string(),
            command: CommandTemplate::new("sh", ["-c", "exit 1", "{name}"]),
        }),
    };
    let mut sim = SimulationController::new(spec, GRACE);
    sim.start(ScenarioId(1)).expect("start simulation");
    assert!(sim.is_running());

    sim.stop();
    assert!(!sim.is_running());
    sim.stop();
    sim.cleanup();
}

#[test]
fn simulation_with_missing_launch_file_fails_before_spawning() {
    let spec = SimulationSpec {
        launch: LaunchDescriptor::scenario_launch("/nonexistent/two_ugv_one_uav_simulation.launch"),
        stop_signal: StopSignal::Int,
        cleanup: None,
    };
    let mut sim = SimulationController::new(spec, GRACE);
    let err = sim.start(ScenarioId(2)).expect_err("missing launch file");
    assert!(matches!(err, Error::LaunchResolution { .. }));
    assert!(!sim.is_running());
}

#[test]
fn workload_launch_file_receives_scenario_param() {
    let dir = unique_temp_dir("workload-launch");
    let script = dir.join("workload.sh");
    let marker = dir.join("args.txt");
    fs::write(
        &script,
        format!("echo \"$1\" > '{}'\nexec sleep 30\n", marker.display()),
    )
    .expect("write script");

    let mut params = BTreeMap::new();
    params.insert("scenario".to_string(), "{scenario}".to_string());
    let spec = WorkloadSpec {
        launch: LaunchDescriptor::LaunchFile(LaunchFileSpec {
            launcher: "sh".to_string(),
            file: script,
            params,
        }),
        stop_signal: StopSignal::Term,
    };
    let mut workload = WorkloadController::new(spec, GRACE);
    workload.start(ScenarioId(3)).expect("start workload");
    assert!(wait_until(Duration::from_secs(5), || {
        fs::read_to_string(&marker).is_ok_and(|s| s.trim() == "scenario:=3")
    }));

    workload.stop();
    assert!(!workload.is_running());

    let _ = fs::remove_dir_all(&dir);
}
