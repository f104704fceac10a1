use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 纯命令行模板：参数中可出现 `{scenario}`/`{output}`/`{channel}`/`{name}` 占位符。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandTemplate {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// 通过 launcher 启动的结构化 launch 文件，参数以 `key:=value` 形式传入。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchFileSpec {
    #[serde(default = "default_launcher")]
    pub launcher: String,
    pub file: PathBuf,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

fn default_launcher() -> String {
    "roslaunch".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaunchDescriptor {
    Command(CommandTemplate),
    LaunchFile(LaunchFileSpec),
}

impl LaunchDescriptor {
    /// `launcher <file> scenario:={scenario}`
    pub fn scenario_launch(file: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert("scenario".to_string(), "{scenario}".to_string());
        LaunchDescriptor::LaunchFile(LaunchFileSpec {
            launcher: default_launcher(),
            file: PathBuf::from(file),
            params,
        })
    }
}

/// 优雅停止时发送的信号
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopSignal {
    #[default]
    Term,
    /// roslaunch / rosbag 把 SIGINT 当作正常关闭
    Int,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationSpec {
    pub launch: LaunchDescriptor,
    #[serde(default)]
    pub stop_signal: StopSignal,
    /// 停止后按进程名强制清理残留的仿真 worker
    #[serde(default)]
    pub cleanup: Option<CleanupSpec>,
}

impl Default for SimulationSpec {
    fn default() -> Self {
        Self {
            launch: LaunchDescriptor::scenario_launch("launch/two_ugv_one_uav_simulation.launch"),
            stop_signal: StopSignal::Int,
            cleanup: Some(CleanupSpec::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CleanupSpec {
    pub process_name: String,
    #[serde(default = "default_kill_command")]
    pub command: CommandTemplate,
}

fn default_kill_command() -> CommandTemplate {
    CommandTemplate::new("killall", ["-9", "{name}"])
}

impl Default for CleanupSpec {
    fn default() -> Self {
        Self {
            process_name: "gzserver".to_string(),
            command: default_kill_command(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub launch: LaunchDescriptor,
    #[serde(default)]
    pub stop_signal: StopSignal,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            launch: LaunchDescriptor::scenario_launch(
                "launch/heterogeneous_adaptive_sampling.launch",
            ),
            stop_signal: StopSignal::Int,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecorderSpec {
    #[serde(default = "default_record_command")]
    pub command: CommandTemplate,
    /// 订阅的数据通道
    #[serde(default = "default_channel")]
    pub channel: String,
    /// 整次运行共享的固定逻辑名，停止时按此名寻址
    #[serde(default = "default_recorder_name")]
    pub name: String,
    #[serde(default = "default_recorder_signal")]
    pub stop_signal: StopSignal,
}

fn default_record_command() -> CommandTemplate {
    CommandTemplate::new(
        "rosbag",
        ["record", "-O", "{output}", "{channel}", "__name:={name}"],
    )
}

fn default_channel() -> String {
    "/sampling_performance".to_string()
}

fn default_recorder_name() -> String {
    "record_bag".to_string()
}

fn default_recorder_signal() -> StopSignal {
    StopSignal::Int
}

impl Default for RecorderSpec {
    fn default() -> Self {
        Self {
            command: default_record_command(),
            channel: default_channel(),
            name: default_recorder_name(),
            stop_signal: default_recorder_signal(),
        }
    }
}
