use super::launch::{LaunchDescriptor, RecorderSpec, SimulationSpec, WorkloadSpec};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// 一次实验运行的全部参数。启动时构造一次，运行期间只读。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExperimentConfig {
    pub output_directory: PathBuf,
    /// 每个场景的试验次数
    pub trial_count: u32,
    /// 每次试验 workload 运行的时长（秒）
    pub task_duration_secs: f64,
    /// 场景数，场景编号从 1 开始
    pub scenario_count: u32,
    /// 启动仿真后、认为其就绪前的固定等待（秒）
    pub startup_delay_secs: f64,
    pub artifact_extension: String,
    /// 发送停止信号后等待进程退出的时长，超时则强制 kill
    pub stop_grace_secs: f64,
    /// 运行中途失败时是否尽力停止已启动的进程
    pub cleanup_on_abort: bool,
    pub simulation: SimulationSpec,
    pub workload: WorkloadSpec,
    pub recorder: RecorderSpec,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("./hetero/"),
            trial_count: 5,
            task_duration_secs: 200.0,
            scenario_count: 3,
            startup_delay_secs: 0.5,
            artifact_extension: "bag".to_string(),
            stop_grace_secs: 10.0,
            cleanup_on_abort: false,
            simulation: SimulationSpec::default(),
            workload: WorkloadSpec::default(),
            recorder: RecorderSpec::default(),
        }
    }
}

impl ExperimentConfig {
    /// 读取 JSON 配置；launch 文件的相对路径按配置文件所在目录解析。
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| Error::io(format!("failed to read config {path:?}"), err))?;
        let mut config: ExperimentConfig =
            serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        config.validate()?;
        debug!(path = ?path, "loaded experiment config");
        Ok(config)
    }

    pub fn resolve_relative_to(&mut self, base: &Path) {
        for launch in [&mut self.simulation.launch, &mut self.workload.launch] {
            if let LaunchDescriptor::LaunchFile(spec) = launch {
                if spec.file.is_relative() {
                    spec.file = base.join(&spec.file);
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.trial_count == 0 {
            return Err(Error::InvalidConfig("trial_count must be positive".into()));
        }
        if self.scenario_count == 0 {
            return Err(Error::InvalidConfig("scenario_count must be positive".into()));
        }
        check_secs("task_duration_secs", self.task_duration_secs, false)?;
        check_secs("startup_delay_secs", self.startup_delay_secs, true)?;
        check_secs("stop_grace_secs", self.stop_grace_secs, true)?;
        if self.artifact_extension.trim_start_matches('.').is_empty() {
            return Err(Error::InvalidConfig("artifact_extension must not be empty".into()));
        }
        if self.recorder.name.is_empty() {
            return Err(Error::InvalidConfig("recorder.name must not be empty".into()));
        }
        if self.output_directory.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("output_directory must not be empty".into()));
        }
        Ok(())
    }

    pub fn task_duration(&self) -> Duration {
        Duration::from_secs_f64(self.task_duration_secs)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs_f64(self.startup_delay_secs)
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_secs_f64(self.stop_grace_secs)
    }
}

/// 必须能转换为 `Duration`，否则运行到一半才会 panic。
fn check_secs(field: &str, value: f64, allow_zero: bool) -> Result<()> {
    let duration = Duration::try_from_secs_f64(value).map_err(|err| {
        Error::InvalidConfig(format!("{field} is not a valid duration ({value}): {err}"))
    })?;
    if duration.is_zero() && !allow_zero {
        return Err(Error::InvalidConfig(format!(
            "{field} must be a positive number of seconds, got {value}"
        )));
    }
    Ok(())
}
