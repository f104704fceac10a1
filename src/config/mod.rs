//! 实验配置
//!
//! 运行参数与各外部进程的启动描述，均可由 JSON 文件反序列化。

mod experiment;
mod launch;

pub use experiment::ExperimentConfig;
pub use launch::{
    CleanupSpec, CommandTemplate, LaunchDescriptor, LaunchFileSpec, RecorderSpec, SimulationSpec,
    StopSignal, WorkloadSpec,
};
