//! 外部协作者控制器
//!
//! 驱动器只通过这里的 trait 启停仿真、录制器与 workload；
//! 默认实现基于外部进程，测试中可替换为记录调用顺序的假实现。

mod recorder;
mod simulation;
mod workload;

pub use recorder::RecorderController;
pub use simulation::SimulationController;
pub use workload::WorkloadController;

use crate::driver::ScenarioId;
use crate::error::Result;
use std::path::Path;

/// 单个场景的仿真环境
pub trait SimulationControl {
    /// 启动后立即返回；调用方需自行等待固定的启动延迟。
    fn start(&mut self, scenario: ScenarioId) -> Result<()>;
    /// 不确认进程树已完全退出。
    fn stop(&mut self);
    /// 按名字强制清理残留的仿真 worker，尽力而为。
    fn cleanup(&mut self);
}

/// 单次试验的录制会话
pub trait RecorderControl {
    fn start(&mut self, artifact: &Path) -> Result<()>;
    /// 按固定名字终止；不确认产物已落盘。
    fn stop(&mut self);
}

/// 被测 workload
pub trait WorkloadControl {
    fn start(&mut self, scenario: ScenarioId) -> Result<()>;
    fn stop(&mut self);
}
