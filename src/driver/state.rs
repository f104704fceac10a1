//! 驱动器状态机
//!
//! `Idle → ScenarioActive → TrialActive → ScenarioActive … → ScenarioTearingDown → Idle`

use super::id::{ScenarioId, TrialId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Idle,
    /// 仿真已启动，没有进行中的试验
    ScenarioActive { scenario: ScenarioId },
    /// 录制器与 workload 可能在运行
    TrialActive { scenario: ScenarioId, trial: TrialId },
    ScenarioTearingDown { scenario: ScenarioId },
}
