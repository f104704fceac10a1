//! 实验驱动核心模块
//!
//! 此模块包含场景/试验编号、产物命名、定时等待、状态机与驱动器本身。

// 子模块声明
mod artifact;
mod clock;
mod experiment;
mod id;
mod state;
mod summary;

// 重新导出公共接口
pub use artifact::ArtifactNamer;
pub use clock::{Clock, ThreadClock};
pub use experiment::{Controllers, ExperimentDriver};
pub use id::{ScenarioId, TrialId};
pub use state::DriverState;
pub use summary::{RunSummary, TrialRecord};
