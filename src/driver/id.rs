//! 标识符类型
//!
//! 定义场景与试验编号。

use serde::Serialize;
use std::fmt;

/// 场景编号（从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ScenarioId(pub u32);

/// 试验编号（从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TrialId(pub u32);

impl ScenarioId {
    /// `1..=count`
    pub fn all(count: u32) -> impl Iterator<Item = ScenarioId> {
        (1..=count).map(ScenarioId)
    }
}

impl TrialId {
    /// `0..count`
    pub fn all(count: u32) -> impl Iterator<Item = TrialId> {
        (0..count).map(TrialId)
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
