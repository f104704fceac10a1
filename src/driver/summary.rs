//! 运行摘要
//!
//! 记录已完成的试验及其产物路径，可写出为 JSON。

use super::id::{ScenarioId, TrialId};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRecord {
    pub scenario: ScenarioId,
    pub trial: TrialId,
    pub artifact: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub scenarios_completed: u32,
    pub trials: Vec<TrialRecord>,
}

impl RunSummary {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| Error::io("failed to serialise run summary", err.into()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| Error::io(format!("failed to create directory for {path:?}"), err))?;
        }
        fs::write(path, json).map_err(|err| Error::io(format!("failed to write {path:?}"), err))
    }
}
