//! 产物命名
//!
//! 每次试验的录制文件路径由 (输出目录, 场景, 试验) 唯一确定：
//! `<output_directory>/scenario<N>_<trial>.<ext>`。

use super::id::{ScenarioId, TrialId};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ArtifactNamer {
    dir: PathBuf,
    extension: String,
}

impl ArtifactNamer {
    pub fn new(dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(&self, scenario: ScenarioId, trial: TrialId) -> String {
        format!("scenario{}_{}.{}", scenario.0, trial.0, self.extension)
    }

    pub fn path(&self, scenario: ScenarioId, trial: TrialId) -> PathBuf {
        self.dir.join(self.file_name(scenario, trial))
    }
}
