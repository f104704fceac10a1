use super::RecorderControl;
use crate::config::RecorderSpec;
use crate::error::{Error, Result};
use crate::process::{CommandLine, ProcessHandle, ProcessRegistry, StopPolicy, TemplateVars};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// 录制器以固定逻辑名登记在 `ProcessRegistry` 中，停止时只按名字寻址。
pub struct RecorderController {
    spec: RecorderSpec,
    grace: Duration,
    registry: ProcessRegistry,
}

impl RecorderController {
    pub fn new(spec: RecorderSpec, grace: Duration) -> Self {
        Self {
            spec,
            grace,
            registry: ProcessRegistry::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn is_recording(&mut self) -> bool {
        self.registry.is_taken(&self.spec.name)
    }
}

impl RecorderControl for RecorderController {
    fn start(&mut self, artifact: &Path) -> Result<()> {
        self.registry.ensure_available(&self.spec.name)?;
        if let Some(parent) = artifact.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| Error::io(format!("failed to create {parent:?}"), err))?;
        }
        let vars = TemplateVars::default()
            .output(artifact)
            .channel(&self.spec.channel)
            .name(&self.spec.name);
        let command = CommandLine::from_template(&self.spec.command, &vars);
        let policy = StopPolicy {
            signal: self.spec.stop_signal,
            grace: self.grace,
        };
        let handle = ProcessHandle::start("recorder", &command, policy)?;
        self.registry.register(&self.spec.name, handle)?;
        info!(artifact = ?artifact, channel = %self.spec.channel, "recording");
        Ok(())
    }

    fn stop(&mut self) {
        self.registry.terminate(&self.spec.name);
    }
}
