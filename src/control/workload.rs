use super::WorkloadControl;
use crate::config::WorkloadSpec;
use crate::driver::ScenarioId;
use crate::error::Result;
use crate::process::{CommandLine, ProcessHandle, StopPolicy, TemplateVars};
use std::time::Duration;
use tracing::{info, warn};

pub struct WorkloadController {
    spec: WorkloadSpec,
    grace: Duration,
    handle: Option<ProcessHandle>,
}

impl WorkloadController {
    pub fn new(spec: WorkloadSpec, grace: Duration) -> Self {
        Self {
            spec,
            grace,
            handle: None,
        }
    }

    pub fn is_running(&mut self) -> bool {
        self.handle.as_mut().is_some_and(ProcessHandle::is_running)
    }
}

impl WorkloadControl for WorkloadController {
    fn start(&mut self, scenario: ScenarioId) -> Result<()> {
        if let Some(mut previous) = self.handle.take() {
            warn!(pid = ?previous.pid(), "workload still held at start, stopping it first");
            previous.stop();
        }
        let vars = TemplateVars::default().scenario(scenario);
        let command = CommandLine::from_descriptor("workload", &self.spec.launch, &vars)?;
        let policy = StopPolicy {
            signal: self.spec.stop_signal,
            grace: self.grace,
        };
        self.handle = Some(ProcessHandle::start("workload", &command, policy)?);
        info!(%scenario, "workload started");
        Ok(())
    }

    /// 阻塞到进程退出或宽限期结束。
    fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
    }
}
