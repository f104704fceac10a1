use super::SimulationControl;
use crate::config::SimulationSpec;
use crate::driver::ScenarioId;
use crate::error::Result;
use crate::process::{CommandLine, ProcessHandle, StopPolicy, TemplateVars, kill_by_name};
use std::time::Duration;
use tracing::{info, warn};

pub struct SimulationController {
    spec: SimulationSpec,
    grace: Duration,
    handle: Option<ProcessHandle>,
}

impl SimulationController {
    pub fn new(spec: SimulationSpec, grace: Duration) -> Self {
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

impl SimulationControl for SimulationController {
    fn start(&mut self, scenario: ScenarioId) -> Result<()> {
        if let Some(mut previous) = self.handle.take() {
            warn!(pid = ?previous.pid(), "simulation still held at start, stopping it first");
            previous.stop();
        }
        let vars = TemplateVars::default().scenario(scenario);
        let command = CommandLine::from_descriptor("simulation", &self.spec.launch, &vars)?;
        let policy = StopPolicy {
            signal: self.spec.stop_signal,
            grace: self.grace,
        };
        self.handle = Some(ProcessHandle::start("simulation", &command, policy)?);
        info!(%scenario, "simulation launched");
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
    }

    fn cleanup(&mut self) {
        if let Some(cleanup) = &self.spec.cleanup {
            kill_by_name(&cleanup.command, &cleanup.process_name);
        }
    }
}
