//! 实验驱动器
//!
//! 顺序执行 场景 × 试验 的嵌套循环，协调仿真、录制器与 workload 的启停。

use super::artifact::ArtifactNamer;
use super::clock::{Clock, ThreadClock};
use super::id::{ScenarioId, TrialId};
use super::state::DriverState;
use super::summary::{RunSummary, TrialRecord};
use crate::config::ExperimentConfig;
use crate::control::{
    RecorderControl, RecorderController, SimulationControl, SimulationController, WorkloadControl,
    WorkloadController,
};
use crate::error::{Error, Result};
use std::fs;
use tracing::{debug, error, info, warn};

/// 驱动器使用的三个控制器
pub struct Controllers {
    pub simulation: Box<dyn SimulationControl>,
    pub recorder: Box<dyn RecorderControl>,
    pub workload: Box<dyn WorkloadControl>,
}

impl Controllers {
    /// 基于外部进程的默认实现
    pub fn from_config(config: &ExperimentConfig) -> Self {
        let grace = config.stop_grace();
        Self {
            simulation: Box::new(SimulationController::new(config.simulation.clone(), grace)),
            recorder: Box::new(RecorderController::new(config.recorder.clone(), grace)),
            workload: Box::new(WorkloadController::new(config.workload.clone(), grace)),
        }
    }
}

pub struct ExperimentDriver {
    config: ExperimentConfig,
    namer: ArtifactNamer,
    controllers: Controllers,
    clock: Box<dyn Clock>,
    state: DriverState,
}

impl ExperimentDriver {
    pub fn new(config: ExperimentConfig, controllers: Controllers, clock: Box<dyn Clock>) -> Self {
        let namer = ArtifactNamer::new(&config.output_directory, &config.artifact_extension);
        Self {
            config,
            namer,
            controllers,
            clock,
            state: DriverState::Idle,
        }
    }

    pub fn from_config(config: ExperimentConfig) -> Self {
        let controllers = Controllers::from_config(&config);
        Self::new(config, controllers, Box::new(ThreadClock))
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// 按执行顺序（场景优先、试验其次）列出全部试验及产物路径，不启动任何进程。
    pub fn plan(&self) -> Vec<TrialRecord> {
        ScenarioId::all(self.config.scenario_count)
            .flat_map(|scenario| {
                TrialId::all(self.config.trial_count).map(move |trial| (scenario, trial))
            })
            .map(|(scenario, trial)| TrialRecord {
                scenario,
                trial,
                artifact: self.namer.path(scenario, trial),
            })
            .collect()
    }

    /// 执行整次运行。任何失败立即中止，不重试，也不再尝试后续场景。
    #[tracing::instrument(
        skip(self),
        fields(scenarios = self.config.scenario_count, trials = self.config.trial_count)
    )]
    pub fn run(&mut self) -> Result<RunSummary> {
        info!(output = ?self.config.output_directory, "▶️  starting experiment run");
        let mut summary = RunSummary::default();
        match self.run_scenarios(&mut summary) {
            Ok(()) => {
                info!(
                    scenarios = summary.scenarios_completed,
                    trials = summary.trials.len(),
                    "✅ experiment run complete"
                );
                Ok(summary)
            }
            Err(err) => {
                error!(state = ?self.state, error = %err, "run aborted");
                if self.config.cleanup_on_abort {
                    self.abort_cleanup();
                } else if self.state != DriverState::Idle {
                    warn!("started processes are left running");
                }
                Err(err)
            }
        }
    }

    fn run_scenarios(&mut self, summary: &mut RunSummary) -> Result<()> {
        for scenario in ScenarioId::all(self.config.scenario_count) {
            self.run_scenario(scenario, summary)?;
            summary.scenarios_completed += 1;
        }
        Ok(())
    }

    fn run_scenario(&mut self, scenario: ScenarioId, summary: &mut RunSummary) -> Result<()> {
        let dir = self.namer.dir();
        fs::create_dir_all(dir)
            .map_err(|err| Error::io(format!("failed to create output directory {dir:?}"), err))?;

        self.controllers.simulation.start(scenario)?;
        self.transition(DriverState::ScenarioActive { scenario });
        // 没有就绪探针，只能固定等待
        self.clock.sleep(self.config.startup_delay());

        for trial in TrialId::all(self.config.trial_count) {
            self.transition(DriverState::TrialActive { scenario, trial });
            let artifact = self.namer.path(scenario, trial);

            // 录制器先于 workload 启动、晚于其停止
            self.controllers.recorder.start(&artifact)?;
            self.controllers.workload.start(scenario)?;
            self.clock.sleep(self.config.task_duration());
            self.controllers.workload.stop();
            self.controllers.recorder.stop();

            info!(%scenario, %trial, artifact = ?artifact, "trial finished");
            summary.trials.push(TrialRecord {
                scenario,
                trial,
                artifact,
            });
            self.transition(DriverState::ScenarioActive { scenario });
        }

        self.transition(DriverState::ScenarioTearingDown { scenario });
        self.controllers.simulation.stop();
        self.controllers.simulation.cleanup();
        self.transition(DriverState::Idle);
        Ok(())
    }

    /// 按中止时所处状态尽力停止已启动的进程。
    fn abort_cleanup(&mut self) {
        match self.state {
            DriverState::Idle => {}
            DriverState::TrialActive { .. } => {
                self.controllers.workload.stop();
                self.controllers.recorder.stop();
                self.controllers.simulation.stop();
                self.controllers.simulation.cleanup();
            }
            DriverState::ScenarioActive { .. } | DriverState::ScenarioTearingDown { .. } => {
                self.controllers.simulation.stop();
                self.controllers.simulation.cleanup();
            }
        }
        self.transition(DriverState::Idle);
    }

    fn transition(&mut self, next: DriverState) {
        debug!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }
}
