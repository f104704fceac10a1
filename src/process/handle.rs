//! 外部进程句柄
//!
//! 包装一个已 spawn 的外部进程，提供启动、优雅停止与存活查询。

use super::command::CommandLine;
use crate::config::StopSignal;
use crate::error::{Error, Result};
use std::process::Child;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 停止策略：先发信号，超过宽限期仍未退出则强制 kill。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopPolicy {
    pub signal: StopSignal,
    pub grace: Duration,
}

impl Default for StopPolicy {
    fn default() -> Self {
        Self {
            signal: StopSignal::Term,
            grace: Duration::from_secs(10),
        }
    }
}

/// 单个外部进程。由创建它的控制器独占；drop 时不会停止进程。
#[derive(Debug)]
pub struct ProcessHandle {
    label: String,
    policy: StopPolicy,
    child: Option<Child>,
}

impl ProcessHandle {
    /// spawn 后立即返回，不等待进程就绪。
    #[tracing::instrument(skip(command, policy), fields(cmd = %command))]
    pub fn start(label: &str, command: &CommandLine, policy: StopPolicy) -> Result<Self> {
        let child = command
            .to_command()
            .spawn()
            .map_err(|source| Error::Spawn {
                program: command.program.clone(),
                source,
            })?;
        info!(pid = child.id(), "started");
        Ok(Self {
            label: label.to_string(),
            policy,
            child: Some(child),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// 进程号；停止后丢弃。
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// 非阻塞存活查询。若发现进程已自行退出，句柄转为已停止。
    pub fn is_running(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                warn!(label = %self.label, %status, "process exited on its own");
                self.child = None;
                false
            }
            Err(err) => {
                warn!(label = %self.label, error = %err, "failed to query process status");
                true
            }
        }
    }

    /// 请求优雅退出。对已退出或已停止的句柄是 no-op，从不返回错误。
    pub fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        let pid = child.id();
        if let Ok(Some(status)) = child.try_wait() {
            debug!(label = %self.label, pid, %status, "already exited");
            return;
        }

        send_signal(&mut child, self.policy.signal);
        let deadline = Instant::now() + self.policy.grace;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    info!(label = %self.label, pid, %status, "stopped");
                    return;
                }
                Ok(None) if Instant::now() >= deadline => break,
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    warn!(label = %self.label, pid, error = %err, "failed to wait for process");
                    break;
                }
            }
        }

        warn!(
            label = %self.label,
            pid,
            grace = ?self.policy.grace,
            "no exit within grace period, killing"
        );
        if let Err(err) = child.kill() {
            warn!(label = %self.label, pid, error = %err, "kill failed");
        }
        let _ = child.wait();
    }
}

#[cfg(unix)]
fn send_signal(child: &mut Child, signal: StopSignal) {
    let signo = match signal {
        StopSignal::Term => libc::SIGTERM,
        StopSignal::Int => libc::SIGINT,
    };
    let Ok(pid) = libc::pid_t::try_from(child.id()) else {
        let _ = child.kill();
        return;
    };
    // SAFETY: pid 来自尚未被回收的子进程，不会指向无关进程。
    let rc = unsafe { libc::kill(pid, signo) };
    if rc != 0 {
        warn!(pid, error = %std::io::Error::last_os_error(), "signal delivery failed");
    }
}

#[cfg(not(unix))]
fn send_signal(child: &mut Child, _signal: StopSignal) {
    let _ = child.kill();
}
