//! 按逻辑名寻址的进程表
//!
//! 每个名字同一时刻至多对应一个存活进程；停止时只需给出名字。

use super::handle::ProcessHandle;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ProcessRegistry {
    entries: BTreeMap<String, ProcessHandle>,
}

impl ProcessRegistry {
    /// 名字是否被一个仍在运行的进程占用；已退出的旧条目会被清掉。
    pub fn is_taken(&mut self, name: &str) -> bool {
        let running = match self.entries.get_mut(name) {
            Some(handle) => handle.is_running(),
            None => return false,
        };
        if !running {
            self.entries.remove(name);
        }
        running
    }

    /// 在 spawn 之前调用，避免新进程与已注册进程撞名。
    pub fn ensure_available(&mut self, name: &str) -> Result<()> {
        if self.is_taken(name) {
            Err(Error::NameCollision(name.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn register(&mut self, name: &str, handle: ProcessHandle) -> Result<()> {
        self.ensure_available(name)?;
        debug!(name, pid = ?handle.pid(), "registered");
        self.entries.insert(name.to_string(), handle);
        Ok(())
    }

    /// 按名字停止并注销。返回该名字此前是否有登记；未登记时是 no-op。
    pub fn terminate(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(mut handle) => {
                handle.stop();
                true
            }
            None => {
                debug!(name, "nothing registered under name");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
