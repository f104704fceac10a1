//! 按进程名强制清理
//!
//! 优雅停止顶层 launch 并不保证子孙进程退出，这里按名字兜底。

use super::command::{CommandLine, TemplateVars};
use crate::config::CommandTemplate;
use tracing::{debug, warn};

/// 尽力而为：任何失败只记录日志，不返回错误。
pub fn kill_by_name(template: &CommandTemplate, process_name: &str) {
    let command =
        CommandLine::from_template(template, &TemplateVars::default().name(process_name));
    match command.to_command().status() {
        Ok(status) if status.success() => debug!(process_name, cmd = %command, "cleanup done"),
        // killall 在没有匹配进程时返回非零
        Ok(status) => debug!(process_name, cmd = %command, %status, "cleanup matched nothing"),
        Err(err) => {
            warn!(process_name, cmd = %command, error = %err, "cleanup command failed to run")
        }
    }
}
