//! 外部进程管理
//!
//! 此模块负责渲染启动命令、spawn/停止外部进程、按名字寻址与兜底清理。

mod cleanup;
mod command;
mod handle;
mod registry;

pub use cleanup::kill_by_name;
pub use command::{CommandLine, TemplateVars};
pub use handle::{ProcessHandle, StopPolicy};
pub use registry::ProcessRegistry;
