//! 错误类型
//!
//! 驱动器的所有失败都向上传播并中止整次运行；停止/清理类操作不产生错误。

use std::io;
use std::path::PathBuf;

/// 驱动器错误
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 启动描述（launch 文件等）无法解析/找不到
    #[error("launch descriptor `{what}` cannot be resolved: {path:?} not found")]
    LaunchResolution { what: String, path: PathBuf },

    /// 进程创建失败（例如可执行文件不存在）
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// 同名进程已注册（录制器名称是整次运行共享的资源）
    #[error("process name `{0}` is already registered")]
    NameCollision(String),

    #[error("failed to parse config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
