//! 启动描述渲染
//!
//! 把配置中的模板（含占位符）渲染成可直接 spawn 的命令行。

use crate::config::{CommandTemplate, LaunchDescriptor};
use crate::driver::ScenarioId;
use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// 占位符取值；未设置的占位符保持原样。
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    scenario: Option<String>,
    output: Option<String>,
    channel: Option<String>,
    name: Option<String>,
}

impl TemplateVars {
    pub fn scenario(mut self, scenario: ScenarioId) -> Self {
        self.scenario = Some(scenario.to_string());
        self
    }

    pub fn output(mut self, path: &Path) -> Self {
        self.output = Some(path.to_string_lossy().into_owned());
        self
    }

    pub fn channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// 单趟从左到右替换；代入的值原样拷贝，不会被再次展开。
    pub fn render(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            let value = tail
                .find('}')
                .and_then(|close| self.lookup(&tail[1..close]).map(|v| (close, v)));
            match value {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        let value = match key {
            "scenario" => &self.scenario,
            "output" => &self.output,
            "channel" => &self.channel,
            "name" => &self.name,
            _ => return None,
        };
        value.as_deref()
    }
}

/// 已渲染的命令行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn from_template(template: &CommandTemplate, vars: &TemplateVars) -> Self {
        Self {
            program: vars.render(&template.program),
            args: template.args.iter().map(|a| vars.render(a)).collect(),
        }
    }

    /// launch 文件必须存在，否则返回 `Error::LaunchResolution`（在 spawn 之前检查）。
    pub fn from_descriptor(
        what: &str,
        descriptor: &LaunchDescriptor,
        vars: &TemplateVars,
    ) -> Result<Self> {
        match descriptor {
            LaunchDescriptor::Command(template) => Ok(Self::from_template(template, vars)),
            LaunchDescriptor::LaunchFile(spec) => {
                if !spec.file.is_file() {
                    return Err(Error::LaunchResolution {
                        what: what.to_string(),
                        path: spec.file.clone(),
                    });
                }
                let mut args = vec![spec.file.to_string_lossy().into_owned()];
                args.extend(
                    spec.params
                        .iter()
                        .map(|(k, v)| format!("{k}:={}", vars.render(v))),
                );
                Ok(Self {
                    program: vars.render(&spec.launcher),
                    args,
                })
            }
        }
    }

    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

fn shell_quote(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:=".contains(c))
    {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    }
}
