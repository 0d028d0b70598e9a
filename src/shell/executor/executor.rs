use std::io::{self, Write};

use log::{debug, error, warn};

use super::builtins::{self, Continuation};
use super::process::spawn_and_wait;
use crate::shell::error::ShellError;
use crate::shell::parser::{Command, OutputRedirection};
use crate::utils::theme::Theme;

pub struct Executor<'a> {
    theme: &'a Theme,
}

impl<'a> Executor<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Run every command in order. The last command decides whether the
    /// loop continues; an empty sequence always continues.
    pub fn execute_all(&self, commands: &[Command<'_>]) -> Continuation {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.execute_all_to(commands, &mut out)
    }

    pub fn execute_all_to(&self, commands: &[Command<'_>], out: &mut dyn Write) -> Continuation {
        let mut flow = Continuation::Continue;
        for command in commands {
            flow = self.execute_to(command, out);
        }
        flow
    }

    pub fn execute_to(&self, command: &Command<'_>, out: &mut dyn Write) -> Continuation {
        let Some(program) = command.program() else {
            return Continuation::Continue;
        };

        // 缺少重定向目标的命令只报告, 不执行
        if command.output == OutputRedirection::MissingTarget {
            warn!("缺少重定向目标, 跳过: {:?}", command.args);
            self.report(&ShellError::MissingRedirectTarget);
            return Continuation::Continue;
        }

        // 处理内建命令
        if let Some(builtin) = builtins::find(program) {
            debug!("执行内建命令: {:?}", command.args);
            if command.output != OutputRedirection::Inherit {
                debug!("内建命令不支持重定向, 忽略: {:?}", command.output);
            }
            return match builtin.run(&command.args, out) {
                Ok(flow) => flow,
                Err(e) => {
                    warn!("内建命令 {} 出错: {}", program, e);
                    self.report(&e);
                    Continuation::Continue
                }
            };
        }

        // 执行外部命令, 退出码不影响是否继续
        debug!("执行外部命令: {:?}", command);
        if let Err(e) = out.flush() {
            warn!("刷新输出失败: {}", e);
        }
        match spawn_and_wait(command) {
            Ok(exit) => debug!("{} 结束, 状态 {}", program, exit.status()),
            Err(e) => {
                error!("执行 {} 失败: {}", program, e);
                self.report(&e);
            }
        }
        Continuation::Continue
    }

    fn report(&self, err: &ShellError) {
        eprintln!("{}", (self.theme.error_style)(format!("msh: {}", err)));
    }
}
