use log::{debug, error};

use crate::shell::error::ShellResult;
use crate::shell::executor::{Continuation, Executor};
use crate::shell::parser::parse_line;
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::utils::config::Config;
use crate::utils::path;
use crate::utils::theme::Theme;

pub struct Shell<'a> {
    theme: &'a Theme,
    readline: ReadlineManager<'a>,
    executor: Executor<'a>,
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config, theme: &'a Theme) -> ShellResult<Self> {
        Ok(Self {
            theme,
            readline: ReadlineManager::new(config)?,
            executor: Executor::new(theme),
        })
    }

    pub fn run(&mut self) -> ShellResult<()> {
        debug!("初始化 msh...");
        self.readline.load_history();

        let result = self.run_loop();
        self.readline.save_history();

        debug!("退出 msh...");
        result
    }

    fn run_loop(&mut self) -> ShellResult<()> {
        loop {
            let prompt = (self.theme.prompt_style)(path::prompt_text(
                path::current_dir().as_deref(),
            ));

            let line = match self.readline.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Eof) => {
                    debug!("接收到 EOF, 退出 msh...");
                    return Ok(());
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("接收到中断信号, 丢弃当前行");
                    continue;
                }
                Err(err) => {
                    error!("读取输入失败: {}", err);
                    return Err(err.into());
                }
            };

            self.readline.add_history(&line);
            if self.handle_line(&line) == Continuation::Terminate {
                return Ok(());
            }
        }
    }

    /// Parse and run one line.
    pub fn handle_line(&self, line: &str) -> Continuation {
        // commands borrow from `line`, so the sequence is rebuilt per line
        // instead of clearing one kept across iterations
        let commands = parse_line(line);
        self.executor.execute_all(&commands)
    }
}
