use dotenv::dotenv;
use rustyline::EditMode;
use std::env;
use std::fs;
use std::path::PathBuf;

pub struct Config {
    pub name: String,
    pub config_dir: PathBuf,
    pub theme: String,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: PathBuf,
    pub logger_stderr: bool,
}

impl Config {
    fn get_config_dir() -> PathBuf {
        if let Ok(home) = env::var("HOME") {
            PathBuf::from(home).join(".config/msh")
        } else {
            env::temp_dir().join("msh")
        }
    }

    fn default() -> Self {
        let config_dir = Self::get_config_dir();
        Config {
            name: String::from("msh"),
            theme: String::from("default"),
            history_file: config_dir.join(".msh_history"),
            editor_mode: String::from("emacs"),
            logger_level: String::from("warn"),
            logger_dir: config_dir.join("logs"),
            logger_stderr: false,
            config_dir,
        }
    }

    pub fn new() -> Self {
        // 优先加载 dotenv 文件
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        let mut config = Config::default();
        config.apply_env(|key| env::var(key).ok());

        // 目录创建失败时, 历史记录和日志会各自降级
        if let Some(parent) = config.history_file.parent() {
            fs::create_dir_all(parent).ok();
        }

        config
    }

    fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(theme) = var("MSH_THEME") {
            self.theme = theme;
        }

        if let Some(editor) = var("MSH_EDITOR") {
            self.editor_mode = editor;
        }

        if let Some(history) = var("MSH_HISTORY") {
            self.history_file = PathBuf::from(history);
        }

        if let Some(level) = var("MSH_LOG_LEVEL") {
            self.logger_level = level;
        }

        if let Some(dir) = var("MSH_LOG_DIR") {
            self.logger_dir = PathBuf::from(dir);
        }

        if let Some(flag) = var("MSH_LOG_STDERR") {
            self.logger_stderr = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}
