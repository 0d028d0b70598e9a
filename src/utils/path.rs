use std::env;

use log::error;

/// Longest working directory the prompt will show.
pub const MAX_PATH_SIZE: usize = 1024;

pub const PROMPT_SEPARATOR: &str = " > ";

const PATH_TOO_LONG: &str = "Max path size exceeded";

pub fn current_dir() -> Option<String> {
    let current_dir = match env::current_dir() {
        Ok(x) => x,
        Err(e) => {
            error!("msh: PROMPT: env current_dir error: {}", e);
            return None;
        }
    };
    Some(current_dir.to_string_lossy().into_owned())
}

/// Prompt text for `dir`: the path plus separator, or a fallback when the
/// directory is unknown or too long to show.
pub fn prompt_text(dir: Option<&str>) -> String {
    match dir {
        Some(dir) if dir.len() < MAX_PATH_SIZE => format!("{}{}", dir, PROMPT_SEPARATOR),
        _ => format!("{}{}", PATH_TOO_LONG, PROMPT_SEPARATOR),
    }
}
