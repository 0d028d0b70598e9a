use std::env;
use std::io::Write;

use log::debug;

use crate::shell::error::{ShellError, ShellResult};

/// Whether the REPL should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Continue,
    Terminate,
}

pub type BuiltinFn = fn(&[&str], &mut dyn Write) -> ShellResult<Continuation>;

pub struct Builtin {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: BuiltinFn,
}

impl Builtin {
    pub fn run(&self, args: &[&str], out: &mut dyn Write) -> ShellResult<Continuation> {
        (self.handler)(args, out)
    }
}

/// 内建命令表, 顺序即 help 输出顺序
pub static BUILTINS: [Builtin; 4] = [
    Builtin {
        name: "cd",
        description: "change the working directory",
        handler: builtin_cd,
    },
    Builtin {
        name: "help",
        description: "list built-in commands",
        handler: builtin_help,
    },
    Builtin {
        name: "exit",
        description: "terminate shell; same as \"quit\"",
        handler: builtin_exit,
    },
    Builtin {
        name: "quit",
        description: "terminate shell; same as \"exit\"",
        handler: builtin_exit,
    },
];

pub fn find(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

fn builtin_cd(args: &[&str], _out: &mut dyn Write) -> ShellResult<Continuation> {
    let path = args.get(1).ok_or(ShellError::MissingArgument("cd"))?;
    env::set_current_dir(path).map_err(|source| ShellError::ChangeDir {
        path: path.to_string(),
        source,
    })?;
    debug!("切换工作目录: {}", path);
    Ok(Continuation::Continue)
}

fn builtin_help(_args: &[&str], out: &mut dyn Write) -> ShellResult<Continuation> {
    writeln!(out, "\nmsh\n")?;
    writeln!(out, "Following cmds are built in:\n")?;
    for builtin in &BUILTINS {
        writeln!(out, "\t{} - {}", builtin.name, builtin.description)?;
    }
    writeln!(out, "\nUse the man command for information on other programs.\n")?;
    Ok(Continuation::Continue)
}

fn builtin_exit(_args: &[&str], _out: &mut dyn Write) -> ShellResult<Continuation> {
    Ok(Continuation::Terminate)
}

/// Serialises tests that touch the process working directory.
#[cfg(test)]
pub(crate) fn lock_current_dir() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        let names: Vec<&str> = BUILTINS.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["cd", "help", "exit", "quit"]);
    }

    #[test]
    fn test_find() {
        assert!(find("cd").is_some());
        assert!(find("quit").is_some());
        assert!(find("ls").is_none());
        assert!(find("CD").is_none());
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_exit_and_quit_terminate() {
        let mut out = Vec::new();
        for name in ["exit", "quit"] {
            let builtin = find(name).unwrap();
            assert_eq!(
                builtin.run(&[name], &mut out).unwrap(),
                Continuation::Terminate
            );
            assert_eq!(
                builtin.run(&[name, "1", "extra"], &mut out).unwrap(),
                Continuation::Terminate
            );
        }
        assert!(out.is_empty());
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_help_lists_builtins() {
        let mut out = Vec::new();
        let flow = builtin_help(&["help"], &mut out).unwrap();
        assert_eq!(flow, Continuation::Continue);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Following cmds are built in:"));
        assert!(text.contains("\tcd - change the working directory\n"));
        assert!(text.contains("\tquit - terminate shell; same as \"exit\"\n"));
        let cd = text.find("\tcd").unwrap();
        let help = text.find("\thelp").unwrap();
        let exit = text.find("\texit").unwrap();
        assert!(cd < help && help < exit);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_cd_without_argument() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        let err = builtin_cd(&["cd"], &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ShellError::MissingArgument("cd")));
        assert_eq!(err.to_string(), "expected argument to \"cd\"");
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_cd_to_missing_directory() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        let err = builtin_cd(&["cd", "/nonexistent/msh-test"], &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ShellError::ChangeDir { .. }));
        assert!(err.to_string().starts_with("cd: /nonexistent/msh-test: "));
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn test_cd_changes_directory() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().canonicalize().unwrap();

        let arg = target.to_str().unwrap();
        let flow = builtin_cd(&["cd", arg], &mut Vec::new()).unwrap();
        let after = env::current_dir().unwrap();
        env::set_current_dir(&before).unwrap();

        assert_eq!(flow, Continuation::Continue);
        assert_eq!(after, target);
    }
}
