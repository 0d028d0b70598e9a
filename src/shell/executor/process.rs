use std::ffi::{CStr, CString};
use std::io::{self, Write};
use std::ptr;

use log::{debug, error};
use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait::waitpid;
use nix::sys::wait::WaitPidFlag as WF;
use nix::sys::wait::WaitStatus as WS;
use nix::unistd::{close, dup2, fork, ForkResult, Pid};

use crate::shell::error::{ShellError, ShellResult};
use crate::shell::parser::{Command, OutputRedirection};

/// How a foreground child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    Exited(i32),
    Signaled(i32),
}

impl ExitKind {
    /// Shell-style status: the exit code, or 128 + signal.
    pub fn status(&self) -> i32 {
        match *self {
            ExitKind::Exited(code) => code,
            ExitKind::Signaled(sig) => 128 + sig,
        }
    }
}

/// Everything execvp needs, built before forking so the child never allocates.
struct ExecPlan {
    argv: Vec<CString>,
    // NULL-terminated; points into `argv`, whose buffers never move
    argv_ptrs: Vec<*const libc::c_char>,
    stdout_file: Option<CString>,
}

impl ExecPlan {
    fn new(command: &Command<'_>) -> ShellResult<Self> {
        let argv = command
            .args
            .iter()
            .map(|arg| to_cstring(arg))
            .collect::<ShellResult<Vec<_>>>()?;
        let stdout_file = match command.output {
            OutputRedirection::Inherit => None,
            OutputRedirection::ToFile(path) => Some(to_cstring(path)?),
            OutputRedirection::MissingTarget => return Err(ShellError::MissingRedirectTarget),
        };
        let argv_ptrs = argv
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();
        Ok(Self {
            argv,
            argv_ptrs,
            stdout_file,
        })
    }
}

fn to_cstring(s: &str) -> ShellResult<CString> {
    CString::new(s).map_err(|_| ShellError::NulByte(s.to_string()))
}

/// Fork, exec `command` in the child and block until it exits or is killed.
pub fn spawn_and_wait(command: &Command<'_>) -> ShellResult<ExitKind> {
    let plan = ExecPlan::new(command)?;
    if plan.argv.is_empty() {
        return Ok(ExitKind::Exited(0));
    }

    // 避免缓冲区内容被子进程重复输出
    io::stdout().flush()?;
    io::stderr().flush()?;

    // SAFETY: the child only calls async-signal-safe functions before exec/_exit.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => exec_child(&plan),
        Ok(ForkResult::Parent { child }) => {
            debug!("启动子进程 {}: {:?}", child, command.args);
            wait_foreground(child)
        }
        Err(e) => Err(ShellError::Fork(e)),
    }
}

fn exec_child(plan: &ExecPlan) -> ! {
    if let Some(path) = &plan.stdout_file {
        if let Err(e) = redirect_stdout(path) {
            child_fail(e);
        }
    }

    // SAFETY: both pointers come from the plan and argv_ptrs ends with NULL.
    unsafe {
        libc::execvp(plan.argv[0].as_ptr(), plan.argv_ptrs.as_ptr());
    }
    child_fail(Errno::last())
}

fn redirect_stdout(path: &CStr) -> Result<(), Errno> {
    let fd = open(
        path,
        OFlag::O_CREAT | OFlag::O_CLOEXEC | OFlag::O_WRONLY | OFlag::O_TRUNC,
        Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IROTH,
    )?;
    dup2(fd, libc::STDOUT_FILENO)?;
    close(fd)?;
    Ok(())
}

/// Report `errno` on stderr and leave the child with EXIT_FAILURE.
fn child_fail(errno: Errno) -> ! {
    let parts: [&[u8]; 3] = [b"msh: ", errno.desc().as_bytes(), b"\n"];
    for part in parts {
        // SAFETY: plain write(2) on fd 2 with a valid buffer.
        unsafe {
            libc::write(libc::STDERR_FILENO, part.as_ptr().cast(), part.len());
        }
    }
    // SAFETY: _exit skips atexit handlers and stdio flushing inherited from the parent.
    unsafe { libc::_exit(libc::EXIT_FAILURE) }
}

/// Wait for `pid`, ignoring stop/continue notifications.
pub fn wait_foreground(pid: Pid) -> ShellResult<ExitKind> {
    loop {
        match waitpid(pid, Some(WF::WUNTRACED)) {
            Ok(WS::Exited(_, code)) => return Ok(ExitKind::Exited(code)),
            Ok(WS::Signaled(_, sig, _core_dumped)) => return Ok(ExitKind::Signaled(sig as i32)),
            Ok(WS::Stopped(_, sig)) => {
                debug!("子进程 {} 被暂停 ({:?}), 继续等待", pid, sig);
            }
            Ok(other) => {
                debug!("忽略等待状态: {:?}", other);
            }
            Err(Errno::EINTR) => {}
            Err(e) => {
                error!("等待子进程 {} 失败: {}", pid, e);
                return Err(ShellError::Wait(e));
            }
        }
    }
}
